pub mod report;
pub mod sync;

pub use sync::{is_cache_eligible, merge_scores, SyncService};

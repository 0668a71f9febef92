mod collection;
pub mod models;
mod progress;
pub mod reconcile;
mod selection;
pub mod status;

pub use collection::{stage_count, MatchDataSet, MatchExport, MatchOutcome};
pub use models::*;
pub use progress::{SyncProgress, SyncTally};
pub use reconcile::{latest_for_shooter, reconcile, reconcile_with_history, ReconciledStageResult, StageHistory};
pub use selection::select_matches;
pub use status::{competition_status, Completion, MatchStatus, ShooterDirectory, ShooterEntry};

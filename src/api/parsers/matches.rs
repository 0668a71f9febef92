use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use crate::domain::Match;

/// Decodes the match listing entry by entry; the listing key becomes the id.
/// Malformed entries are skipped so one bad match cannot hide the others.
pub fn parse_match_listing(raw: HashMap<String, Value>) -> HashMap<String, Match> {
    raw.into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<Match>(value) {
            Ok(mut event) => {
                event.id = id.clone();
                Some((id, event))
            }
            Err(e) => {
                warn!("Skipping malformed match {}: {}", id, e);
                None
            }
        })
        .collect()
}

use serde::{Deserialize, Serialize};

use crate::domain::ScoreRecord;

/// Score listing of one match
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoreBundleResponse {
    /// Location of a larger snapshot of older submissions
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub scores: Option<Vec<ScoreRecord>>,
}

impl ScoreBundleResponse {
    pub fn base_url(&self) -> Option<&str> {
        self.base.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn into_scores(self) -> Vec<ScoreRecord> {
        self.scores.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_base_is_ignored() {
        let response: ScoreBundleResponse =
            serde_json::from_value(json!({"base": "", "scores": null})).unwrap();

        assert!(response.base_url().is_none());
        assert!(response.into_scores().is_empty());
    }

    #[test]
    fn test_base_and_scores() {
        let response: ScoreBundleResponse = serde_json::from_value(json!({
            "base": "https://storage.example/base.json",
            "scores": [{"id": 1, "stageIdx": 1, "shooterId": 2, "timestamp": 3}]
        }))
        .unwrap();

        assert_eq!(response.base_url(), Some("https://storage.example/base.json"));
        assert_eq!(response.into_scores().len(), 1);
    }
}

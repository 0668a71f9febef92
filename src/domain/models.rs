use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Identifier as sent by the results service.
///
/// Firestore documents use string keys, older exports use plain numbers.
/// Both are accepted and kept in their original JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

/// Calendar date of a match, as the service sends it (no timezone)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl MatchDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for MatchDate {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month(), date.day())
    }
}

impl fmt::Display for MatchDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

/// Match metadata from the results service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Filled from the key of the match listing
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(rename = "ipscLevel", default, deserialize_with = "null_as_default")]
    pub level: i32,
    pub start_date: MatchDate,
    pub end_date: MatchDate,
    /// Stage identifiers, in stage order
    #[serde(default, deserialize_with = "null_as_default")]
    pub stages: Vec<String>,
}

impl Match {
    pub fn is_ranked(&self) -> bool {
        self.level > 0
    }
}

/// One course of fire within a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub inactive: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Submission time exactly as the service sent it, integral or fractional.
///
/// Serializes back to the same JSON number so cached bundles keep it intact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timestamp(Number);

impl Timestamp {
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }

    /// Newest first; fractional parts take part in the comparison
    pub fn cmp_newest_first(&self, other: &Timestamp) -> std::cmp::Ordering {
        other.as_f64().total_cmp(&self.as_f64())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp(Number::from(0))
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Timestamp(Number::from(value))
    }
}

/// Shooter registration within one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shooter {
    /// Match-scoped identifier, referenced by `ScoreRecord::shooter_id`
    pub id: RecordId,
    /// Identifier stable across matches
    pub public_id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A single score submission for one shooter on one stage.
///
/// The service may resend a submission verbatim, edit it later (new
/// timestamp, new content) or soft-delete it. Everything that is not
/// modelled explicitly (hits, penalties, time, ...) is kept in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// 1-based stage number
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage_idx: u32,
    pub shooter_id: RecordId,
    /// Submission time, used for ordering
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Timestamp,
    /// Soft delete; absent and `false` are kept apart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dq: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ro_signature: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ScoreRecord {
    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }

    pub fn is_dq(&self) -> bool {
        self.dq.unwrap_or(false)
    }

    /// Equality that ignores bookkeeping: `id`, `editable`, `modified`,
    /// `timestamp`, `roSignature` and `signature`.
    pub fn same_submission(&self, other: &ScoreRecord) -> bool {
        self.stage_idx == other.stage_idx
            && self.shooter_id == other.shooter_id
            && self.deleted == other.deleted
            && self.dq == other.dq
            && self.fields == other.fields
    }
}

/// Cacheable unit for one match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBundle {
    #[serde(default)]
    pub shooters: Vec<Shooter>,
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl MatchBundle {
    pub fn shooter_by_public_id(&self, public_id: &RecordId) -> Option<&Shooter> {
        self.shooters.iter().find(|s| &s.public_id == public_id)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let timestamp = match value {
        Some(Value::Number(n)) => Some(n),
        Some(Value::String(s)) => s.trim().parse::<Number>().ok(),
        _ => None,
    };
    Ok(timestamp.map(Timestamp).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_record_keeps_unknown_fields() {
        let record: ScoreRecord = serde_json::from_value(json!({
            "id": "abc",
            "stageIdx": 2,
            "shooterId": 17,
            "timestamp": 1700000000000i64,
            "roSignature": "x",
            "hits": {"A": 5, "C": 1},
            "time": 12.34
        }))
        .unwrap();

        assert_eq!(record.id, Some(RecordId::from("abc")));
        assert_eq!(record.shooter_id, RecordId::Number(17));
        assert_eq!(record.stage_idx, 2);
        assert!(!record.is_deleted());
        assert!(!record.is_dq());
        assert_eq!(record.fields.get("time"), Some(&json!(12.34)));
        assert!(!record.fields.contains_key("roSignature"));
    }

    #[test]
    fn test_score_record_lenient_nulls_and_float_timestamp() {
        let record: ScoreRecord = serde_json::from_value(json!({
            "shooterId": "s1",
            "stageIdx": 1,
            "timestamp": 123.9,
            "deleted": null,
            "dq": null
        }))
        .unwrap();

        assert_eq!(record.timestamp.as_f64(), 123.9);
        assert!(!record.is_deleted());
        assert!(!record.is_dq());
    }

    #[test]
    fn test_fractional_timestamp_survives_serialization() {
        let record: ScoreRecord = serde_json::from_value(json!({
            "stageIdx": 1, "shooterId": "s", "timestamp": 100.7
        }))
        .unwrap();
        let millis: ScoreRecord = serde_json::from_value(json!({
            "stageIdx": 1, "shooterId": "s", "timestamp": 1700000000000i64
        }))
        .unwrap();

        let text = serde_json::to_value(&record).unwrap();
        assert_eq!(text["timestamp"], json!(100.7));
        assert_eq!(serde_json::to_value(&millis).unwrap()["timestamp"], json!(1700000000000i64));
        assert!(!text.as_object().unwrap().contains_key("dq"));
    }

    #[test]
    fn test_explicit_false_flags_differ_from_absent_ones() {
        let plain: ScoreRecord = serde_json::from_value(json!({
            "stageIdx": 1, "shooterId": "s", "timestamp": 1, "hits": 5
        }))
        .unwrap();
        let explicit: ScoreRecord = serde_json::from_value(json!({
            "stageIdx": 1, "shooterId": "s", "timestamp": 2, "hits": 5, "dq": false
        }))
        .unwrap();

        assert!(!explicit.is_dq());
        assert!(!plain.same_submission(&explicit));
    }

    #[test]
    fn test_same_submission_ignores_bookkeeping() {
        let a: ScoreRecord = serde_json::from_value(json!({
            "id": 1, "stageIdx": 1, "shooterId": "s", "timestamp": 100,
            "editable": true, "modified": 5, "signature": "a", "hits": 5
        }))
        .unwrap();
        let b: ScoreRecord = serde_json::from_value(json!({
            "id": 2, "stageIdx": 1, "shooterId": "s", "timestamp": 200,
            "editable": false, "roSignature": "z", "hits": 5
        }))
        .unwrap();
        let edited: ScoreRecord = serde_json::from_value(json!({
            "id": 3, "stageIdx": 1, "shooterId": "s", "timestamp": 300, "hits": 6
        }))
        .unwrap();

        assert!(a.same_submission(&b));
        assert!(!a.same_submission(&edited));
    }

    #[test]
    fn test_match_defaults_missing_stage_list() {
        let event: Match = serde_json::from_value(json!({
            "title": "Spring Cup",
            "countryCode": "IL",
            "ipscLevel": 2,
            "startDate": {"year": 2024, "month": 3, "day": 1},
            "endDate": {"year": 2024, "month": 3, "day": 2},
            "stages": null
        }))
        .unwrap();

        assert!(event.stages.is_empty());
        assert!(event.is_ranked());
        assert_eq!(event.end_date.to_naive(), NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn test_match_dates_order_chronologically() {
        assert!(MatchDate::new(2023, 12, 31) < MatchDate::new(2024, 1, 1));
        assert!(MatchDate::new(2024, 2, 9) < MatchDate::new(2024, 2, 10));
        assert_eq!(MatchDate::new(2024, 2, 9).to_string(), "9/2/2024");
    }

    #[test]
    fn test_bundle_round_trips_through_json() {
        let bundle: MatchBundle = serde_json::from_value(json!({
            "shooters": [{"id": 1, "publicId": "P-1", "name": "Dana", "division": "Production"}],
            "scores": [{"id": "r1", "stageIdx": 1, "shooterId": 1, "timestamp": 5, "hits": 3}],
            "stages": [{"id": "st1", "idx": 1, "inactive": true, "name": "Bay 1"}]
        }))
        .unwrap();

        let text = serde_json::to_string(&bundle).unwrap();
        let restored: MatchBundle = serde_json::from_str(&text).unwrap();

        assert_eq!(restored, bundle);
        assert!(restored.stages[0].inactive);
        assert!(restored.shooter_by_public_id(&RecordId::from("P-1")).is_some());
    }
}

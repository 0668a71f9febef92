use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct StoredBundle {
    pub cache_key: String,
    pub payload: String,
    pub stored_at: NaiveDateTime,
}

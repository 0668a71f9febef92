use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::StoredBundle;

pub fn find_by_key(conn: &mut DbConn, cache_key: &str) -> rusqlite::Result<Option<StoredBundle>> {
    let sql = "SELECT cache_key, payload, stored_at FROM match_bundles WHERE cache_key = ?1";

    conn.query_row(sql, params![cache_key], parse_stored_bundle_row)
        .optional()
}

pub fn upsert_payload(conn: &mut DbConn, cache_key: &str, payload: &str) -> rusqlite::Result<()> {
    let sql = "INSERT INTO match_bundles (cache_key, payload) VALUES (?1, ?2) \
               ON CONFLICT(cache_key) DO UPDATE SET payload = excluded.payload, stored_at = CURRENT_TIMESTAMP";

    conn.execute(sql, params![cache_key, payload]).map(|_| ())
}

pub fn count(conn: &mut DbConn) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM match_bundles", [], |row| row.get(0))
}

fn parse_stored_bundle_row(row: &rusqlite::Row) -> rusqlite::Result<StoredBundle> {
    Ok(StoredBundle {
        cache_key: row.get(0)?,
        payload: row.get(1)?,
        stored_at: row.get(2)?,
    })
}

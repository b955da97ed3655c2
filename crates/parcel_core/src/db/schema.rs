use super::DbResult;
use rusqlite::Connection;

/// Name of the only table the parcel store touches.
pub const PARCEL_TABLE: &str = "parcel";

// AUTOINCREMENT keeps numbers of deleted parcels from being handed out again.
const PARCEL_SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS parcel (
    number     INTEGER PRIMARY KEY AUTOINCREMENT,
    client     INTEGER NOT NULL,
    status     TEXT    NOT NULL,
    address    TEXT    NOT NULL,
    created_at TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS parcel_client_idx ON parcel (client);
";

/// Creates the `parcel` table and its client index when missing.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(PARCEL_SCHEMA_SQL)?;
    Ok(())
}

use rusqlite::Connection;
use tracing::debug;

use super::error::StoreError;

/// Current schema version, stored in `PRAGMA user_version`.
pub(crate) const SCHEMA_VERSION: i64 = 1;

/// One record per word. The autoincrement id only fixes the scan order
/// of `load_all` (insertion order); it carries no meaning of its own.
/// The blob is the postcard encoding of the word's transition row.
const SCHEMA_SQL: &str = "
CREATE TABLE words (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    word TEXT NOT NULL UNIQUE,
    transitions BLOB NOT NULL
);
";

/// Creates the schema on a first-ever open.
///
/// Guarded by `user_version`, so re-running against an initialized
/// database is a no-op. A version bump only triggers table creation;
/// there is no data migration.
pub(crate) fn initialize(conn: &Connection) -> Result<(), StoreError> {
	let version: i64 = conn
		.query_row("PRAGMA user_version", [], |row| row.get(0))
		.map_err(|e| StoreError::Schema { message: e.to_string() })?;

	if version < SCHEMA_VERSION {
		conn.execute_batch(SCHEMA_SQL)
			.map_err(|e| StoreError::Schema { message: e.to_string() })?;
		conn.pragma_update(None, "user_version", SCHEMA_VERSION)
			.map_err(|e| StoreError::Schema { message: e.to_string() })?;
		debug!("word store schema created at version {SCHEMA_VERSION}");
	}

	Ok(())
}

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{Connection, params};
use tracing::{debug, warn};

use crate::model::transition_row::TransitionRow;

use super::error::StoreError;
use super::schema;

/// Connection lifecycle of the store.
///
/// The opening phase is the window in which the state lock is held
/// during a connection attempt; holding the lock is what guarantees a
/// single in-flight open. Callers that arrive during that window block,
/// then observe either the one `Open` connection or the one recorded
/// `Failed` error.
enum ConnectionState {
	Closed,
	Open(Connection),
	Failed(StoreError),
}

/// Durable mapping from a word to its transition row.
///
/// The store owns a single SQLite connection, established lazily on the
/// first operation and reused for the lifetime of the store. Records are
/// keyed by word and hold the postcard-encoded [`TransitionRow`]; they
/// are created on first persist, overwritten with the caller-supplied
/// merged row on every later persist, and never deleted.
///
/// # Responsibilities
/// - Manage the connection lifecycle (closed, open, failed)
/// - Initialize the versioned schema exactly once per database
/// - Scan all records at startup, in insertion order
/// - Write one merged row per transaction
///
/// # Notes
/// - A failed open is recorded and replayed to every subsequent caller;
///   the store never retries on its own. Retrying means constructing a
///   new store.
/// - The caller supplies already-merged rows, so no operation ever
///   reads and writes across two transactions.
pub struct WordStore {
	/// Database file location; `None` keeps the store in memory.
	path: Option<PathBuf>,
	state: Mutex<ConnectionState>,
}

impl WordStore {
	/// Creates a store backed by a database file.
	///
	/// The connection is not opened here; it is established by the first
	/// operation (or an explicit [`WordStore::open`]).
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self {
			path: Some(path.as_ref().to_path_buf()),
			state: Mutex::new(ConnectionState::Closed),
		}
	}

	/// Creates a store backed by an in-memory database.
	///
	/// Nothing survives the store itself; intended for tests and
	/// throwaway sessions.
	pub fn in_memory() -> Self {
		Self {
			path: None,
			state: Mutex::new(ConnectionState::Closed),
		}
	}

	/// Ensures the connection is open and the schema initialized.
	///
	/// Idempotent: once open, later calls return immediately; once
	/// failed, later calls return the recorded error.
	pub fn open(&self) -> Result<(), StoreError> {
		self.with_conn(|_| Ok(()))
	}

	/// Reads every stored record via a full forward scan.
	///
	/// Records come back in insertion order (the autoincrement id), which
	/// is stable but not semantically significant. Used once at startup
	/// to repopulate the in-memory model; because the scan either returns
	/// every record or fails wholesale, a startup failure leaves the
	/// model empty rather than partially populated.
	pub fn load_all(&self) -> Result<Vec<(String, TransitionRow)>, StoreError> {
		self.with_conn(|conn| {
			let mut stmt = conn
				.prepare("SELECT word, transitions FROM words ORDER BY id")
				.map_err(|e| StoreError::Transaction { message: e.to_string() })?;

			let scanned = stmt
				.query_map([], |row| {
					Ok((row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?))
				})
				.map_err(|e| StoreError::Transaction { message: e.to_string() })?;

			let mut records = Vec::new();
			for item in scanned {
				let (word, bytes) =
					item.map_err(|e| StoreError::Transaction { message: e.to_string() })?;
				let row = postcard::from_bytes(&bytes).map_err(|e| StoreError::Transaction {
					message: format!("decode row for '{word}': {e}"),
				})?;
				records.push((word, row));
			}

			debug!("loaded {} words from the store", records.len());
			Ok(records)
		})
	}

	/// Writes the merged row for `word` in a single transaction.
	///
	/// Either the full row write is visible or none of it is. The caller
	/// supplies the already-merged row (the model's current row for the
	/// word), so the store performs no read-modify-write of its own and
	/// lost updates cannot occur within a session.
	pub fn merge_word(&self, word: &str, row: &TransitionRow) -> Result<(), StoreError> {
		self.with_conn(|conn| {
			let bytes = postcard::to_stdvec(row).map_err(|e| StoreError::Transaction {
				message: format!("encode row for '{word}': {e}"),
			})?;

			let tx = conn
				.unchecked_transaction()
				.map_err(|e| StoreError::Transaction { message: e.to_string() })?;
			tx.execute(
				"INSERT INTO words (word, transitions) VALUES (?1, ?2)
				 ON CONFLICT(word) DO UPDATE SET transitions = excluded.transitions",
				params![word, bytes],
			)
			.map_err(|e| StoreError::Transaction { message: e.to_string() })?;
			tx.commit()
				.map_err(|e| StoreError::Transaction { message: e.to_string() })?;

			Ok(())
		})
	}

	/// Runs `f` against the open connection, opening it first if needed.
	fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
	where
		F: FnOnce(&Connection) -> Result<T, StoreError>,
	{
		let mut state = self.state.lock().map_err(|_| StoreError::Connection {
			message: "connection state lock poisoned".to_owned(),
		})?;

		if matches!(*state, ConnectionState::Closed) {
			*state = match self.connect() {
				Ok(conn) => ConnectionState::Open(conn),
				Err(error) => {
					warn!("word store open failed: {error}");
					ConnectionState::Failed(error)
				}
			};
		}

		match &*state {
			ConnectionState::Open(conn) => f(conn),
			ConnectionState::Failed(error) => Err(error.clone()),
			// Settled to Open or Failed just above
			ConnectionState::Closed => unreachable!(),
		}
	}

	/// Opens the underlying database and initializes the schema.
	fn connect(&self) -> Result<Connection, StoreError> {
		let conn = match &self.path {
			Some(path) => Connection::open(path),
			None => Connection::open_in_memory(),
		}
		.map_err(|e| StoreError::Connection { message: e.to_string() })?;

		schema::initialize(&conn)?;
		debug!("word store opened");
		Ok(conn)
	}
}

use thiserror::Error;

/// Failures surfaced by the word store.
///
/// Errors propagate to the immediate caller of the operation that
/// triggered them; the store never retries on its own. The variants keep
/// a message rather than the underlying error so a recorded failure can
/// be replayed to every caller that finds the store in the failed state.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
	/// The database could not be opened.
	#[error("unable to open word store: {message}")]
	Connection { message: String },

	/// Versioned schema initialization failed after the connection opened.
	#[error("word store schema initialization failed: {message}")]
	Schema { message: String },

	/// A read, write, or row encode/decode failed on an open connection.
	#[error("word store transaction failed: {message}")]
	Transaction { message: String },
}

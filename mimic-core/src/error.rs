use std::fmt;

/// Errors raised while configuring the engine or loading its corpus.
///
/// None of these occur during ingestion or generation: malformed text only
/// yields fewer transitions, and generation outcomes use [`GenerateError`].
#[derive(Debug)]
pub enum MimicError {
	Io(std::io::Error),
	Http(reqwest::Error),
	Json(serde_json::Error),
	Cache(postcard::Error),
	/// The tracker answered with a non-success status.
	Status { status: u16, url: String },
	/// The chain order must be at least 1.
	InvalidOrder,
	/// Two chains of different order cannot be merged.
	OrderMismatch { expected: usize, found: usize },
	/// The tracker password could not be read from the terminal.
	Password(std::io::Error),
	/// A setting needed for the requested operation was not provided.
	Missing(&'static str),
	/// A training worker stopped before reporting its partial chain.
	Worker(usize),
}

impl fmt::Display for MimicError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MimicError::Io(e) => write!(f, "I/O error: {e}"),
			MimicError::Http(e) => write!(f, "HTTP error: {e}"),
			MimicError::Json(e) => write!(f, "JSON error: {e}"),
			MimicError::Cache(e) => write!(f, "cache encoding error: {e}"),
			MimicError::Password(e) => write!(f, "could not read the tracker password: {e}"),
			MimicError::Status { status, url } => write!(f, "{url} answered with status {status}"),
			MimicError::InvalidOrder => write!(f, "order must be >= 1"),
			MimicError::OrderMismatch { expected, found } => {
				write!(f, "order mismatch: expected {expected}, found {found}")
			}
			MimicError::Missing(setting) => write!(f, "missing setting: {setting}"),
			MimicError::Worker(chunk) => write!(f, "training worker for chunk {chunk} failed"),
		}
	}
}

impl std::error::Error for MimicError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			MimicError::Io(e) => Some(e),
			MimicError::Http(e) => Some(e),
			MimicError::Json(e) => Some(e),
			MimicError::Cache(e) => Some(e),
			MimicError::Password(e) => Some(e),
			_ => None,
		}
	}
}

impl From<std::io::Error> for MimicError {
	fn from(e: std::io::Error) -> Self {
		MimicError::Io(e)
	}
}

impl From<reqwest::Error> for MimicError {
	fn from(e: reqwest::Error) -> Self {
		MimicError::Http(e)
	}
}

impl From<serde_json::Error> for MimicError {
	fn from(e: serde_json::Error) -> Self {
		MimicError::Json(e)
	}
}

impl From<postcard::Error> for MimicError {
	fn from(e: postcard::Error) -> Self {
		MimicError::Cache(e)
	}
}

pub type Result<T> = std::result::Result<T, MimicError>;

/// Outcome of a generation request that produced no sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
	/// Nothing was ever ingested for this author.
	UnknownAuthor(String),
	/// Every attempt was rejected before the configured cap was reached.
	Unsatisfiable { author: String, attempts: usize },
}

impl fmt::Display for GenerateError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GenerateError::UnknownAuthor(author) => write!(f, "unknown author '{author}'"),
			GenerateError::Unsatisfiable { author, attempts } => write!(
				f,
				"no acceptable sentence for '{author}' after {attempts} attempts"
			),
		}
	}
}

impl std::error::Error for GenerateError {}

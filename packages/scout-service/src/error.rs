use crate::signal::SignalType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single signal search that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalFailure {
	pub signal: SignalType,
	pub message: String,
}
impl std::fmt::Display for SignalFailure {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.signal.label(), self.message)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("{}", join_failures(.failures))]
	SearchFailure { failures: Vec<SignalFailure> },
	#[error("Failed to rerank documents: {message}")]
	RerankFailure { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Qdrant error: {message}")]
	Qdrant { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
}
impl Error {
	/// The underlying message without the variant prefix, used when the error is folded into a
	/// higher-level failure.
	pub fn into_message(self) -> String {
		match self {
			Self::Storage { message } | Self::Qdrant { message } | Self::Provider { message } =>
				message,
			other => other.to_string(),
		}
	}
}

impl From<scout_storage::Error> for Error {
	fn from(err: scout_storage::Error) -> Self {
		match err {
			scout_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			scout_storage::Error::Qdrant(inner) => Self::Qdrant { message: inner.to_string() },
		}
	}
}

impl From<scout_providers::Error> for Error {
	fn from(err: scout_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

fn join_failures(failures: &[SignalFailure]) -> String {
	failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

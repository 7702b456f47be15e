use scholar_domain::{MatchSource, ValidationError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid candidate record: {0}")]
	Validation(#[from] ValidationError),
	#[error("The {matcher} matcher timed out.")]
	UpstreamTimeout { matcher: MatchSource },
	#[error("The {matcher} matcher is unavailable: {message}")]
	UpstreamUnavailable { matcher: MatchSource, message: String },
	#[error("Embedding failed: {message}")]
	EmbeddingFailure { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl Error {
	/// Whether the error only removes one matcher from the result instead of failing the request.
	pub fn is_partial(&self) -> bool {
		matches!(
			self,
			Self::UpstreamTimeout { .. }
				| Self::UpstreamUnavailable { .. }
				| Self::EmbeddingFailure { .. }
		)
	}
}

impl From<scholar_storage::Error> for Error {
	fn from(err: scholar_storage::Error) -> Self {
		match err {
			scholar_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			scholar_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<scholar_providers::Error> for Error {
	fn from(err: scholar_providers::Error) -> Self {
		if err.is_timeout() {
			return Self::EmbeddingFailure { message: "Embedding request timed out.".to_string() };
		}

		Self::EmbeddingFailure { message: err.to_string() }
	}
}

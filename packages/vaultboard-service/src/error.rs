pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl Error {
	/// The message without the category prefix, for response bodies.
	pub fn message(&self) -> &str {
		match self {
			Self::InvalidRequest { message }
			| Self::NotFound { message }
			| Self::Conflict { message }
			| Self::Storage { message }
			| Self::Internal { message } => message,
		}
	}
}

impl From<vaultboard_vault::Error> for Error {
	fn from(err: vaultboard_vault::Error) -> Self {
		match err {
			vaultboard_vault::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			vaultboard_vault::Error::NotFound(message) => Self::NotFound { message },
			vaultboard_vault::Error::Conflict(message) => Self::Conflict { message },
			err @ vaultboard_vault::Error::Io { .. } => Self::Storage { message: err.to_string() },
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
	#[error("Not found: {0}")]
	NotFound(String),
}
impl Error {
	/// True when the store returned rows whose shape did not match the projection.
	pub fn is_decode(&self) -> bool {
		match self {
			Self::Sqlx(err) => matches!(
				err,
				sqlx::Error::ColumnDecode { .. }
					| sqlx::Error::ColumnNotFound(_)
					| sqlx::Error::ColumnIndexOutOfBounds { .. }
					| sqlx::Error::Decode(_)
					| sqlx::Error::TypeNotFound { .. }
			),
			_ => false,
		}
	}
}

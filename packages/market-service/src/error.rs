use std::fmt::Display;

use market_domain::UnknownStatus;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every variant names the operation that failed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request to {operation}: {message}")]
	InvalidRequest { operation: &'static str, message: String },
	#[error("Not found in {operation}: {message}")]
	NotFound { operation: &'static str, message: String },
	#[error("Query failed in {operation}: {message}")]
	QueryFailure { operation: &'static str, message: String },
	#[error("Unexpected row shape in {operation}: {message}")]
	ScanFailure { operation: &'static str, message: String },
	#[error("Transaction failed in {operation}: {message}")]
	TransactionFailure { operation: &'static str, message: String },
	#[error("{operation} cancelled after {timeout_ms} ms.")]
	Cancelled { operation: &'static str, timeout_ms: u64 },
}
impl Error {
	pub(crate) fn storage(operation: &'static str, err: market_storage::Error) -> Self {
		match err {
			err if err.is_decode() => Self::ScanFailure { operation, message: err.to_string() },
			market_storage::Error::NotFound(message) => Self::NotFound { operation, message },
			market_storage::Error::InvalidArgument(message) =>
				Self::InvalidRequest { operation, message },
			err => Self::QueryFailure { operation, message: err.to_string() },
		}
	}

	pub(crate) fn scan(operation: &'static str, err: UnknownStatus) -> Self {
		Self::ScanFailure { operation, message: err.to_string() }
	}

	pub(crate) fn transaction(operation: &'static str, err: impl Display) -> Self {
		Self::TransactionFailure { operation, message: err.to_string() }
	}

	pub(crate) fn invalid(operation: &'static str, message: impl Into<String>) -> Self {
		Self::InvalidRequest { operation, message: message.into() }
	}

	pub(crate) fn not_found(operation: &'static str, message: impl Into<String>) -> Self {
		Self::NotFound { operation, message: message.into() }
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}

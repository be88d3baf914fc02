use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Moderation state of a catalog entry. Only [`SubmissionStatus::Approved`] entries are
/// visible to listing and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
	Pending,
	Approved,
	Rejected,
}
impl SubmissionStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "PENDING",
			Self::Approved => "APPROVED",
			Self::Rejected => "REJECTED",
		}
	}

	pub fn is_visible(self) -> bool {
		matches!(self, Self::Approved)
	}
}
impl fmt::Display for SubmissionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for SubmissionStatus {
	type Err = UnknownStatus;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"PENDING" => Ok(Self::Pending),
			"APPROVED" => Ok(Self::Approved),
			"REJECTED" => Ok(Self::Rejected),
			other => Err(UnknownStatus(other.to_string())),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown submission status {0:?}.")]
pub struct UnknownStatus(pub String);

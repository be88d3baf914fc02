use serde::{Deserialize, Serialize};

/// Primary ordering for search results. Anything unrecognized ranks by relevance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SortBy {
	CreatedAt,
	UpdatedAt,
	Name,
	#[default]
	Relevance,
}
impl SortBy {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(str::trim) {
			Some("createdAt" | "created_at") => Self::CreatedAt,
			Some("updatedAt" | "updated_at") => Self::UpdatedAt,
			Some("name") => Self::Name,
			_ => Self::Relevance,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::CreatedAt => "createdAt",
			Self::UpdatedAt => "updatedAt",
			Self::Name => "name",
			Self::Relevance => "relevance",
		}
	}
}
impl From<Option<String>> for SortBy {
	fn from(raw: Option<String>) -> Self {
		Self::parse(raw.as_deref())
	}
}
impl From<SortBy> for String {
	fn from(value: SortBy) -> Self {
		value.as_str().to_string()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SortOrder {
	Ascending,
	#[default]
	Descending,
}
impl SortOrder {
	pub fn parse(raw: Option<&str>) -> Self {
		let Some(raw) = raw else {
			return Self::Descending;
		};

		match raw.trim().to_ascii_lowercase().as_str() {
			"asc" | "ascending" => Self::Ascending,
			_ => Self::Descending,
		}
	}

	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Ascending => "ASC",
			Self::Descending => "DESC",
		}
	}
}
impl From<Option<String>> for SortOrder {
	fn from(raw: Option<String>) -> Self {
		Self::parse(raw.as_deref())
	}
}
impl From<SortOrder> for String {
	fn from(value: SortOrder) -> Self {
		match value {
			SortOrder::Ascending => "asc".to_string(),
			SortOrder::Descending => "desc".to_string(),
		}
	}
}

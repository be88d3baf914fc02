//! Response shapes shared by the catalog and search operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use market_domain::{SubmissionStatus, UnknownStatus};
use market_storage::models::{AgentDownloadsRow, AgentFileRow, AgentMetadataRow, AgentRow};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
	pub id: Uuid,
	pub name: String,
	pub description: String,
	pub author: String,
	pub keywords: Vec<String>,
	pub categories: Vec<String>,
	pub graph: Value,
}
impl From<AgentRow> for Agent {
	fn from(row: AgentRow) -> Self {
		Self {
			id: row.id,
			name: row.name,
			description: row.description,
			author: row.author,
			keywords: row.keywords,
			categories: row.categories,
			graph: row.graph,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentWithMetadata {
	#[serde(flatten)]
	pub agent: Agent,
	pub version: i32,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub submission_date: OffsetDateTime,
	pub submission_status: SubmissionStatus,
}
impl TryFrom<AgentMetadataRow> for AgentWithMetadata {
	type Error = UnknownStatus;

	fn try_from(row: AgentMetadataRow) -> Result<Self, Self::Error> {
		let submission_status = row.submission_status.parse()?;

		Ok(Self {
			agent: row.agent.into(),
			version: row.version,
			created_at: row.created_at,
			updated_at: row.updated_at,
			submission_date: row.submission_date,
			submission_status,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentWithDownloads {
	#[serde(flatten)]
	pub agent: Agent,
	pub downloads: i64,
}
impl From<AgentDownloadsRow> for AgentWithDownloads {
	fn from(row: AgentDownloadsRow) -> Self {
		Self { agent: row.agent.into(), downloads: row.downloads }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFile {
	pub id: Uuid,
	pub name: String,
	pub graph: Value,
}
impl From<AgentFileRow> for AgentFile {
	fn from(row: AgentFileRow) -> Self {
		Self { id: row.id, name: row.name, graph: row.graph }
	}
}

/// A listing page whose total was read from the same snapshot as the rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentPage {
	pub items: Vec<Agent>,
	pub total_count: i64,
	pub page: u32,
	pub page_size: u32,
	pub total_pages: i64,
}

/// A page plus a total counted by a separate query. The two may disagree under concurrent writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountedPage<T> {
	pub items: Vec<T>,
	pub total_count: i64,
}

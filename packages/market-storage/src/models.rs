use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentRow {
	pub id: Uuid,
	pub name: String,
	pub description: String,
	pub author: String,
	pub keywords: Vec<String>,
	pub categories: Vec<String>,
	pub graph: Value,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentMetadataRow {
	#[sqlx(flatten)]
	pub agent: AgentRow,
	pub version: i32,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
	pub submission_date: OffsetDateTime,
	pub submission_status: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentDownloadsRow {
	#[sqlx(flatten)]
	pub agent: AgentRow,
	pub downloads: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentRankRow {
	#[sqlx(flatten)]
	pub meta: AgentMetadataRow,
	pub rank: f32,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentFileRow {
	pub id: Uuid,
	pub name: String,
	pub graph: Value,
}

#[derive(Debug, Clone)]
pub struct InstallEvent {
	pub marketplace_agent_id: Uuid,
	pub installed_agent_id: Uuid,
	pub installation_location: String,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use market_domain::{SubmissionStatus, text};
use market_storage::models::{AgentMetadataRow, AgentRow};

use crate::{AgentWithMetadata, Error, MarketService, RequestScope, Result};

const OPERATION: &str = "submit_agent";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAgentRequest {
	/// The agent graph. Must be an object with a non-empty string `name`.
	pub graph: Value,
	/// Falls back to the submitter when blank.
	#[serde(default)]
	pub author: Option<String>,
	#[serde(default)]
	pub keywords: Vec<String>,
	#[serde(default)]
	pub categories: Vec<String>,
}

impl MarketService {
	/// Stores a new PENDING entry at version 1 and returns the stored record.
	pub async fn submit_agent(
		&self,
		scope: &RequestScope,
		req: &SubmitAgentRequest,
		submitter: &str,
	) -> Result<AgentWithMetadata> {
		self.run(scope, OPERATION, async {
			let row = build_submission(req, submitter, Uuid::new_v4(), OffsetDateTime::now_utc())?;
			let agent_id = row.agent.id;
			let mut tx =
				self.db.pool.begin().await.map_err(|err| Error::transaction(OPERATION, err))?;

			if let Err(err) = market_storage::agents::insert_agent(&mut *tx, &row).await {
				if let Err(rollback_err) = tx.rollback().await {
					tracing::warn!(error = %rollback_err, %agent_id, "Rollback failed.");
				}

				return Err(Error::transaction(
					OPERATION,
					format!("insert failed; agent_id={agent_id}: {err}"),
				));
			}

			tx.commit().await.map_err(|err| {
				Error::transaction(OPERATION, format!("commit failed; agent_id={agent_id}: {err}"))
			})?;

			tracing::info!(%agent_id, "Agent submitted.");

			AgentWithMetadata::try_from(row).map_err(|err| Error::scan(OPERATION, err))
		})
		.await
	}
}

/// Validates the request and builds the full record. Every timestamp is the same `now`,
/// truncated to the store's microsecond precision so the returned record matches the stored one.
pub(crate) fn build_submission(
	req: &SubmitAgentRequest,
	submitter: &str,
	agent_id: Uuid,
	now: OffsetDateTime,
) -> Result<AgentMetadataRow> {
	let Some(graph) = req.graph.as_object() else {
		return Err(Error::invalid(OPERATION, "graph must be a JSON object."));
	};
	let name = match graph.get("name") {
		Some(Value::String(name)) => text::non_blank(Some(name.as_str())),
		_ => None,
	};
	let Some(name) = name else {
		return Err(Error::invalid(OPERATION, "graph.name must be a non-empty string."));
	};
	let description = match graph.get("description") {
		None | Some(Value::Null) => "",
		Some(Value::String(description)) => description.trim(),
		Some(_) => return Err(Error::invalid(OPERATION, "graph.description must be a string.")),
	};
	let Some(author) = text::non_blank(req.author.as_deref()).or(text::non_blank(Some(submitter)))
	else {
		return Err(Error::invalid(OPERATION, "author or submitter is required."));
	};
	let now = now.replace_nanosecond(now.nanosecond() / 1_000 * 1_000).unwrap_or(now);

	Ok(AgentMetadataRow {
		agent: AgentRow {
			id: agent_id,
			name: name.to_string(),
			description: description.to_string(),
			author: author.to_string(),
			keywords: text::normalize_terms(&req.keywords),
			categories: text::normalize_terms(&req.categories),
			graph: req.graph.clone(),
		},
		version: 1,
		created_at: now,
		updated_at: now,
		submission_date: now,
		submission_status: SubmissionStatus::Pending.as_str().to_string(),
	})
}

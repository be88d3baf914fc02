use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{Error, Result, models::AgentMetadataRow};

pub async fn insert_agent<'e, E>(executor: E, row: &AgentMetadataRow) -> Result<()>
where
	E: PgExecutor<'e>,
{
	let agent = &row.agent;

	sqlx::query(
		"\
INSERT INTO agents (
\tid,
\tname,
\tdescription,
\tauthor,
\tkeywords,
\tcategories,
\tgraph,
\tversion,
\tcreated_at,
\tupdated_at,
\tsubmission_date,
\tsubmission_status
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)",
	)
	.bind(agent.id)
	.bind(agent.name.as_str())
	.bind(agent.description.as_str())
	.bind(agent.author.as_str())
	.bind(&agent.keywords)
	.bind(&agent.categories)
	.bind(&agent.graph)
	.bind(row.version)
	.bind(row.created_at)
	.bind(row.updated_at)
	.bind(row.submission_date)
	.bind(row.submission_status.as_str())
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn increment_download_count<'e, E>(executor: E, agent_id: Uuid) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let downloads = sqlx::query_scalar::<_, i64>(
		"\
UPDATE agents
SET download_count = download_count + 1
WHERE id = $1
RETURNING download_count",
	)
	.bind(agent_id)
	.fetch_optional(executor)
	.await?;

	downloads.ok_or_else(|| Error::NotFound(format!("agent not found; agent_id={agent_id}")))
}

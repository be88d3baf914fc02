use sqlx::PgExecutor;

use crate::{Result, models::InstallEvent};

/// Appends one install fact. Repeated identical events are stored as separate rows.
pub async fn insert_install_event<'e, E>(executor: E, event: &InstallEvent) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO install_tracker (marketplace_agent_id, installed_agent_id, installation_location)
VALUES ($1, $2, $3)",
	)
	.bind(event.marketplace_agent_id)
	.bind(event.installed_agent_id)
	.bind(event.installation_location.as_str())
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn count_install_events<'e, E>(
	executor: E,
	event: &InstallEvent,
) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let count = sqlx::query_scalar::<_, i64>(
		"\
SELECT count(*)
FROM install_tracker
WHERE marketplace_agent_id = $1 AND installed_agent_id = $2 AND installation_location = $3",
	)
	.bind(event.marketplace_agent_id)
	.bind(event.installed_agent_id)
	.bind(event.installation_location.as_str())
	.fetch_one(executor)
	.await?;

	Ok(count)
}

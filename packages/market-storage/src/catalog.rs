use sqlx::{PgExecutor, Postgres, QueryBuilder};
use uuid::Uuid;

use market_domain::{Page, SubmissionStatus};

use crate::{
	Result,
	db::Db,
	filter::{self, ListFilter, Predicate},
	models::{AgentDownloadsRow, AgentFileRow, AgentMetadataRow, AgentRow},
};

const AGENT_COLUMNS: &str =
	"a.id, a.name, a.description, a.author, a.keywords, a.categories, a.graph";

pub async fn list_agents<'e, E>(
	executor: E,
	list_filter: &ListFilter<'_>,
	page: Page,
) -> Result<Vec<AgentRow>>
where
	E: PgExecutor<'e>,
{
	let predicates = list_filter.predicates();
	let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {AGENT_COLUMNS} FROM agents a"));

	filter::push_where(&mut builder, &predicates);
	builder.push(" ORDER BY a.created_at DESC, a.id ASC");
	push_page(&mut builder, page);

	let rows = builder.build_query_as::<AgentRow>().fetch_all(executor).await?;

	Ok(rows)
}

pub async fn count_agents<'e, E>(executor: E, list_filter: &ListFilter<'_>) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let predicates = list_filter.predicates();
	let mut builder = QueryBuilder::<Postgres>::new("SELECT count(*) FROM agents a");

	filter::push_where(&mut builder, &predicates);

	let count = builder.build_query_scalar::<i64>().fetch_one(executor).await?;

	Ok(count)
}

/// Page and total read from one snapshot, so the total always describes the page it came with.
pub async fn list_agents_with_total(
	db: &Db,
	list_filter: &ListFilter<'_>,
	page: Page,
) -> Result<(Vec<AgentRow>, i64)> {
	let mut tx = db.begin_snapshot().await?;
	let rows = list_agents(&mut *tx, list_filter, page).await?;
	let total = count_agents(&mut *tx, list_filter).await?;

	tx.commit().await?;

	Ok((rows, total))
}

pub async fn get_agent_details<'e, E>(
	executor: E,
	agent_id: Uuid,
	version: Option<i32>,
) -> Result<Option<AgentMetadataRow>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, AgentMetadataRow>(
		"\
SELECT
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
FROM agents
WHERE id = $1 AND ($2::integer IS NULL OR version = $2)
LIMIT 1",
	)
	.bind(agent_id)
	.bind(version)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn get_agent_file<'e, E>(executor: E, agent_id: Uuid) -> Result<Option<AgentFileRow>>
where
	E: PgExecutor<'e>,
{
	let row = sqlx::query_as::<_, AgentFileRow>(
		"\
SELECT id, name, graph
FROM agents
WHERE id = $1
LIMIT 1",
	)
	.bind(agent_id)
	.fetch_optional(executor)
	.await?;

	Ok(row)
}

pub async fn top_agents_by_downloads<'e, E>(executor: E, page: Page) -> Result<Vec<AgentDownloadsRow>>
where
	E: PgExecutor<'e>,
{
	let predicates = [Predicate::Status(SubmissionStatus::Approved)];
	let mut builder = QueryBuilder::<Postgres>::new(format!(
		"SELECT {AGENT_COLUMNS}, at.downloads FROM agents a \
		 JOIN analytics_tracker at ON a.id = at.agent_id"
	));

	filter::push_where(&mut builder, &predicates);
	builder.push(" ORDER BY at.downloads DESC, a.id ASC");
	push_page(&mut builder, page);

	let rows = builder.build_query_as::<AgentDownloadsRow>().fetch_all(executor).await?;

	Ok(rows)
}

/// Counts the same joined set [`top_agents_by_downloads`] pages over.
pub async fn count_top_agents<'e, E>(executor: E) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let predicates = [Predicate::Status(SubmissionStatus::Approved)];
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT count(*) FROM agents a JOIN analytics_tracker at ON a.id = at.agent_id",
	);

	filter::push_where(&mut builder, &predicates);

	let count = builder.build_query_scalar::<i64>().fetch_one(executor).await?;

	Ok(count)
}

pub async fn featured_agents<'e, E>(executor: E, category: &str, page: Page) -> Result<Vec<AgentRow>>
where
	E: PgExecutor<'e>,
{
	let predicates =
		[Predicate::FeaturedIn(category), Predicate::Status(SubmissionStatus::Approved)];
	let mut builder = QueryBuilder::<Postgres>::new(format!(
		"SELECT {AGENT_COLUMNS} FROM agents a JOIN featured_agent fa ON a.id = fa.agent_id"
	));

	filter::push_where(&mut builder, &predicates);
	builder.push(" ORDER BY a.created_at DESC, a.id ASC");
	push_page(&mut builder, page);

	let rows = builder.build_query_as::<AgentRow>().fetch_all(executor).await?;

	Ok(rows)
}

pub async fn count_featured_agents<'e, E>(executor: E, category: &str) -> Result<i64>
where
	E: PgExecutor<'e>,
{
	let predicates =
		[Predicate::FeaturedIn(category), Predicate::Status(SubmissionStatus::Approved)];
	let mut builder = QueryBuilder::<Postgres>::new(
		"SELECT count(*) FROM agents a JOIN featured_agent fa ON a.id = fa.agent_id",
	);

	filter::push_where(&mut builder, &predicates);

	let count = builder.build_query_scalar::<i64>().fetch_one(executor).await?;

	Ok(count)
}

pub(crate) fn push_page(builder: &mut QueryBuilder<'_, Postgres>, page: Page) {
	builder.push(" LIMIT ").push_bind(page.limit()).push(" OFFSET ").push_bind(page.offset());
}

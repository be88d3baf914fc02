//! Full-text search over approved catalog entries.
//!
//! Query text is tokenized by the store with the same text search configuration the
//! `agents.search` trigger uses. Each resulting lexeme becomes a quoted prefix term and the
//! terms are ANDed in positional order, then cast straight to `tsquery`: the lexemes are already
//! normalized, so they must not pass through `to_tsquery` a second time.

use sqlx::{PgExecutor, Postgres, QueryBuilder};

use market_domain::{Page, SortBy, SortOrder, SubmissionStatus, text};

use crate::{
	Error, Result,
	catalog,
	filter::{self, Predicate},
	models::AgentRankRow,
};

#[derive(Debug, Clone, Copy)]
pub struct SearchQuery<'a> {
	pub text: &'a str,
	pub categories: &'a [String],
	pub sort_by: SortBy,
	pub sort_order: SortOrder,
	pub page: Page,
	/// Postgres `regconfig` name used to tokenize `text`.
	pub text_config: &'a str,
	pub description_max_chars: i32,
}
impl<'a> SearchQuery<'a> {
	fn query_text(&self) -> Option<&'a str> {
		text::non_blank(Some(self.text))
	}

	fn predicates(&self) -> Vec<Predicate<'a>> {
		let mut predicates = vec![Predicate::Status(SubmissionStatus::Approved)];

		if self.query_text().is_some() {
			predicates.push(Predicate::MatchesQuery);
		}
		if !self.categories.is_empty() {
			predicates.push(Predicate::AnyCategory(self.categories));
		}

		predicates
	}

	/// Composes the full statement. Only fixed fragments and placeholders reach the SQL text.
	pub fn build(&self) -> QueryBuilder<'a, Postgres> {
		let query_text = self.query_text();
		let mut builder = QueryBuilder::<Postgres>::new("");

		if let Some(query_text) = query_text {
			builder
				.push(
					"WITH query AS (SELECT (string_agg(quote_literal(lexeme) || ':*', ' & ' \
					 ORDER BY positions))::tsquery AS q FROM unnest(to_tsvector(",
				)
				.push_bind(self.text_config)
				.push("::regconfig, ")
				.push_bind(query_text)
				.push("))) ");
		}

		builder
			.push("SELECT a.id, a.name, LEFT(a.description, ")
			.push_bind(self.description_max_chars)
			.push(
				") AS description, a.author, a.keywords, a.categories, a.graph, a.version, \
				 a.created_at, a.updated_at, a.submission_date, a.submission_status, ",
			);

		if query_text.is_some() {
			builder.push("ts_rank(a.search, query.q) AS rank FROM agents a, query");
		} else {
			builder.push("CAST(0 AS real) AS rank FROM agents a");
		}

		filter::push_where(&mut builder, &self.predicates());
		builder.push(" ORDER BY ").push(order_by(self.sort_by, self.sort_order));
		catalog::push_page(&mut builder, self.page);

		builder
	}
}

pub async fn search_agents<'e, E>(executor: E, query: &SearchQuery<'_>) -> Result<Vec<AgentRankRow>>
where
	E: PgExecutor<'e>,
{
	if query.description_max_chars < 1 {
		return Err(Error::InvalidArgument(format!(
			"description_max_chars must be positive; got {}.",
			query.description_max_chars
		)));
	}

	let mut builder = query.build();
	let rows = builder.build_query_as::<AgentRankRow>().fetch_all(executor).await?;

	Ok(rows)
}

/// Explicit keys break ties by rank; relevance breaks ties by recency. `a.id` keeps pages stable.
pub fn order_by(sort_by: SortBy, sort_order: SortOrder) -> String {
	let direction = sort_order.as_sql();

	match sort_by {
		SortBy::CreatedAt => format!("a.created_at {direction}, rank DESC, a.id ASC"),
		SortBy::UpdatedAt => format!("a.updated_at {direction}, rank DESC, a.id ASC"),
		SortBy::Name => format!("a.name {direction}, rank DESC, a.id ASC"),
		SortBy::Relevance => "rank DESC, a.created_at DESC, a.id ASC".to_string(),
	}
}

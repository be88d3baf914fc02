use serde::{Deserialize, Serialize};

use market_domain::{SortBy, SortOrder, text};
use market_storage::search::SearchQuery;

use crate::{AgentWithMetadata, Error, MarketService, PageRequest, RequestScope, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
	/// Free text. Blank text applies no text predicate and ranks every match 0.
	#[serde(default)]
	pub query: String,
	/// Matches entries whose categories intersect this set. Empty means unrestricted.
	#[serde(default)]
	pub categories: Vec<String>,
	#[serde(flatten)]
	pub paging: PageRequest,
	#[serde(default)]
	pub sort_by: SortBy,
	#[serde(default)]
	pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentWithRank {
	#[serde(flatten)]
	pub agent: AgentWithMetadata,
	pub rank: f32,
}

impl MarketService {
	pub async fn search(
		&self,
		scope: &RequestScope,
		req: &SearchRequest,
	) -> Result<Vec<AgentWithRank>> {
		const OPERATION: &str = "search";

		self.run(scope, OPERATION, async {
			let page = self.resolve_page(OPERATION, req.paging)?;
			let categories = text::normalize_terms(&req.categories);
			let description_max_chars =
				i32::try_from(self.cfg.catalog.description_max_chars).unwrap_or(i32::MAX);
			let query = SearchQuery {
				text: req.query.as_str(),
				categories: &categories,
				sort_by: req.sort_by,
				sort_order: req.sort_order,
				page,
				text_config: self.cfg.search.text_config.as_str(),
				description_max_chars,
			};
			let rows = market_storage::search::search_agents(&self.db.pool, &query)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;
			let mut items = Vec::with_capacity(rows.len());

			for row in rows {
				let rank = row.rank;
				let agent =
					AgentWithMetadata::try_from(row.meta).map_err(|err| Error::scan(OPERATION, err))?;

				items.push(AgentWithRank { agent, rank });
			}

			tracing::debug!(count = items.len(), "Search matched.");

			Ok(items)
		})
		.await
	}
}

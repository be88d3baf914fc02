use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_domain::{Page, text};
use market_storage::filter::ListFilter;

use crate::{
	Agent, AgentFile, AgentPage, AgentWithDownloads, AgentWithMetadata, CountedPage, Error,
	MarketService, RequestScope, Result,
};

/// 1-indexed paging. Missing values fall back to page 1 and the configured default page size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
	#[serde(default)]
	pub page: Option<u32>,
	#[serde(default)]
	pub page_size: Option<u32>,
}
impl PageRequest {
	pub fn new(page: u32, page_size: u32) -> Self {
		Self { page: Some(page), page_size: Some(page_size) }
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAgentsRequest {
	#[serde(flatten)]
	pub paging: PageRequest,
	pub name: Option<String>,
	pub keyword: Option<String>,
	pub category: Option<String>,
}
impl ListAgentsRequest {
	fn filter(&self) -> ListFilter<'_> {
		ListFilter {
			name: self.name.as_deref(),
			keyword: self.keyword.as_deref(),
			category: self.category.as_deref(),
		}
	}
}

impl MarketService {
	pub(crate) fn resolve_page(
		&self,
		operation: &'static str,
		paging: PageRequest,
	) -> Result<Page> {
		let catalog = &self.cfg.catalog;

		Page::new(
			paging.page.unwrap_or(1),
			paging.page_size.unwrap_or(catalog.default_page_size),
			catalog.max_page_size,
		)
		.map_err(|err| Error::invalid(operation, err.to_string()))
	}

	/// Approved entries, newest first.
	pub async fn list_agents(
		&self,
		scope: &RequestScope,
		req: &ListAgentsRequest,
	) -> Result<Vec<Agent>> {
		const OPERATION: &str = "list_agents";

		self.run(scope, OPERATION, async {
			let page = self.resolve_page(OPERATION, req.paging)?;
			let rows = market_storage::catalog::list_agents(&self.db.pool, &req.filter(), page)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;

			Ok(rows.into_iter().map(Agent::from).collect())
		})
		.await
	}

	/// Same rows as [`MarketService::list_agents`], with a total read from the same snapshot.
	pub async fn list_agents_page(
		&self,
		scope: &RequestScope,
		req: &ListAgentsRequest,
	) -> Result<AgentPage> {
		const OPERATION: &str = "list_agents_page";

		self.run(scope, OPERATION, async {
			let page = self.resolve_page(OPERATION, req.paging)?;
			let (rows, total_count) =
				market_storage::catalog::list_agents_with_total(&self.db, &req.filter(), page)
					.await
					.map_err(|err| Error::storage(OPERATION, err))?;

			Ok(AgentPage {
				items: rows.into_iter().map(Agent::from).collect(),
				total_count,
				page: page.page(),
				page_size: page.page_size(),
				total_pages: page.total_pages(total_count),
			})
		})
		.await
	}

	/// Looks an entry up by id regardless of its submission status.
	pub async fn get_agent_details(
		&self,
		scope: &RequestScope,
		agent_id: Uuid,
		version: Option<i32>,
	) -> Result<AgentWithMetadata> {
		const OPERATION: &str = "get_agent_details";

		self.run(scope, OPERATION, async {
			if let Some(version) = version
				&& version < 1
			{
				return Err(Error::invalid(OPERATION, "version must be 1 or greater."));
			}

			let row = market_storage::catalog::get_agent_details(&self.db.pool, agent_id, version)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?
				.ok_or_else(|| {
					Error::not_found(OPERATION, match version {
						Some(version) => {
							format!("agent not found; agent_id={agent_id} version={version}")
						},
						None => format!("agent not found; agent_id={agent_id}"),
					})
				})?;

			AgentWithMetadata::try_from(row).map_err(|err| Error::scan(OPERATION, err))
		})
		.await
	}

	pub async fn get_agent_file(&self, scope: &RequestScope, agent_id: Uuid) -> Result<AgentFile> {
		const OPERATION: &str = "get_agent_file";

		self.run(scope, OPERATION, async {
			let row = market_storage::catalog::get_agent_file(&self.db.pool, agent_id)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?
				.ok_or_else(|| {
					Error::not_found(OPERATION, format!("agent file not found; agent_id={agent_id}"))
				})?;

			Ok(row.into())
		})
		.await
	}

	/// Approved entries with analytics, most downloaded first.
	///
	/// The total is counted by a second query outside the page query's transaction, so under
	/// concurrent writes it can briefly disagree with the page it accompanies.
	pub async fn get_top_agents_by_downloads(
		&self,
		scope: &RequestScope,
		paging: PageRequest,
	) -> Result<CountedPage<AgentWithDownloads>> {
		const OPERATION: &str = "get_top_agents_by_downloads";

		self.run(scope, OPERATION, async {
			let page = self.resolve_page(OPERATION, paging)?;
			let rows = market_storage::catalog::top_agents_by_downloads(&self.db.pool, page)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;
			let total_count = market_storage::catalog::count_top_agents(&self.db.pool)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;

			Ok(CountedPage {
				items: rows.into_iter().map(AgentWithDownloads::from).collect(),
				total_count,
			})
		})
		.await
	}

	/// Approved entries actively featured in `category`, newest first.
	///
	/// Like [`MarketService::get_top_agents_by_downloads`], the total comes from an independent
	/// query and may be transiently stale relative to the page.
	pub async fn get_featured_agents(
		&self,
		scope: &RequestScope,
		category: &str,
		paging: PageRequest,
	) -> Result<CountedPage<Agent>> {
		const OPERATION: &str = "get_featured_agents";

		self.run(scope, OPERATION, async {
			let Some(category) = text::non_blank(Some(category)) else {
				return Err(Error::invalid(OPERATION, "category is required."));
			};
			let page = self.resolve_page(OPERATION, paging)?;
			let rows = market_storage::catalog::featured_agents(&self.db.pool, category, page)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;
			let total_count =
				market_storage::catalog::count_featured_agents(&self.db.pool, category)
					.await
					.map_err(|err| Error::storage(OPERATION, err))?;

			Ok(CountedPage { items: rows.into_iter().map(Agent::from).collect(), total_count })
		})
		.await
	}

	/// Returns the entry's new download count.
	pub async fn increment_download_count(
		&self,
		scope: &RequestScope,
		agent_id: Uuid,
	) -> Result<i64> {
		const OPERATION: &str = "increment_download_count";

		self.run(scope, OPERATION, async {
			let downloads =
				market_storage::agents::increment_download_count(&self.db.pool, agent_id)
					.await
					.map_err(|err| Error::storage(OPERATION, err))?;

			tracing::debug!(%agent_id, downloads, "Download counted.");

			Ok(downloads)
		})
		.await
	}
}

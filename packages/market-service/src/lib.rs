pub mod agent;
pub mod catalog;
pub mod install;
pub mod search;
pub mod submit;
pub mod time_serde;

mod error;

pub use agent::{Agent, AgentFile, AgentPage, AgentWithDownloads, AgentWithMetadata, CountedPage};
pub use catalog::{ListAgentsRequest, PageRequest};
pub use error::{Error, Result};
pub use install::RecordInstallRequest;
pub use market_domain::{SortBy, SortOrder, SubmissionStatus};
pub use search::{AgentWithRank, SearchRequest};
pub use submit::SubmitAgentRequest;

use std::{future::Future, time::Duration};

use tracing::Instrument;
use uuid::Uuid;

use market_config::Config;
use market_storage::db::Db;

/// Per-call context: a correlation id for the log span and an optional deadline.
#[derive(Debug, Clone)]
pub struct RequestScope {
	pub correlation_id: Uuid,
	pub timeout: Option<Duration>,
}
impl RequestScope {
	pub fn new() -> Self {
		Self { correlation_id: Uuid::new_v4(), timeout: None }
	}

	pub fn with_correlation_id(correlation_id: Uuid) -> Self {
		Self { correlation_id, timeout: None }
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}
}
impl Default for RequestScope {
	fn default() -> Self {
		Self::new()
	}
}

pub struct MarketService {
	pub cfg: Config,
	pub db: Db,
}
impl MarketService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	/// Runs one service call inside its span, bounded by the scope's timeout or the configured
	/// default. A timed-out future is dropped, which rolls back any open transaction.
	pub(crate) async fn run<T, F>(
		&self,
		scope: &RequestScope,
		operation: &'static str,
		fut: F,
	) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let span =
			tracing::info_span!("market_call", operation, correlation_id = %scope.correlation_id);
		let timeout =
			scope.timeout.or_else(|| self.cfg.catalog.request_timeout_ms.map(Duration::from_millis));

		async move {
			let outcome = match timeout {
				Some(limit) => match tokio::time::timeout(limit, fut).await {
					Ok(outcome) => outcome,
					Err(_) => Err(Error::Cancelled {
						operation,
						timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
					}),
				},
				None => fut.await,
			};

			match &outcome {
				Ok(_) => tracing::debug!("Call succeeded."),
				Err(err) => tracing::warn!(error = %err, "Call failed."),
			}

			outcome
		}
		.instrument(span)
		.await
	}
}

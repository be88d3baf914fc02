use serde::{Deserialize, Serialize};
use uuid::Uuid;

use market_domain::text;
use market_storage::models::InstallEvent;

use crate::{Error, MarketService, RequestScope, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInstallRequest {
	pub marketplace_agent_id: Uuid,
	pub installed_agent_id: Uuid,
	pub installation_location: String,
}

impl MarketService {
	/// Appends one install fact. Calls are not deduplicated: repeating a call stores another row.
	pub async fn record_install(
		&self,
		scope: &RequestScope,
		req: &RecordInstallRequest,
	) -> Result<()> {
		const OPERATION: &str = "record_install";

		self.run(scope, OPERATION, async {
			let Some(location) = text::non_blank(Some(req.installation_location.as_str())) else {
				return Err(Error::invalid(OPERATION, "installation_location is required."));
			};
			let event = InstallEvent {
				marketplace_agent_id: req.marketplace_agent_id,
				installed_agent_id: req.installed_agent_id,
				installation_location: location.to_string(),
			};

			market_storage::installs::insert_install_event(&self.db.pool, &event)
				.await
				.map_err(|err| Error::storage(OPERATION, err))?;

			tracing::debug!(
				marketplace_agent_id = %event.marketplace_agent_id,
				installed_agent_id = %event.installed_agent_id,
				"Install recorded."
			);

			Ok(())
		})
		.await
	}
}

use std::sync::Arc;

use scout_service::ScoutService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScoutService>,
}
impl AppState {
	/// Opens the Postgres pool, the Qdrant client and the rerank client once for the process.
	pub async fn new(config: scout_config::Config) -> color_eyre::Result<Self> {
		let service = ScoutService::connect(config).await?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: ScoutService) -> Self {
		Self { service: Arc::new(service) }
	}
}

use std::sync::Arc;

use vaultboard_service::DashboardService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DashboardService>,
}
impl AppState {
	pub fn new(config: &vaultboard_config::Config) -> Self {
		Self::from_service(DashboardService::from_config(config))
	}

	pub fn from_service(service: DashboardService) -> Self {
		Self { service: Arc::new(service) }
	}
}

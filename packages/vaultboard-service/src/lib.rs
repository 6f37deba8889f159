pub mod activity;
pub mod approvals;
pub mod chart;
pub mod emails;
pub mod stats;
pub mod tasks;
pub mod text;
pub mod timefmt;

mod error;

pub use activity::{ActivityFeed, ActivityItem};
pub use approvals::{ApprovalAction, ApprovalActionRequest, ApprovalActionResponse, ApprovalItem};
pub use chart::ChartPoint;
pub use emails::EmailItem;
pub use error::{Error, Result};
pub use stats::{BucketCounts, StatsHistory, StatsResponse, Trends};
pub use tasks::TaskItem;

use std::{collections::HashSet, sync::Mutex};

use vaultboard_config::{Config, Feeds};
use vaultboard_vault::Vault;

/// Builds every dashboard projection from the vault and owns the state shared between requests.
pub struct DashboardService {
	pub vault: Vault,
	pub feeds: Feeds,
	pub history: StatsHistory,
	transitions: InFlight,
}
impl DashboardService {
	pub fn new(vault: Vault, feeds: Feeds, history: StatsHistory) -> Self {
		Self { vault, feeds, history, transitions: InFlight::default() }
	}

	pub fn from_config(cfg: &Config) -> Self {
		Self::new(
			Vault::new(&cfg.vault.path),
			cfg.feeds.clone(),
			StatsHistory::from_config(&cfg.stats),
		)
	}
}

/// Ids with an approval transition underway in this process.
#[derive(Debug, Default)]
struct InFlight {
	ids: Mutex<HashSet<String>>,
}
impl InFlight {
	fn acquire(&self, id: &str) -> Option<InFlightGuard<'_>> {
		let mut ids = self.ids.lock().unwrap_or_else(|err| err.into_inner());

		if !ids.insert(id.to_string()) {
			return None;
		}

		Some(InFlightGuard { owner: self, id: id.to_string() })
	}
}

struct InFlightGuard<'a> {
	owner: &'a InFlight,
	id: String,
}
impl Drop for InFlightGuard<'_> {
	fn drop(&mut self) {
		self.owner.ids.lock().unwrap_or_else(|err| err.into_inner()).remove(&self.id);
	}
}

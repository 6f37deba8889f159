use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_HTTP_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_VAULT_DIR: &str = "AI_Employee_Vault";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub vault: Vault,
	pub stats: Stats,
	pub feeds: Feeds,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Approvals are mutable without authentication, so non-loopback binds must be opted into.
	pub bind_localhost_only: bool,
}
impl Default for Service {
	fn default() -> Self {
		Self {
			http_bind: DEFAULT_HTTP_BIND.to_string(),
			log_level: "info".to_string(),
			bind_localhost_only: true,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Vault {
	/// Root holding one folder per workflow state.
	pub path: PathBuf,
}
impl Default for Vault {
	fn default() -> Self {
		Self { path: PathBuf::from("..").join(DEFAULT_VAULT_DIR) }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Stats {
	/// Snapshots at or beyond this age are evicted from the trend history.
	pub window_secs: u64,
	/// Trends compare against the first snapshot older than this.
	pub lookback_secs: u64,
	pub max_snapshots: usize,
}
impl Default for Stats {
	fn default() -> Self {
		Self { window_secs: 3_600, lookback_secs: 600, max_snapshots: 4_096 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Feeds {
	pub activity_limit: usize,
	pub preview_chars: usize,
	pub approval_ttl_days: u32,
	pub chart_days: u32,
}
impl Default for Feeds {
	fn default() -> Self {
		Self { activity_limit: 10, preview_chars: 100, approval_ttl_days: 7, chart_days: 7 }
	}
}

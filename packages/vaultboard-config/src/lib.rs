mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, DEFAULT_HTTP_BIND, DEFAULT_VAULT_DIR, Feeds, Service, Stats, Vault};

use std::{
	env,
	ffi::OsString,
	fs,
	net::SocketAddr,
	path::{Path, PathBuf},
};

/// Environment variable naming the vault root.
pub const VAULT_PATH_ENV: &str = "VAULT_PATH";
/// Upper bound for `stats.window_secs`: one year.
pub const MAX_WINDOW_SECS: u64 = 86_400 * 365;
/// Upper bound for `feeds.approval_ttl_days`: one hundred years.
pub const MAX_APPROVAL_TTL_DAYS: u32 = 36_500;

/// Values supplied on the command line. They win over both the environment and the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub vault_path: Option<PathBuf>,
}

/// Loads the config file when given, otherwise starts from defaults, then applies
/// `VAULT_PATH` and the command-line overrides before validating.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Config> {
	let mut cfg = match path {
		Some(path) => read(path)?,
		None => Config::default(),
	};

	apply_overrides(&mut cfg, env::var_os(VAULT_PATH_ENV), overrides);
	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn read(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	toml::from_str(&raw).map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })
}

pub fn apply_overrides(cfg: &mut Config, env_vault_path: Option<OsString>, overrides: &Overrides) {
	if let Some(value) = env_vault_path
		&& !value.is_empty()
	{
		cfg.vault.path = PathBuf::from(value);
	}
	if let Some(path) = overrides.vault_path.as_ref() {
		cfg.vault.path = path.clone();
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	let http_addr: SocketAddr = cfg
		.service
		.http_bind
		.parse()
		.map_err(|_| Error::invalid("service.http_bind", "must be a socket address."))?;

	if cfg.service.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(Error::invalid(
			"service.http_bind",
			"must be a loopback address when bind_localhost_only is true.",
		));
	}
	if cfg.vault.path.as_os_str().is_empty() {
		return Err(Error::invalid("vault.path", "must be non-empty."));
	}
	if cfg.stats.window_secs == 0 {
		return Err(Error::invalid("stats.window_secs", "must be greater than zero."));
	}
	if cfg.stats.window_secs > MAX_WINDOW_SECS {
		return Err(Error::invalid("stats.window_secs", format!("must be at most {MAX_WINDOW_SECS}.")));
	}
	if cfg.stats.lookback_secs == 0 {
		return Err(Error::invalid("stats.lookback_secs", "must be greater than zero."));
	}
	if cfg.stats.lookback_secs >= cfg.stats.window_secs {
		return Err(Error::invalid("stats.lookback_secs", "must be less than stats.window_secs."));
	}
	if cfg.stats.max_snapshots < 2 {
		return Err(Error::invalid("stats.max_snapshots", "must be at least 2."));
	}

	for (key, value) in [
		("feeds.activity_limit", cfg.feeds.activity_limit),
		("feeds.preview_chars", cfg.feeds.preview_chars),
		("feeds.approval_ttl_days", cfg.feeds.approval_ttl_days as usize),
		("feeds.chart_days", cfg.feeds.chart_days as usize),
	] {
		if value == 0 {
			return Err(Error::invalid(key, "must be greater than zero."));
		}
	}

	if cfg.feeds.approval_ttl_days > MAX_APPROVAL_TTL_DAYS {
		return Err(Error::invalid(
			"feeds.approval_ttl_days",
			format!("must be at most {MAX_APPROVAL_TTL_DAYS}."),
		));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let trimmed = cfg.service.log_level.trim();

	if trimmed.is_empty() {
		cfg.service.log_level = "info".to_string();
	} else if trimmed.len() != cfg.service.log_level.len() {
		cfg.service.log_level = trimmed.to_string();
	}
}

use std::{collections::VecDeque, sync::Mutex};

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use vaultboard_vault::{Bucket, Folder};

use crate::{DashboardService, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCounts {
	pub pending: u64,
	pub in_progress: u64,
	pub completed: u64,
	pub total: u64,
}
impl BucketCounts {
	pub fn new(pending: u64, in_progress: u64, completed: u64) -> Self {
		Self { pending, in_progress, completed, total: pending + in_progress + completed }
	}
}

/// Percentage change of each count against an earlier snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
	pub pending_change: i64,
	pub in_progress_change: i64,
	pub completed_change: i64,
	pub total_change: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
	#[serde(flatten)]
	pub counts: BucketCounts,
	pub trends: Trends,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
	timestamp: OffsetDateTime,
	counts: BucketCounts,
}

/// Process-lifetime ring buffer of recent counts.
///
/// Owned by the service that feeds it, so every instance (and every test) starts empty.
#[derive(Debug)]
pub struct StatsHistory {
	window: Duration,
	lookback: Duration,
	capacity: usize,
	snapshots: Mutex<VecDeque<Snapshot>>,
}
impl StatsHistory {
	pub fn new(window: Duration, lookback: Duration, capacity: usize) -> Self {
		Self { window, lookback, capacity, snapshots: Mutex::new(VecDeque::new()) }
	}

	pub fn from_config(cfg: &vaultboard_config::Stats) -> Self {
		Self::new(
			seconds(cfg.window_secs),
			seconds(cfg.lookback_secs),
			cfg.max_snapshots,
		)
	}

	/// Appends `counts` observed at `now`, evicts snapshots outside the window, and returns the
	/// trends against the retained history.
	pub fn record(&self, now: OffsetDateTime, counts: BucketCounts) -> Trends {
		let mut snapshots = self.snapshots.lock().unwrap_or_else(|err| err.into_inner());

		snapshots.push_back(Snapshot { timestamp: now, counts });

		// A window reaching past the earliest representable instant evicts nothing.
		if let Some(cutoff) = now.checked_sub(self.window) {
			snapshots.retain(|snapshot| snapshot.timestamp > cutoff);
		}

		while snapshots.len() > self.capacity {
			snapshots.pop_front();
		}

		trends(&snapshots, now.checked_sub(self.lookback), counts)
	}

	pub fn len(&self) -> usize {
		self.snapshots.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Saturating conversion of configured seconds.
fn seconds(secs: u64) -> Duration {
	Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
}

fn trends(
	snapshots: &VecDeque<Snapshot>,
	lookback_cutoff: Option<OffsetDateTime>,
	current: BucketCounts,
) -> Trends {
	if snapshots.len() < 2 {
		return Trends::default();
	}

	let Some(past) = snapshots
		.iter()
		.find(|snapshot| lookback_cutoff.is_some_and(|cutoff| snapshot.timestamp < cutoff))
		.or_else(|| snapshots.front())
	else {
		return Trends::default();
	};

	Trends {
		pending_change: percent_change(current.pending, past.counts.pending),
		in_progress_change: percent_change(current.in_progress, past.counts.in_progress),
		completed_change: percent_change(current.completed, past.counts.completed),
		total_change: percent_change(current.total, past.counts.total),
	}
}

/// Whole-percent change from `past` to `current`, rounding halves up.
///
/// A zero baseline reports 100 when anything appeared and 0 otherwise.
pub fn percent_change(current: u64, past: u64) -> i64 {
	if past == 0 {
		return if current > 0 { 100 } else { 0 };
	}

	let change = (current as f64 - past as f64) / past as f64 * 100.0;

	(change + 0.5).floor() as i64
}

impl DashboardService {
	pub async fn bucket_counts(&self) -> BucketCounts {
		let (mut pending, mut in_progress, mut completed) = (0, 0, 0);

		for folder in Folder::PIPELINE {
			let count = self.vault.count_folder(folder).await as u64;

			match folder.bucket() {
				Some(Bucket::Pending) => pending += count,
				Some(Bucket::InProgress) => in_progress += count,
				Some(Bucket::Completed) => completed += count,
				None => {},
			}
		}

		BucketCounts::new(pending, in_progress, completed)
	}

	/// Current counts plus trends. Unreadable folders count as empty, so this does not fail today.
	pub async fn stats(&self) -> Result<StatsResponse> {
		let counts = self.bucket_counts().await;
		let trends = self.history.record(OffsetDateTime::now_utc(), counts);

		Ok(StatsResponse { counts, trends })
	}
}

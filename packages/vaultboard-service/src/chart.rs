use serde::Serialize;
use time::{Date, Duration, OffsetDateTime, UtcOffset};
use vaultboard_vault::{Bucket, Folder};

use crate::{DashboardService, Error, Result, timefmt};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
	/// Calendar day in UTC, `YYYY-MM-DD`.
	pub date: String,
	pub label: String,
	pub pending: u32,
	pub in_progress: u32,
	pub completed: u32,
}

impl DashboardService {
	pub async fn chart_data(&self) -> Result<Vec<ChartPoint>> {
		self.chart_data_until(OffsetDateTime::now_utc().date()).await
	}

	/// Per-day counts for the configured number of days ending with `today`, oldest first. A note
	/// lands on the UTC day of its modification time.
	pub async fn chart_data_until(&self, today: Date) -> Result<Vec<ChartPoint>> {
		let days = self.feeds.chart_days;
		let first = today
			.checked_sub(Duration::days(i64::from(days) - 1))
			.ok_or_else(|| Error::Internal { message: "Chart range underflows the calendar.".to_string() })?;
		let mut points = Vec::with_capacity(days as usize);

		for offset in 0..days {
			let date = first
				.checked_add(Duration::days(i64::from(offset)))
				.ok_or_else(|| Error::Internal { message: "Chart range overflows the calendar.".to_string() })?;

			points.push(ChartPoint {
				date: timefmt::format_day(date),
				label: timefmt::format_day_label(date),
				pending: 0,
				in_progress: 0,
				completed: 0,
			});
		}

		for folder in Folder::PIPELINE {
			let Some(bucket) = folder.bucket() else {
				continue;
			};

			for modified in self.vault.modified_times(folder).await {
				let day = modified.to_offset(UtcOffset::UTC).date();

				if day < first || day > today {
					continue;
				}

				let point = &mut points[(day - first).whole_days() as usize];

				match bucket {
					Bucket::Pending => point.pending += 1,
					Bucket::InProgress => point.in_progress += 1,
					Bucket::Completed => point.completed += 1,
				}
			}
		}

		Ok(points)
	}
}

use std::cmp::Reverse;

use serde::Serialize;
use time::OffsetDateTime;
use vaultboard_vault::{ActivityCategory, Folder, VaultFile};

use crate::{DashboardService, Result, emails::EMAIL_PREFIX, timefmt};

/// Folders that feed the activity stream, in merge order.
const SOURCES: [Folder; 4] = [Folder::NeedsAction, Folder::Done, Folder::Plans, Folder::PendingApproval];

#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
	pub id: String,
	pub title: String,
	pub description: String,
	pub time: String,
	#[serde(rename = "type")]
	pub kind: &'static str,
	/// Chosen by the client from `kind`.
	pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeed {
	pub activities: Vec<ActivityItem>,
}

struct Event<'a> {
	file: &'a VaultFile,
	category: ActivityCategory,
	at: OffsetDateTime,
}

impl DashboardService {
	/// The most recent notes across the workflow folders, newest first.
	///
	/// Vault reads are soft: an unreadable folder contributes nothing instead of failing the feed.
	pub async fn activity(&self) -> Result<ActivityFeed> {
		let mut files = Vec::new();

		for folder in SOURCES {
			let Some(category) = folder.activity_category() else {
				continue;
			};

			for file in self.vault.read_folder(folder).await {
				files.push((file, category));
			}
		}

		let mut events = files
			.iter()
			.map(|(file, category)| Event { file, category: *category, at: event_time(file) })
			.collect::<Vec<_>>();

		events.sort_by_key(|event| Reverse(event.at));
		events.truncate(self.feeds.activity_limit);

		let activities = events
			.into_iter()
			.enumerate()
			.map(|(index, event)| activity_item(index, &event))
			.collect();

		Ok(ActivityFeed { activities })
	}
}

/// Front-matter `timestamp` when it parses, otherwise the file's modification time.
fn event_time(file: &VaultFile) -> OffsetDateTime {
	file.front_matter
		.get("timestamp")
		.and_then(timefmt::parse_timestamp)
		.unwrap_or(file.modified)
}

fn activity_item(index: usize, event: &Event<'_>) -> ActivityItem {
	let file = event.file;
	let name = file.file_name.as_str();
	let (title, description) = match file.front_matter.get("subject") {
		Some(subject) => (subject.to_string(), String::new()),
		None if name.starts_with(EMAIL_PREFIX) => ("Email processed".to_string(), name.to_string()),
		None if name.starts_with("PLAN_") => ("Plan created".to_string(), name.to_string()),
		None if name.starts_with("APPROVAL_") => ("Approval requested".to_string(), name.to_string()),
		None => ("Task updated".to_string(), name.to_string()),
	};
	let kind = if name.starts_with(EMAIL_PREFIX) { ActivityCategory::Email } else { event.category };
	let time = timefmt::format_iso(event.at);

	ActivityItem {
		id: format!("{index}-{time}"),
		title,
		description,
		time,
		kind: kind.as_str(),
		icon: None,
	}
}

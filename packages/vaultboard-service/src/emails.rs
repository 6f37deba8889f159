use std::cmp::Reverse;

use serde::Serialize;
use time::OffsetDateTime;
use vaultboard_vault::{Folder, NOTE_EXTENSION, VaultFile};

use crate::{DashboardService, Result, text, timefmt};

/// File-name prefix the mail watcher gives every email note.
pub const EMAIL_PREFIX: &str = "EMAIL_";

#[derive(Debug, Clone, Serialize)]
pub struct EmailItem {
	pub id: String,
	pub from: String,
	pub subject: String,
	pub preview: String,
	pub priority: String,
	pub time: String,
	pub unread: bool,
}

/// Lower sorts first. Anything unrecognised ranks with `normal`.
pub fn priority_rank(priority: &str) -> u8 {
	if priority.eq_ignore_ascii_case("urgent") {
		0
	} else if priority.eq_ignore_ascii_case("high") {
		1
	} else {
		2
	}
}

impl DashboardService {
	/// Email notes awaiting action, most pressing first and newest first within a priority.
	pub async fn list_emails(&self) -> Result<Vec<EmailItem>> {
		let now = OffsetDateTime::now_utc();
		let mut keyed = self
			.vault
			.read_folder(Folder::NeedsAction)
			.await
			.iter()
			.filter(|file| file.file_name.starts_with(EMAIL_PREFIX))
			.map(|file| self.email_item(file, now))
			.collect::<Vec<_>>();

		keyed.sort_by_key(|(item, at)| (priority_rank(&item.priority), Reverse(*at)));

		Ok(keyed.into_iter().map(|(item, _)| item).collect())
	}

	fn email_item(&self, file: &VaultFile, now: OffsetDateTime) -> (EmailItem, Option<OffsetDateTime>) {
		let fm = &file.front_matter;
		let (time, at) = match fm.first(&["timestamp", "created_at"]) {
			Some(raw) => (raw.to_string(), timefmt::parse_timestamp(raw)),
			None => (timefmt::format_iso(now), Some(now)),
		};
		let subject = fm.get("subject").map(str::to_string).unwrap_or_else(|| {
			let name = file.file_name.strip_prefix(EMAIL_PREFIX).unwrap_or(&file.file_name);

			name.strip_suffix(NOTE_EXTENSION).unwrap_or(name).to_string()
		});
		let item = EmailItem {
			id: file.stem().to_string(),
			from: fm.get("from").unwrap_or("Unknown Sender").to_string(),
			subject,
			preview: text::preview(&file.body, self.feeds.preview_chars),
			priority: fm.get("priority").unwrap_or("normal").to_string(),
			time,
			unread: true,
		};

		(item, at)
	}
}

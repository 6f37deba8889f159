use serde::Serialize;
use time::OffsetDateTime;
use vaultboard_vault::{Folder, TaskStatus, VaultFile};

use crate::{DashboardService, Result, text, timefmt};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
	pub id: String,
	pub title: String,
	pub description: String,
	pub status: &'static str,
	pub priority: String,
	pub assignee: String,
	pub due_date: String,
}

impl DashboardService {
	/// Every note in the task pipeline, folder by folder.
	pub async fn list_tasks(&self) -> Result<Vec<TaskItem>> {
		let now = timefmt::format_iso(OffsetDateTime::now_utc());
		let mut tasks = Vec::new();

		for folder in Folder::PIPELINE {
			let Some(status) = folder.task_status() else {
				continue;
			};

			for file in self.vault.read_folder(folder).await {
				tasks.push(self.task_item(folder, status, &file, &now));
			}
		}

		Ok(tasks)
	}

	fn task_item(&self, folder: Folder, status: TaskStatus, file: &VaultFile, now: &str) -> TaskItem {
		let fm = &file.front_matter;

		TaskItem {
			id: format!("{folder}_{}", file.file_name),
			title: fm
				.get("title")
				.map(str::to_string)
				.unwrap_or_else(|| text::title_from_stem(file.stem())),
			description: text::preview(&file.body, self.feeds.preview_chars),
			status: status.as_str(),
			priority: fm.get("priority").unwrap_or("medium").to_string(),
			assignee: fm.get("assignee").unwrap_or("AI Employee").to_string(),
			due_date: fm.first(&["due_date", "deadline", "created_at"]).unwrap_or(now).to_string(),
		}
	}
}

use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use vaultboard_vault::{ApprovalStatus, NOTE_EXTENSION, VaultFile, mover};

use crate::{DashboardService, Error, Result, text, timefmt};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalItem {
	pub id: String,
	pub title: String,
	pub description: String,
	pub status: String,
	pub requested_by: String,
	pub requested_at: String,
	pub expires_at: String,
}

/// Body of an approve/reject call. Both fields are optional here so that a missing field is
/// reported as a bad request rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApprovalActionRequest {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub action: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalActionResponse {
	pub success: bool,
	pub message: String,
	pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
	Approve,
	Reject,
}
impl ApprovalAction {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"approve" => Some(Self::Approve),
			"reject" => Some(Self::Reject),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Approve => "approve",
			Self::Reject => "reject",
		}
	}

	pub fn past_tense(self) -> &'static str {
		match self {
			Self::Approve => "approved",
			Self::Reject => "rejected",
		}
	}

	/// State the note lands in. Both are terminal.
	pub fn outcome(self) -> ApprovalStatus {
		match self {
			Self::Approve => ApprovalStatus::Approved,
			Self::Reject => ApprovalStatus::Rejected,
		}
	}
}

impl DashboardService {
	/// Approval requests still waiting on a decision.
	pub async fn list_approvals(&self) -> Result<Vec<ApprovalItem>> {
		let now = OffsetDateTime::now_utc();
		let default_expiry = now
			.checked_add(Duration::days(i64::from(self.feeds.approval_ttl_days)))
			.unwrap_or_else(|| Date::MAX.midnight().assume_utc());
		let pending = ApprovalStatus::Pending.as_str();
		let items = self
			.vault
			.read_folder(ApprovalStatus::Pending.folder())
			.await
			.iter()
			.map(|file| self.approval_item(file, now, default_expiry))
			.filter(|item| item.status == pending)
			.collect();

		Ok(items)
	}

	/// Moves a pending request to `Approved` or `Rejected`.
	///
	/// A second call for an id whose transition is still running is refused with a conflict; one
	/// that arrives after it finished no longer finds the file and is reported as not found.
	pub async fn transition(&self, req: ApprovalActionRequest) -> Result<ApprovalActionResponse> {
		let id = req.id.as_deref().unwrap_or_default();
		let action = req.action.as_deref().unwrap_or_default();

		if id.trim().is_empty() || action.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "Missing id or action".to_string() });
		}

		let Some(action) = ApprovalAction::parse(action) else {
			return Err(Error::InvalidRequest {
				message: "Action must be either \"approve\" or \"reject\"".to_string(),
			});
		};

		if !mover::is_plain_file_name(id) {
			return Err(Error::InvalidRequest { message: format!("Invalid approval id {id:?}") });
		}

		let Some(_guard) = self.transitions.acquire(id) else {
			return Err(Error::Conflict {
				message: format!("Approval {id} is already being processed"),
			});
		};
		let file_name = format!("{id}{NOTE_EXTENSION}");
		let source = ApprovalStatus::Pending.folder();

		if !self.vault.contains(source, &file_name).await {
			return Err(Error::NotFound { message: format!("File {file_name} not found in {source}") });
		}

		self.vault.move_file(&file_name, source, action.outcome().folder()).await?;

		tracing::info!(%id, action = action.as_str(), "Approval request resolved.");

		Ok(ApprovalActionResponse {
			success: true,
			message: format!("Item {} successfully", action.past_tense()),
			action: action.as_str().to_string(),
		})
	}

	fn approval_item(
		&self,
		file: &VaultFile,
		now: OffsetDateTime,
		default_expiry: OffsetDateTime,
	) -> ApprovalItem {
		let fm = &file.front_matter;

		ApprovalItem {
			id: file.stem().to_string(),
			title: fm
				.get("title")
				.map(str::to_string)
				.unwrap_or_else(|| text::title_from_stem(file.stem())),
			description: text::preview(&file.body, self.feeds.preview_chars),
			status: fm.get("status").unwrap_or(ApprovalStatus::Pending.as_str()).to_string(),
			requested_by: fm.first(&["requested_by", "requester"]).unwrap_or("Unknown").to_string(),
			requested_at: fm
				.first(&["requested_at", "created_at"])
				.map(str::to_string)
				.unwrap_or_else(|| timefmt::format_iso(now)),
			expires_at: fm
				.get("expires_at")
				.map(str::to_string)
				.unwrap_or_else(|| timefmt::format_iso(default_expiry)),
		}
	}
}

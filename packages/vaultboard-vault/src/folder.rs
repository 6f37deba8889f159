//! The folder a note lives in is its state. Every mapping from folder to a derived status goes
//! through this table.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
	NeedsAction,
	Plans,
	Done,
	PendingApproval,
	Approved,
	Rejected,
}
impl Folder {
	pub const ALL: [Self; 6] = [
		Self::NeedsAction,
		Self::Plans,
		Self::Done,
		Self::PendingApproval,
		Self::Approved,
		Self::Rejected,
	];
	/// Folders that make up the task pipeline, in pipeline order.
	pub const PIPELINE: [Self; 3] = [Self::NeedsAction, Self::Plans, Self::Done];

	pub fn dir_name(self) -> &'static str {
		match self {
			Self::NeedsAction => "Needs_Action",
			Self::Plans => "Plans",
			Self::Done => "Done",
			Self::PendingApproval => "Pending_Approval",
			Self::Approved => "Approved",
			Self::Rejected => "Rejected",
		}
	}

	pub fn from_dir_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|folder| folder.dir_name() == name)
	}

	pub fn bucket(self) -> Option<Bucket> {
		match self {
			Self::NeedsAction => Some(Bucket::Pending),
			Self::Plans => Some(Bucket::InProgress),
			Self::Done => Some(Bucket::Completed),
			_ => None,
		}
	}

	pub fn task_status(self) -> Option<TaskStatus> {
		match self {
			Self::NeedsAction => Some(TaskStatus::Inbox),
			Self::Plans => Some(TaskStatus::Progress),
			Self::Done => Some(TaskStatus::Done),
			_ => None,
		}
	}

	pub fn approval_status(self) -> Option<ApprovalStatus> {
		match self {
			Self::PendingApproval => Some(ApprovalStatus::Pending),
			Self::Approved => Some(ApprovalStatus::Approved),
			Self::Rejected => Some(ApprovalStatus::Rejected),
			_ => None,
		}
	}

	pub fn activity_category(self) -> Option<ActivityCategory> {
		match self {
			Self::NeedsAction | Self::Done => Some(ActivityCategory::Task),
			Self::Plans => Some(ActivityCategory::Plan),
			Self::PendingApproval => Some(ActivityCategory::Approval),
			Self::Approved | Self::Rejected => None,
		}
	}
}
impl fmt::Display for Folder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.dir_name())
	}
}

/// Coarse task state used for counting and charting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
	Pending,
	InProgress,
	Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
	Inbox,
	Progress,
	Done,
}
impl TaskStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Inbox => "inbox",
			Self::Progress => "progress",
			Self::Done => "done",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStatus {
	Pending,
	Approved,
	Rejected,
}
impl ApprovalStatus {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Approved => "approved",
			Self::Rejected => "rejected",
		}
	}

	/// Folder that holds notes in this state.
	pub fn folder(self) -> Folder {
		match self {
			Self::Pending => Folder::PendingApproval,
			Self::Approved => Folder::Approved,
			Self::Rejected => Folder::Rejected,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCategory {
	Email,
	Task,
	Approval,
	Plan,
}
impl ActivityCategory {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Email => "email",
			Self::Task => "task",
			Self::Approval => "approval",
			Self::Plan => "plan",
		}
	}
}

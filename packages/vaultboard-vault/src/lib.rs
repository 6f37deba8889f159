pub mod folder;
pub mod front_matter;
pub mod mover;
pub mod reader;

mod error;

pub use error::Error;
pub use folder::{ActivityCategory, ApprovalStatus, Bucket, Folder, TaskStatus};
pub use front_matter::FrontMatter;
pub use reader::{Vault, VaultFile};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extension every vault note carries.
pub const NOTE_EXTENSION: &str = ".md";

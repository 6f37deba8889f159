use std::io::ErrorKind;

use tokio::fs;

use crate::{Error, Folder, Result, Vault};

impl Vault {
	/// Moves `file_name` from one folder to another with a single rename.
	///
	/// The destination folder is created on demand. An existing destination file is never
	/// replaced.
	pub async fn move_file(&self, file_name: &str, from: Folder, to: Folder) -> Result<()> {
		if !is_plain_file_name(file_name) {
			return Err(Error::InvalidArgument(format!("{file_name:?} is not a plain file name.")));
		}
		if from == to {
			return Err(Error::InvalidArgument(format!("{file_name} is already in {to}.")));
		}

		let source = self.note_path(from, file_name);
		let target_dir = self.folder_path(to);
		let target = target_dir.join(file_name);

		if !self.contains(from, file_name).await {
			return Err(Error::NotFound(format!("File {file_name} not found in {from}")));
		}

		fs::create_dir_all(&target_dir)
			.await
			.map_err(|err| Error::Io { path: target_dir.clone(), source: err })?;

		if fs::try_exists(&target).await.unwrap_or(false) {
			return Err(Error::Conflict(format!("File {file_name} already exists in {to}")));
		}

		match fs::rename(&source, &target).await {
			Ok(()) => {
				tracing::debug!(%file_name, %from, %to, "Moved note.");

				Ok(())
			},
			Err(err) if err.kind() == ErrorKind::NotFound =>
				Err(Error::NotFound(format!("File {file_name} not found in {from}"))),
			Err(err) => Err(Error::Io { path: source, source: err }),
		}
	}
}

/// True when `name` names an entry directly inside a folder, with no path traversal.
pub fn is_plain_file_name(name: &str) -> bool {
	!name.is_empty()
		&& name != "."
		&& name != ".."
		&& !name.contains(['/', '\\', '\0'])
}

use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
};

use time::OffsetDateTime;
use tokio::fs;

use crate::{Folder, FrontMatter, NOTE_EXTENSION, front_matter};

/// Snapshot of one note as read from disk.
#[derive(Debug, Clone)]
pub struct VaultFile {
	pub file_name: String,
	pub path: PathBuf,
	/// Raw file text, front matter included.
	pub content: String,
	pub front_matter: FrontMatter,
	pub body: String,
	/// Filesystem modification time captured during the scan.
	pub modified: OffsetDateTime,
}
impl VaultFile {
	pub fn stem(&self) -> &str {
		self.file_name.strip_suffix(NOTE_EXTENSION).unwrap_or(&self.file_name)
	}
}

struct NoteEntry {
	file_name: String,
	path: PathBuf,
	modified: OffsetDateTime,
}

/// Handle on the vault root. Reads never fail: missing or unreadable folders and files are
/// logged and left out of the result.
#[derive(Debug, Clone)]
pub struct Vault {
	root: PathBuf,
}
impl Vault {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn folder_path(&self, folder: Folder) -> PathBuf {
		self.root.join(folder.dir_name())
	}

	pub fn note_path(&self, folder: Folder, file_name: &str) -> PathBuf {
		self.folder_path(folder).join(file_name)
	}

	/// Reads every note directly inside `folder`, sorted by file name.
	pub async fn read_folder(&self, folder: Folder) -> Vec<VaultFile> {
		let entries = self.list_notes(folder).await;
		let mut files = Vec::with_capacity(entries.len());

		for entry in entries {
			let content = match fs::read_to_string(&entry.path).await {
				Ok(content) => content,
				Err(err) => {
					tracing::warn!(path = %entry.path.display(), error = %err, "Skipping unreadable note.");

					continue;
				},
			};
			let (front_matter, body) = front_matter::parse(&content);

			files.push(VaultFile {
				file_name: entry.file_name,
				path: entry.path,
				content,
				front_matter,
				body,
				modified: entry.modified,
			});
		}

		files
	}

	/// Counts the notes `read_folder` would return without reading them.
	pub async fn count_folder(&self, folder: Folder) -> usize {
		self.list_notes(folder).await.len()
	}

	/// Modification times of the notes in `folder`, in file-name order.
	pub async fn modified_times(&self, folder: Folder) -> Vec<OffsetDateTime> {
		self.list_notes(folder).await.into_iter().map(|entry| entry.modified).collect()
	}

	pub async fn contains(&self, folder: Folder, file_name: &str) -> bool {
		fs::metadata(self.note_path(folder, file_name))
			.await
			.map(|metadata| metadata.is_file())
			.unwrap_or(false)
	}

	async fn list_notes(&self, folder: Folder) -> Vec<NoteEntry> {
		let dir = self.folder_path(folder);
		let mut entries = match fs::read_dir(&dir).await {
			Ok(entries) => entries,
			Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
			Err(err) => {
				tracing::warn!(path = %dir.display(), error = %err, "Treating unreadable folder as empty.");

				return Vec::new();
			},
		};
		let mut notes = Vec::new();

		loop {
			let entry = match entries.next_entry().await {
				Ok(Some(entry)) => entry,
				Ok(None) => break,
				Err(err) => {
					tracing::warn!(path = %dir.display(), error = %err, "Stopped listing folder early.");

					break;
				},
			};
			let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
				continue;
			};

			if !is_note_name(&file_name) {
				continue;
			}

			let path = entry.path();
			let metadata = match fs::metadata(&path).await {
				Ok(metadata) => metadata,
				Err(err) => {
					tracing::warn!(path = %path.display(), error = %err, "Skipping note without metadata.");

					continue;
				},
			};

			if !metadata.is_file() {
				continue;
			}

			let modified = metadata
				.modified()
				.map(OffsetDateTime::from)
				.unwrap_or_else(|_| OffsetDateTime::now_utc());

			notes.push(NoteEntry { file_name, path, modified });
		}

		notes.sort_by(|left, right| left.file_name.cmp(&right.file_name));

		notes
	}
}

fn is_note_name(file_name: &str) -> bool {
	!file_name.starts_with('.')
		&& file_name.len() > NOTE_EXTENSION.len()
		&& file_name.ends_with(NOTE_EXTENSION)
}

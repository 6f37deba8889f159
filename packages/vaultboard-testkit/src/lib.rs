mod error;

pub use error::{Error, Result};

use std::{
	fs,
	path::{Path, PathBuf},
};

use tempfile::TempDir;

/// Throwaway vault root. The directory tree is removed on drop.
pub struct TestVault {
	dir: TempDir,
}
impl TestVault {
	pub fn new() -> Result<Self> {
		let dir = tempfile::Builder::new().prefix("vaultboard_test_").tempdir()?;

		Ok(Self { dir })
	}

	pub fn path(&self) -> &Path {
		self.dir.path()
	}

	pub fn folder(&self, folder: &str) -> PathBuf {
		self.dir.path().join(folder)
	}

	pub fn create_folder(&self, folder: &str) -> Result<PathBuf> {
		let path = self.folder(folder);

		fs::create_dir_all(&path)?;

		Ok(path)
	}

	/// Writes `contents` to `folder/file_name`, creating the folder as needed.
	pub fn write(&self, folder: &str, file_name: &str, contents: &str) -> Result<PathBuf> {
		let path = self.create_folder(folder)?.join(file_name);

		fs::write(&path, contents)?;

		Ok(path)
	}

	/// Writes a note whose front matter holds `fields` in the given order.
	pub fn write_note(
		&self,
		folder: &str,
		file_name: &str,
		fields: &[(&str, &str)],
		body: &str,
	) -> Result<PathBuf> {
		self.write(folder, file_name, &note(fields, body))
	}

	pub fn exists(&self, folder: &str, file_name: &str) -> bool {
		self.folder(folder).join(file_name).is_file()
	}

	pub fn read(&self, folder: &str, file_name: &str) -> Result<String> {
		Ok(fs::read_to_string(self.folder(folder).join(file_name))?)
	}

	/// Sorted file names directly inside `folder`; empty when the folder is missing.
	pub fn file_names(&self, folder: &str) -> Result<Vec<String>> {
		let dir = self.folder(folder);

		if !dir.exists() {
			return Ok(Vec::new());
		}

		let mut names = Vec::new();

		for entry in fs::read_dir(&dir)? {
			let name = entry?.file_name().into_string().map_err(|name| {
				Error::Message(format!("Non UTF-8 file name in {}: {name:?}.", dir.display()))
			})?;

			names.push(name);
		}

		names.sort();

		Ok(names)
	}
}

/// Renders a markdown note with a YAML front-matter block. Values are double-quoted.
pub fn note(fields: &[(&str, &str)], body: &str) -> String {
	let mut out = String::from("---\n");

	for (key, value) in fields {
		out.push_str(key);
		out.push_str(": \"");
		out.push_str(&value.replace('\\', "\\\\").replace('"', "\\\""));
		out.push_str("\"\n");
	}

	out.push_str("---\n");
	out.push_str(body);

	if !body.ends_with('\n') {
		out.push('\n');
	}

	out
}

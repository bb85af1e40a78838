use std::env;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{MarkovError, Result};

/// Reads a UTF-8 text file and returns all its lines.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
///
/// # Errors
/// Returns `FileUnreadable` on I/O failure or non UTF-8 content.
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|e| MarkovError::unreadable(path, e))?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists the names of the immediate subdirectories of `dir`, sorted.
///
/// Each subdirectory of the corpus root is one author.
pub(crate) fn list_subdirectories<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(MarkovError::DirectoryNotFound(dir.to_path_buf()));
	}

	let mut names = Vec::new();
	for entry in fs::read_dir(dir).map_err(|e| MarkovError::unreadable(dir, e))? {
		let path = entry.map_err(|e| MarkovError::unreadable(dir, e))?.path();
		if path.is_dir() {
			if let Some(name) = path.file_name() {
				names.push(name.to_string_lossy().to_string());
			}
		}
	}

	names.sort();
	Ok(names)
}

/// Lists the regular files directly contained in `dir`, sorted by path.
///
/// Nested directories are skipped.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(MarkovError::DirectoryNotFound(dir.to_path_buf()));
	}

	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(|e| MarkovError::unreadable(dir, e))? {
		let path = entry.map_err(|e| MarkovError::unreadable(dir, e))?.path();
		if path.is_file() {
			files.push(path);
		} else {
			warn!(path = %path.display(), "skipping non-file entry");
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn lists_directories_and_files_sorted() {
		let root = TempDir::new().unwrap();
		fs::create_dir(root.path().join("zola")).unwrap();
		fs::create_dir(root.path().join("balzac")).unwrap();
		fs::write(root.path().join("notes.txt"), "not an author").unwrap();
		fs::write(root.path().join("balzac").join("b.txt"), "b").unwrap();
		fs::write(root.path().join("balzac").join("a.txt"), "a").unwrap();
		fs::create_dir(root.path().join("balzac").join("drafts")).unwrap();

		assert_eq!(list_subdirectories(root.path()).unwrap(), vec!["balzac", "zola"]);

		let files = list_files(root.path().join("balzac")).unwrap();
		let names: Vec<String> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
		assert_eq!(names, vec!["a.txt", "b.txt"]);
	}

	#[test]
	fn missing_directory_is_reported() {
		let root = TempDir::new().unwrap();
		let missing = root.path().join("nobody");
		assert!(matches!(list_files(&missing), Err(MarkovError::DirectoryNotFound(_))));
		assert!(matches!(list_subdirectories(&missing), Err(MarkovError::DirectoryNotFound(_))));
	}

	#[test]
	fn non_utf8_file_is_unreadable() {
		let root = TempDir::new().unwrap();
		let path = root.path().join("latin1.txt");
		fs::write(&path, [0x63, 0x61, 0x66, 0xe9, 0x0a]).unwrap();
		assert!(matches!(read_lines(&path), Err(MarkovError::FileUnreadable { .. })));
	}

	#[test]
	fn reads_lines_without_terminators() {
		let root = TempDir::new().unwrap();
		let path = root.path().join("text.txt");
		fs::write(&path, "first line\r\nsecond line\n").unwrap();
		assert_eq!(read_lines(&path).unwrap(), vec!["first line", "second line"]);
	}
}

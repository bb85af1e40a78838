use std::path::{Path, PathBuf};

use crate::error::{MarkovError, Result};
use crate::io;

/// Characters recognised as punctuation marks by the tokenizer.
///
/// Depending on [`AnalysisConfig::keep_punctuation`], each of them is either a
/// one-character token or a plain separator.
pub const PUNCTUATION: [char; 11] = ['!', '?', ',', '.', ':', ';', '(', ')', '-', '_', '\''];

/// Parameters of an analysis pass.
///
/// # Invariants
/// - `ngram_size` is always >= 1
/// - `workers` is always >= 1
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
	/// Directory holding one subdirectory per author.
	root_directory: PathBuf,

	/// Number of tokens per n-gram.
	ngram_size: usize,

	/// Keep punctuation marks as tokens (true) or treat them as separators (false).
	pub keep_punctuation: bool,

	/// Upper bound on the threads used to build author profiles.
	workers: usize,
}

impl AnalysisConfig {
	/// Creates a configuration rooted at `root_directory`.
	///
	/// `"."` and `"./"` resolve to the current working directory, other paths
	/// are kept as given. Punctuation is kept by default and the worker count
	/// defaults to the number of logical CPUs.
	///
	/// # Errors
	/// Returns `InvalidNGramSize` if `ngram_size` is 0.
	pub fn new<P: AsRef<Path>>(root_directory: P, ngram_size: usize) -> Result<Self> {
		let mut config = Self {
			root_directory: io::normalize_folder(root_directory.as_ref()),
			ngram_size: 1,
			keep_punctuation: true,
			workers: num_cpus::get().max(1),
		};
		config.set_ngram_size(ngram_size)?;
		Ok(config)
	}

	pub fn root_directory(&self) -> &Path {
		&self.root_directory
	}

	pub fn ngram_size(&self) -> usize {
		self.ngram_size
	}

	pub fn workers(&self) -> usize {
		self.workers
	}

	/// Sets the n-gram size.
	///
	/// # Errors
	/// Returns `InvalidNGramSize` if `ngram_size` is 0.
	pub fn set_ngram_size(&mut self, ngram_size: usize) -> Result<()> {
		if ngram_size == 0 {
			return Err(MarkovError::InvalidNGramSize(ngram_size));
		}
		self.ngram_size = ngram_size;
		Ok(())
	}

	/// Sets the worker count, clamped to at least one thread.
	pub fn set_workers(&mut self, workers: usize) {
		self.workers = workers.max(1);
	}

	pub fn with_punctuation(mut self, keep_punctuation: bool) -> Self {
		self.keep_punctuation = keep_punctuation;
		self
	}
}

/// Naming scheme of the generated text file.
///
/// The final name is `basename [+ separator + author] + extension`.
///
/// Example: `Gen_text` + `_` + `balzac` + `.txt` → `Gen_text_balzac.txt`
#[derive(Clone, Debug)]
pub struct GeneratedFileName {
	pub basename: String,
	pub separator: String,
	pub include_author: bool,
	pub extension: String,
}

impl Default for GeneratedFileName {
	fn default() -> Self {
		Self {
			basename: "Gen_text".to_owned(),
			separator: "_".to_owned(),
			include_author: true,
			extension: ".txt".to_owned(),
		}
	}
}

impl GeneratedFileName {
	/// Builds the file name for a text generated from `author`.
	pub fn for_author(&self, author: &str) -> String {
		let mut name = self.basename.clone();
		if self.include_author {
			name.push_str(&self.separator);
			name.push_str(author);
		}
		name.push_str(&self.extension);
		name
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_zero_ngram_size() {
		let err = AnalysisConfig::new("corpus", 0).unwrap_err();
		assert!(matches!(err, MarkovError::InvalidNGramSize(0)));

		let mut config = AnalysisConfig::new("corpus", 2).unwrap();
		assert!(config.set_ngram_size(0).is_err());
		assert_eq!(config.ngram_size(), 2);
	}

	#[test]
	fn workers_never_drop_to_zero() {
		let mut config = AnalysisConfig::new("corpus", 1).unwrap();
		config.set_workers(0);
		assert_eq!(config.workers(), 1);
	}

	#[test]
	fn generated_file_name_variants() {
		let naming = GeneratedFileName::default();
		assert_eq!(naming.for_author("balzac"), "Gen_text_balzac.txt");

		let naming = GeneratedFileName {
			basename: "out".to_owned(),
			separator: "-".to_owned(),
			include_author: false,
			extension: ".md".to_owned(),
		};
		assert_eq!(naming.for_author("balzac"), "out.md");
	}
}

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::error::{MarkovError, Result};
use crate::io;
use super::extractor::NGramExtractor;
use super::frequency_table::FrequencyTable;

/// Statistical fingerprint of one author.
///
/// Holds a single frequency table aggregated over every file found in the
/// author's directory. Larger works weigh proportionally more: counts are
/// never normalized per document.
#[derive(Clone, Debug)]
pub struct AuthorProfile {
	name: String,
	table: FrequencyTable,
	documents: usize,
}

impl AuthorProfile {
	pub fn new(name: &str, table: FrequencyTable, documents: usize) -> Self {
		Self { name: name.to_owned(), table, documents }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Number of files analysed for this author.
	pub fn documents(&self) -> usize {
		self.documents
	}
}

/// Every analysed author, indexed by name.
///
/// A corpus is built once by [`Corpus::build`] and never mutated afterwards;
/// it also remembers the tokenization settings so unknown documents are read
/// the same way as the authors' works.
///
/// # Invariants
/// - Every profile's table has `ngram_size` tokens per n-gram
#[derive(Clone, Debug)]
pub struct Corpus {
	ngram_size: usize,
	keep_punctuation: bool,
	authors: BTreeMap<String, AuthorProfile>,
}

impl Corpus {
	/// Lists the authors available under the configured root directory.
	///
	/// # Errors
	/// Returns `DirectoryNotFound` if the root is not a directory.
	pub fn discover_authors(config: &AnalysisConfig) -> Result<Vec<String>> {
		io::list_subdirectories(config.root_directory())
	}

	/// Analyses the works of `author_names`, or of every author found under the
	/// root directory when `author_names` is empty.
	///
	/// # Behavior
	/// - Authors are split across up to `config.workers()` threads
	/// - Each file is tokenized on its own: n-grams never span two files
	/// - File order inside an author directory is the sorted path order
	///
	/// # Errors
	/// Any missing directory or unreadable file aborts the whole build. When
	/// several authors fail, the error of the first one in name order is returned.
	pub fn build(config: &AnalysisConfig, author_names: &[String]) -> Result<Self> {
		let root = config.root_directory();
		if !root.is_dir() {
			return Err(MarkovError::DirectoryNotFound(root.to_path_buf()));
		}

		let mut names = if author_names.is_empty() {
			Self::discover_authors(config)?
		} else {
			author_names.to_vec()
		};
		names.sort();
		names.dedup();

		let authors = Self::build_profiles(config, &names)?;
		info!(
			authors = authors.len(),
			ngram_size = config.ngram_size(),
			keep_punctuation = config.keep_punctuation,
			"corpus analysed"
		);

		Ok(Self {
			ngram_size: config.ngram_size(),
			keep_punctuation: config.keep_punctuation,
			authors,
		})
	}

	/// Assembles a corpus from already built tables.
	///
	/// # Errors
	/// Returns `InvalidNGramSize` if a table does not use `ngram_size`.
	pub fn from_tables<I>(ngram_size: usize, keep_punctuation: bool, tables: I) -> Result<Self>
	where
		I: IntoIterator<Item = (String, FrequencyTable)>,
	{
		if ngram_size == 0 {
			return Err(MarkovError::InvalidNGramSize(ngram_size));
		}
		let mut authors = BTreeMap::new();
		for (name, table) in tables {
			if table.ngram_size() != ngram_size {
				return Err(MarkovError::InvalidNGramSize(table.ngram_size()));
			}
			authors.insert(name.clone(), AuthorProfile::new(&name, table, 0));
		}
		Ok(Self { ngram_size, keep_punctuation, authors })
	}

	/// Builds profiles in parallel and collects them by author name.
	///
	/// Each worker owns the tables it builds until they are sent back
	/// through the channel.
	fn build_profiles(config: &AnalysisConfig, names: &[String]) -> Result<BTreeMap<String, AuthorProfile>> {
		if names.is_empty() {
			return Ok(BTreeMap::new());
		}

		let workers = config.workers().min(names.len());
		let chunk_size = names.len().div_ceil(workers);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in names.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					for name in chunk {
						let profile = Self::build_profile(config, name);
						if tx.send((name.clone(), profile)).is_err() {
							return;
						}
					}
				});
			}
		});
		drop(tx);

		let results: BTreeMap<String, Result<AuthorProfile>> = rx.iter().collect();
		results
			.into_iter()
			.map(|(name, profile)| profile.map(|profile| (name, profile)))
			.collect()
	}

	fn build_profile(config: &AnalysisConfig, name: &str) -> Result<AuthorProfile> {
		let dir = config.root_directory().join(name);
		let files = io::list_files(&dir)?;

		let mut extractor = NGramExtractor::new(config.ngram_size(), config.keep_punctuation)?;
		let mut table = extractor.new_table();
		for file in &files {
			let lines = io::read_lines(file)?;
			let mut file_table = extractor.new_table();
			extractor.feed_document(&lines, &mut file_table);
			debug!(author = name, file = %file.display(), ngrams = file_table.total(), "file analysed");
			table.merge(&file_table)?;
		}

		debug!(author = name, documents = files.len(), distinct = table.len(), "author analysed");
		Ok(AuthorProfile::new(name, table, files.len()))
	}

	/// Builds the frequency table of a single document with this corpus' settings.
	///
	/// # Errors
	/// Returns `FileUnreadable` if the file cannot be read as UTF-8 text.
	pub fn document_table<P: AsRef<Path>>(&self, path: P) -> Result<FrequencyTable> {
		let lines = io::read_lines(&path)?;
		let mut extractor = NGramExtractor::new(self.ngram_size, self.keep_punctuation)?;
		let mut table = extractor.new_table();
		extractor.feed_document(&lines, &mut table);
		Ok(table)
	}

	pub fn ngram_size(&self) -> usize {
		self.ngram_size
	}

	/// Returns the profile of `name`.
	///
	/// # Errors
	/// Returns `UnknownAuthor` if the author was not analysed.
	pub fn author(&self, name: &str) -> Result<&AuthorProfile> {
		self.authors
			.get(name)
			.ok_or_else(|| MarkovError::UnknownAuthor(name.to_owned()))
	}

	/// Profiles in author name order.
	pub fn authors(&self) -> impl Iterator<Item = &AuthorProfile> {
		self.authors.values()
	}

	pub fn author_names(&self) -> Vec<&str> {
		self.authors.keys().map(String::as_str).collect()
	}

	pub fn len(&self) -> usize {
		self.authors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.authors.is_empty()
	}
}

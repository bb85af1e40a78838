use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by corpus analysis and by the operations run against a corpus.
///
/// Corpus construction failures (`DirectoryNotFound`, `FileUnreadable`) abort the
/// whole analysis pass: a partial corpus is never returned.
#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("directory not found: {}", .0.display())]
	DirectoryNotFound(PathBuf),

	#[error("cannot read {}: {source}", .path.display())]
	FileUnreadable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("unknown author: {0}")]
	UnknownAuthor(String),

	#[error("no n-gram recorded for author {0}")]
	EmptyFrequencyTable(String),

	#[error("rank {rank} is out of range (1..={len})")]
	RankOutOfRange { rank: usize, len: usize },

	#[error("invalid n-gram size {0}, must be >= 1")]
	InvalidNGramSize(usize),

	/// Failure while writing generated text to its sink.
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

impl MarkovError {
	pub(crate) fn unreadable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
		Self::FileUnreadable { path: path.into(), source }
	}
}

pub type Result<T> = std::result::Result<T, MarkovError>;

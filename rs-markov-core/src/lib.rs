//! N-gram based author fingerprinting library.
//!
//! This crate builds per-author n-gram frequency tables from a directory of
//! texts and uses them to:
//! - Attribute an unknown document to the closest author (cosine similarity)
//! - Generate text following an author's n-gram frequencies
//! - Query the n-grams sharing a given frequency rank
//!
//! File discovery and reading are internal helpers; everything else is
//! reachable through the `model` module or the `Analyzer` trait.

/// Frequency tables, corpus construction and the operations run on a corpus.
pub mod model;

/// Analysis parameters and output file naming.
pub mod config;

/// Error type shared by every operation.
pub mod error;

/// I/O utilities (line reading, directory listing, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use config::{AnalysisConfig, GeneratedFileName, PUNCTUATION};
pub use error::{MarkovError, Result};
pub use model::analyzer::{Analyzer, MarkovAnalyzer};
pub use model::classifier::AuthorScore;
pub use model::corpus::{AuthorProfile, Corpus};
pub use model::frequency_table::{FrequencyTable, NGram};
pub use model::ranking::RankedEntry;

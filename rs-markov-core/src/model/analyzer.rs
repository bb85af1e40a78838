use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::AnalysisConfig;
use crate::error::Result;
use super::classifier::{self, AuthorScore};
use super::corpus::Corpus;
use super::generator;
use super::ranking::{self, RankedEntry};

/// Operations offered to the command line (or any other front end).
///
/// Front ends receive an implementation by injection and never depend on a
/// concrete analyzer.
pub trait Analyzer {
	/// Runs the analysis pass over `author_names` (every author when empty).
	fn build_corpus(&self, author_names: &[String]) -> Result<Corpus>;

	/// Scores an unknown document against every author of `corpus`.
	fn classify(&self, document: &Path, corpus: &Corpus) -> Result<Vec<AuthorScore>>;

	/// Writes about `target_len` tokens in the style of `author` to `output`.
	fn generate(&self, author: &str, target_len: usize, output: &Path, corpus: &Corpus) -> Result<()>;

	/// Tie band of the `rank`-th most frequent n-gram of `author`.
	fn ranked_ngram(&self, author: &str, rank: usize, corpus: &Corpus) -> Result<Vec<RankedEntry>>;
}

/// Frequency-table analyzer: cosine classification, weighted generation.
#[derive(Clone, Debug)]
pub struct MarkovAnalyzer {
	config: AnalysisConfig,
	/// Fixed seed for reproducible generation, thread RNG otherwise.
	seed: Option<u64>,
}

impl MarkovAnalyzer {
	pub fn new(config: AnalysisConfig) -> Self {
		Self { config, seed: None }
	}

	pub fn with_seed(mut self, seed: Option<u64>) -> Self {
		self.seed = seed;
		self
	}
}

impl Analyzer for MarkovAnalyzer {
	fn build_corpus(&self, author_names: &[String]) -> Result<Corpus> {
		Corpus::build(&self.config, author_names)
	}

	fn classify(&self, document: &Path, corpus: &Corpus) -> Result<Vec<AuthorScore>> {
		let table = corpus.document_table(document)?;
		Ok(classifier::classify(corpus, &table))
	}

	fn generate(&self, author: &str, target_len: usize, output: &Path, corpus: &Corpus) -> Result<()> {
		match self.seed {
			Some(seed) => generator::generate_to_file(corpus, author, target_len, output, &mut StdRng::seed_from_u64(seed)),
			None => generator::generate_to_file(corpus, author, target_len, output, &mut rand::rng()),
		}
	}

	fn ranked_ngram(&self, author: &str, rank: usize, corpus: &Corpus) -> Result<Vec<RankedEntry>> {
		ranking::ranked_ngram(corpus, author, rank)
	}
}

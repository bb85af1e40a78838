use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::error::{MarkovError, Result};
use super::corpus::{AuthorProfile, Corpus};
use super::frequency_table::NGram;

/// Text generator drawing n-grams from an author's frequency table.
///
/// # Behavior
/// - Each draw picks an n-gram with a probability proportional to its count
/// - Draws are independent: the previous n-gram never conditions the next one
/// - Entries are walked in descending count order, so the most frequent
///   n-grams occupy the first slices of the wheel
///
/// # Invariants
/// - `entries` is never empty
/// - `total` is the sum of all entry counts, hence > 0
#[derive(Debug)]
pub struct WeightedGenerator<'a> {
	author: &'a str,
	ngram_size: usize,
	entries: Vec<(&'a NGram, usize)>,
	total: usize,
}

impl<'a> WeightedGenerator<'a> {
	/// Prepares the cumulative distribution of an author's n-grams.
	///
	/// # Errors
	/// Returns `EmptyFrequencyTable` if the author has no n-gram.
	pub fn new(profile: &'a AuthorProfile) -> Result<Self> {
		let table = profile.table();
		let total = table.total();
		if total == 0 {
			return Err(MarkovError::EmptyFrequencyTable(profile.name().to_owned()));
		}
		Ok(Self {
			author: profile.name(),
			ngram_size: table.ngram_size(),
			entries: table.ranked(),
			total,
		})
	}

	/// Number of draws needed for a text of about `target_len` tokens.
	pub fn draw_count(&self, target_len: usize) -> usize {
		target_len / self.ngram_size + 1
	}

	/// Draws one n-gram using roulette-wheel selection.
	pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a NGram {
		let mut r = rng.random_range(0..self.total);
		for (ngram, count) in &self.entries {
			if r < *count {
				return *ngram;
			}
			r -= *count;
		}

		// Fallback: not reachable while `total` is the sum of the counts
		self.entries[self.entries.len() - 1].0
	}

	/// Writes a text of about `target_len` tokens to `sink`.
	///
	/// Every drawn n-gram is written with its tokens separated by spaces and
	/// followed by a single space.
	///
	/// Returns the number of n-grams written.
	pub fn write_text<W, R>(&self, target_len: usize, sink: &mut W, rng: &mut R) -> Result<usize>
	where
		W: Write + ?Sized,
		R: Rng + ?Sized,
	{
		let draws = self.draw_count(target_len);
		for _ in 0..draws {
			write!(sink, "{} ", self.draw(rng))?;
		}
		sink.flush()?;
		Ok(draws)
	}
}

/// Generates a text in the style of `author` and writes it to `output`.
///
/// # Errors
/// - `UnknownAuthor` if the author is not part of the corpus
/// - `EmptyFrequencyTable` if the author has no n-gram
/// - `Io` if the output file cannot be created or written
pub fn generate_to_file<P, R>(corpus: &Corpus, author: &str, target_len: usize, output: P, rng: &mut R) -> Result<()>
where
	P: AsRef<Path>,
	R: Rng + ?Sized,
{
	let generator = WeightedGenerator::new(corpus.author(author)?)?;
	let mut sink = BufWriter::new(File::create(&output)?);
	let draws = generator.write_text(target_len, &mut sink, rng)?;
	info!(
		author = generator.author,
		draws,
		output = %output.as_ref().display(),
		"text generated"
	);
	Ok(())
}

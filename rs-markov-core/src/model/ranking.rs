use serde::Serialize;

use crate::error::{MarkovError, Result};
use super::corpus::Corpus;
use super::frequency_table::{FrequencyTable, NGram};

/// An n-gram and its number of occurrences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
	pub ngram: NGram,
	pub count: usize,
}

/// Returns every entry sharing the count of the `rank`-th most frequent n-gram.
///
/// `rank` is 1-based. Entries are ranked by descending count; ties are never
/// broken, the whole band of equal counts around `rank` is returned, in
/// ranking order.
///
/// # Errors
/// Returns `RankOutOfRange` if `rank` is 0 or greater than the number of
/// distinct n-grams.
pub fn tie_band(table: &FrequencyTable, rank: usize) -> Result<Vec<RankedEntry>> {
	let sorted = table.ranked();
	if rank == 0 || rank > sorted.len() {
		return Err(MarkovError::RankOutOfRange { rank, len: sorted.len() });
	}

	let index = rank - 1;
	let target = sorted[index].1;

	let mut first = index;
	while first > 0 && sorted[first - 1].1 == target {
		first -= 1;
	}
	let mut last = index;
	while last + 1 < sorted.len() && sorted[last + 1].1 == target {
		last += 1;
	}

	Ok(sorted[first..=last]
		.iter()
		.map(|(ngram, count)| RankedEntry { ngram: (*ngram).clone(), count: *count })
		.collect())
}

/// Tie band of rank `rank` in the table of `author`.
///
/// # Errors
/// - `UnknownAuthor` if the author is not part of the corpus
/// - `EmptyFrequencyTable` if the author has no n-gram
/// - `RankOutOfRange` as for [`tie_band`]
pub fn ranked_ngram(corpus: &Corpus, author: &str, rank: usize) -> Result<Vec<RankedEntry>> {
	let table = corpus.author(author)?.table();
	if table.is_empty() {
		return Err(MarkovError::EmptyFrequencyTable(author.to_owned()));
	}
	tie_band(table, rank)
}

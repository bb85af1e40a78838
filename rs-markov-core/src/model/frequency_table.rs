use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{MarkovError, Result};

/// An ordered sequence of tokens, the key of a [`FrequencyTable`].
///
/// A unigram is a one-token sequence. Order matters: `("the", "cat")` and
/// `("cat", "the")` are different n-grams.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NGram(Vec<String>);

impl NGram {
	pub fn new(tokens: Vec<String>) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<S: Into<String>> FromIterator<S> for NGram {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}

/// Tokens separated by single spaces.
impl fmt::Display for NGram {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(" "))
	}
}

/// Occurrence counts of the n-grams of a token stream.
///
/// # Invariants
/// - `ngram_size` is always >= 1
/// - Every stored n-gram has exactly `ngram_size` tokens
/// - Every stored count is >= 1; an absent n-gram counts 0
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
	ngram_size: usize,
	counts: BTreeMap<NGram, usize>,
}

impl FrequencyTable {
	/// Creates an empty table for n-grams of `ngram_size` tokens.
	///
	/// # Errors
	/// Returns `InvalidNGramSize` if `ngram_size` is 0.
	pub fn new(ngram_size: usize) -> Result<Self> {
		if ngram_size == 0 {
			return Err(MarkovError::InvalidNGramSize(ngram_size));
		}
		Ok(Self { ngram_size, counts: BTreeMap::new() })
	}

	pub fn ngram_size(&self) -> usize {
		self.ngram_size
	}

	/// Records one occurrence of `ngram`.
	pub fn add(&mut self, ngram: NGram) {
		self.add_count(ngram, 1);
	}

	fn add_count(&mut self, ngram: NGram, count: usize) {
		debug_assert_eq!(ngram.len(), self.ngram_size);
		if count > 0 {
			*self.counts.entry(ngram).or_insert(0) += count;
		}
	}

	/// Number of occurrences of `ngram`, 0 when absent.
	pub fn count(&self, ngram: &NGram) -> usize {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Number of distinct n-grams.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Sum of all counts.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Iterates over `(ngram, count)` pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&NGram, usize)> {
		self.counts.iter().map(|(k, v)| (k, *v))
	}

	/// Returns all entries sorted by descending count.
	///
	/// The sort is stable, so equal counts keep key order.
	pub fn ranked(&self) -> Vec<(&NGram, usize)> {
		let mut entries: Vec<_> = self.iter().collect();
		entries.sort_by(|a, b| b.1.cmp(&a.1));
		entries
	}

	/// Merges another table into this one by summing counts.
	///
	/// # Errors
	/// Returns `InvalidNGramSize` if both tables do not share the same n-gram size.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.ngram_size != other.ngram_size {
			return Err(MarkovError::InvalidNGramSize(other.ngram_size));
		}
		for (ngram, count) in other.iter() {
			self.add_count(ngram.clone(), count);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ngram(tokens: &[&str]) -> NGram {
		tokens.iter().copied().collect()
	}

	#[test]
	fn absent_key_counts_zero() {
		let mut table = FrequencyTable::new(2).unwrap();
		table.add(ngram(&["the", "cat"]));
		table.add(ngram(&["the", "cat"]));
		assert_eq!(table.count(&ngram(&["the", "cat"])), 2);
		assert_eq!(table.count(&ngram(&["cat", "the"])), 0);
		assert_eq!(table.len(), 1);
		assert_eq!(table.total(), 2);
	}

	#[test]
	fn ranked_is_descending_and_stable() {
		let mut table = FrequencyTable::new(1).unwrap();
		for word in ["zebra", "apple", "mango", "apple", "zebra", "zebra"] {
			table.add(ngram(&[word]));
		}
		let ranked: Vec<_> = table.ranked().into_iter().map(|(k, c)| (k.to_string(), c)).collect();
		assert_eq!(
			ranked,
			vec![("zebra".to_owned(), 3), ("apple".to_owned(), 2), ("mango".to_owned(), 1)]
		);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = FrequencyTable::new(1).unwrap();
		left.add(ngram(&["alpha"]));
		let mut right = FrequencyTable::new(1).unwrap();
		right.add(ngram(&["alpha"]));
		right.add(ngram(&["beta"]));

		left.merge(&right).unwrap();
		assert_eq!(left.count(&ngram(&["alpha"])), 2);
		assert_eq!(left.count(&ngram(&["beta"])), 1);

		let other_size = FrequencyTable::new(2).unwrap();
		assert!(left.merge(&other_size).is_err());
	}

	#[test]
	fn display_joins_with_spaces() {
		assert_eq!(ngram(&["comme", "moi"]).to_string(), "comme moi");
	}
}

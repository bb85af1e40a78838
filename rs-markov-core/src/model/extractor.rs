use std::collections::VecDeque;

use crate::error::Result;
use super::frequency_table::{FrequencyTable, NGram};
use super::tokenizer::Tokenizer;

/// Turns a token stream into n-gram counts with a sliding window.
///
/// # Behavior
/// - Tokens are pushed into a window of at most `ngram_size` entries
/// - Every time the window is full, its content is counted once and the
///   oldest token is evicted
/// - A partially filled window is never counted (no padding)
///
/// The window survives across lines, so n-grams may span a line break.
/// Call [`NGramExtractor::reset`] between unrelated documents.
#[derive(Debug)]
pub struct NGramExtractor {
	tokenizer: Tokenizer,
	ngram_size: usize,
	window: VecDeque<String>,
	/// Empty table of the right size, cloned for each new target.
	empty: FrequencyTable,
}

impl NGramExtractor {
	/// # Errors
	/// Returns `InvalidNGramSize` if `ngram_size` is 0.
	pub fn new(ngram_size: usize, keep_punctuation: bool) -> Result<Self> {
		let empty = FrequencyTable::new(ngram_size)?;
		Ok(Self {
			tokenizer: Tokenizer::new(keep_punctuation),
			ngram_size,
			window: VecDeque::with_capacity(ngram_size),
			empty,
		})
	}

	/// Creates an empty table matching this extractor's n-gram size.
	pub fn new_table(&self) -> FrequencyTable {
		self.empty.clone()
	}

	/// Tokenizes `line` and counts every n-gram completed by its tokens.
	pub fn feed_line(&mut self, line: &str, table: &mut FrequencyTable) {
		for token in self.tokenizer.tokenize(line) {
			self.push_token(token, table);
		}
	}

	/// Feeds a whole document, then resets the window.
	pub fn feed_document<I, S>(&mut self, lines: I, table: &mut FrequencyTable)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for line in lines {
			self.feed_line(line.as_ref(), table);
		}
		self.reset();
	}

	/// Drops any pending tokens.
	pub fn reset(&mut self) {
		self.window.clear();
	}

	fn push_token(&mut self, token: String, table: &mut FrequencyTable) {
		self.window.push_back(token);
		if self.window.len() == self.ngram_size {
			table.add(NGram::new(self.window.iter().cloned().collect()));
			self.window.pop_front();
		}
	}
}

use crate::config::PUNCTUATION;

/// Word tokens shorter than this (in characters) are discarded as noise.
pub const MIN_WORD_LEN: usize = 3;

/// Splits raw text into normalized tokens.
///
/// - Case is folded to lowercase
/// - Any whitespace (newline and U+00A0 included) separates tokens
/// - Punctuation marks are either one-character tokens or separators
/// - Words shorter than [`MIN_WORD_LEN`] are dropped; punctuation tokens never are
#[derive(Clone, Copy, Debug)]
pub struct Tokenizer {
	keep_punctuation: bool,
}

impl Tokenizer {
	pub fn new(keep_punctuation: bool) -> Self {
		Self { keep_punctuation }
	}

	fn is_punctuation(c: char) -> bool {
		PUNCTUATION.contains(&c)
	}

	/// Tokenizes one line of text.
	///
	/// Words never span lines: the end of the line closes the current word.
	pub fn tokenize(&self, line: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		let mut word = String::new();

		for c in line.chars().flat_map(char::to_lowercase) {
			if c.is_whitespace() || c == '\u{a0}' {
				Self::close_word(&mut word, &mut tokens);
			} else if Self::is_punctuation(c) {
				Self::close_word(&mut word, &mut tokens);
				if self.keep_punctuation {
					tokens.push(c.to_string());
				}
			} else {
				word.push(c);
			}
		}
		Self::close_word(&mut word, &mut tokens);

		tokens
	}

	/// Pushes the pending word if long enough, and resets it either way.
	fn close_word(word: &mut String, tokens: &mut Vec<String>) {
		if word.chars().count() >= MIN_WORD_LEN {
			tokens.push(std::mem::take(word));
		} else {
			word.clear();
		}
	}
}

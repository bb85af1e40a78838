use serde::Serialize;

use super::corpus::Corpus;
use super::frequency_table::FrequencyTable;

/// Closeness of an unknown document to one author.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AuthorScore {
	pub author: String,
	pub score: f64,
}

/// Cosine similarity between a document and an author, restricted to the
/// n-grams of the document.
///
/// Both vectors are indexed by the document's keys only: n-grams the author
/// uses but the document does not are ignored, so the measure is asymmetric.
///
/// A zero norm is replaced by 1, which yields a score of 0 instead of a
/// division by zero.
pub fn cosine_similarity(document: &FrequencyTable, author: &FrequencyTable) -> f64 {
	let mut dot = 0.0;
	let mut document_norm = 0.0;
	let mut author_norm = 0.0;

	for (ngram, count) in document.iter() {
		let u = count as f64;
		let a = author.count(ngram) as f64;
		dot += u * a;
		document_norm += u * u;
		author_norm += a * a;
	}

	let document_norm = non_zero(document_norm.sqrt());
	let author_norm = non_zero(author_norm.sqrt());
	dot / (document_norm * author_norm)
}

#[inline]
fn non_zero(norm: f64) -> f64 {
	if norm == 0.0 { 1.0 } else { norm }
}

/// Scores a document table against every author of the corpus.
///
/// Results follow the corpus' author order; callers sort them as they need.
pub fn classify(corpus: &Corpus, document: &FrequencyTable) -> Vec<AuthorScore> {
	corpus
		.authors()
		.map(|profile| AuthorScore {
			author: profile.name().to_owned(),
			score: cosine_similarity(document, profile.table()),
		})
		.collect()
}

/// Sorts scores from the closest author to the farthest.
pub fn sort_by_score(scores: &mut [AuthorScore]) {
	scores.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.author.cmp(&b.author)));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::frequency_table::NGram;

	/// Builds a table from `("space separated ngram", count)` pairs.
	fn table(ngram_size: usize, entries: &[(&str, usize)]) -> FrequencyTable {
		let mut table = FrequencyTable::new(ngram_size).unwrap();
		for (key, count) in entries {
			for _ in 0..*count {
				table.add(key.split_whitespace().collect::<NGram>());
			}
		}
		table
	}

	#[test]
	fn author_with_matching_ngram_ranks_higher() {
		let corpus = Corpus::from_tables(
			2,
			false,
			[
				("first".to_owned(), table(2, &[("the cat", 5), ("cat sat", 1)])),
				("second".to_owned(), table(2, &[("cat sat", 3)])),
			],
		)
		.unwrap();
		let document = table(2, &[("the cat", 1)]);

		let scores = classify(&corpus, &document);
		assert_eq!(scores.len(), 2);
		assert_eq!(scores[0].author, "first");
		assert!(scores[0].score > scores[1].score);
		assert_eq!(scores[1].score, 0.0);
	}

	#[test]
	fn author_only_ngrams_are_ignored() {
		let document = table(1, &[("alpha", 2)]);
		let author = table(1, &[("alpha", 7), ("beta", 100)]);
		assert!((cosine_similarity(&document, &author) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn degenerate_vectors_score_zero() {
		let empty = FrequencyTable::new(1).unwrap();
		let author = table(1, &[("alpha", 3)]);
		assert_eq!(cosine_similarity(&empty, &author), 0.0);

		let document = table(1, &[("gamma", 3)]);
		assert_eq!(cosine_similarity(&document, &author), 0.0);
	}

	#[test]
	fn score_stays_within_unit_interval() {
		let document = table(1, &[("alpha", 3), ("beta", 1), ("gamma", 4)]);
		let author = table(1, &[("alpha", 1), ("beta", 9), ("delta", 2)]);
		let score = cosine_similarity(&document, &author);
		assert!(score > 0.0 && score <= 1.0 + 1e-12, "score = {score}");
	}

	#[test]
	fn sorts_closest_first() {
		let mut scores = vec![
			AuthorScore { author: "b".to_owned(), score: 0.2 },
			AuthorScore { author: "a".to_owned(), score: 0.9 },
			AuthorScore { author: "c".to_owned(), score: 0.2 },
		];
		sort_by_score(&mut scores);
		let order: Vec<_> = scores.iter().map(|s| s.author.as_str()).collect();
		assert_eq!(order, vec!["a", "b", "c"]);
	}
}

//! Top-level module for the n-gram statistics engine.
//!
//! This module provides everything needed to fingerprint authors, including:
//! - Text normalization (`Tokenizer`)
//! - Sliding-window n-gram counting (`NGramExtractor`, `FrequencyTable`)
//! - Per-author aggregation over a directory tree (`Corpus`)
//! - Author attribution, text generation and frequency ranking
//! - A capability interface for front ends (`Analyzer`)

/// Lowercasing, punctuation handling and short-word filtering.
pub mod tokenizer;

/// Sliding window turning tokens into n-gram counts.
pub mod extractor;

/// N-gram keys and their occurrence counts.
pub mod frequency_table;

/// Author profiles built from a directory tree.
///
/// Supports parallel construction, one author per worker task.
pub mod corpus;

/// Cosine similarity between an unknown document and each author.
pub mod classifier;

/// Count-weighted random text generation.
pub mod generator;

/// Rank lookup returning the whole band of tied counts.
pub mod ranking;

/// `Analyzer` trait and its frequency-table implementation.
pub mod analyzer;

//! Command line definition and handlers

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use serde::Serialize;
use tracing::info;

use rs_markov_core::model::classifier::sort_by_score;
use rs_markov_core::{
	AnalysisConfig, Analyzer, Corpus, GeneratedFileName, MarkovAnalyzer, PUNCTUATION, RankedEntry,
};

/// Parse and validate the n-gram size (1-19)
fn parse_ngram_size(s: &str) -> Result<usize, String> {
	let n: usize = s
		.parse()
		.map_err(|_| format!("'{}' is not a valid number", s))?;
	if n == 0 {
		Err("n-gram size must be at least 1".to_string())
	} else if n > 19 {
		Err("n-gram size cannot exceed 19".to_string())
	} else {
		Ok(n)
	}
}

/// rs-markov - author fingerprinting with n-gram frequencies
#[derive(Parser, Debug)]
#[command(name = "rs-markov", version)]
#[command(
	about = "Attribute, imitate and rank texts from per-author n-gram frequencies",
	after_help = "\
Examples:
  rs-markov -d authors -A -f mystery.txt -m 2       Closest author of mystery.txt
  rs-markov -d authors -a hugo -F 1 -m 2            Most frequent bigram(s) of hugo
  rs-markov -d authors -a hugo -G 500 -m 3          Generate Gen_text_hugo.txt"
)]
#[command(group(ArgGroup::new("authors").required(true).args(["author", "all"])))]
pub struct Cli {
	/// Directory containing one subdirectory per author
	#[arg(short = 'd', long = "dir", default_value = ".")]
	pub dir: PathBuf,

	/// Produce results for this author only
	#[arg(short = 'a', long)]
	pub author: Option<String>,

	/// Produce results for every author
	#[arg(short = 'A', long)]
	pub all: bool,

	/// Unknown document to attribute to an author
	#[arg(short = 'f', long = "file")]
	pub unknown: Option<PathBuf>,

	/// N-gram size (1-19)
	#[arg(short = 'm', long = "ngram", default_value = "1", value_parser = parse_ngram_size)]
	pub ngram: usize,

	/// Frequency rank of the n-gram(s) to print
	#[arg(short = 'F', long = "rank")]
	pub rank: Option<usize>,

	/// Size (in tokens) of the text to generate
	#[arg(short = 'G', long = "gen-size")]
	pub gen_size: Option<usize>,

	/// Base name of the generated file
	#[arg(short = 'g', long = "gen-name", default_value = "Gen_text")]
	pub gen_name: String,

	/// Extension of the generated file
	#[arg(long = "g-ext", default_value = ".txt")]
	pub gen_ext: String,

	/// Separator between base name and author in the generated file name
	#[arg(long = "g-sep", default_value = "_")]
	pub gen_sep: String,

	/// Leave the author name out of the generated file name
	#[arg(long = "g-noaut")]
	pub gen_no_author: bool,

	/// Directory receiving generated files
	#[arg(long = "g-dir", default_value = ".")]
	pub gen_dir: PathBuf,

	/// Treat punctuation marks as separators instead of tokens
	#[arg(long = "no-ponc")]
	pub no_punctuation: bool,

	/// Seed for reproducible generation
	#[arg(long)]
	pub seed: Option<u64>,

	/// Maximum number of analysis threads (default: number of CPUs)
	#[arg(long)]
	pub workers: Option<usize>,

	/// Print results as JSON
	#[arg(long)]
	pub json: bool,

	/// Verbose mode: print every parameter and debug logs
	#[arg(short = 'v', long)]
	pub verbose: bool,
}

impl Cli {
	fn file_naming(&self) -> GeneratedFileName {
		GeneratedFileName {
			basename: self.gen_name.clone(),
			separator: self.gen_sep.clone(),
			include_author: !self.gen_no_author,
			extension: self.gen_ext.clone(),
		}
	}

	/// Authors to analyse. Classification needs every author, so an empty
	/// list (meaning all) is returned in that case too.
	fn analysed_authors(&self) -> Vec<String> {
		match (&self.author, self.all || self.unknown.is_some()) {
			(Some(author), false) => vec![author.clone()],
			_ => Vec::new(),
		}
	}

	/// Authors targeted by generation and ranking.
	fn target_authors(&self, corpus: &Corpus) -> Vec<String> {
		match &self.author {
			Some(author) => vec![author.clone()],
			None => corpus.author_names().into_iter().map(str::to_owned).collect(),
		}
	}
}

#[derive(Serialize)]
struct RankReport<'a> {
	author: &'a str,
	rank: usize,
	ngram_size: usize,
	entries: Vec<RankedEntry>,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
	let mut config = AnalysisConfig::new(&cli.dir, cli.ngram)?.with_punctuation(!cli.no_punctuation);
	if let Some(workers) = cli.workers {
		config.set_workers(workers);
	}

	let stdout = io::stdout();
	let mut out = stdout.lock();
	if cli.verbose {
		print_verbose(&cli, &config, &mut out)?;
	}

	let analyzer = MarkovAnalyzer::new(config).with_seed(cli.seed);
	execute(&cli, &analyzer, &mut out)
}

/// Runs the analysis pass, then generation, classification and ranking,
/// in that order, for whatever the command line requested.
pub(crate) fn execute<A, W>(cli: &Cli, analyzer: &A, out: &mut W) -> Result<()>
where
	A: Analyzer,
	W: Write,
{
	let corpus = analyzer
		.build_corpus(&cli.analysed_authors())
		.with_context(|| format!("Failed to analyse {}", cli.dir.display()))?;
	info!(authors = corpus.len(), "analysis complete");

	let targets = cli.target_authors(&corpus);

	if let Some(size) = cli.gen_size {
		let naming = cli.file_naming();
		if !naming.include_author && targets.len() > 1 {
			bail!("--g-noaut needs a single author (-a), generated files would overwrite each other");
		}
		for author in &targets {
			let output = cli.gen_dir.join(naming.for_author(author));
			analyzer
				.generate(author, size, &output, &corpus)
				.with_context(|| format!("Failed to generate text for {author}"))?;
			writeln!(out, "Generated {} ({} tokens, author {})", output.display(), size, author)?;
		}
	}

	if let Some(unknown) = &cli.unknown {
		let mut scores = analyzer
			.classify(unknown, &corpus)
			.with_context(|| format!("Failed to classify {}", unknown.display()))?;
		sort_by_score(&mut scores);
		if cli.json {
			writeln!(out, "{}", serde_json::to_string_pretty(&scores)?)?;
		} else {
			writeln!(out, "Similarity of {}:", unknown.display())?;
			for score in &scores {
				writeln!(out, "    {:<20} {:.4}", score.author, score.score)?;
			}
		}
	}

	if let Some(rank) = cli.rank {
		let mut reports = Vec::new();
		for author in &targets {
			let entries = analyzer
				.ranked_ngram(author, rank, &corpus)
				.with_context(|| format!("Failed to rank n-grams of {author}"))?;
			reports.push(RankReport { author: author.as_str(), rank, ngram_size: corpus.ngram_size(), entries });
		}

		if cli.json {
			writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
		} else {
			for report in &reports {
				let ngrams: Vec<String> = report
					.entries
					.iter()
					.map(|e| format!("[{}] ({})", e.ngram.tokens().join(", "), e.count))
					.collect();
				writeln!(
					out,
					"Author {}, rank {} of {}-grams: {}",
					report.author,
					report.rank,
					report.ngram_size,
					ngrams.join(" ")
				)?;
			}
		}
	}

	Ok(())
}

/// Mirrors every effective parameter, including defaults.
fn print_verbose<W: Write>(cli: &Cli, config: &AnalysisConfig, out: &mut W) -> Result<()> {
	writeln!(out, "Verbose mode:")?;
	if let Some(unknown) = &cli.unknown {
		writeln!(out, "Unknown file to study: {}", unknown.display())?;
	}
	writeln!(out, "Using {}-grams", config.ngram_size())?;
	if let Some(rank) = cli.rank {
		writeln!(out, "Rank {} most frequent n-gram(s) will be printed", rank)?;
	}
	if let Some(author) = &cli.author {
		writeln!(out, "Author studied: {}", author)?;
	}
	if config.keep_punctuation {
		writeln!(out, "Keeping punctuation marks")?;
	} else {
		writeln!(out, "Removing punctuation marks: {:?}", PUNCTUATION)?;
	}
	if let Some(size) = cli.gen_size {
		let author = cli.author.as_deref().unwrap_or("<each author>");
		writeln!(out, "Generating a text of {} tokens for author {}", size, author)?;
		writeln!(out, "Generated file name: {}", cli.file_naming().for_author(author))?;
	}
	writeln!(out, "Authors directory: {}", config.root_directory().display())?;
	writeln!(out, "Authors:")?;
	for author in Corpus::discover_authors(config)? {
		writeln!(out, "    {}", author)?;
	}
	writeln!(out)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;
	use std::path::Path;
	use tempfile::TempDir;

	fn library() -> TempDir {
		let root = TempDir::new().unwrap();
		for (author, text) in [
			("hugo", "Les vagues sombres roulent vers les rochers noirs.\n"),
			("zola", "La mine noire avale les mineurs fatigués.\n"),
		] {
			let dir = root.path().join(author);
			fs::create_dir_all(&dir).unwrap();
			fs::write(dir.join("work.txt"), text).unwrap();
		}
		root
	}

	fn run_captured(args: &[&str], root: &Path) -> Result<String> {
		let mut argv = vec!["rs-markov", "-d", root.to_str().unwrap()];
		argv.extend_from_slice(args);
		let cli = Cli::try_parse_from(argv)?;
		let config = AnalysisConfig::new(&cli.dir, cli.ngram)?.with_punctuation(!cli.no_punctuation);
		let analyzer = MarkovAnalyzer::new(config).with_seed(Some(3));
		let mut out = Vec::new();
		execute(&cli, &analyzer, &mut out)?;
		Ok(String::from_utf8(out)?)
	}

	#[test]
	fn ngram_size_bounds() {
		assert_eq!(parse_ngram_size("1"), Ok(1));
		assert_eq!(parse_ngram_size("19"), Ok(19));
		assert!(parse_ngram_size("0").is_err());
		assert!(parse_ngram_size("20").is_err());
		assert!(parse_ngram_size("two").is_err());
	}

	#[test]
	fn author_selection_is_required_and_exclusive() {
		assert!(Cli::try_parse_from(["rs-markov", "-m", "2"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "-a", "hugo", "-A"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "-A"]).is_ok());
	}

	#[test]
	fn classification_lists_every_author() {
		let root = library();
		let unknown = root.path().join("unknown.txt");
		fs::write(&unknown, "les vagues sombres").unwrap();

		let out = run_captured(&["-a", "hugo", "-f", unknown.to_str().unwrap(), "--json"], root.path()).unwrap();
		let scores: serde_json::Value = serde_json::from_str(&out).unwrap();
		let scores = scores.as_array().unwrap();
		assert_eq!(scores.len(), 2);
		assert_eq!(scores[0]["author"], "hugo");
	}

	#[test]
	fn rank_and_generation_for_one_author() {
		let root = library();
		let gen_dir = TempDir::new().unwrap();

		let out = run_captured(
			&["-a", "zola", "-F", "1", "-G", "8", "--g-dir", gen_dir.path().to_str().unwrap(), "--no-ponc"],
			root.path(),
		)
		.unwrap();
		assert!(out.contains("Author zola, rank 1 of 1-grams:"), "{out}");

		let generated = fs::read_to_string(gen_dir.path().join("Gen_text_zola.txt")).unwrap();
		assert_eq!(generated.split_whitespace().count(), 9);
	}

	#[test]
	fn unnamed_output_needs_single_author() {
		let root = library();
		let gen_dir = TempDir::new().unwrap();
		let result = run_captured(
			&["-A", "-G", "5", "--g-noaut", "--g-dir", gen_dir.path().to_str().unwrap()],
			root.path(),
		);
		assert!(result.is_err());
	}

	#[test]
	fn rank_out_of_range_is_an_error() {
		let root = library();
		assert!(run_captured(&["-a", "hugo", "-F", "1000"], root.path()).is_err());
	}
}

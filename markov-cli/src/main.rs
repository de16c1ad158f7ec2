use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;
use markov_core::MarkovModel;
use markov_core::io::{read_corpus, read_corpus_lines};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum DumpFormat {
	Text,
	Json,
}

/// Trains a character-level Markov model on a corpus and prints generated text.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Number of preceding characters the next one depends on
	#[arg(short, long, default_value_t = 4)]
	window: usize,

	/// Number of characters to generate
	#[arg(short, long, default_value_t = 200)]
	length: usize,

	/// Random seed; omit for a different text on every run
	#[arg(short, long)]
	seed: Option<u64>,

	/// Text to start from; a random learned window is used when omitted
	#[arg(short, long)]
	initial: Option<String>,

	/// Corpus holds one sample per line; lines are joined with a space
	#[arg(long, default_value_t = false)]
	lines: bool,

	/// Print the learned tables instead of generating
	#[arg(long, value_enum)]
	dump: Option<DumpFormat>,

	#[arg(short, long, default_value_t = false)]
	verbose: bool,

	/// Training corpus file
	corpus: PathBuf,
}

fn run(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
	let corpus = if cli.lines {
		read_corpus_lines(&cli.corpus, " ")?
	} else {
		read_corpus(&cli.corpus)?
	};
	info!("Loaded {} ({} bytes)", cli.corpus.display(), corpus.len());

	let mut model = MarkovModel::new(cli.window, cli.seed)?;
	model.train(&corpus)?;

	match cli.dump {
		Some(DumpFormat::Text) => return Ok(model.dump()),
		Some(DumpFormat::Json) => return Ok(serde_json::to_string_pretty(&model)?),
		None => (),
	}

	let initial = match &cli.initial {
		Some(initial) => initial.clone(),
		None => model.random_window().ok_or("Model has no windows")?,
	};
	info!("Generating {} characters from {:?}", cli.length, initial);

	Ok(model.generate(&initial, cli.length))
}

fn main() {
	let cli = Cli::parse();

	let default_filter = if cli.verbose { "debug" } else { "warn" };
	env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

	match run(&cli) {
		Ok(output) => println!("{output}"),
		Err(e) => {
			eprintln!("Error: {e}");
			process::exit(1);
		}
	}
}

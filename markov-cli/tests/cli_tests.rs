use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
	_dir: TempDir,
	corpus_path: PathBuf,
}

impl TestContext {
	fn new(corpus: &str) -> Self {
		let dir = tempfile::tempdir().expect("Failed to create temp dir");
		let corpus_path = dir.path().join("corpus.txt");

		let mut corpus_file = File::create(&corpus_path).unwrap();
		write!(corpus_file, "{corpus}").unwrap();

		Self {
			_dir: dir,
			corpus_path,
		}
	}

	fn run(&self, args: &[&str]) -> Output {
		Command::new(env!("CARGO_BIN_EXE_markov-cli"))
			.args(args)
			.arg(&self.corpus_path)
			.output()
			.expect("Failed to run markov-cli")
	}
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).trim_end_matches('\n').to_owned()
}

#[test]
fn generates_from_initial_text() {
	let ctx = TestContext::new("abcabcabcabc");
	let output = ctx.run(&["--window", "3", "--length", "6", "--seed", "20", "--initial", "abc"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), "abcabc");
}

#[test]
fn seeded_runs_are_identical() {
	let ctx = TestContext::new("the quick brown fox jumps over the lazy dog, the end");
	let args = ["--window", "2", "--length", "80", "--seed", "7", "--initial", "th"];
	let first = ctx.run(&args);
	let second = ctx.run(&args);
	assert!(first.status.success());
	assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn random_window_when_no_initial_text() {
	let ctx = TestContext::new("aaaa");
	let output = ctx.run(&["--window", "2", "--length", "5", "--seed", "1"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), "aaaaa");
}

#[test]
fn short_corpus_exits_with_error() {
	let ctx = TestContext::new("ab");
	let output = ctx.run(&["--window", "3", "--length", "5"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("Corpus too short"));
}

#[test]
fn text_dump_lists_windows() {
	let ctx = TestContext::new("abab");
	let output = ctx.run(&["--window", "1", "--dump", "text"]);
	assert!(output.status.success());
	assert_eq!(stdout(&output), "a : ((b 2 1 1))\nb : ((a 1 1 1))");
}

#[test]
fn json_dump_is_valid() {
	let ctx = TestContext::new("abab");
	let output = ctx.run(&["--window", "1", "--dump", "json"]);
	assert!(output.status.success());
	let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	assert_eq!(value["a"][0]["character"], "b");
	assert_eq!(value["a"][0]["count"], 2);
}

#[test]
fn lines_mode_joins_samples() {
	let ctx = TestContext::new("ab\nab\n");
	let output = ctx.run(&["--window", "2", "--lines", "--dump", "text"]);
	assert!(output.status.success());
	// "ab ab": ab -> ' ', b' ' -> a, ' 'a -> b
	assert_eq!(stdout(&output), " a : ((b 1 1 1))\nab : ((  1 1 1))\nb  : ((a 1 1 1))");
}

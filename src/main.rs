use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::{io::BufRead, path::PathBuf};

use regular_automata::{
	format::{read_automaton, write_automaton},
	grammar::text::read_grammar,
	options::{Options, COMPLEMENT_FILE, DFA_FILE, NFA_FILE, REVERSE_FILE},
	Automaton,
};

#[derive(Parser)]
#[clap(version, about)]
struct Cli {
	#[clap(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Compile a grammar file and write its automata
	Run(RunArgs),

	/// Determinize an automaton
	Determinize(TransformArgs),

	/// Build the deterministic automaton of the mirror language
	Reverse(TransformArgs),

	/// Complement a deterministic automaton
	Complement(TransformArgs),

	/// Check if an automaton accepts a word
	Simulate(SimulateArgs),
}

#[derive(Args)]
struct RunArgs {
	/// Grammar file
	grammar: PathBuf,

	/// Output directory [default: $AUTOMATA_OUTPUT_DIR or `output`]
	#[clap(short, long)]
	output_dir: Option<PathBuf>,

	/// Word to test, instead of the one given in the grammar file
	#[clap(short, long)]
	word: Option<String>,
}

#[derive(Args)]
struct TransformArgs {
	/// Input automaton file
	input: PathBuf,

	/// Output automaton file
	output: PathBuf,
}

#[derive(Args)]
struct SimulateArgs {
	/// Automaton file
	automaton: PathBuf,

	/// Word to test
	word: String,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	match Cli::parse().command {
		Command::Run(args) => run(args),
		Command::Determinize(args) => transform(args, "DFA", |aut| Ok(aut.determinize())),
		Command::Reverse(args) => transform(args, "DFA reverse", |aut| Ok(aut.reverse())),
		Command::Complement(args) => {
			transform(args, "DFA complement", |aut| Ok(aut.complement()?))
		}
		Command::Simulate(args) => simulate(args),
	}
}

fn run(args: RunArgs) -> Result<()> {
	let file = read_grammar(&args.grammar)
		.with_context(|| format!("unable to read grammar `{}`", args.grammar.display()))?;
	let options = Options::new(args.output_dir, args.word)?;

	let nfa = file.grammar.build_nfa()?;
	let dfa = nfa.determinize();
	let reversed = nfa.reverse();
	let complement = dfa.complement()?;

	for (file_name, title, aut) in [
		(NFA_FILE, "NFA", &nfa),
		(DFA_FILE, "DFA", &dfa),
		(REVERSE_FILE, "DFA reverse", &reversed),
		(COMPLEMENT_FILE, "DFA complement", &complement),
	] {
		let path = options.output_path(file_name);
		write_automaton(&path, title, aut)
			.with_context(|| format!("unable to write `{}`", path.display()))?;
		info!("{title} written to `{}`", path.display());
	}

	let word = match options.word.or(file.word) {
		Some(word) => word,
		None => prompt_word()?,
	};

	report(&dfa, &word);
	Ok(())
}

fn transform(
	args: TransformArgs,
	title: &str,
	f: impl FnOnce(&Automaton) -> Result<Automaton>,
) -> Result<()> {
	let input = read_automaton(&args.input)
		.with_context(|| format!("unable to read automaton `{}`", args.input.display()))?;
	let output = f(&input)?;

	write_automaton(&args.output, title, &output)
		.with_context(|| format!("unable to write `{}`", args.output.display()))?;
	info!("{title} written to `{}`", args.output.display());
	Ok(())
}

fn simulate(args: SimulateArgs) -> Result<()> {
	let aut = read_automaton(&args.automaton)
		.with_context(|| format!("unable to read automaton `{}`", args.automaton.display()))?;

	if aut.is_deterministic() {
		report(&aut, &args.word)
	} else {
		info!("non deterministic automaton, exploring every branch");
		print_verdict(aut.accepts_nondeterministic(&args.word))
	}

	Ok(())
}

fn report(dfa: &Automaton, word: &str) {
	match dfa.run(word) {
		Some(q) => info!("word `{word}` ends in state `{q}`"),
		None => info!("word `{word}` is stuck before its end"),
	}

	print_verdict(dfa.accepts(word))
}

fn print_verdict(accepted: bool) {
	if accepted {
		println!("Accepted")
	} else {
		println!("Rejected")
	}
}

fn prompt_word() -> Result<String> {
	println!("Word to test:");

	let mut line = String::new();
	std::io::stdin()
		.lock()
		.read_line(&mut line)
		.context("unable to read the word")?;

	Ok(line.trim_end_matches(['\n', '\r']).to_owned())
}

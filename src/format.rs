//! Textual automaton descriptions.
//!
//! ```text
//! DFA
//! Q: {A}, {QF_S}, ∅
//! Σ: a, b
//! δ:
//! {A}, a -> ∅
//! {A}, b -> {QF_S}
//! ...
//! {QF_S}: initial
//! F: {QF_S}
//! ```
//!
//! The first line is a free title. Transitions are written one per
//! `(source, symbol, target)` triple, sorted, with `ε` for epsilon.
use std::{collections::BTreeSet, fmt, path::Path};

use crate::{
	automaton::{Automaton, InvariantError, Label},
	state::State,
	Error,
};

/// Epsilon label notation.
pub const EPSILON: &str = "ε";

const STATES_PREFIX: &str = "Q:";
const ALPHABET_PREFIX: &str = "Σ:";
const TRANSITIONS_HEADER: &str = "δ:";
const FINAL_STATES_PREFIX: &str = "F:";
const INITIAL_MARKER: &str = "initial";
const LEGACY_INITIAL_MARKER: &str = "inicial";

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
	#[error("line {line}: malformed transition `{text}`")]
	MalformedTransition { line: usize, text: String },

	#[error("line {line}: `{symbol}` is not a single character symbol")]
	InvalidSymbol { line: usize, symbol: String },

	#[error("line {line}: unexpected `{text}`")]
	UnexpectedLine { line: usize, text: String },

	#[error("missing initial state")]
	MissingInitialState,

	#[error(transparent)]
	Invariant(#[from] InvariantError),
}

pub struct DisplayLabel(pub Label);

impl fmt::Display for DisplayLabel {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.0 {
			Some(a) => fmt::Display::fmt(&a, f),
			None => f.write_str(EPSILON),
		}
	}
}

struct CommaSeparated<I>(I);

impl<I> fmt::Display for CommaSeparated<I>
where
	I: Clone + IntoIterator,
	I::Item: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, item) in self.0.clone().into_iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}

			fmt::Display::fmt(&item, f)?;
		}

		Ok(())
	}
}

/// Automaton description with a title.
pub struct Described<'a> {
	pub title: &'a str,
	pub automaton: &'a Automaton,
}

impl<'a> Described<'a> {
	pub fn new(title: &'a str, automaton: &'a Automaton) -> Self {
		Self { title, automaton }
	}
}

impl<'a> fmt::Display for Described<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let aut = self.automaton;

		writeln!(f, "{}", self.title)?;
		writeln!(f, "{STATES_PREFIX} {}", CommaSeparated(aut.states()))?;
		writeln!(f, "{ALPHABET_PREFIX} {}", CommaSeparated(aut.alphabet()))?;
		writeln!(f, "{TRANSITIONS_HEADER}")?;
		for (source, label, target) in aut.transitions() {
			writeln!(f, "{source}, {} -> {target}", DisplayLabel(label))?;
		}
		writeln!(f, "{}: {INITIAL_MARKER}", aut.initial_state())?;
		writeln!(
			f,
			"{FINAL_STATES_PREFIX} {}",
			CommaSeparated(aut.final_states())
		)
	}
}

/// Writes the description of `automaton` to the given file, creating parent
/// directories as needed.
pub fn write_automaton(
	path: impl AsRef<Path>,
	title: &str,
	automaton: &Automaton,
) -> Result<(), Error> {
	let path = path.as_ref();
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}

	std::fs::write(path, Described::new(title, automaton).to_string())?;
	Ok(())
}

/// Reads an automaton description file.
pub fn read_automaton(path: impl AsRef<Path>) -> Result<Automaton, Error> {
	let content = std::fs::read_to_string(path)?;
	Ok(parse_automaton(&content)?)
}

/// Parses an automaton description.
pub fn parse_automaton(input: &str) -> Result<Automaton, FormatError> {
	let mut states = BTreeSet::new();
	let mut alphabet = BTreeSet::new();
	let mut transitions = Vec::new();
	let mut initial_state = None;
	let mut final_states = BTreeSet::new();
	let mut states_read = false;
	let mut title_allowed = true;

	for (i, line) in input.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		let first = std::mem::replace(&mut title_allowed, false);

		let marker = initial_marker(line)
			.filter(|q| !reads_as_section(q, states_read, initial_state.is_some()));

		if let Some(q) = marker {
			initial_state = Some(q.to_string())
		} else if let Some(list) = line.strip_prefix(STATES_PREFIX) {
			states = list_items(list).map(State::from).collect();
			states_read = true
		} else if let Some(list) = line.strip_prefix(ALPHABET_PREFIX) {
			alphabet = list_items(list)
				.map(|symbol| parse_symbol(i + 1, symbol))
				.collect::<Result<_, _>>()?
		} else if let Some(list) = line.strip_prefix(FINAL_STATES_PREFIX) {
			final_states = list_items(list).map(State::from).collect()
		} else if line == TRANSITIONS_HEADER {
			continue;
		} else if line.contains("->") {
			transitions.push(parse_transition(i + 1, line)?)
		} else if !first {
			return Err(FormatError::UnexpectedLine {
				line: i + 1,
				text: line.to_string(),
			});
		}
	}

	let initial_state = initial_state.ok_or(FormatError::MissingInitialState)?;
	Ok(Automaton::from_parts(
		states,
		alphabet,
		transitions,
		initial_state,
		final_states,
	)?)
}

fn list_items(list: &str) -> impl Iterator<Item = &str> {
	list.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn initial_marker(line: &str) -> Option<&str> {
	let (q, marker) = line.rsplit_once(':')?;
	let marker = marker.trim();
	let q = q.trim();

	if (marker == INITIAL_MARKER || marker == LEGACY_INITIAL_MARKER) && !q.is_empty() {
		Some(q)
	} else {
		None
	}
}

/// Decides if a `Q: initial` or `F: initial` line is a state list rather
/// than the initial marker of a state named `Q` or `F`.
///
/// States are listed before the initial marker, and final states after it.
fn reads_as_section(q: &str, states_read: bool, initial_read: bool) -> bool {
	match q {
		"Q" => !states_read,
		"F" => initial_read,
		_ => false,
	}
}

fn parse_symbol(line: usize, symbol: &str) -> Result<char, FormatError> {
	let mut chars = symbol.chars();
	match (chars.next(), chars.next()) {
		(Some(a), None) => Ok(a),
		_ => Err(FormatError::InvalidSymbol {
			line,
			symbol: symbol.to_string(),
		}),
	}
}

fn parse_label(line: usize, symbol: &str) -> Result<Label, FormatError> {
	if symbol.is_empty() || symbol == EPSILON {
		Ok(None)
	} else {
		parse_symbol(line, symbol).map(Some)
	}
}

/// Parses a `source, symbol -> target` line.
///
/// The source is split from the symbol at the last comma so that state names
/// may contain commas.
fn parse_transition(line: usize, text: &str) -> Result<(State, Label, State), FormatError> {
	let malformed = || FormatError::MalformedTransition {
		line,
		text: text.to_string(),
	};

	let (left, target) = text.split_once("->").ok_or_else(malformed)?;
	let (source, symbol) = left.rsplit_once(',').ok_or_else(malformed)?;
	let (source, target) = (source.trim(), target.trim());

	if source.is_empty() || target.is_empty() {
		return Err(malformed());
	}

	let label = parse_label(line, symbol.trim())?;
	Ok((source.to_string(), label, target.to_string()))
}

#[cfg(test)]
mod tests {
	use indoc::indoc;

	use super::*;
	use crate::grammar::Grammar;

	fn ab_star_nfa() -> Automaton {
		let mut g = Grammar::new("S");
		g.add_production("S", "aA");
		g.add_production("S", "ε");
		g.add_production("A", "bS");
		g.build_nfa().unwrap()
	}

	#[test]
	fn write_nfa() {
		let text = Described::new("NFA", &ab_star_nfa()).to_string();

		assert_eq!(
			text,
			indoc! {"
				NFA
				Q: A, QF, S
				Σ: a, b
				δ:
				A, b -> S
				S, ε -> QF
				S, a -> A
				S: initial
				F: QF
			"}
		)
	}

	#[test]
	fn write_dfa() {
		let text = Described::new("DFA", &ab_star_nfa().determinize()).to_string();

		assert_eq!(
			text,
			indoc! {"
				DFA
				Q: {A}, {QF_S}, ∅
				Σ: a, b
				δ:
				{A}, a -> ∅
				{A}, b -> {QF_S}
				{QF_S}, a -> {A}
				{QF_S}, b -> ∅
				∅, a -> ∅
				∅, b -> ∅
				{QF_S}: initial
				F: {QF_S}
			"}
		)
	}

	#[test]
	fn written_automata_read_back() {
		let nfa = ab_star_nfa();
		for aut in [nfa.clone(), nfa.determinize(), nfa.reverse()] {
			let text = Described::new("automaton", &aut).to_string();
			assert_eq!(parse_automaton(&text).unwrap(), aut);
		}
	}

	#[test]
	fn punctuation_terminals_read_back() {
		let mut g = Grammar::new("S");
		g.add_production("S", ":A");
		g.add_production("S", "-");
		g.add_production("A", ">S");
		g.add_production("A", "{");
		let nfa = g.build_nfa().unwrap();

		let text = Described::new("NFA", &nfa).to_string();
		assert_eq!(parse_automaton(&text).unwrap(), nfa);
	}

	#[test]
	fn states_named_after_sections() {
		let aut = parse_automaton(indoc! {"
			Q: initial, S
			Σ: a
			δ:
			S, a -> initial
			S: initial
			F: initial
		"})
		.unwrap();

		assert_eq!(aut.initial_state(), "S");
		assert!(aut.is_final_state("initial"));

		let mut aut = Automaton::new("F");
		aut.add("F", Some('a'), "Q");
		aut.add("Q", Some('b'), "F");
		aut.add_final_state("Q");

		let text = Described::new("automaton", &aut).to_string();
		assert_eq!(parse_automaton(&text).unwrap(), aut);

		let mut aut = Automaton::new("Q");
		aut.add("Q", Some('a'), "F");
		aut.add_final_state("F");

		let text = Described::new("automaton", &aut).to_string();
		assert_eq!(parse_automaton(&text).unwrap(), aut);
	}

	#[test]
	fn read_legacy_description() {
		let aut = parse_automaton(indoc! {"
			AFN Original
			Q: A, QF, S
			Σ: a, b
			δ:
			A, b -> S
			S,  -> QF
			S, a -> A
			S: inicial
			F: QF
		"})
		.unwrap();

		assert_eq!(aut, ab_star_nfa());
	}

	#[test]
	fn state_names_may_contain_commas() {
		let aut = parse_automaton(indoc! {"
			Q: p,q, r
			Σ: a
			p,q, a -> r
			p,q: initial
			F: r
		"});

		// the state list is comma separated, so `p,q` cannot be declared.
		assert!(matches!(
			aut,
			Err(FormatError::Invariant(InvariantError::UnknownInitialState(_)))
		));

		let (source, label, target) = parse_transition(1, "p,q, a -> r").unwrap();
		assert_eq!(source, "p,q");
		assert_eq!(label, Some('a'));
		assert_eq!(target, "r");
	}

	#[test]
	fn read_errors() {
		assert!(matches!(
			parse_automaton("Q: S\nΣ: a\nS, a -> S"),
			Err(FormatError::MissingInitialState)
		));

		assert!(matches!(
			parse_automaton("Q: S\nΣ: ab\nS: initial"),
			Err(FormatError::InvalidSymbol { line: 2, .. })
		));

		assert!(matches!(
			parse_automaton("Q: S\nS a -> S\nS: initial"),
			Err(FormatError::MalformedTransition { line: 2, .. })
		));

		assert!(matches!(
			parse_automaton("title\nQ: S\nnonsense\nS: initial"),
			Err(FormatError::UnexpectedLine { line: 3, .. })
		));

		assert!(matches!(
			parse_automaton("Q: S\nΣ: a\nS, a -> T\nS: initial"),
			Err(FormatError::Invariant(InvariantError::UnknownTarget(_)))
		));
	}
}

use log::debug;
use std::collections::BTreeMap;

use crate::{automaton::Automaton, state::DEAD_STATE};

pub mod text;

pub use text::{parse_grammar, GrammarFile};

/// Name of the accepting state added to every automaton built from a
/// grammar.
pub const ACCEPTING_STATE: &str = "QF";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
	#[error("malformed production `{non_terminal} -> {rhs}`")]
	MalformedProduction { non_terminal: String, rhs: String },

	#[error("undefined non-terminal `{0}`")]
	UndefinedNonTerminal(String),

	#[error("no production for non-terminal `{0}`")]
	NoProductions(String),

	#[error("reserved non-terminal name `{0}`")]
	ReservedNonTerminal(String),

	#[error("no entry point")]
	NoEntryPoint,

	#[error("line {line}: {message}")]
	Syntax { line: usize, message: String },
}

/// Right-hand side of a right-linear production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Production {
	/// `A -> ε`.
	Epsilon,

	/// `A -> a`.
	Terminal(char),

	/// `A -> aB`.
	Step(char, String),
}

/// Characters that cannot be terminals, since the grammar and automaton text
/// formats give them a meaning.
pub const RESERVED_TERMINALS: [char; 3] = [',', '|', 'ε'];

impl Production {
	/// Parses the right-hand side `rhs` of a `non_terminal` production.
	///
	/// The empty string and `ε` both denote the empty word.
	pub fn parse(non_terminal: &str, rhs: &str) -> Result<Self, GrammarError> {
		let malformed = || GrammarError::MalformedProduction {
			non_terminal: non_terminal.to_owned(),
			rhs: rhs.to_owned(),
		};

		let mut chars = rhs.chars();
		match (chars.next(), chars.next(), chars.next()) {
			(None, _, _) | (Some('ε'), None, _) => Ok(Self::Epsilon),
			(Some(a), _, _) if RESERVED_TERMINALS.contains(&a) => Err(malformed()),
			(Some(a), None, _) => Ok(Self::Terminal(a)),
			(Some(a), Some(b), None) => Ok(Self::Step(a, b.to_string())),
			_ => Err(malformed()),
		}
	}

	pub fn terminal(&self) -> Option<char> {
		match self {
			Self::Epsilon => None,
			Self::Terminal(a) | Self::Step(a, _) => Some(*a),
		}
	}
}

/// Right-linear grammar.
///
/// Each non-terminal is mapped to the ordered list of the right-hand sides of
/// its productions, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
	start_symbol: String,
	productions: BTreeMap<String, Vec<String>>,
}

impl Grammar {
	pub fn new(start_symbol: impl Into<String>) -> Self {
		Self {
			start_symbol: start_symbol.into(),
			productions: BTreeMap::new(),
		}
	}

	pub fn from_productions(
		start_symbol: impl Into<String>,
		productions: BTreeMap<String, Vec<String>>,
	) -> Self {
		Self {
			start_symbol: start_symbol.into(),
			productions,
		}
	}

	pub fn start_symbol(&self) -> &str {
		&self.start_symbol
	}

	pub fn productions(&self) -> &BTreeMap<String, Vec<String>> {
		&self.productions
	}

	/// Adds the production `non_terminal -> rhs`.
	pub fn add_production(&mut self, non_terminal: impl Into<String>, rhs: impl Into<String>) {
		self.productions
			.entry(non_terminal.into())
			.or_default()
			.push(rhs.into())
	}

	/// Builds a non deterministic automaton recognizing the grammar language.
	///
	/// Every non-terminal becomes a state, and a single
	/// [accepting state](ACCEPTING_STATE) is added:
	/// - `A -> ε` gives `A -ε-> QF`,
	/// - `A -> a` gives `A -a-> QF`,
	/// - `A -> aB` gives `A -a-> B`.
	pub fn build_nfa(&self) -> Result<Automaton, GrammarError> {
		if !self.productions.contains_key(&self.start_symbol) {
			return Err(GrammarError::NoEntryPoint);
		}

		if let Some(nt) = self
			.productions
			.keys()
			.find(|nt| *nt == ACCEPTING_STATE || *nt == DEAD_STATE)
		{
			return Err(GrammarError::ReservedNonTerminal(nt.clone()));
		}

		let mut aut = Automaton::new(self.start_symbol.clone());
		for nt in self.productions.keys() {
			aut.declare_state(nt.clone());
		}

		aut.add_final_state(ACCEPTING_STATE);

		for (nt, rules) in &self.productions {
			if rules.is_empty() {
				return Err(GrammarError::NoProductions(nt.clone()));
			}

			for rhs in rules {
				let production = Production::parse(nt, rhs)?;
				let target = match &production {
					Production::Step(_, next) => {
						if !self.productions.contains_key(next) {
							return Err(GrammarError::UndefinedNonTerminal(next.clone()));
						}

						next.clone()
					}
					_ => ACCEPTING_STATE.to_owned(),
				};

				aut.add(nt.clone(), production.terminal(), target)
			}
		}

		debug!(
			"grammar with {} non-terminals compiled",
			self.productions.len()
		);
		aut.log_summary("grammar automaton");
		Ok(aut)
	}
}

//! This library compiles right-linear grammars into finite automata and
//! provides the classical constructions on them: determinization by subset
//! construction, reversal and complementation. The resulting automata can
//! be used to decide if a word belongs to the grammar language.
//!
//! # Basic Usage
//!
//! A grammar maps every non-terminal to the right-hand sides of its
//! productions. Each right-hand side is either empty (`A -> ε`), a single
//! terminal (`A -> a`) or a terminal followed by a non-terminal (`A -> aB`).
//!
//! ```
//! use regular_automata::Grammar;
//!
//! // (ab)*
//! let mut grammar = Grammar::new("S");
//! grammar.add_production("S", "aA");
//! grammar.add_production("S", "ε");
//! grammar.add_production("A", "bS");
//!
//! let nfa = grammar.build_nfa()?;
//! let dfa = nfa.determinize();
//! assert!(dfa.accepts("abab"));
//! assert!(!dfa.accepts("aba"));
//!
//! let complement = dfa.complement()?;
//! assert!(complement.accepts("aba"));
//!
//! let reversed = nfa.reverse();
//! assert!(reversed.accepts("ba"));
//! # Ok::<(), regular_automata::Error>(())
//! ```
//!
//! # Text formats
//!
//! Grammars and automata can be read from and written to plain text files,
//! see the [`grammar::text`] and [`format`] modules. The `automata` binary
//! uses them to run the whole pipeline on a grammar file.
use std::env::VarError;

pub mod automaton;
pub mod format;
pub mod grammar;
pub mod options;
pub mod state;

pub use automaton::{Automaton, AutomatonParts, InvariantError, Label, Transitions};
pub use format::{parse_automaton, read_automaton, write_automaton, Described, FormatError};
pub use grammar::{Grammar, GrammarError, GrammarFile, Production, ACCEPTING_STATE};
pub use options::Options;
pub use state::{CompositeState, State, DEAD_STATE};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Grammar(#[from] GrammarError),

	#[error(transparent)]
	Format(#[from] FormatError),

	#[error(transparent)]
	Invariant(#[from] InvariantError),

	#[error("automaton is not deterministic")]
	NotDeterministic,

	#[error("output directory not found: {0}")]
	OutputDirNotFound(VarError),

	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
}

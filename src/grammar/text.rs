//! Textual grammar descriptions.
//!
//! ```text
//! #Grammar G = ({S,A}, {a,b}, P, S)
//! S -> aA | ε
//! A -> bS
//! word: abab
//! ```
//!
//! The start symbol is the last member of the `G = (..., P, S)` comment when
//! there is one, and the left-hand side of the first production otherwise.
use log::warn;
use std::{collections::BTreeMap, path::Path};

use super::{Grammar, GrammarError};
use crate::Error;

/// Spellings of the empty right-hand side.
const EPSILON_SPELLINGS: [&str; 4] = ["ε", "'ε'", "\"ε\"", "\" \""];

/// Keys introducing the word to test.
const WORD_KEYS: [&str; 2] = ["word", "cadeia"];

/// Grammar file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFile {
	pub grammar: Grammar,

	/// Word to test, if any.
	pub word: Option<String>,
}

/// Reads a grammar file.
pub fn read_grammar(path: impl AsRef<Path>) -> Result<GrammarFile, Error> {
	let content = std::fs::read_to_string(path)?;
	Ok(parse_grammar(&content)?)
}

/// Parses a grammar description.
pub fn parse_grammar(input: &str) -> Result<GrammarFile, GrammarError> {
	let mut productions: BTreeMap<String, Vec<String>> = BTreeMap::new();
	let mut declared_start = None;
	let mut first_non_terminal = None;
	let mut word = None;

	for (i, line) in input.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if let Some(comment) = line.strip_prefix('#') {
			if let Some(start) = declared_start_symbol(comment) {
				declared_start = Some(start)
			}

			continue;
		}

		if let Some(w) = word_line(line) {
			if word.replace(w).is_some() {
				warn!("line {}: word redefined", i + 1)
			}

			continue;
		}

		match line.split_once("->") {
			Some((lhs, rhs)) => {
				let non_terminal = lhs.trim();
				if non_terminal.is_empty() {
					return Err(GrammarError::Syntax {
						line: i + 1,
						message: "missing non-terminal".to_string(),
					});
				}

				if first_non_terminal.is_none() {
					first_non_terminal = Some(non_terminal.to_string())
				}

				productions
					.entry(non_terminal.to_string())
					.or_default()
					.extend(rhs.split('|').map(normalize_rule));
			}
			None => {
				return Err(GrammarError::Syntax {
					line: i + 1,
					message: format!("unexpected `{line}`"),
				})
			}
		}
	}

	let start_symbol = declared_start
		.or(first_non_terminal)
		.ok_or(GrammarError::NoEntryPoint)?;

	Ok(GrammarFile {
		grammar: Grammar::from_productions(start_symbol, productions),
		word,
	})
}

/// Extracts the start symbol from a `G = (N, T, P, S)` comment.
fn declared_start_symbol(comment: &str) -> Option<String> {
	if !comment.contains("P,") {
		return None;
	}

	let candidate = comment.rsplit(',').next()?.replace(')', "");
	let candidate = candidate.trim();

	if !candidate.is_empty() && candidate.chars().all(char::is_alphabetic) {
		Some(candidate.to_string())
	} else {
		None
	}
}

fn word_line(line: &str) -> Option<String> {
	let (key, value) = line.split_once(':')?;
	let key = key.trim().to_lowercase();

	if WORD_KEYS.contains(&key.as_str()) {
		Some(value.trim().to_string())
	} else {
		None
	}
}

fn normalize_rule(rule: &str) -> String {
	let rule = rule.trim();
	if EPSILON_SPELLINGS.contains(&rule) {
		String::new()
	} else {
		rule.to_string()
	}
}

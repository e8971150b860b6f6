//! Word acceptance.
use log::trace;

use super::Automaton;
use crate::state::State;

impl Automaton {
	/// Runs the automaton on `word` and returns the reached state.
	///
	/// Returns `None` as soon as a symbol has no transition from the current
	/// state. The automaton is expected to be deterministic: when a state has
	/// more than one successor the smallest is followed.
	pub fn run(&self, word: &str) -> Option<&State> {
		let mut q = &self.initial_state;

		for a in word.chars() {
			match self.successors(q, Some(a)).and_then(|targets| targets.first()) {
				Some(r) => {
					trace!("{q} -{a}-> {r}");
					q = r
				}
				None => {
					trace!("no transition from {q} on {a}");
					return None;
				}
			}
		}

		Some(q)
	}

	/// Checks if the deterministic automaton accepts `word`.
	///
	/// A missing transition rejects the word. The empty word is accepted iff
	/// the initial state is final.
	pub fn accepts(&self, word: &str) -> bool {
		self.run(word).is_some_and(|q| self.is_final_state(q))
	}

	/// Checks if the automaton accepts `word`, exploring every
	/// non deterministic branch and epsilon-transition.
	pub fn accepts_nondeterministic(&self, word: &str) -> bool {
		let mut current = self.epsilon_closure([&self.initial_state]);

		for a in word.chars() {
			if current.is_empty() {
				return false;
			}

			current = self.epsilon_closure(self.move_on(&current, a));
		}

		current.iter().any(|q| self.is_final_state(q))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// `(ab)*` as a non-complete DFA.
	fn ab_star() -> Automaton {
		let mut aut = Automaton::new("0");
		aut.add("0", Some('a'), "1");
		aut.add("1", Some('b'), "0");
		aut.add_final_state("0");
		aut
	}

	#[test]
	fn run_reaches_states() {
		let aut = ab_star();

		assert_eq!(aut.run("").map(String::as_str), Some("0"));
		assert_eq!(aut.run("a").map(String::as_str), Some("1"));
		assert_eq!(aut.run("abab").map(String::as_str), Some("0"));
		assert_eq!(aut.run("aa"), None);
	}

	#[test]
	fn acceptance() {
		let aut = ab_star();

		assert!(aut.accepts(""));
		assert!(aut.accepts("ab"));
		assert!(aut.accepts("abab"));
		assert!(!aut.accepts("aba"));
		assert!(!aut.accepts("b"));
		assert!(!aut.accepts("abc"));
	}

	#[test]
	fn empty_word_depends_on_the_initial_state() {
		let mut aut = Automaton::new("0");
		aut.add("0", Some('a'), "1");
		aut.add_final_state("1");

		assert!(!aut.accepts(""));
		assert!(aut.accepts("a"));
	}

	#[test]
	fn nondeterministic_acceptance() {
		// 0 -a-> 1, 0 -a-> 2 -ε-> 3(final), 3 -b-> 3
		let mut aut = Automaton::new("0");
		aut.add("0", Some('a'), "1");
		aut.add("0", Some('a'), "2");
		aut.add("2", None, "3");
		aut.add("3", Some('b'), "3");
		aut.add_final_state("3");

		assert!(aut.accepts_nondeterministic("a"));
		assert!(aut.accepts_nondeterministic("abbb"));
		assert!(!aut.accepts_nondeterministic(""));
		assert!(!aut.accepts_nondeterministic("aa"));
		assert!(!aut.accepts_nondeterministic("ba"));
	}
}

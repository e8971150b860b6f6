//! Subset construction.
use log::debug;
use std::collections::{BTreeMap, VecDeque};

use super::Automaton;
use crate::state::{fresh_name, CompositeState, State, DEAD_STATE};

impl Automaton {
	/// Builds a complete deterministic automaton recognizing the same language.
	///
	/// Each state of the result stands for the epsilon-closed set of states
	/// of `self` it was built from, named after its members (see
	/// [`CompositeState`]). Missing transitions lead to the
	/// [dead state](DEAD_STATE), which is added whenever the alphabet is not
	/// empty.
	pub fn determinize(&self) -> Automaton {
		// create the initial deterministic state.
		let initial_state = CompositeState::new(self.epsilon_closure([&self.initial_state]));
		let initial_name = initial_state.name();

		let mut result = Automaton::new(initial_name.clone());
		for &a in &self.alphabet {
			result.add_symbol(a);
		}

		if initial_state.intersects(&self.final_states) {
			result.add_final_state(initial_name.clone());
		}

		let mut names: BTreeMap<CompositeState, State> = BTreeMap::new();
		names.insert(initial_state.clone(), initial_name.clone());

		let mut worklist = VecDeque::from([(initial_state, initial_name)]);
		while let Some((det_q, source)) = worklist.pop_front() {
			for &a in &self.alphabet {
				let next_det_q =
					CompositeState::new(self.epsilon_closure(self.move_on(det_q.states(), a)));

				let target = if next_det_q.is_empty() {
					DEAD_STATE.to_owned()
				} else {
					match names.get(&next_det_q) {
						Some(name) => name.clone(),
						None => {
							let name =
								fresh_name(&next_det_q.name(), |n| result.contains_state(n));
							result.declare_state(name.clone());

							if next_det_q.intersects(&self.final_states) {
								result.add_final_state(name.clone());
							}

							names.insert(next_det_q.clone(), name.clone());
							worklist.push_back((next_det_q, name.clone()));
							name
						}
					}
				};

				result.add(source.clone(), Some(a), target);
			}
		}

		if !self.alphabet.is_empty() {
			result.declare_state(DEAD_STATE);
			for &a in &self.alphabet {
				result.add(DEAD_STATE, Some(a), DEAD_STATE);
			}
		}

		debug!(
			"subset construction built {} composite states from {} states",
			names.len(),
			self.states.len()
		);
		result.log_summary("deterministic automaton");
		result
	}
}

#[cfg(test)]
mod tests {
	use quickcheck_macros::quickcheck;

	use super::*;
	use crate::automaton::tests::{random_automaton, word};

	#[test]
	fn nondeterministic_choice() {
		// 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
		let mut nfa = Automaton::new("0");
		nfa.add("0", Some('a'), "1");
		nfa.add("0", Some('a'), "2");
		nfa.add("1", Some('b'), "3");
		nfa.add("2", Some('b'), "3");
		nfa.add_final_state("3");

		let dfa = nfa.determinize();

		assert_eq!(dfa.initial_state(), "{0}");
		assert_eq!(dfa.successors("{0}", Some('a')).unwrap().first().unwrap(), "{1_2}");
		assert_eq!(dfa.successors("{1_2}", Some('b')).unwrap().first().unwrap(), "{3}");
		assert!(dfa.is_final_state("{3}"));
		assert!(dfa.is_complete());
		assert!(dfa.accepts("ab"));
		assert!(!dfa.accepts("a"));
		assert!(!dfa.accepts("abb"));
	}

	#[test]
	fn initial_state_is_epsilon_closed() {
		// 0 -ε-> 1 -a-> 2(final)
		let mut nfa = Automaton::new("0");
		nfa.add("0", None, "1");
		nfa.add("1", Some('a'), "2");
		nfa.add_final_state("2");

		let dfa = nfa.determinize();

		assert_eq!(dfa.initial_state(), "{0_1}");
		assert!(!dfa.has_epsilon_transitions());
		assert!(dfa.accepts("a"));
		assert!(!dfa.accepts(""));
	}

	#[test]
	fn missing_transitions_lead_to_the_dead_state() {
		let mut nfa = Automaton::new("0");
		nfa.add("0", Some('a'), "1");
		nfa.add_symbol('b');
		nfa.add_final_state("1");

		let dfa = nfa.determinize();

		assert!(dfa.contains_state(DEAD_STATE));
		assert!(!dfa.is_final_state(DEAD_STATE));
		assert_eq!(dfa.successors("{0}", Some('b')).unwrap().first().unwrap(), DEAD_STATE);
		assert_eq!(dfa.successors(DEAD_STATE, Some('a')).unwrap().first().unwrap(), DEAD_STATE);
		assert_eq!(dfa.successors(DEAD_STATE, Some('b')).unwrap().first().unwrap(), DEAD_STATE);
	}

	#[test]
	fn empty_alphabet() {
		let mut nfa = Automaton::new("S");
		nfa.add("S", None, "QF");
		nfa.add_final_state("QF");

		let dfa = nfa.determinize();

		assert_eq!(dfa.states().len(), 1);
		assert_eq!(dfa.initial_state(), "{QF_S}");
		assert!(dfa.is_final_state("{QF_S}"));
		assert_eq!(dfa.transition_count(), 0);
		assert!(dfa.accepts(""));
		assert!(!dfa.accepts("a"));
	}

	#[test]
	fn equal_sets_are_merged() {
		// both branches reach {1, 2}.
		let mut nfa = Automaton::new("0");
		nfa.add("0", Some('a'), "1");
		nfa.add("0", Some('a'), "2");
		nfa.add("0", Some('b'), "2");
		nfa.add("0", Some('b'), "1");

		let dfa = nfa.determinize();
		let a = dfa.successors("{0}", Some('a')).unwrap();
		let b = dfa.successors("{0}", Some('b')).unwrap();

		assert_eq!(a, b);
		assert_eq!(dfa.states().len(), 3);
	}

	#[test]
	fn colliding_names_are_kept_apart() {
		let mut nfa = Automaton::new("0");
		nfa.add("0", Some('a'), "a_b");
		nfa.add("0", Some('b'), "a");
		nfa.add("0", Some('b'), "b");
		nfa.add_final_state("a_b");

		let dfa = nfa.determinize();
		let a = dfa.successors("{0}", Some('a')).unwrap().first().unwrap();
		let b = dfa.successors("{0}", Some('b')).unwrap().first().unwrap();

		assert_ne!(a, b);
		assert!(dfa.accepts("a"));
		assert!(!dfa.accepts("b"));
	}

	#[quickcheck]
	fn determinization_preserves_the_language(
		edges: Vec<(u8, u8, u8)>,
		finals: Vec<u8>,
		w: Vec<bool>,
	) -> bool {
		let nfa = random_automaton(&edges, &finals);
		let w = word(&w);
		nfa.determinize().accepts(&w) == nfa.accepts_nondeterministic(&w)
	}

	#[quickcheck]
	fn determinization_is_complete(edges: Vec<(u8, u8, u8)>, finals: Vec<u8>) -> bool {
		let dfa = random_automaton(&edges, &finals).determinize();
		dfa.is_complete() && dfa.validate().is_ok()
	}

	#[quickcheck]
	fn determinization_is_idempotent(
		edges: Vec<(u8, u8, u8)>,
		finals: Vec<u8>,
		w: Vec<bool>,
	) -> bool {
		let dfa = random_automaton(&edges, &finals).determinize();
		let w = word(&w);
		dfa.determinize().accepts(&w) == dfa.accepts(&w)
	}

	#[quickcheck]
	fn dead_state_absorbs(
		edges: Vec<(u8, u8, u8)>,
		finals: Vec<u8>,
		w: Vec<bool>,
		v: Vec<bool>,
	) -> bool {
		let dfa = random_automaton(&edges, &finals).determinize();
		let w = word(&w);

		match dfa.run(&w) {
			Some(q) if q == DEAD_STATE => !dfa.accepts(&format!("{w}{}", word(&v))),
			_ => true,
		}
	}
}

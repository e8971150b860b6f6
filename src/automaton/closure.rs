//! Closure of regular languages under reversal and complement.
use log::debug;

use super::Automaton;
use crate::{
	state::{fresh_name, DEAD_STATE},
	Error,
};

/// Base name of the initial state introduced by [`Automaton::reverse`].
pub const REVERSE_INITIAL_STATE: &str = "QI";

impl Automaton {
	/// Builds a deterministic automaton recognizing the mirror language.
	///
	/// Every transition is inverted, a fresh initial state is linked with
	/// epsilon-transitions to the former final states and the former initial
	/// state becomes the only final state. The resulting non deterministic
	/// automaton is then determinized.
	pub fn reverse(&self) -> Automaton {
		let initial_state = fresh_name(REVERSE_INITIAL_STATE, |n| self.contains_state(n));

		let mut reversed = Automaton::new(initial_state.clone());
		for q in &self.states {
			reversed.declare_state(q.clone());
		}

		for &a in &self.alphabet {
			reversed.add_symbol(a);
		}

		for (source, label, target) in self.transitions() {
			reversed.add(target.clone(), label, source.clone());
		}

		for q in &self.final_states {
			reversed.add(initial_state.clone(), None, q.clone());
		}

		reversed.add_final_state(self.initial_state.clone());
		reversed.log_summary("reversed automaton");

		reversed.determinize()
	}

	/// Builds a complete deterministic automaton recognizing the complement
	/// of the language, relative to the automaton alphabet.
	///
	/// The automaton must be deterministic. It is first completed using the
	/// [dead state](DEAD_STATE), then every final state becomes non-final and
	/// every other state (including the dead state) becomes final.
	pub fn complement(&self) -> Result<Automaton, Error> {
		if !self.is_deterministic() {
			return Err(Error::NotDeterministic);
		}

		self.validate_dead_state()?;

		let mut complemented = self.clone();
		complemented.declare_state(DEAD_STATE);

		let mut added = 0usize;
		for q in &complemented.states.clone() {
			for &a in &self.alphabet {
				if complemented.successors(q, Some(a)).is_none() {
					complemented.add(q.clone(), Some(a), DEAD_STATE);
					added += 1;
				}
			}
		}

		debug!("completion added {added} transitions to the dead state");

		complemented.final_states = complemented
			.states
			.difference(&self.final_states)
			.cloned()
			.collect();

		complemented.log_summary("complement automaton");
		Ok(complemented)
	}
}

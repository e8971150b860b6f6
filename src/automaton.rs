use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::state::{State, DEAD_STATE};

pub mod closure;
pub mod determinize;
pub mod simulate;

/// Transition label. `None` is the epsilon label.
pub type Label = Option<char>;

/// Non deterministic state transitions.
pub type Transitions = BTreeMap<Label, BTreeSet<State>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
	#[error("initial state `{0}` is not declared")]
	UnknownInitialState(State),

	#[error("final state `{0}` is not declared")]
	UnknownFinalState(State),

	#[error("transition from undeclared state `{0}`")]
	UnknownSource(State),

	#[error("transition to undeclared state `{0}`")]
	UnknownTarget(State),

	#[error("symbol `{0}` is not part of the alphabet")]
	UnknownSymbol(char),

	#[error("reserved state `{0}` is used as an ordinary state")]
	ReservedState(State),
}

/// Finite automaton, possibly non deterministic and with epsilon-transitions.
///
/// Once built, an automaton is never modified: determinization, reversal and
/// complementation all return a new value.
///
/// Deserialization goes through [`Automaton::from_parts`], so a serialized
/// automaton breaking the invariants is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AutomatonParts", into = "AutomatonParts")]
pub struct Automaton {
	states: BTreeSet<State>,
	alphabet: BTreeSet<char>,
	transitions: BTreeMap<State, Transitions>,
	initial_state: State,
	final_states: BTreeSet<State>,
}

/// Serialized form of an [`Automaton`], with transitions as a list of
/// triples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonParts {
	pub states: BTreeSet<State>,
	pub alphabet: BTreeSet<char>,
	pub transitions: Vec<(State, Label, State)>,
	pub initial_state: State,
	pub final_states: BTreeSet<State>,
}

impl From<Automaton> for AutomatonParts {
	fn from(value: Automaton) -> Self {
		let transitions = value
			.transitions()
			.map(|(source, label, target)| (source.clone(), label, target.clone()))
			.collect();

		Self {
			states: value.states,
			alphabet: value.alphabet,
			transitions,
			initial_state: value.initial_state,
			final_states: value.final_states,
		}
	}
}

impl TryFrom<AutomatonParts> for Automaton {
	type Error = InvariantError;

	fn try_from(value: AutomatonParts) -> Result<Self, Self::Error> {
		Automaton::from_parts(
			value.states,
			value.alphabet,
			value.transitions,
			value.initial_state,
			value.final_states,
		)
	}
}

impl Automaton {
	/// Creates a new automaton with the given initial state and nothing else.
	pub fn new(initial_state: impl Into<State>) -> Self {
		let initial_state = initial_state.into();
		Self {
			states: BTreeSet::from([initial_state.clone()]),
			alphabet: BTreeSet::new(),
			transitions: BTreeMap::new(),
			initial_state,
			final_states: BTreeSet::new(),
		}
	}

	/// Assembles an automaton from its components and checks its invariants.
	///
	/// Unlike [`Automaton::add`], nothing is implicitly declared here: every
	/// state and symbol used by `transitions` must appear in `states` and
	/// `alphabet`.
	pub fn from_parts(
		states: BTreeSet<State>,
		alphabet: BTreeSet<char>,
		transitions: impl IntoIterator<Item = (State, Label, State)>,
		initial_state: State,
		final_states: BTreeSet<State>,
	) -> Result<Self, InvariantError> {
		let mut result = Self {
			states,
			alphabet,
			transitions: BTreeMap::new(),
			initial_state,
			final_states,
		};

		for (source, label, target) in transitions {
			result.insert(source, label, target);
		}

		result.validate()?;
		Ok(result)
	}

	pub fn states(&self) -> &BTreeSet<State> {
		&self.states
	}

	pub fn alphabet(&self) -> &BTreeSet<char> {
		&self.alphabet
	}

	pub fn initial_state(&self) -> &State {
		&self.initial_state
	}

	pub fn final_states(&self) -> &BTreeSet<State> {
		&self.final_states
	}

	pub fn contains_state(&self, q: &str) -> bool {
		self.states.contains(q)
	}

	pub fn is_final_state(&self, q: &str) -> bool {
		self.final_states.contains(q)
	}

	pub fn declare_state(&mut self, q: impl Into<State>) -> bool {
		self.states.insert(q.into())
	}

	pub fn add_symbol(&mut self, a: char) -> bool {
		self.alphabet.insert(a)
	}

	pub fn add_final_state(&mut self, q: impl Into<State>) -> bool {
		let q = q.into();
		self.states.insert(q.clone());
		self.final_states.insert(q)
	}

	/// Adds the transition `source -label-> target`.
	///
	/// Both states are declared, and the label (unless epsilon) is added to
	/// the alphabet.
	pub fn add(&mut self, source: impl Into<State>, label: Label, target: impl Into<State>) {
		let source = source.into();
		let target = target.into();

		self.states.insert(source.clone());
		self.states.insert(target.clone());
		if let Some(a) = label {
			self.alphabet.insert(a);
		}

		self.insert(source, label, target)
	}

	fn insert(&mut self, source: State, label: Label, target: State) {
		self.transitions
			.entry(source)
			.or_default()
			.entry(label)
			.or_default()
			.insert(target);
	}

	/// Outgoing transitions of `q`.
	pub fn transitions_from(&self, q: &str) -> Option<&Transitions> {
		self.transitions.get(q)
	}

	/// Targets of the `label` transitions of `q`.
	pub fn successors(&self, q: &str, label: Label) -> Option<&BTreeSet<State>> {
		self.transitions.get(q).and_then(|transitions| {
			transitions
				.get(&label)
				.filter(|targets| !targets.is_empty())
		})
	}

	/// Iterates over all `(source, label, target)` triples, sorted.
	pub fn transitions(&self) -> impl Iterator<Item = (&State, Label, &State)> + '_ {
		self.transitions.iter().flat_map(|(source, transitions)| {
			transitions.iter().flat_map(move |(label, targets)| {
				targets.iter().map(move |target| (source, *label, target))
			})
		})
	}

	pub fn transition_count(&self) -> usize {
		self.transitions().count()
	}

	pub fn has_epsilon_transitions(&self) -> bool {
		self.transitions().any(|(_, label, _)| label.is_none())
	}

	/// Checks that there is no epsilon-transition and at most one target per
	/// state and symbol.
	pub fn is_deterministic(&self) -> bool {
		self.transitions.values().all(|transitions| {
			transitions
				.iter()
				.all(|(label, targets)| label.is_some() && targets.len() <= 1)
		})
	}

	/// Checks that the automaton is deterministic and defines a transition for
	/// every state and symbol.
	pub fn is_complete(&self) -> bool {
		self.is_deterministic()
			&& self.states.iter().all(|q| {
				self.alphabet
					.iter()
					.all(|&a| self.successors(q, Some(a)).is_some())
			})
	}

	/// Checks that every transition of `q` loops back to `q`.
	pub(crate) fn is_absorbing(&self, q: &str) -> bool {
		match self.transitions.get(q) {
			Some(transitions) => transitions.iter().all(|(label, targets)| {
				label.is_some() && targets.iter().all(|target| target == q)
			}),
			None => true,
		}
	}

	/// Checks the automaton invariants.
	pub fn validate(&self) -> Result<(), InvariantError> {
		if !self.states.contains(&self.initial_state) {
			return Err(InvariantError::UnknownInitialState(
				self.initial_state.clone(),
			));
		}

		if let Some(q) = self.final_states.difference(&self.states).next() {
			return Err(InvariantError::UnknownFinalState(q.clone()));
		}

		for (source, label, target) in self.transitions() {
			if !self.states.contains(source) {
				return Err(InvariantError::UnknownSource(source.clone()));
			}

			if !self.states.contains(target) {
				return Err(InvariantError::UnknownTarget(target.clone()));
			}

			if let Some(a) = label {
				if !self.alphabet.contains(&a) {
					return Err(InvariantError::UnknownSymbol(a));
				}
			}
		}

		Ok(())
	}

	/// Checks that the reserved dead state, if present, behaves as a dead
	/// state.
	pub(crate) fn validate_dead_state(&self) -> Result<(), InvariantError> {
		if self.contains_state(DEAD_STATE) && !self.is_absorbing(DEAD_STATE) {
			Err(InvariantError::ReservedState(DEAD_STATE.to_owned()))
		} else {
			Ok(())
		}
	}

	/// Computes the set of states reachable from `seeds` through zero or more
	/// epsilon-transitions.
	pub fn epsilon_closure<Q: AsRef<str>>(
		&self,
		seeds: impl IntoIterator<Item = Q>,
	) -> BTreeSet<State> {
		let mut states = BTreeSet::new();
		let mut stack: Vec<State> = seeds
			.into_iter()
			.map(|q| q.as_ref().to_owned())
			.collect();

		while let Some(q) = stack.pop() {
			if !states.contains(&q) {
				// add states reachable trough epsilon-transitions.
				if let Some(epsilon_qs) = self.successors(&q, None) {
					stack.extend(
						epsilon_qs
							.iter()
							.filter(|t| !states.contains(*t))
							.cloned(),
					)
				}

				states.insert(q);
			}
		}

		states
	}

	/// Targets of the `a` transitions of every state of `states`.
	///
	/// The result is not epsilon-closed.
	pub fn move_on<Q: AsRef<str>>(
		&self,
		states: impl IntoIterator<Item = Q>,
		a: char,
	) -> BTreeSet<State> {
		let mut result = BTreeSet::new();

		for q in states {
			if let Some(targets) = self.successors(q.as_ref(), Some(a)) {
				result.extend(targets.iter().cloned())
			}
		}

		result
	}

	pub(crate) fn log_summary(&self, what: &str) {
		debug!(
			"{what}: {} states, {} symbols, {} transitions, {} final states",
			self.states.len(),
			self.alphabet.len(),
			self.transition_count(),
			self.final_states.len()
		)
	}
}

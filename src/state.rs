use std::{collections::BTreeSet, fmt};

/// State identifier.
pub type State = String;

/// Reserved identifier of the dead state.
///
/// Every missing transition of a completed automaton leads to this state,
/// which loops on itself for every symbol of the alphabet.
pub const DEAD_STATE: &str = "∅";

/// Separator used between member names in composite state names.
const MEMBER_SEPARATOR: &str = "_";

/// Set of states standing for a single deterministic state.
///
/// This is the identity of a state built by subset construction. Its display
/// name (`{a_b}`) is only a rendering: two distinct sets may render the same
/// way, see [`fresh_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeState(BTreeSet<State>);

impl CompositeState {
	pub fn new(states: BTreeSet<State>) -> Self {
		Self(states)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn states(&self) -> &BTreeSet<State> {
		&self.0
	}

	/// Checks if at least one member belongs to `states`.
	pub fn intersects(&self, states: &BTreeSet<State>) -> bool {
		self.0.iter().any(|q| states.contains(q))
	}

	/// Canonical display name of the set.
	pub fn name(&self) -> State {
		self.to_string()
	}
}

impl fmt::Display for CompositeState {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str(DEAD_STATE);
		}

		f.write_str("{")?;
		for (i, q) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(MEMBER_SEPARATOR)?;
			}

			f.write_str(q)?;
		}
		f.write_str("}")
	}
}

/// Returns `base`, primed as many times as needed for `taken` to reject it.
pub fn fresh_name(base: &str, taken: impl Fn(&str) -> bool) -> State {
	let mut name = base.to_owned();
	while taken(&name) {
		name.push('\'');
	}

	name
}

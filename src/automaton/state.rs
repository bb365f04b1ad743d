use crate::alphabet::Symbol;

use super::StateIndex;

/// A single transition leaving some state, it consists of the symbol it is labeled with and the
/// index of the state it leads to. The source is implicit, it is the [`State`] that owns the
/// transition.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Transition {
    pub(super) symbol: Symbol,
    pub(super) target: StateIndex,
}

impl Transition {
    /// Creates a new transition on `symbol` to `target`.
    pub fn new(symbol: Symbol, target: StateIndex) -> Self {
        Self { symbol, target }
    }

    /// The symbol that labels the transition.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// The state the transition leads to.
    pub fn target(&self) -> StateIndex {
        self.target
    }
}

/// Stores information characterizing a state of an [`super::Automaton`], that is whether it is
/// final and the list of transitions leaving it. The transitions form a multiset, the same
/// transition may occur more than once and their order carries no meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    pub(super) is_final: bool,
    pub(super) transitions: Vec<Transition>,
}

impl State {
    /// Create a new non-final state without transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the state is final (accepting).
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Gives the transitions leaving this state in the order in which they were added.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Iterates over the targets of all transitions on `symbol`.
    pub fn targets(&self, symbol: Symbol) -> impl Iterator<Item = StateIndex> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.symbol == symbol)
            .map(|t| t.target)
    }
}

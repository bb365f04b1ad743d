use bit_set::BitSet;
use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::trace;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::{ConversionError, InvalidAutomaton},
    state_set::StateSet,
    subset::SubsetConstruction,
};

mod state;
pub use state::{State, Transition};

/// States of an [`Automaton`] are identified by their position.
pub type StateIndex = usize;

/// A finite automaton over an [`Alphabet`]. It stores a designated initial state and a list of
/// [`State`]s, each of which knows whether it is final and which transitions leave it. The
/// automaton exclusively owns its states and their transitions.
///
/// There is no restriction on the number of transitions a state may have on a given symbol, so
/// in general the automaton is nondeterministic. Mutating methods do not check whether symbols and
/// targets are in range, use [`Automaton::validate`] for that. Only the source of a transition is
/// checked, as the transition has to be stored somewhere.
///
/// # Example
/// ```
/// use powerset::prelude::*;
///
/// let mut aut = Automaton::new(Alphabet::of_size(2), 2, 0);
/// aut.add_transition(0, 0, 0);
/// aut.add_transition(0, 0, 1);
/// aut.add_transition(1, 1, 1);
/// aut.set_final(1);
///
/// assert!(aut.validate().is_ok());
/// assert!(!aut.is_deterministic());
/// assert!(aut.accepts([0, 1, 1]));
/// assert!(!aut.accepts([1]));
/// ```
#[derive(Clone)]
pub struct Automaton {
    alphabet: Alphabet,
    initial: StateIndex,
    states: Vec<State>,
}

impl Automaton {
    /// Creates an automaton with `size` states that are all non-final and have no transitions.
    pub fn new(alphabet: Alphabet, size: usize, initial: StateIndex) -> Self {
        Self {
            alphabet,
            initial,
            states: vec![State::new(); size],
        }
    }

    /// Works like [`Automaton::new`], but reports a failure to allocate the states instead of
    /// aborting.
    pub fn try_new(
        alphabet: Alphabet,
        size: usize,
        initial: StateIndex,
    ) -> Result<Self, ConversionError> {
        let mut states = Vec::new();
        states
            .try_reserve_exact(size)
            .map_err(|_| ConversionError::ResourceExhausted("the states of an automaton"))?;
        states.resize_with(size, State::new);
        Ok(Self {
            alphabet,
            initial,
            states,
        })
    }

    /// Adds a transition from `from` on `symbol` to `to`. Transitions form a multiset, so adding
    /// the same transition twice stores it twice.
    ///
    /// # Panics
    /// If `from` is not a state of the automaton.
    pub fn add_transition(&mut self, from: StateIndex, symbol: Symbol, to: StateIndex) {
        let size = self.size();
        let Some(state) = self.states.get_mut(from) else {
            panic!("index {from} is out of bounds, there are only {size} states");
        };
        state.transitions.push(Transition::new(symbol, to));
    }

    /// Marks `state` as final.
    ///
    /// # Panics
    /// If `state` is not a state of the automaton.
    pub fn set_final(&mut self, state: StateIndex) {
        if state >= self.states.len() {
            panic!(
                "index {state} is out of bounds, there are only {} states",
                self.states.len()
            );
        }
        self.states[state].is_final = true;
    }

    /// Returns a reference to the alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the index of the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Gives access to the state with the given index, if it exists.
    pub fn state(&self, index: StateIndex) -> Option<&State> {
        self.states.get(index)
    }

    /// Iterates over all state indices in ascending order.
    pub fn state_indices(&self) -> std::ops::Range<StateIndex> {
        0..self.states.len()
    }

    /// Returns true if `state` exists and is final.
    pub fn is_final(&self, state: StateIndex) -> bool {
        self.states.get(state).is_some_and(State::is_final)
    }

    /// Iterates over the indices of all final states in ascending order.
    pub fn final_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(|(index, state)| state.is_final.then_some(index))
    }

    /// Returns the transitions leaving `state`, or `None` if the state does not exist.
    pub fn transitions_from(&self, state: StateIndex) -> Option<&[Transition]> {
        self.states.get(state).map(State::transitions)
    }

    /// Iterates over all transitions as triples `(from, symbol, to)`, grouped by their source
    /// state in ascending order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateIndex, Symbol, StateIndex)> + '_ {
        self.states.iter().enumerate().flat_map(|(from, state)| {
            state
                .transitions
                .iter()
                .map(move |t| (from, t.symbol, t.target))
        })
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|q| q.transitions.len()).sum()
    }

    /// Checks the structural invariants of the automaton, that is the alphabet is not empty, the
    /// initial state exists and every transition uses a symbol of the alphabet and leads to an
    /// existing state.
    pub fn validate(&self) -> Result<(), InvalidAutomaton> {
        if self.alphabet.is_empty() {
            return Err(InvalidAutomaton::EmptyAlphabet);
        }
        if self.initial >= self.size() {
            return Err(InvalidAutomaton::InitialOutOfRange {
                initial: self.initial,
                states: self.size(),
            });
        }
        for (from, symbol, to) in self.transitions() {
            if !self.alphabet.contains(symbol) {
                return Err(InvalidAutomaton::SymbolOutOfRange {
                    from,
                    symbol,
                    to,
                    alphabet_size: self.alphabet.size(),
                });
            }
            if to >= self.size() {
                return Err(InvalidAutomaton::TargetOutOfRange {
                    from,
                    symbol,
                    to,
                    states: self.size(),
                });
            }
        }
        Ok(())
    }

    /// Returns true if no state has two transitions on the same symbol. Duplicates of the same
    /// transition also count as nondeterminism. An automaton with a transition on a symbol outside
    /// of its alphabet is never deterministic.
    pub fn is_deterministic(&self) -> bool {
        for (index, state) in self.states.iter().enumerate() {
            let mut seen = BitSet::with_capacity(self.alphabet.size());
            for transition in &state.transitions {
                if !self.alphabet.contains(transition.symbol) {
                    trace!(
                        "transition from {index} uses symbol {} outside of the alphabet",
                        transition.symbol
                    );
                    return false;
                }
                if !seen.insert(transition.symbol) {
                    trace!(
                        "found overlapping transitions from {index} on {}",
                        transition.symbol
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Returns true if the automaton is deterministic and every state has precisely one
    /// transition for every symbol of the alphabet.
    pub fn is_total(&self) -> bool {
        self.is_deterministic()
            && self.states.iter().all(|state| {
                state.transitions.len() == self.alphabet.size()
                    && state
                        .transitions
                        .iter()
                        .all(|t| self.alphabet.contains(t.symbol))
            })
    }

    /// Returns the target of the first transition from `state` on `symbol`. For deterministic
    /// automata this is the unique successor.
    pub fn successor(&self, state: StateIndex, symbol: Symbol) -> Option<StateIndex> {
        self.states.get(state)?.targets(symbol).next()
    }

    /// Computes the set of states that can be reached from some state in `set` by a single
    /// transition on `symbol`.
    ///
    /// # Panics
    /// If the capacity of `set` differs from the size of the automaton or a transition leads to
    /// a state that does not exist.
    pub fn post(&self, set: &StateSet, symbol: Symbol) -> StateSet {
        assert_eq!(
            set.capacity(),
            self.size(),
            "set of states does not belong to this automaton"
        );
        let mut out = StateSet::new(self.size());
        for state in set.iter() {
            out.extend(self.states[state].targets(symbol));
        }
        out
    }

    /// Decides whether the automaton accepts `word`, i.e. whether some run on the word ends in a
    /// final state. Words containing a symbol outside of the alphabet are rejected.
    ///
    /// # Panics
    /// If the automaton is not valid, see [`Automaton::validate`].
    pub fn accepts<W: IntoIterator<Item = Symbol>>(&self, word: W) -> bool {
        let mut current = StateSet::singleton(self.size(), self.initial);
        for symbol in word {
            if !self.alphabet.contains(symbol) {
                return false;
            }
            current = self.post(&current, symbol);
            if current.is_empty() {
                return false;
            }
        }
        let accepted = current.iter().any(|state| self.is_final(state));
        accepted
    }

    /// Converts `self` into an equivalent deterministic and total automaton through the subset
    /// construction, see [`SubsetConstruction`].
    pub fn determinize(&self) -> Result<Automaton, ConversionError> {
        SubsetConstruction::new(self)?.into_dfa()
    }

    /// Returns a string representation of the transition table. Every row corresponds to a state,
    /// the initial state is marked with `→` and final states are marked with `*` and highlighted.
    /// Cells list the targets of the transitions on the respective symbol.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(self.alphabet.universe().map(|sym| {
                self.alphabet
                    .letter(sym)
                    .map_or(sym.to_string(), String::from)
            })),
        );
        for (index, state) in self.states.iter().enumerate() {
            let marker = if index == self.initial { "→" } else { "" };
            let label = if state.is_final {
                format!("{marker}{index}*").green().to_string()
            } else {
                format!("{marker}{index}")
            };
            let mut row = vec![label];
            for sym in self.alphabet.universe() {
                let targets = state.targets(sym).sorted().collect_vec();
                row.push(match targets.as_slice() {
                    [] => "-".to_string(),
                    [target] => target.to_string(),
                    _ => format!("{{{}}}", targets.iter().join(", ")),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        if self.alphabet != other.alphabet
            || self.initial != other.initial
            || self.size() != other.size()
        {
            return false;
        }
        self.states.iter().zip(other.states.iter()).all(|(x, y)| {
            x.is_final == y.is_final
                && x.transitions.iter().sorted().eq(y.transitions.iter().sorted())
        })
    }
}

impl Eq for Automaton {}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Automaton over {} with initial state {}\n{}",
            self.alphabet,
            self.initial,
            self.transition_table()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn sample() -> Automaton {
        let mut aut = Automaton::new(Alphabet::of_size(2), 3, 0);
        aut.add_transition(0, 0, 1);
        aut.add_transition(0, 0, 2);
        aut.add_transition(1, 1, 1);
        aut.add_transition(2, 0, 2);
        aut.set_final(1);
        aut
    }

    #[test]
    fn fresh_states_are_empty() {
        let aut = Automaton::new(Alphabet::of_size(3), 4, 2);
        assert_eq!(aut.size(), 4);
        assert_eq!(aut.initial(), 2);
        assert_eq!(aut.transition_count(), 0);
        assert_eq!(aut.final_states().count(), 0);
        assert!(aut.validate().is_ok());
        assert!(aut.is_deterministic());
        assert!(!aut.is_total());
    }

    #[test]
    fn transitions_form_a_multiset() {
        let mut aut = Automaton::new(Alphabet::of_size(1), 2, 0);
        aut.add_transition(0, 0, 1);
        aut.add_transition(0, 0, 1);
        assert_eq!(aut.transitions_from(0).unwrap().len(), 2);
        assert_eq!(
            aut.transitions().collect::<Vec<_>>(),
            vec![(0, 0, 1), (0, 0, 1)]
        );
        assert!(!aut.is_deterministic());
    }

    #[test]
    fn equality_disregards_transition_order() {
        let mut first = Automaton::new(Alphabet::of_size(2), 2, 0);
        first.add_transition(0, 0, 1);
        first.add_transition(0, 1, 0);
        let mut second = Automaton::new(Alphabet::of_size(2), 2, 0);
        second.add_transition(0, 1, 0);
        second.add_transition(0, 0, 1);
        assert_eq!(first, second);

        second.set_final(1);
        assert_ne!(first, second);
    }

    #[test]
    fn validation() {
        assert!(sample().validate().is_ok());

        let mut bad_target = sample();
        bad_target.add_transition(2, 1, 3);
        assert_eq!(
            bad_target.validate(),
            Err(InvalidAutomaton::TargetOutOfRange {
                from: 2,
                symbol: 1,
                to: 3,
                states: 3
            })
        );

        let mut bad_symbol = sample();
        bad_symbol.add_transition(1, 2, 0);
        assert!(matches!(
            bad_symbol.validate(),
            Err(InvalidAutomaton::SymbolOutOfRange { symbol: 2, .. })
        ));

        let bad_initial = Automaton::new(Alphabet::of_size(1), 2, 2);
        assert!(matches!(
            bad_initial.validate(),
            Err(InvalidAutomaton::InitialOutOfRange { initial: 2, .. })
        ));

        let empty = Automaton::new(Alphabet::of_size(0), 1, 0);
        assert_eq!(empty.validate(), Err(InvalidAutomaton::EmptyAlphabet));
    }

    #[test]
    #[should_panic]
    fn adding_transition_from_missing_state_panics() {
        sample().add_transition(3, 0, 0);
    }

    #[test]
    fn post_collects_all_successors() {
        let aut = sample();
        let from = StateSet::singleton(3, 0);
        assert_eq!(aut.post(&from, 0).iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(aut.post(&from, 1).is_empty());
    }

    #[test]
    fn acceptance() {
        let aut = sample();
        assert!(!aut.accepts([]));
        assert!(aut.accepts([0]));
        assert!(aut.accepts([0, 1, 1]));
        assert!(!aut.accepts([0, 0]));
        assert!(!aut.accepts([1]));
        assert!(!aut.accepts([5]));
    }

    #[test]
    fn acceptance_of_empty_word() {
        let mut aut = Automaton::new(Alphabet::of_size(1), 1, 0);
        assert!(!aut.accepts([]));
        aut.set_final(0);
        assert!(aut.accepts([]));
        assert!(!aut.accepts([0]));
    }

    #[test]
    fn symbols_outside_of_alphabet_are_not_deterministic() {
        let mut aut = Automaton::new(Alphabet::of_size(2), 2, 0);
        aut.add_transition(0, 1, 1);
        assert!(aut.is_deterministic());
        aut.add_transition(1, usize::MAX, 0);
        assert!(!aut.is_deterministic());
        assert!(!aut.is_total());
    }

    #[test]
    fn totality() {
        let mut aut = Automaton::new(Alphabet::of_size(2), 2, 0);
        aut.add_transition(0, 0, 1);
        aut.add_transition(0, 1, 0);
        aut.add_transition(1, 0, 1);
        assert!(aut.is_deterministic());
        assert!(!aut.is_total());
        aut.add_transition(1, 1, 1);
        assert!(aut.is_total());
        assert_eq!(aut.successor(0, 0), Some(1));
        assert_eq!(aut.successor(3, 0), None);
    }

    #[test]
    fn table_lists_all_targets() {
        let table = sample().transition_table();
        assert!(table.contains("{1, 2}"));
        assert!(table.contains("→0"));
    }
}

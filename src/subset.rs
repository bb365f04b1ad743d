use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    automaton::{Automaton, StateIndex},
    error::ConversionError,
    registry::Registry,
    state_set::StateSet,
};

/// Represents the subset construction applied to an automaton. It resolves the nondeterminism of
/// the input by operating on sets of its states: every set that is reachable from the singleton
/// set containing the initial state becomes one state of the produced automaton.
///
/// The construction proceeds in two phases. First, [`SubsetConstruction::discover`] explores
/// the reachable sets in breadth-first order. The sets are stored in a [`Registry`] and the
/// position of a set in the registry is the index of the state it becomes, so the initial state
/// is always `0`. For each discovered set and each symbol the index of the successor set is
/// remembered. Second, [`SubsetConstruction::materialize`] allocates the output automaton, which
/// is only possible once the number of reachable sets is known, and adds the transitions.
///
/// The produced automaton is total. If no state in a set has a transition on some symbol, the
/// corresponding state receives a self-loop on that symbol instead of a transition into a
/// dedicated rejecting state. A state is final if and only if its set contains a final state of
/// the input.
///
/// # Example
/// ```
/// use powerset::prelude::*;
///
/// let mut nfa = Automaton::new(Alphabet::of_size(2), 2, 0);
/// nfa.add_transition(0, 0, 0);
/// nfa.add_transition(0, 0, 1);
/// nfa.add_transition(1, 1, 1);
/// nfa.set_final(1);
///
/// let mut construction = SubsetConstruction::new(&nfa).unwrap();
/// construction.discover().unwrap();
/// assert_eq!(construction.registry().len(), 3);
/// assert_eq!(format!("{:?}", construction.state_set(1).unwrap()), "{0, 1}");
///
/// let dfa = construction.into_dfa().unwrap();
/// assert!(dfa.is_total());
/// assert_eq!(dfa.successor(0, 1), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct SubsetConstruction<'a> {
    nfa: &'a Automaton,
    registry: Registry,
    successors: Vec<Vec<Option<StateIndex>>>,
}

impl<'a> SubsetConstruction<'a> {
    /// Prepares the subset construction for `nfa`. The automaton is validated and the registry is
    /// seeded with the set containing only the initial state.
    pub fn new(nfa: &'a Automaton) -> Result<Self, ConversionError> {
        nfa.validate()?;

        let mut registry = Registry::new(nfa.size());
        let (initial, _) =
            registry.lookup_or_insert(&StateSet::singleton(nfa.size(), nfa.initial()))?;
        debug_assert_eq!(initial, 0);

        Ok(Self {
            nfa,
            registry,
            successors: Vec::new(),
        })
    }

    /// Gives access to the registry of discovered sets.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the set of states of the input that corresponds to the state `id` of the output.
    pub fn state_set(&self, id: StateIndex) -> Option<&StateSet> {
        self.registry.get(id)
    }

    /// Returns true once every reachable set has been discovered and processed.
    pub fn is_saturated(&self) -> bool {
        self.successors.len() == self.registry.len()
    }

    /// Computes the move-set of `set` on `symbol`, i.e. the states that can be reached from
    /// some state in `set` through a transition on `symbol`.
    pub fn move_set(&self, set: &StateSet, symbol: Symbol) -> StateSet {
        self.nfa.post(set, symbol)
    }

    /// Computes the move-sets of `set` for all symbols at once. The returned vector is indexed by
    /// symbol, so it has one entry per symbol of the alphabet.
    pub fn move_sets(&self, set: &StateSet) -> Vec<StateSet> {
        let mut moves = vec![StateSet::new(self.nfa.size()); self.nfa.alphabet().size()];
        for state in set.iter() {
            let Some(transitions) = self.nfa.transitions_from(state) else {
                continue;
            };
            for transition in transitions {
                moves[transition.symbol()].insert(transition.target());
            }
        }
        moves
    }

    /// Discovers all sets that are reachable from the initial set. The registry acts as the
    /// worklist: sets are processed in the order of their indices while newly found sets are
    /// appended, so the loop runs until the registry stops growing. Calling this method again
    /// after saturation has no effect.
    pub fn discover(&mut self) -> Result<(), ConversionError> {
        let mut id = self.successors.len();
        while id < self.registry.len() {
            let Some(set) = self.registry.get(id) else {
                break;
            };
            let moves = self.move_sets(set);

            let mut row = Vec::new();
            row.try_reserve_exact(moves.len())
                .map_err(|_| ConversionError::ResourceExhausted("the successor table"))?;
            for (symbol, target) in moves.iter().enumerate() {
                if target.is_empty() {
                    row.push(None);
                    continue;
                }
                let (target_id, inserted) = self.registry.lookup_or_insert(target)?;
                if inserted {
                    trace!("discovered {target:?} as state {target_id} from state {id} on {symbol}");
                }
                row.push(Some(target_id));
            }

            self.successors
                .try_reserve(1)
                .map_err(|_| ConversionError::ResourceExhausted("the successor table"))?;
            self.successors.push(row);
            id += 1;
        }
        debug!(
            "discovered {} reachable sets of states from {} states",
            self.registry.len(),
            self.nfa.size()
        );
        Ok(())
    }

    /// Builds the deterministic automaton from the discovered sets, running the discovery first
    /// if it has not yet saturated. State `id` of the result is final if the set registered under
    /// `id` contains a final state, and it has exactly one transition per symbol.
    pub fn materialize(&mut self) -> Result<Automaton, ConversionError> {
        if !self.is_saturated() {
            self.discover()?;
        }

        let alphabet = *self.nfa.alphabet();
        let mut dfa = Automaton::try_new(alphabet, self.registry.len(), 0)?;
        for (id, (set, row)) in self.registry.iter().zip(&self.successors).enumerate() {
            if set.iter().any(|state| self.nfa.is_final(state)) {
                dfa.set_final(id);
            }
            for symbol in alphabet.universe() {
                let target = match row[symbol] {
                    Some(target) => target,
                    None => {
                        trace!("state {id} has no successor on {symbol}, adding self-loop");
                        id
                    }
                };
                dfa.add_transition(id, symbol, target);
            }
        }

        debug!(
            "subset construction turned {} states into {} states with {} final states",
            self.nfa.size(),
            dfa.size(),
            dfa.final_states().count()
        );
        Ok(dfa)
    }

    /// Consumes `self` and returns the deterministic automaton, see
    /// [`SubsetConstruction::materialize`].
    pub fn into_dfa(mut self) -> Result<Automaton, ConversionError> {
        self.materialize()
    }
}

/// Converts `nfa` into an equivalent deterministic and total automaton.
pub fn determinize(nfa: &Automaton) -> Result<Automaton, ConversionError> {
    SubsetConstruction::new(nfa)?.into_dfa()
}

use thiserror::Error;

use crate::{alphabet::Symbol, automaton::StateIndex};

/// Describes the ways in which an [`crate::Automaton`] can violate its structural invariants.
/// An automaton whose initial state, transition targets and transition symbols all lie in range
/// is considered valid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum InvalidAutomaton {
    #[error("the alphabet of the automaton is empty")]
    EmptyAlphabet,
    #[error("initial state {initial} is out of range, there are only {states} states")]
    InitialOutOfRange { initial: StateIndex, states: usize },
    #[error("state {state} is out of range, there are only {states} states")]
    StateOutOfRange { state: StateIndex, states: usize },
    #[error("transition ({from}, {symbol}, {to}) leads to a state that does not exist, there are only {states} states")]
    TargetOutOfRange {
        from: StateIndex,
        symbol: Symbol,
        to: StateIndex,
        states: usize,
    },
    #[error("transition ({from}, {symbol}, {to}) uses a symbol outside of the alphabet of size {alphabet_size}")]
    SymbolOutOfRange {
        from: StateIndex,
        symbol: Symbol,
        to: StateIndex,
        alphabet_size: usize,
    },
}

/// Errors that are reported by the subset construction.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConversionError {
    /// The automaton that should be converted is not well-formed.
    #[error("cannot convert malformed automaton: {0}")]
    InvalidAutomaton(#[from] InvalidAutomaton),
    /// Memory for the intermediate sets of states or the produced automaton could not be reserved.
    #[error("could not allocate memory for {0}")]
    ResourceExhausted(&'static str),
}

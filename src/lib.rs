//! Library for converting nondeterministic finite automata into deterministic ones.
//!
//! An [`Automaton`] consists of a finite number of states, each of which may be final, that are
//! connected by transitions labeled with a single symbol of an [`Alphabet`]. There are no epsilon
//! transitions. An automaton is nondeterministic if some state has more than one transition on the
//! same symbol, it is deterministic if every state has at most one, and it is total if every state
//! has precisely one transition per symbol.
//!
//! The main entry point is [`SubsetConstruction`], which implements the classic powerset
//! construction. Sets of states of the input are represented as [`StateSet`]s, which are bit-vectors
//! with a capacity that is fixed to the number of states of the input. Every reachable set is stored
//! exactly once in a [`Registry`], and its position in the registry is the index of the state it
//! becomes in the output. The produced automaton is always total: whenever a set of states has no
//! successor on a symbol, the corresponding state receives a self-loop on that symbol.
//!
//! ```
//! use powerset::prelude::*;
//!
//! let mut nfa = Automaton::new(Alphabet::of_size(1), 2, 0);
//! nfa.add_transition(0, 0, 0);
//! nfa.add_transition(0, 0, 1);
//! nfa.set_final(1);
//!
//! let dfa = nfa.determinize().unwrap();
//! assert_eq!(dfa.size(), 2);
//! assert!(dfa.is_deterministic() && dfa.is_total());
//! assert!(!dfa.accepts([]));
//! assert!(dfa.accepts([0, 0, 0]));
//! ```
//!
//! Automata can also be read from and written to a simple textual description, see the
//! [`text`] module.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use powerset::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::{Automaton, State, StateIndex, Transition},
        error::{ConversionError, InvalidAutomaton},
        math,
        registry::Registry,
        state_set::StateSet,
        subset::{determinize, SubsetConstruction},
        text::{parse_automaton, ParseError},
    };
}

/// This module contains type aliases for the collections which are used throughout the crate.
pub mod math;

/// Module that contains the definition of the finite symbol range automata operate on.
pub mod alphabet;
pub use alphabet::{Alphabet, Symbol};

/// Defines automata, their states and their transitions.
pub mod automaton;
pub use automaton::Automaton;

/// Sets of states of an automaton, represented as fixed-capacity bit-vectors.
pub mod state_set;
pub use state_set::StateSet;

/// Deduplicating storage that assigns stable indices to sets of states.
pub mod registry;
pub use registry::Registry;

/// Implements the subset construction.
pub mod subset;
pub use subset::{determinize, SubsetConstruction};

/// Errors that can occur when working with automata.
pub mod error;
pub use error::{ConversionError, InvalidAutomaton};

/// Reading and writing automata in a simple textual format.
pub mod text;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

use fastrand::Rng;
use tracing::trace;

use crate::prelude::*;

/// Generates a random automaton with `size` states over an alphabet with `symbols` symbols.
/// Every triple `(source, symbol, target)` becomes a transition with probability `density`,
/// so for larger values the result is likely nondeterministic. Each state is final with
/// probability one half and the initial state is `0`.
///
/// All randomness is drawn from `rng`, seeding it makes the result reproducible.
///
/// # Panics
/// If `size` is zero.
pub fn generate_random_nfa(rng: &mut Rng, symbols: usize, size: usize, density: f64) -> Automaton {
    assert!(size > 0, "an automaton needs at least one state");
    let mut aut = Automaton::new(Alphabet::of_size(symbols), size, 0);
    for source in aut.state_indices() {
        if rng.bool() {
            aut.set_final(source);
        }
        for symbol in 0..symbols {
            for target in 0..size {
                if rng.f64() < density {
                    aut.add_transition(source, symbol, target);
                }
            }
        }
    }
    trace!(
        "generated random automaton with {size} states and {} transitions",
        aut.transition_count()
    );
    aut
}

/// Generate a random deterministic and total automaton of the given size by drawing a target for
/// every state and symbol uniformly. Each state is final with probability one half. Depending on
/// the drawn transitions, some states may not be reachable from the initial state `0`.
///
/// # Panics
/// If `size` is zero.
pub fn generate_random_dfa(rng: &mut Rng, symbols: usize, size: usize) -> Automaton {
    assert!(size > 0, "an automaton needs at least one state");
    let mut aut = Automaton::new(Alphabet::of_size(symbols), size, 0);
    for source in aut.state_indices() {
        if rng.bool() {
            aut.set_final(source);
        }
        for symbol in 0..symbols {
            aut.add_transition(source, symbol, rng.usize(..size));
        }
    }
    aut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_automata_are_valid() {
        let mut rng = Rng::with_seed(42);
        for size in 1..10 {
            let nfa = generate_random_nfa(&mut rng, 3, size, 0.4);
            assert_eq!(nfa.size(), size);
            assert!(nfa.validate().is_ok());

            let dfa = generate_random_dfa(&mut rng, 3, size);
            assert!(dfa.validate().is_ok());
            assert!(dfa.is_total());
        }
    }

    #[test]
    fn generation_is_reproducible() {
        let first = generate_random_nfa(&mut Rng::with_seed(3), 2, 6, 0.5);
        let second = generate_random_nfa(&mut Rng::with_seed(3), 2, 6, 0.5);
        assert_eq!(first, second);
    }
}

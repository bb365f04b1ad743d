//! The textual format describes an automaton through a sequence of whitespace separated tokens:
//!
//! 1. the size of the alphabet, between `1` and `26`,
//! 2. the number of states,
//! 3. the index of the initial state,
//! 4. the number of final states, followed by that many state indices,
//! 5. any number of transitions `from symbol to`, where the symbol is a lowercase letter.
//!
//! Writing an automaton through its [`Display`](std::fmt::Display) implementation produces the
//! same format, with the final states on one line and one transition per line.
//!
//! ```
//! use powerset::prelude::*;
//!
//! let nfa: Automaton = "1 2 0 1 1\n0 a 0\n0 a 1\n".parse().unwrap();
//! let dfa = nfa.determinize().unwrap();
//! assert_eq!(dfa.to_string(), "1\n2\n0\n1 1\n0 a 1\n1 a 1\n");
//! ```
use std::{fmt::Write, str::FromStr};

use itertools::Itertools;
use thiserror::Error;
use tracing::trace;

use crate::{
    alphabet::{Alphabet, LETTER_COUNT},
    automaton::Automaton,
    error::{ConversionError, InvalidAutomaton},
};

/// Abstracts the types of errors that can occur when parsing an [`Automaton`] from a string.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ParseError {
    #[error("input ended while reading the {0}")]
    UnexpectedEnd(&'static str),
    #[error("expected the {expected}, found `{token}`")]
    InvalidNumber {
        token: String,
        expected: &'static str,
    },
    #[error("alphabet size {0} is not in the range 1..=26")]
    AlphabetSize(usize),
    #[error("`{0}` is not a symbol of the alphabet")]
    InvalidSymbol(String),
    #[error("input ends with an incomplete transition")]
    TrailingTokens,
    #[error("could not allocate memory for {0}")]
    ResourceExhausted(&'static str),
    #[error(transparent)]
    Invalid(#[from] InvalidAutomaton),
}

impl From<ConversionError> for ParseError {
    fn from(value: ConversionError) -> Self {
        match value {
            ConversionError::InvalidAutomaton(invalid) => Self::Invalid(invalid),
            ConversionError::ResourceExhausted(what) => Self::ResourceExhausted(what),
        }
    }
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }

    fn number(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        let token = self.next().ok_or(ParseError::UnexpectedEnd(expected))?;
        parse_number(token, expected)
    }
}

fn parse_number(token: &str, expected: &'static str) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
        expected,
    })
}

/// Parses an automaton from its textual description. Besides syntactic errors, this rejects
/// every description that does not form a valid automaton, see [`Automaton::validate`].
pub fn parse_automaton(input: &str) -> Result<Automaton, ParseError> {
    let mut tokens = Tokens::new(input);

    let alphabet_size = tokens.number("alphabet size")?;
    if alphabet_size == 0 || alphabet_size > LETTER_COUNT {
        return Err(ParseError::AlphabetSize(alphabet_size));
    }
    let alphabet = Alphabet::of_size(alphabet_size);

    let size = tokens.number("number of states")?;
    let initial = tokens.number("initial state")?;
    if initial >= size {
        return Err(InvalidAutomaton::InitialOutOfRange {
            initial,
            states: size,
        }
        .into());
    }
    let mut aut = Automaton::try_new(alphabet, size, initial)?;

    let final_count = tokens.number("number of final states")?;
    for _ in 0..final_count {
        let state = tokens.number("final state")?;
        if state >= size {
            return Err(InvalidAutomaton::StateOutOfRange {
                state,
                states: size,
            }
            .into());
        }
        aut.set_final(state);
    }

    while let Some(token) = tokens.next() {
        let from = parse_number(token, "source of a transition")?;
        let (Some(letter), Some(to)) = (tokens.next(), tokens.next()) else {
            return Err(ParseError::TrailingTokens);
        };
        let symbol = letter
            .chars()
            .exactly_one()
            .ok()
            .and_then(|c| alphabet.symbol(c))
            .ok_or_else(|| ParseError::InvalidSymbol(letter.to_string()))?;
        let to = parse_number(to, "target of a transition")?;
        if from >= size {
            return Err(InvalidAutomaton::StateOutOfRange {
                state: from,
                states: size,
            }
            .into());
        }
        aut.add_transition(from, symbol, to);
    }

    aut.validate()?;
    trace!(
        "parsed automaton with {} states and {} transitions",
        aut.size(),
        aut.transition_count()
    );
    Ok(aut)
}

impl FromStr for Automaton {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_automaton(s)
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.alphabet().size())?;
        writeln!(f, "{}", self.size())?;
        writeln!(f, "{}", self.initial())?;

        write!(f, "{}", self.final_states().count())?;
        for state in self.final_states() {
            write!(f, " {state}")?;
        }
        f.write_char('\n')?;

        for (from, symbol, to) in self.transitions() {
            match self.alphabet().letter(symbol) {
                Some(letter) => writeln!(f, "{from} {letter} {to}")?,
                None => writeln!(f, "{from} {symbol} {to}")?,
            }
        }
        Ok(())
    }
}

use itertools::Itertools;

/// A symbol is an offset into an [`Alphabet`], i.e. a value in the range `0..alphabet.size()`.
pub type Symbol = usize;

/// The number of symbols that have a textual representation as a lowercase letter.
pub const LETTER_COUNT: usize = 26;

/// Represents a finite alphabet of the form `0..size`. Each symbol is identified with its offset.
/// When an automaton is written as text, the symbols up to [`LETTER_COUNT`] are rendered as the
/// letters `'a'`, `'b'` and so on, see [`Alphabet::letter`].
///
/// # Example
/// ```
/// use powerset::prelude::*;
///
/// let alphabet = Alphabet::of_size(3);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec![0, 1, 2]);
/// assert_eq!(alphabet.letter(1), Some('b'));
/// assert_eq!(alphabet.symbol('c'), Some(2));
/// assert_eq!(alphabet.symbol('d'), None);
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct Alphabet {
    size: usize,
}

impl Alphabet {
    /// Creates a new alphabet consisting of the symbols `0..size`.
    pub fn of_size(size: usize) -> Self {
        Self { size }
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the alphabet contains no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over all symbols in ascending order.
    pub fn universe(&self) -> std::ops::Range<Symbol> {
        0..self.size
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol < self.size
    }

    /// Gives the letter that represents `symbol` in the textual format, if there is one.
    pub fn letter(&self, symbol: Symbol) -> Option<char> {
        if self.contains(symbol) && symbol < LETTER_COUNT {
            Some((b'a' + symbol as u8) as char)
        } else {
            None
        }
    }

    /// Maps a letter back to the symbol it represents. Gives `None` for anything that is not a
    /// lowercase letter of the alphabet.
    pub fn symbol(&self, letter: char) -> Option<Symbol> {
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let symbol = (letter as u8 - b'a') as Symbol;
        self.contains(symbol).then_some(symbol)
    }

    /// Enumerates all finite words over the alphabet whose length is at most `max_len`, ordered
    /// by length first.
    pub fn words_up_to(&self, max_len: usize) -> impl Iterator<Item = Vec<Symbol>> + '_ {
        (0..=max_len).flat_map(move |len| {
            let words: Box<dyn Iterator<Item = Vec<Symbol>>> = if len == 0 {
                Box::new(std::iter::once(vec![]))
            } else {
                Box::new(
                    std::iter::repeat(self.universe())
                        .take(len)
                        .multi_cartesian_product(),
                )
            };
            words
        })
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.universe()
                .map(|sym| self.letter(sym).map_or(sym.to_string(), String::from))
                .join(", ")
        )
    }
}

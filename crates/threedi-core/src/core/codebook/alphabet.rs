use super::error::CodebookError;
use super::reference::{REFERENCE_LETTERS, REFERENCE_UNKNOWN};
use crate::core::models::state::{STATE_COUNT, State};

/// Printable rendering of states: one letter per class plus an unknown marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: [char; STATE_COUNT],
    unknown: char,
}

impl Alphabet {
    /// Builds an alphabet from twenty distinct printable ASCII characters (letters,
    /// digits or punctuation) and an unknown marker.
    ///
    /// The unknown marker may coincide with one of the letters, as it does in
    /// the reference alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`CodebookError::InvalidAlphabet`] if `letters` does not contain
    /// exactly twenty distinct printable ASCII characters, or if `unknown` is
    /// not printable ASCII.
    pub fn new(letters: &str, unknown: char) -> Result<Self, CodebookError> {
        let chars: Vec<char> = letters.chars().collect();
        if chars.len() != STATE_COUNT {
            return Err(CodebookError::InvalidAlphabet(format!(
                "expected {} letters, found {}",
                STATE_COUNT,
                chars.len()
            )));
        }
        if let Some(bad) = chars
            .iter()
            .chain(std::iter::once(&unknown))
            .find(|c| !c.is_ascii_graphic())
        {
            return Err(CodebookError::InvalidAlphabet(format!(
                "character {:?} is not printable ASCII",
                bad
            )));
        }
        for (i, c) in chars.iter().enumerate() {
            if chars[..i].contains(c) {
                return Err(CodebookError::InvalidAlphabet(format!(
                    "letter '{}' appears more than once",
                    c
                )));
            }
        }

        let mut table = [' '; STATE_COUNT];
        table.copy_from_slice(&chars);
        Ok(Self {
            letters: table,
            unknown,
        })
    }

    pub fn reference() -> Self {
        let mut letters = [' '; STATE_COUNT];
        for (slot, c) in letters.iter_mut().zip(REFERENCE_LETTERS.chars()) {
            *slot = c;
        }
        Self {
            letters,
            unknown: REFERENCE_UNKNOWN,
        }
    }

    /// Returns the same letters with a different unknown marker.
    pub fn with_unknown(&self, unknown: char) -> Result<Self, CodebookError> {
        let letters: String = self.letters.iter().collect();
        Self::new(&letters, unknown)
    }

    pub fn letters(&self) -> &[char; STATE_COUNT] {
        &self.letters
    }

    pub fn unknown(&self) -> char {
        self.unknown
    }

    pub fn symbol(&self, state: State) -> char {
        match state.index() {
            Some(i) if i < STATE_COUNT => self.letters[i],
            _ => self.unknown,
        }
    }

    /// Renders a state sequence, one character per state.
    pub fn render(&self, states: &[State]) -> String {
        states.iter().map(|&s| self.symbol(s)).collect()
    }

    pub fn contains(&self, c: char) -> bool {
        c == self.unknown || self.letters.contains(&c)
    }

    /// Maps a rendered sequence back to states.
    ///
    /// A letter of the alphabet always maps to its class, so when the unknown
    /// marker is also a state letter it parses as that class.
    pub fn parse_sequence(&self, sequence: &str) -> Result<Vec<State>, CodebookError> {
        sequence
            .chars()
            .map(|c| match self.letters.iter().position(|&l| l == c) {
                Some(i) => Ok(State::Class(i as u8)),
                None if c == self.unknown => Ok(State::Missing),
                None => Err(CodebookError::InvalidAlphabet(format!(
                    "character '{}' is not part of the alphabet",
                    c
                ))),
            })
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::reference()
    }
}

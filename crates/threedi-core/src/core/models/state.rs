use std::fmt;

/// Number of structural classes in the 3Di alphabet.
pub const STATE_COUNT: usize = 20;

/// Number of scalar features in a residue descriptor.
pub const DESCRIPTOR_LEN: usize = 10;

/// Local geometric descriptor of one residue and its spatial partner.
pub type Descriptor = [f64; DESCRIPTOR_LEN];

/// The discrete structural state assigned to a residue.
///
/// `Class` values produced by the encoders are always below [`STATE_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    Class(u8),
    /// No descriptor could be computed for the residue.
    Missing,
}

impl State {
    /// Returns the state for a class index, or `None` if it is out of range.
    pub fn class(index: usize) -> Option<Self> {
        (index < STATE_COUNT).then(|| State::Class(index as u8))
    }

    pub fn index(self) -> Option<usize> {
        match self {
            State::Class(i) => Some(i as usize),
            State::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, State::Missing)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Class(i) => write!(f, "{}", i),
            State::Missing => write!(f, "-"),
        }
    }
}

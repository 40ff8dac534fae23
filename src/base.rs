//! The [`Base`] type: a single call in a sequence array.

use rand::Rng;
use std::fmt;

use crate::error::SeqLibError;

/// The four called nucleotides, in the order origin sequences are drawn from.
pub const NUCLEOTIDES: [Base; 4] = [Base::A, Base::C, Base::G, Base::T];

/// A base call for one individual at one site.
///
/// `N` marks missing data. The set is closed: every [`Base`] that ends
/// up in a [`SequenceArray`] was validated on the way in.
///
/// [`SequenceArray`]: crate::sequences::SequenceArray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Base {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
    N = 4,
}

impl Base {
    /// Convert from an ASCII byte. Lowercase bytes are accepted.
    #[inline]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'A' | b'a' => Some(Self::A),
            b'C' | b'c' => Some(Self::C),
            b'G' | b'g' => Some(Self::G),
            b'T' | b't' => Some(Self::T),
            b'N' | b'n' => Some(Self::N),
            _ => None,
        }
    }

    /// Convert to an uppercase ASCII byte.
    #[inline(always)]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Self::A => b'A',
            Self::C => b'C',
            Self::G => b'G',
            Self::T => b'T',
            Self::N => b'N',
        }
    }

    /// Convert to an uppercase `char`.
    #[inline(always)]
    pub const fn to_char(self) -> char {
        self.to_ascii() as char
    }

    /// Return true if this is the missing-data marker `N`.
    #[inline(always)]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::N)
    }

    /// Draw one of A, C, G, T uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())]
    }

    /// Draw uniformly from the three nucleotides that differ from `self`.
    ///
    /// For `N` the draw is over all four nucleotides.
    pub fn random_other<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let n = NUCLEOTIDES.len();
        match self {
            Self::N => Self::random(rng),
            // an offset in 1..n never lands back on self
            _ => NUCLEOTIDES[(self as usize + rng.gen_range(1..n)) % n],
        }
    }
}

impl TryFrom<u8> for Base {
    type Error = SeqLibError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_ascii(byte).ok_or(SeqLibError::InvalidBase(byte as char))
    }
}

impl TryFrom<char> for Base {
    type Error = SeqLibError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii() {
            Self::try_from(c as u8)
        } else {
            Err(SeqLibError::InvalidBase(c))
        }
    }
}

impl From<Base> for char {
    #[inline(always)]
    fn from(base: Base) -> char {
        base.to_char()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

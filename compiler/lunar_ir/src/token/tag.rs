//! Compact payload-free token tag.

use std::fmt;

use super::Reserved;

/// Payload-free token classification, numbered like a `u16`.
///
/// | Range      | Category                                   |
/// |------------|--------------------------------------------|
/// | 0-255      | Single-byte tokens (the byte itself)       |
/// | 256-278    | Keywords                                   |
/// | 279-288    | Multi-byte operators                       |
/// | 289-293    | `<eof>` and literal classes                |
///
/// Reserved tags are `FIRST_RESERVED + Reserved::index()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenTag(u16);

impl TokenTag {
    /// Tag number of the first reserved token.
    pub const FIRST_RESERVED: u16 = 256;

    pub const EOS: TokenTag = TokenTag::from_reserved(Reserved::Eos);

    /// Tag for a single-byte token.
    #[inline]
    pub const fn from_char(byte: u8) -> Self {
        TokenTag(byte as u16)
    }

    /// Tag for a reserved token.
    #[inline]
    pub const fn from_reserved(reserved: Reserved) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Reserved has fewer than 256 entries"
        )]
        let index = reserved.index() as u16;
        TokenTag(Self::FIRST_RESERVED + index)
    }

    /// The byte of a single-byte token.
    #[inline]
    pub fn as_char(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    /// The reserved entry of a reserved token.
    #[inline]
    pub fn as_reserved(self) -> Option<Reserved> {
        self.0
            .checked_sub(Self::FIRST_RESERVED)
            .and_then(|i| Reserved::from_index(usize::from(i)))
    }

    /// Raw tag number.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<Reserved> for TokenTag {
    fn from(reserved: Reserved) -> Self {
        TokenTag::from_reserved(reserved)
    }
}

impl fmt::Debug for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.as_char(), self.as_reserved()) {
            (Some(b), _) if b.is_ascii_graphic() => write!(f, "TokenTag('{}')", char::from(b)),
            (Some(b), _) => write!(f, "TokenTag({b:#04x})"),
            (None, Some(r)) => write!(f, "TokenTag({r:?})"),
            (None, None) => write!(f, "TokenTag(#{})", self.0),
        }
    }
}

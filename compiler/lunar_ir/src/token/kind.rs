//! Token kind with payload.

use std::fmt;

use super::{Reserved, TokenTag};
use crate::Name;

/// Token kinds produced by the scanner.
///
/// Float literals store bits as u64 so the enum stays `Eq + Hash`.
/// Names and strings carry the interned `Name` of their bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Single-byte token: punctuation, operators, and any other byte the
    /// scanner passes through unchanged.
    Char(u8),
    /// Keyword or multi-byte operator. Never one of the sentinel entries
    /// `Flt`, `Int`, `Name`, `String`; `Eos` is allowed.
    Reserved(Reserved),
    /// Float literal, stored as `f64::to_bits`.
    Float(u64),
    /// Integer literal.
    Int(i64),
    /// Identifier that is not a keyword.
    Name(Name),
    /// Short or long string literal with escapes decoded.
    String(Name),
}

impl TokenKind {
    /// End of stream.
    pub const EOS: TokenKind = TokenKind::Reserved(Reserved::Eos);

    /// Build a float token from its value.
    #[inline]
    pub fn float(value: f64) -> Self {
        TokenKind::Float(value.to_bits())
    }

    /// The value of a float token.
    #[inline]
    pub fn float_value(self) -> Option<f64> {
        match self {
            TokenKind::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }

    /// Payload-free tag of this token.
    pub fn tag(self) -> TokenTag {
        match self {
            TokenKind::Char(b) => TokenTag::from_char(b),
            TokenKind::Reserved(r) => TokenTag::from_reserved(r),
            TokenKind::Float(_) => TokenTag::from_reserved(Reserved::Flt),
            TokenKind::Int(_) => TokenTag::from_reserved(Reserved::Int),
            TokenKind::Name(_) => TokenTag::from_reserved(Reserved::Name),
            TokenKind::String(_) => TokenTag::from_reserved(Reserved::String),
        }
    }

    #[inline]
    pub fn is_eos(self) -> bool {
        self == Self::EOS
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenKind::Char(b) if b.is_ascii_graphic() => write!(f, "Char('{}')", char::from(b)),
            TokenKind::Char(b) => write!(f, "Char({b:#04x})"),
            TokenKind::Reserved(r) => write!(f, "{r:?}"),
            TokenKind::Float(bits) => write!(f, "Float({:?})", f64::from_bits(bits)),
            TokenKind::Int(i) => write!(f, "Int({i})"),
            TokenKind::Name(n) => write!(f, "Name({n:?})"),
            TokenKind::String(n) => write!(f, "String({n:?})"),
        }
    }
}

//! Handles to interned byte strings.
//!
//! Identifiers and string literals both intern to a [`Name`]. Comparing two
//! names compares the bytes they stand for, without touching the bytes.

use std::fmt;

const LOCAL_BITS: u32 = 28;

/// A byte string stored in a [`StringInterner`](crate::StringInterner).
///
/// The top four bits pick the interner shard the entry was hashed into; the
/// remaining 28 count entries within that shard. A `Name` is only
/// meaningful to the interner that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Entries one shard can hold, less one.
    pub const MAX_LOCAL: u32 = (1 << LOCAL_BITS) - 1;

    /// Shards per interner.
    pub const NUM_SHARDS: usize = 1 << (32 - LOCAL_BITS);

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << LOCAL_BITS) | local)
    }

    /// Shard holding the bytes.
    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> LOCAL_BITS) as usize
    }

    /// Position of the entry within its shard.
    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

#[cfg(test)]
mod tests;

//! Sharded byte-string interner.
//!
//! Provides O(1) interning and lookup with thread-safe concurrent access
//! via per-shard locking. Interned strings are leaked into `'static`
//! storage and never freed, so a freshly interned literal stays alive until
//! whatever holds its `Name` records it somewhere durable.

use super::{Name, Reserved};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Name of the implicit environment upvalue, pre-interned with the keywords.
pub const ENV_NAME: &str = "_ENV";

/// Seed for the string hash. Fixed so that hashes are reproducible.
const HASH_SEED: u32 = 0x2545_F491;

/// One interned string with its precomputed hash and keyword flag.
#[derive(Clone, Copy)]
struct Entry {
    bytes: &'static [u8],
    hash: u32,
    reserved: Option<Reserved>,
}

/// Per-shard storage for interned strings.
struct InternShard {
    /// Map from string content to local index.
    map: FxHashMap<&'static [u8], u32>,
    /// Storage for string contents, indexed by local index.
    entries: Vec<Entry>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// Shard exceeded capacity.
    #[error(
        "interner shard {shard_idx} exceeded capacity: {count} strings, max is {}",
        Name::MAX_LOCAL
    )]
    ShardOverflow { shard_idx: usize, count: usize },
}

impl InternShard {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            entries: Vec::with_capacity(256),
        }
    }
}

/// Hash a byte string: seeded shift-add-xor over every byte, last to first.
#[inline]
pub(crate) fn hash_bytes(bytes: &[u8]) -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low bits of the length seed the hash"
    )]
    let mut h = HASH_SEED ^ (bytes.len() as u32);
    for &b in bytes.iter().rev() {
        h ^= (h << 5).wrapping_add(h >> 2).wrapping_add(u32::from(b));
    }
    h
}

/// Sharded string interner for concurrent access.
///
/// Provides O(1) lookup and identity comparison for interned strings.
///
/// # Thread Safety
/// Uses `RwLock` per shard. An entry is published to readers only after
/// both its bytes and its index are in place, so no reader ever observes a
/// partially inserted string.
pub struct StringInterner {
    shards: [RwLock<InternShard>; Name::NUM_SHARDS],
    /// Total count of interned strings across all shards (O(1) `len()`).
    total_count: AtomicUsize,
}

impl StringInterner {
    /// Create a new interner with the reserved words pre-interned and flagged.
    pub fn new() -> Self {
        let interner = Self {
            shards: std::array::from_fn(|_| RwLock::new(InternShard::new())),
            total_count: AtomicUsize::new(0),
        };
        interner.pre_intern_reserved();
        interner
    }

    #[inline]
    fn shard_for(hash: u32) -> usize {
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Try to intern a byte string, returning its Name or an error on overflow.
    #[inline]
    pub fn try_intern(&self, bytes: &[u8]) -> Result<Name, InternError> {
        let hash = hash_bytes(bytes);
        if let Some(name) = self.find(bytes, hash) {
            return Ok(name);
        }
        self.insert(bytes.to_vec(), hash)
    }

    /// Try to intern an owned byte string without copying it again.
    pub fn try_intern_owned(&self, bytes: Vec<u8>) -> Result<Name, InternError> {
        let hash = hash_bytes(&bytes);
        if let Some(name) = self.find(&bytes, hash) {
            return Ok(name);
        }
        self.insert(bytes, hash)
    }

    /// Fast path: read-locked probe.
    fn find(&self, bytes: &[u8], hash: u32) -> Option<Name> {
        let shard_idx = Self::shard_for(hash);
        let guard = self.shards[shard_idx].read();
        guard
            .map
            .get(bytes)
            .map(|&local| Name::new(shard_idx_u32(shard_idx), local))
    }

    /// Slow path: insert under the write lock, re-checking first.
    fn insert(&self, bytes: Vec<u8>, hash: u32) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(hash);
        let mut guard = self.shards[shard_idx].write();

        // Double-check after acquiring write lock
        if let Some(&local) = guard.map.get(bytes.as_slice()) {
            return Ok(Name::new(shard_idx_u32(shard_idx), local));
        }

        let count = guard.entries.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&l| l <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;

        // Leak the string to get 'static lifetime
        let leaked: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        guard.entries.push(Entry {
            bytes: leaked,
            hash,
            reserved: None,
        });
        guard.map.insert(leaked, local);

        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Name::new(shard_idx_u32(shard_idx), local))
    }

    /// Intern a byte string, returning its Name.
    ///
    /// # Panics
    /// Panics if a shard exceeds capacity (over 268 million strings).
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, bytes: impl AsRef<[u8]>) -> Name {
        self.try_intern(bytes.as_ref())
            .unwrap_or_else(|e| panic!("{}", e))
    }

    /// Intern an owned byte string, avoiding a second allocation.
    ///
    /// # Panics
    /// Panics if a shard exceeds capacity. Use `try_intern_owned` for
    /// fallible interning.
    pub fn intern_owned(&self, bytes: Vec<u8>) -> Name {
        self.try_intern_owned(bytes)
            .unwrap_or_else(|e| panic!("{}", e))
    }

    fn entry(&self, name: Name) -> Entry {
        self.shards[name.shard()].read().entries[name.local()]
    }

    /// Look up the bytes for a Name.
    pub fn lookup(&self, name: Name) -> &'static [u8] {
        self.entry(name).bytes
    }

    /// Look up the bytes for a Name as text, replacing invalid UTF-8.
    pub fn lookup_str(&self, name: Name) -> Cow<'static, str> {
        String::from_utf8_lossy(self.lookup(name))
    }

    /// The hash computed when the string was interned.
    pub fn hash_of(&self, name: Name) -> u32 {
        self.entry(name).hash
    }

    /// The keyword this string spells, if it is a reserved word.
    pub fn reserved(&self, name: Name) -> Option<Reserved> {
        self.entry(name).reserved
    }

    /// Pre-intern every reserved word and flag it, plus the `_ENV` name.
    fn pre_intern_reserved(&self) {
        for &word in Reserved::words() {
            let name = self.intern(word.spelling());
            self.shards[name.shard()].write().entries[name.local()].reserved = Some(word);
        }
        self.intern(ENV_NAME);
    }

    /// Get the number of interned strings (O(1)).
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// Check if the interner holds no strings.
    ///
    /// Never true for a constructed interner, which always holds the
    /// reserved words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[inline]
fn shard_idx_u32(shard_idx: usize) -> u32 {
    // shard_idx is always < NUM_SHARDS (16) due to modulo
    #[expect(
        clippy::cast_possible_truncation,
        reason = "shard_idx is bounded by NUM_SHARDS (16)"
    )]
    let idx = shard_idx as u32;
    idx
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned string names.
///
/// Higher-level crates can accept any `StringLookup` implementor without
/// depending directly on `StringInterner`.
pub trait StringLookup {
    /// Look up the bytes for an interned name.
    fn lookup(&self, name: Name) -> &[u8];
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &[u8] {
        StringInterner::lookup(self, name)
    }
}

/// Shared interner for string interning across compiler phases.
///
/// Use `SharedInterner` when the interner must outlive the caller or be
/// handed to several owners; use `&StringInterner` when a phase only
/// borrows it for the duration of one call.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

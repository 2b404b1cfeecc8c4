//! Growable staging buffer for the literal being scanned.
//!
//! The scanner copies the bytes of names, numerals and strings here while
//! it reads them, then hands the finished slice to the interner or the
//! numeral converter. Nothing outside the scanner keeps a reference into
//! the buffer; its content is only meaningful between two resets.

/// Capacity the buffer is sized to when a scanner starts.
pub const MIN_BUFFER_SIZE: usize = 32;

/// Why the buffer refused to grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The literal would outgrow the configured maximum.
    #[error("lexical element too long")]
    TooLong,
    /// The allocator could not provide more memory.
    #[error("not enough memory")]
    OutOfMemory,
}

/// Growable byte buffer with a hard size ceiling.
///
/// Capacity grows by half of itself each time it fills up, but never past
/// [`limit`](Self::limit), two thirds of `max_size`. The content may hold at
/// most `limit` bytes; saving one more is [`BufferError::TooLong`].
#[derive(Clone, Debug)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
    max_size: usize,
}

impl ScratchBuffer {
    /// Default ceiling: the largest size a slice may have.
    pub const DEFAULT_MAX_SIZE: usize = isize::MAX.unsigned_abs();

    /// Create an empty buffer that may grow up to `max_size` bytes.
    pub fn new(max_size: usize) -> Self {
        ScratchBuffer {
            buf: Vec::new(),
            max_size,
        }
    }

    /// Append one byte, growing the buffer if it is full.
    #[inline]
    pub fn save(&mut self, byte: u8) -> Result<(), BufferError> {
        if self.buf.len() >= self.limit() {
            return Err(BufferError::TooLong);
        }
        if self.buf.len() == self.buf.capacity() {
            self.grow()?;
        }
        self.buf.push(byte);
        Ok(())
    }

    /// Append a run of bytes.
    pub fn extend(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        for &b in bytes {
            self.save(b)?;
        }
        Ok(())
    }

    #[cold]
    fn grow(&mut self) -> Result<(), BufferError> {
        let size = self.buf.capacity();
        let new_size = (size + size / 2).max(MIN_BUFFER_SIZE).min(self.limit());
        self.buf
            .try_reserve_exact(new_size - self.buf.len())
            .map_err(|_| BufferError::OutOfMemory)
    }

    /// Forget the content but keep the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Drop the last `n` bytes (all of them if `n` exceeds the length).
    pub fn remove(&mut self, n: usize) {
        let keep = self.buf.len().saturating_sub(n);
        self.buf.truncate(keep);
    }

    /// Reallocate to a capacity of `size`, truncating content that no
    /// longer fits.
    pub fn resize(&mut self, size: usize) -> Result<(), BufferError> {
        if size <= self.buf.capacity() {
            self.buf.truncate(size);
            self.buf.shrink_to(size);
            Ok(())
        } else {
            self.buf
                .try_reserve_exact(size - self.buf.len())
                .map_err(|_| BufferError::OutOfMemory)
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Most bytes the buffer will hold.
    #[inline]
    pub fn limit(&self) -> usize {
        self.max_size / 3 * 2
    }
}

impl Default for ScratchBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE)
    }
}

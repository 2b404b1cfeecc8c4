//! Byte-at-a-time input for the scanner.
//!
//! The scanner never looks more than one byte ahead of the source, so the
//! whole input contract is "give me the next byte, or tell me there are no
//! more". A source that fails part way through ends the stream and keeps
//! the error for [`ByteSource::take_error`].

use std::io::{self, Read};

/// Size of the chunk [`ReaderSource`] refills at a time.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// A sequential supplier of source bytes.
pub trait ByteSource {
    /// The next byte, or `None` once the stream is exhausted.
    ///
    /// After the first `None`, every further call returns `None`.
    fn next_byte(&mut self) -> Option<u8>;

    /// The I/O error that ended the stream early, if any.
    ///
    /// Returns the error once; later calls return `None`.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }

    fn take_error(&mut self) -> Option<io::Error> {
        (**self).take_error()
    }
}

/// Source over an in-memory chunk.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        SliceSource { bytes, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }
}

/// Source that pulls fixed-size chunks from an [`io::Read`].
///
/// `Interrupted` reads are retried. Any other read error ends the stream
/// and is kept for [`ByteSource::take_error`].
pub struct ReaderSource<R> {
    reader: R,
    chunk: Box<[u8]>,
    pos: usize,
    len: usize,
    done: bool,
    error: Option<io::Error>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            chunk: vec![0; READ_CHUNK_SIZE].into_boxed_slice(),
            pos: 0,
            len: 0,
            done: false,
            error: None,
        }
    }

    /// Refill the chunk. Returns `false` at end of stream or on error.
    fn fill(&mut self) -> bool {
        while !self.done {
            match self.reader.read(&mut self.chunk) {
                Ok(0) => self.done = true,
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return true;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.error = Some(e);
                    self.done = true;
                }
            }
        }
        false
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        if self.pos == self.len && !self.fill() {
            return None;
        }
        let b = self.chunk[self.pos];
        self.pos += 1;
        Some(b)
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R> std::fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderSource")
            .field("buffered", &(self.len - self.pos))
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

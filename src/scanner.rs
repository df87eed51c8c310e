//! A forward-only cursor over a byte buffer, used by every codec that reads
//! the wire format.
use crate::error::ScannerError;

/// A cursor over a borrowed byte slice.
pub struct Scanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Wraps `buf` starting at offset zero.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes remaining after the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once every byte has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Returns the next byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, ScannerError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(ScannerError::UnexpectedEndOfStream {
                wanted: 1,
                remaining: self.remaining(),
            })
    }

    /// Consumes and returns the next byte.
    pub fn take1(&mut self) -> Result<u8, ScannerError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consumes and returns the next `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], ScannerError> {
        if self.remaining() < n {
            return Err(ScannerError::UnexpectedEndOfStream {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consumes and discards the next `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), ScannerError> {
        self.take(n).map(|_| ())
    }

    /// Consumes every remaining byte.
    pub fn take_rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }
}

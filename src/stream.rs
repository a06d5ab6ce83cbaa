//! Overlapping window reader for scanning large sections.
//!
//! A fixed-size, non-overlapping scan misses any marker that straddles two
//! buffers. [`StreamReader`] slides its buffer by half its size instead, so
//! every contiguous marker of at most `W/2` bytes is wholly contained in at
//! least one window.
//!
//! Matches that start close to the end of a window with a successor may be
//! cut short by the window boundary. Probes reject those with
//! [`Window::in_tail_margin`]; the same bytes reappear further from the end
//! in the next window. The reader looks one byte ahead so that the last
//! window is known to be last, and nothing in it is rejected.

use crate::error::{Error, Result};
use std::io::{self, Read};
use tracing::trace;

/// One view onto the source produced by [`StreamReader::next_window`].
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    bytes: &'a [u8],
    offset: u64,
    capacity: usize,
    last: bool,
}

impl<'a> Window<'a> {
    /// The valid bytes of this window.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Offset of the first byte of this window within the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the window holds a full buffer.
    pub fn is_full(&self) -> bool {
        self.bytes.len() == self.capacity
    }

    /// True when the source has no bytes beyond this window. A window that
    /// is not full is always last; a full one may be too.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Whether a match starting at `start` lies within `margin` bytes of the
    /// end of a window that has a successor, and must be left for it.
    pub fn in_tail_margin(&self, start: usize, margin: usize) -> bool {
        !self.last && self.capacity.saturating_sub(start) < margin
    }
}

/// Yields overlapping windows of `window_size` bytes from a byte source.
///
/// The first window holds up to `window_size` bytes. Every later window keeps
/// the second half of the previous one and appends up to `window_size / 2`
/// fresh bytes. The sequence ends after the window that reaches the end of
/// the source.
pub struct StreamReader<R> {
    source: R,
    buf: Vec<u8>,
    len: usize,
    offset: u64,
    // Byte read ahead to learn whether another window follows.
    peeked: Option<u8>,
    started: bool,
    exhausted: bool,
}

impl<R: Read> StreamReader<R> {
    pub fn new(source: R, window_size: usize) -> Result<Self> {
        if window_size == 0 || window_size % 2 != 0 {
            return Err(Error::InvalidWindowSize(window_size));
        }
        Ok(Self {
            source,
            buf: vec![0; window_size],
            len: 0,
            offset: 0,
            peeked: None,
            started: false,
            exhausted: false,
        })
    }

    pub fn window_size(&self) -> usize {
        self.buf.len()
    }

    /// Produce the next window, or `None` once the source is exhausted.
    ///
    /// The sequence cannot be restarted: after the last window or an error
    /// every call returns `None`.
    pub fn next_window(&mut self) -> io::Result<Option<Window<'_>>> {
        if self.exhausted {
            return Ok(None);
        }
        let capacity = self.buf.len();
        let half = capacity / 2;

        let (n, wanted) = if self.started {
            self.buf.copy_within(half.., 0);
            (self.fill(half)?, half)
        } else {
            self.started = true;
            (self.fill(0)?, capacity)
        };

        if n == 0 {
            self.exhausted = true;
            return Ok(None);
        }
        if wanted == half {
            self.offset += half as u64;
        }
        self.len = capacity - wanted + n;

        let last = n < wanted || !self.peek()?;
        self.exhausted = last;

        trace!(offset = self.offset, len = self.len, last, "window");
        Ok(Some(Window {
            bytes: &self.buf[..self.len],
            offset: self.offset,
            capacity,
            last,
        }))
    }

    /// Read into `buf[from..]` until it is full or the source ends, starting
    /// with the byte read ahead, if any.
    fn fill(&mut self, from: usize) -> io::Result<usize> {
        let mut total = 0;
        if let Some(byte) = self.peeked.take() {
            self.buf[from] = byte;
            total = 1;
        }
        let target = &mut self.buf[from..];
        while total < target.len() {
            match self.source.read(&mut target[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.exhausted = true;
                    return Err(e);
                }
            }
        }
        Ok(total)
    }

    /// Read one byte ahead; false when the source has ended.
    fn peek(&mut self) -> io::Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.peeked = Some(byte[0]);
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.exhausted = true;
                    return Err(e);
                }
            }
        }
    }
}

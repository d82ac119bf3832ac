/*!
A bounded sliding-window view over an input byte stream.

`Iterator` (named for the source header's own terminology, not
[`std::iter::Iterator`]) owns a growable buffer into which it reads ahead of
the cursor, refilling from the underlying [`Source`] as the cursor approaches
the buffered tail. The reference implementation keeps the conservative
choice described in the spec: the whole input is retained for the lifetime
of the iterator, so any absolute offset ever reached remains addressable.
*/

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::IoError;

/// Bytes requested to stay available ahead of the cursor during normal
/// operation. Recommended by the spec as 64 KiB; chosen here as a constant
/// rather than a hardcoded magic number so a consumer reading this module
/// knows where it comes from.
pub const LOOKAHEAD: usize = 64 * 1024;

/// Default line-separator byte: LF.
pub const DEFAULT_SEPARATOR: u8 = b'\n';

/// Lifecycle status of an [`Iterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorStatus {
    /// Constructed, no bytes read yet.
    Init,
    /// Actively reading from the source.
    Processing,
    /// The source has been fully drained into the buffer.
    InputEnded,
    /// The cursor has reached the end of the buffered input.
    Ended,
}

/// An opaque source of bytes. An in-memory byte vector and an open file are
/// both sources; a consumer may supply their own by implementing this trait.
trait Source {
    /// Append newly-read bytes to `buf`, returning the number of bytes
    /// appended. `0` means the source is exhausted.
    fn fill(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

struct ReaderSource<R>(R);

impl<R: Read> Source for ReaderSource<R> {
    fn fill(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let start = buf.len();
        buf.resize(start + LOOKAHEAD, 0);
        let read = self.0.read(&mut buf[start..])?;
        buf.truncate(start + read);
        Ok(read)
    }
}

struct ExhaustedSource;

impl Source for ExhaustedSource {
    fn fill(&mut self, _buf: &mut Vec<u8>) -> io::Result<usize> {
        Ok(0)
    }
}

/// A sliding-window byte iterator over an input source. See the module docs.
pub struct Iterator {
    source: Box<dyn Source>,
    buffer: Vec<u8>,
    pos: usize,
    separator: u8,
    line: usize,
    status: IteratorStatus,
}

impl Iterator {
    fn with_source(source: Box<dyn Source>) -> Self {
        Iterator {
            source,
            buffer: Vec::new(),
            pos: 0,
            separator: DEFAULT_SEPARATOR,
            line: 0,
            status: IteratorStatus::Init,
        }
    }

    /// Open an iterator bound to a file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let file = File::open(path).map_err(IoError)?;
        Ok(Self::with_source(Box::new(ReaderSource(file))))
    }

    /// Build an iterator over an already-read byte buffer. Never fails,
    /// since there's no external source to fail to open.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let mut iter = Self::with_source(Box::new(ExhaustedSource));
        iter.buffer = bytes.into();
        iter.status = if iter.buffer.is_empty() {
            IteratorStatus::InputEnded
        } else {
            IteratorStatus::Processing
        };
        iter
    }

    /// Build an iterator over a string's UTF-8 bytes.
    pub fn from_str(input: &str) -> Self {
        Self::from_bytes(input.as_bytes().to_vec())
    }

    /// Build an iterator that reads from an arbitrary [`Read`] implementation.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        Self::with_source(Box::new(ReaderSource(reader)))
    }

    /// Override the line-separator byte (default LF). Must be called before
    /// any bytes are consumed to give consistent line counts.
    pub fn set_separator(&mut self, separator: u8) {
        self.separator = separator;
    }

    /// Current absolute byte offset of the cursor.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 0-indexed count of separator bytes consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current lifecycle status.
    pub fn status(&self) -> IteratorStatus {
        self.status
    }

    /// True iff more bytes may still be produced, either already buffered
    /// ahead of the cursor or obtainable by refilling from the source.
    pub fn has_more(&mut self) -> bool {
        self.ensure_lookahead().unwrap_or(0) > 0 || self.pos < self.buffer.len()
    }

    /// Bytes available ahead of the cursor without a further refill.
    pub fn remaining(&mut self) -> usize {
        let _ = self.ensure_lookahead();
        self.buffer.len() - self.pos
    }

    /// Refill the buffer until at least `LOOKAHEAD` bytes are available
    /// ahead of the cursor, or the source is exhausted. Returns the number
    /// of bytes newly appended.
    fn ensure_lookahead(&mut self) -> io::Result<usize> {
        let mut appended = 0;
        while self.status != IteratorStatus::InputEnded
            && self.buffer.len() - self.pos < LOOKAHEAD
        {
            let before = self.buffer.len();
            let read = self.source.fill(&mut self.buffer)?;
            appended += read;
            log::trace!(
                "iterator refilled {} bytes (buffer now {} bytes, cursor at {})",
                self.buffer.len() - before,
                self.buffer.len(),
                self.pos
            );
            if read == 0 {
                self.status = IteratorStatus::InputEnded;
            } else if self.status == IteratorStatus::Init {
                self.status = IteratorStatus::Processing;
            }
        }
        Ok(appended)
    }

    /// Borrow up to `len` bytes starting at the cursor, without moving it.
    /// Returns fewer than `len` bytes only at end of input.
    pub fn peek(&mut self, len: usize) -> &[u8] {
        let _ = self.ensure_lookahead();
        let end = (self.pos + len).min(self.buffer.len());
        &self.buffer[self.pos..end]
    }

    /// Borrow every byte from the cursor to the end of the buffered input,
    /// refilling first. Used by regex-based recognition, which needs to see
    /// arbitrarily far ahead.
    pub fn peek_rest(&mut self) -> &[u8] {
        while self.status != IteratorStatus::InputEnded {
            if self.ensure_lookahead().unwrap_or(0) == 0 {
                break;
            }
        }
        &self.buffer[self.pos..]
    }

    /// Absolute seek. Always succeeds for any offset previously reached,
    /// since this implementation retains the whole input; offsets beyond
    /// the buffered tail trigger a refill first.
    pub fn move_to(&mut self, offset: usize) {
        if offset >= self.pos {
            self.advance_counting(offset - self.pos);
        } else {
            self.rewind_counting(self.pos - offset);
        }
    }

    /// Relative seek. Positive deltas advance (refilling as needed);
    /// negative deltas rewind. Returns `false` if the delta ran past the end
    /// of input (the cursor is clamped to the final offset in that case).
    pub fn move_delta(&mut self, delta: isize) -> bool {
        if delta >= 0 {
            self.advance_counting(delta as usize)
        } else {
            self.rewind_counting((-delta) as usize);
            true
        }
    }

    fn advance_counting(&mut self, delta: usize) -> bool {
        let _ = self.ensure_lookahead();
        let target = self.pos + delta;
        let clamped = target.min(self.buffer.len());
        self.count_separators(self.pos, clamped);
        self.pos = clamped;
        if clamped < target {
            self.status = IteratorStatus::Ended;
            false
        } else {
            true
        }
    }

    fn rewind_counting(&mut self, delta: usize) {
        let target = self.pos.saturating_sub(delta);
        self.uncount_separators(target, self.pos);
        self.pos = target;
        if self.status == IteratorStatus::Ended {
            self.status = IteratorStatus::InputEnded;
        }
    }

    fn count_separators(&mut self, from: usize, to: usize) {
        self.line += memchr::memchr_iter(self.separator, &self.buffer[from..to]).count();
    }

    fn uncount_separators(&mut self, from: usize, to: usize) {
        self.line -= memchr::memchr_iter(self.separator, &self.buffer[from..to]).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_and_rewind_round_trip() {
        let mut iter = Iterator::from_str("line one\nline two\nline three");
        assert_eq!(iter.pos(), 0);
        assert_eq!(iter.line(), 0);

        iter.move_to(9);
        assert_eq!(iter.line(), 1);

        iter.move_to(18);
        assert_eq!(iter.line(), 2);

        iter.move_to(0);
        assert_eq!(iter.line(), 0);
    }

    #[test]
    fn peek_does_not_move_cursor() {
        let mut iter = Iterator::from_str("abcdef");
        assert_eq!(iter.peek(3), b"abc");
        assert_eq!(iter.pos(), 0);
    }

    #[test]
    fn has_more_false_at_eof() {
        let mut iter = Iterator::from_str("ab");
        iter.move_to(2);
        assert!(!iter.has_more());
    }

    #[test]
    fn move_delta_negative_rewinds() {
        let mut iter = Iterator::from_str("abcdef");
        iter.move_to(4);
        assert!(iter.move_delta(-2));
        assert_eq!(iter.pos(), 2);
    }

    #[test]
    fn custom_separator_counts_correctly() {
        let mut iter = Iterator::from_str("a;b;c");
        iter.set_separator(b';');
        iter.move_to(5);
        assert_eq!(iter.line(), 2);
    }
}

//! Backing media for the bit engine.
//!
//! An engine binds to exactly one medium at construction: a pull source, a
//! push sink, or a growable in-memory buffer. The contracts are deliberately
//! narrow — one best-effort read per refill, one blocking write per drain,
//! indexed byte access for the buffer — and every medium supports
//! repositioning (non-seekable media are not modeled).

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::rc::Rc;

/// Pull side of a backing medium: best-effort reads plus repositioning.
///
/// Blanket-implemented for everything that is `Read + Seek`, e.g. `File` or
/// `io::Cursor`.
pub trait Source: Read + Seek {}
impl<T: Read + Seek> Source for T {}

/// Push side of a backing medium: blocking writes plus repositioning.
pub trait Sink: Write + Seek {}
impl<T: Write + Seek> Sink for T {}

/// A growable byte buffer that can back a bit engine.
///
/// The handle is cheaply cloneable; clones share the same storage, so a
/// caller can keep one while the engine works through another and inspect
/// the bytes afterwards. Not thread-safe, like the engine itself.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    data: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer seeded with existing bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            data: Rc::new(RefCell::new(bytes)),
        }
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Check whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Copy the contents out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    /// Take the contents, leaving the shared storage empty.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.data.borrow_mut())
    }

    /// Copy up to `out.len()` bytes starting at `pos`; returns bytes copied.
    pub(crate) fn read_at(&self, pos: usize, out: &mut [u8]) -> usize {
        let data = self.data.borrow();
        if pos >= data.len() {
            return 0;
        }
        let n = out.len().min(data.len() - pos);
        out[..n].copy_from_slice(&data[pos..pos + n]);
        n
    }

    /// Write `bytes` at `pos`, overwriting existing content and extending
    /// the buffer as needed. A gap between the current end and `pos` is
    /// zero-filled.
    pub(crate) fn write_at(&self, pos: usize, bytes: &[u8]) {
        let mut data = self.data.borrow_mut();
        if pos > data.len() {
            data.resize(pos, 0);
        }
        let overlap = bytes.len().min(data.len() - pos);
        data[pos..pos + overlap].copy_from_slice(&bytes[..overlap]);
        data.extend_from_slice(&bytes[overlap..]);
    }
}

impl From<Vec<u8>> for SharedBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for SharedBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

/// The backing medium an engine was constructed over.
///
/// Selected once at construction and immutable for the engine's lifetime.
/// The buffer arm carries its own byte cursor, tracked independently of the
/// engine's window.
pub(crate) enum Medium {
    /// Pull byte source.
    Source(Box<dyn Source>),
    /// Push byte sink.
    Sink(Box<dyn Sink>),
    /// Growable in-memory buffer plus byte cursor.
    Buffer { data: SharedBuffer, pos: usize },
}

impl Medium {
    /// One best-effort read: may deliver fewer bytes than requested, and
    /// delivers zero at end-of-data.
    pub(crate) fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match self {
            Medium::Source(source) => source.read(out),
            Medium::Sink(_) => Ok(0),
            Medium::Buffer { data, pos } => {
                let n = data.read_at(*pos, out);
                *pos += n;
                Ok(n)
            }
        }
    }

    /// One blocking write of the whole slice.
    pub(crate) fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Medium::Source(_) => Ok(()),
            Medium::Sink(sink) => sink.write_all(bytes),
            Medium::Buffer { data, pos } => {
                data.write_at(*pos, bytes);
                *pos += bytes.len();
                Ok(())
            }
        }
    }

    /// Flush any buffering below the medium (no-op for buffers).
    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            Medium::Sink(sink) => sink.flush(),
            _ => Ok(()),
        }
    }

    /// Reposition to an absolute byte offset.
    pub(crate) fn seek_to(&mut self, byte: u64) -> io::Result<()> {
        match self {
            Medium::Source(source) => source.seek(SeekFrom::Start(byte)).map(|_| ()),
            Medium::Sink(sink) => sink.seek(SeekFrom::Start(byte)).map(|_| ()),
            Medium::Buffer { pos, .. } => {
                *pos = byte as usize;
                Ok(())
            }
        }
    }

    /// Current absolute byte position.
    pub(crate) fn position(&mut self) -> io::Result<u64> {
        match self {
            Medium::Source(source) => source.stream_position(),
            Medium::Sink(sink) => sink.stream_position(),
            Medium::Buffer { pos, .. } => Ok(*pos as u64),
        }
    }
}

impl fmt::Debug for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Medium::Source(_) => f.write_str("Source"),
            Medium::Sink(_) => f.write_str("Sink"),
            Medium::Buffer { pos, .. } => f.debug_struct("Buffer").field("pos", pos).finish(),
        }
    }
}

//! Error codes for bitstream operations.
//!
//! The engine records the most recent error in a single slot instead of
//! returning `Result` from every accessor: generated parsers read fields
//! unconditionally and check for trouble at synchronization points. The slot
//! persists until another error overwrites it, [`clear_error`] is called, or
//! a `seek` resynchronizes the stream.
//!
//! End-of-data is recoverable at the caller's discretion; read, write, and
//! seek failures are fatal to the current call but leave the engine in a
//! well-defined state that a subsequent `seek` can resume from.
//!
//! [`clear_error`]: crate::Bitstream::clear_error

use thiserror::Error;

/// The condition recorded by the engine's last-error slot.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The backing medium has no more data.
    #[error("end of data")]
    EndOfData,

    /// An alignment width that is not a multiple of 8 was requested.
    #[error("invalid alignment")]
    InvalidAlignment,

    /// A read against the backing medium failed.
    #[error("read failed")]
    ReadFailed,

    /// A write against the backing medium failed.
    #[error("write failed")]
    WriteFailed,

    /// Repositioning the backing medium failed.
    #[error("seek failed")]
    SeekFailed,
}

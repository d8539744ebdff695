//! # OxiBits Core
//!
//! Bit-granular stream I/O for the OxiBits project.
//!
//! This crate is the runtime primitive beneath generated binary-format
//! parsers: it reads and writes integer, float, and Exp-Golomb values at
//! arbitrary widths from 1 to 64 bits against a byte-oriented medium,
//! hiding byte-boundary alignment from callers.
//!
//! - [`bitstream`]: the buffered bit engine and big-endian accessors
//! - [`little`]: the little-endian accessor mirror
//! - [`expgolomb`]: unsigned/signed Exp-Golomb variable-length codes
//! - [`seek`]: repositioning, byte alignment, and code search
//! - [`medium`]: the backing media (pull source, push sink, shared buffer)
//! - [`tables`]: precomputed bit-mask constants
//! - [`error`]: the stream error taxonomy
//! - [`report`]: the overridable syntax-error hook for parser layers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Generated parsers                                   │
//! │     field reads, syntax checks (external collaborator)  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Accessor sets (this crate)                          │
//! │     big/little endian, floats, Exp-Golomb, seek/align   │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Buffered bit engine (this crate)                    │
//! │     window refill/drain, bit cursor, error slot         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Backing medium                                      │
//! │     pull source, push sink, shared buffer               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxibits_core::{Bitstream, Mode, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! {
//!     let mut writer = Bitstream::memory(buffer.clone(), Mode::Output);
//!     writer.write_bits(0x5, 3);
//!     writer.write_exp_golomb(41, 32);
//!     writer.write_f32(2.5);
//! }
//!
//! let mut reader = Bitstream::memory(buffer, Mode::Input);
//! assert_eq!(reader.read_bits(3), 0x5);
//! assert_eq!(reader.read_exp_golomb(32), Some(41));
//! assert_eq!(reader.read_f32(), 2.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod expgolomb;
pub mod little;
pub mod medium;
pub mod report;
pub mod seek;
pub mod tables;

// Re-exports for convenience
pub use bitstream::{Bitstream, ByteOrder, DEFAULT_CAPACITY, Mode};
pub use error::StreamError;
pub use expgolomb::ExpGolomb;
pub use medium::{SharedBuffer, Sink, Source};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{Bitstream, ByteOrder, Mode};
    pub use crate::error::StreamError;
    pub use crate::expgolomb::ExpGolomb;
    pub use crate::medium::{SharedBuffer, Sink, Source};
}

//! Exp-Golomb variable-length codec.
//!
//! An unsigned Exp-Golomb code is `z` zero bits, a one bit, and `z` payload
//! bits; the decoded value is the big-endian value of the whole `2z + 1`
//! bits minus one. Signed values ride the unsigned codec through the
//! zig-zag mapping (0 ↔ 0, 1 ↔ +1, 2 ↔ −1, 3 ↔ +2, 4 ↔ −2, …).
//!
//! A probe returns the decoded value *and* the bit-width of the code as one
//! [`ExpGolomb`] result; the consuming calls advance by that width. Nothing
//! about a probe survives it, so any bitstream operation may safely occur
//! between a probe and a later read.
//!
//! # Example
//!
//! ```
//! use oxibits_core::{Bitstream, Mode, SharedBuffer};
//!
//! let buffer = SharedBuffer::new();
//! {
//!     let mut writer = Bitstream::memory(buffer.clone(), Mode::Output);
//!     for v in 0..8u64 {
//!         writer.write_exp_golomb(v, 32);
//!     }
//! }
//! let mut reader = Bitstream::memory(buffer, Mode::Input);
//! for v in 0..8u64 {
//!     assert_eq!(reader.read_exp_golomb(32), Some(v));
//! }
//! ```

use crate::bitstream::{Bitstream, Mode};
use crate::error::StreamError;
use crate::tables::MASK;

/// The result of probing one Exp-Golomb code: the decoded value and the
/// total bit-width (`2z + 1`) the code occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpGolomb {
    /// Decoded unsigned value.
    pub value: u64,
    /// Bits the code occupies in the stream.
    pub width: u32,
}

impl Bitstream {
    /// Count leading zero bits from the cursor, up to `maxz`, without
    /// advancing. `None` when no one-bit appears within the bound.
    fn count_zero_run(&mut self, maxz: u32) -> Option<u32> {
        if self.mode == Mode::Input
            && self.last_error != Some(StreamError::EndOfData)
            && self.cur_bit + maxz as usize > self.window_bits()
        {
            self.refill();
        }

        let available = self.window_bits().saturating_sub(self.cur_bit);
        let bound = (maxz as usize).min(available);
        for i in 0..bound {
            let bit = self.cur_bit + i;
            if self.window[bit >> 3] & (0x80 >> (bit & 7)) != 0 {
                return Some(i as u32);
            }
        }
        None
    }

    /// Probe one unsigned Exp-Golomb code without advancing.
    ///
    /// The zero-run scan is bounded by `n + 1` bits (capped at 64); `None`
    /// means no one-bit was found within the bound — a malformed or
    /// exhausted stream. When end-of-data truncates the payload, the probe
    /// yields value 0 with the declared width.
    pub fn peek_exp_golomb(&mut self, n: u32) -> Option<ExpGolomb> {
        let maxz = n.saturating_add(1).min(64);
        let z = self.count_zero_run(maxz)?;
        let width = 2 * z + 1;

        // Make sure the payload half of the code is buffered too. Only
        // refill when consumed bytes can actually be replaced; a code wider
        // than a tiny window decodes against the zeroed slack instead.
        if self.mode == Mode::Input
            && self.last_error != Some(StreamError::EndOfData)
            && self.cur_bit + width as usize > self.window_bits()
            && self.cur_bit >= 8
        {
            self.refill();
            if self.last_error == Some(StreamError::EndOfData)
                && self.cur_bit + width as usize > self.window_bits()
            {
                return Some(ExpGolomb { value: 0, width });
            }
        }

        // The z + 1 bits from the one-bit onward carry the whole numeric
        // value; the leading zeros contribute nothing.
        let value = self.extract(self.cur_bit + z as usize, z + 1) - 1;
        Some(ExpGolomb { value, width })
    }

    /// Probe one signed Exp-Golomb code without advancing.
    pub fn peek_exp_golomb_signed(&mut self, n: u32) -> Option<i64> {
        self.peek_exp_golomb(n).map(|eg| zigzag_decode(eg.value))
    }

    /// Read one unsigned Exp-Golomb code, advancing past it.
    pub fn read_exp_golomb(&mut self, n: u32) -> Option<u64> {
        let eg = self.peek_exp_golomb(n)?;
        self.skip_bits(u64::from(eg.width));
        Some(eg.value)
    }

    /// Read one signed Exp-Golomb code, advancing past it.
    pub fn read_exp_golomb_signed(&mut self, n: u32) -> Option<i64> {
        self.read_exp_golomb(n).map(zigzag_decode)
    }

    /// Write one unsigned Exp-Golomb code for the low `n` bits of `value`.
    ///
    /// Emits `M = floor(log2(v + 1))` zero bits followed by the `(M + 1)`-bit
    /// big-endian representation of `v + 1`. A zero-run beyond 63 bits is
    /// unrepresentable: the engine records [`StreamError::WriteFailed`] and
    /// emits nothing.
    pub fn write_exp_golomb(&mut self, value: u64, n: u32) {
        debug_assert!(self.mode == Mode::Output, "write on an input stream");
        let val = value & MASK[n as usize];
        if val == u64::MAX {
            // v + 1 would need 65 bits.
            self.set_error(StreamError::WriteFailed);
            return;
        }

        let m = (val + 1).ilog2();
        self.write_bits(0, m);
        self.write_bits(val + 1, m + 1);
    }

    /// Write one signed Exp-Golomb code.
    ///
    /// Maps through the zig-zag domain (0 → 0, +v → 2v − 1, −v → 2v) and
    /// delegates to the unsigned encoder.
    pub fn write_exp_golomb_signed(&mut self, value: i64, n: u32) {
        let mag = value.unsigned_abs();
        let Some(doubled) = mag.checked_mul(2) else {
            // i64::MIN maps past the unsigned domain.
            self.set_error(StreamError::WriteFailed);
            return;
        };
        let scaled = if value <= 0 { doubled + 1 } else { doubled };
        self.write_exp_golomb(scaled - 1, n);
    }
}

/// Zig-zag mapping from the unsigned code domain back to signed values:
/// odd magnitudes are positive, even are negative.
fn zigzag_decode(m: u64) -> i64 {
    let half = (m / 2 + m % 2) as i64;
    if m % 2 == 1 { half } else { -half }
}

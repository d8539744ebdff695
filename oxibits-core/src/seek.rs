//! Repositioning, byte alignment, and code-search operations.
//!
//! Seeking works in bit positions: the medium is repositioned to the
//! containing byte and the sub-byte offset lands in the window. Every
//! medium supports positioning, so `can_seek` is constantly true.

use crate::bitstream::{Bitstream, ByteOrder, Mode};
use crate::error::StreamError;

impl Bitstream {
    /// Positioning is always supported; non-seekable media are not modeled.
    pub fn can_seek(&self) -> bool {
        true
    }

    /// Reposition the stream to an absolute bit position.
    ///
    /// Clears the end flag and the last-error slot, so a seek can
    /// resynchronize after a failure. Input engines discard and refresh the
    /// whole window from the new position; a zero-length read there is an
    /// immediate end-of-data. Output engines flush pending bits
    /// (zero-padded) before the sink moves.
    pub fn seek(&mut self, bit_pos: u64) {
        self.at_end = false;
        self.last_error = None;

        let byte = bit_pos >> 3;
        let sub = (bit_pos & 7) as usize;

        match self.mode {
            Mode::Input => {
                if self.medium.seek_to(byte).is_err() {
                    self.set_error(StreamError::SeekFailed);
                    return;
                }

                self.window.fill(0);
                self.window_len = self.capacity;
                let got = self.medium.read(&mut self.window[..self.capacity]);
                match got {
                    Ok(0) => {
                        self.at_end = true;
                        self.set_error(StreamError::EndOfData);
                        self.window_len = 0;
                        self.cur_bit = sub;
                    }
                    Ok(n) => {
                        if n < self.capacity {
                            self.at_end = true;
                            self.window_len = n;
                        }
                        self.cur_bit = sub;
                    }
                    Err(_) => {
                        self.at_end = true;
                        self.set_error(StreamError::ReadFailed);
                        self.window_len = 0;
                    }
                }
            }
            Mode::Output => {
                self.flush();
                self.window.fill(0);
                if self.medium.seek_to(byte).is_err() {
                    self.set_error(StreamError::SeekFailed);
                    return;
                }
                self.cur_bit = sub;
            }
        }
    }

    /// Current stream position in bits: the medium byte position adjusted by
    /// the unconsumed (input) or pending (output) portion of the window.
    pub fn tell(&mut self) -> u64 {
        let pos = match self.medium.position() {
            Ok(p) => p,
            Err(_) => {
                self.set_error(StreamError::SeekFailed);
                return 0;
            }
        };
        match self.mode {
            Mode::Input => {
                (pos * 8 + self.cur_bit as u64).saturating_sub(self.window_bits() as u64)
            }
            Mode::Output => pos * 8 + self.cur_bit as u64,
        }
    }

    /// Advance `n` bits producing no value.
    ///
    /// Crossing a window boundary refills (input) or drains (output) exactly
    /// as reads and writes would. Once an input stream is exhausted the
    /// cursor parks at the valid-window end.
    pub fn skip_bits(&mut self, n: u64) {
        self.total_bits += n;
        let mut left = n as usize;
        loop {
            let limit = match self.mode {
                Mode::Input => self.window_bits(),
                Mode::Output => self.capacity * 8,
            };
            if self.cur_bit + left <= limit {
                self.cur_bit += left;
                return;
            }
            match self.mode {
                Mode::Output => {
                    left -= limit - self.cur_bit;
                    self.cur_bit = limit;
                    self.drain();
                }
                Mode::Input => {
                    if self.at_end {
                        self.cur_bit = limit;
                        return;
                    }
                    left -= limit - self.cur_bit;
                    self.cur_bit = limit;
                    self.refill();
                }
            }
        }
    }

    /// Skip to an `n`-bit boundary of the cumulative bit count; returns the
    /// bits skipped.
    ///
    /// `n` must be a multiple of 8 (0 is a no-op), otherwise
    /// [`StreamError::InvalidAlignment`] is recorded and nothing moves.
    pub fn align(&mut self, n: u32) -> u32 {
        if n % 8 != 0 {
            self.set_error(StreamError::InvalidAlignment);
            return 0;
        }
        if n == 0 {
            return 0;
        }

        let mut skipped = 0;
        let partial = (self.total_bits % 8) as u32;
        if partial != 0 {
            skipped += 8 - partial;
            self.skip_bits(u64::from(8 - partial));
        }
        while self.total_bits % u64::from(n) != 0 {
            skipped += 8;
            self.skip_bits(8);
        }
        skipped
    }

    /// Probe the next `n` bits at an `align_width`-bit boundary.
    ///
    /// Aligns first when `align_width > 0`. Input engines peek with the
    /// requested byte order; a signed probe returns the sign-extended
    /// two's-complement bit pattern. Output engines return 0 (the stream is
    /// aligned either way).
    pub fn probe(&mut self, n: u32, order: ByteOrder, signed: bool, align_width: u32) -> u64 {
        if align_width > 0 {
            self.align(align_width);
        }
        if self.mode != Mode::Input {
            return 0;
        }
        match (order, signed) {
            (ByteOrder::Big, false) => self.peek_bits(n),
            (ByteOrder::Big, true) => self.peek_signed(n) as u64,
            (ByteOrder::Little, false) => self.peek_bits_le(n),
            (ByteOrder::Little, true) => self.peek_signed_le(n) as u64,
        }
    }

    /// Search forward for an `n`-bit code; returns the bits skipped,
    /// excluding the code itself, which stays unconsumed.
    ///
    /// With `align_width == 0` the scan advances one bit at a time; otherwise
    /// it aligns first and advances in `align_width`-bit steps. The loop
    /// stops on a match or on a recorded error (end-of-data included).
    /// Output engines only perform the alignment and return its bit count.
    pub fn search_code(&mut self, code: u64, n: u32, align_width: u32) -> u64 {
        let mut skipped = 0u64;
        match self.mode {
            Mode::Input => {
                if align_width == 0 {
                    while self.peek_bits(n) != code {
                        if self.last_error.is_some() {
                            break;
                        }
                        skipped += 1;
                        self.skip_bits(1);
                    }
                } else {
                    skipped += u64::from(self.align(align_width));
                    while self.peek_bits(n) != code {
                        if self.last_error.is_some() {
                            break;
                        }
                        skipped += u64::from(align_width);
                        self.skip_bits(u64::from(align_width));
                    }
                }
            }
            Mode::Output => {
                skipped += u64::from(self.align(align_width));
            }
        }
        skipped
    }
}

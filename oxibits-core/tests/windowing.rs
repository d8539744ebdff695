//! Window-boundary behavior: the same byte sequence must decode
//! identically no matter how small the internal window is, and end-of-data
//! must degrade into defined zero-valued reads.

use oxibits_core::{Bitstream, Mode, SharedBuffer, StreamError};
use std::io::{Cursor, Seek, SeekFrom, Write};

const CAPACITIES: [usize; 4] = [9, 16, 64, 1024];

fn test_vector() -> Vec<u8> {
    let mut seed: u64 = 0xDEAD_BEEF_CAFE_F00D;
    (0..3000)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

#[test]
fn test_reads_identical_across_capacities() {
    let data = test_vector();
    let mut reference = Bitstream::memory(SharedBuffer::from_vec(data.clone()), Mode::Input);
    let mut others: Vec<Bitstream> = CAPACITIES[..3]
        .iter()
        .map(|&cap| {
            Bitstream::memory_with_capacity(SharedBuffer::from_vec(data.clone()), Mode::Input, cap)
        })
        .collect();

    // Width schedule exercises every crossing phase.
    let widths = [1u32, 7, 8, 9, 13, 17, 24, 31, 32, 33, 40, 48, 57, 64];
    for round in 0..40 {
        let n = widths[round % widths.len()];
        let expected = reference.read_bits(n);
        for bs in &mut others {
            assert_eq!(bs.read_bits(n), expected, "width {} round {}", n, round);
        }
        let expected_le = reference.read_bits_le(n);
        for bs in &mut others {
            assert_eq!(bs.read_bits_le(n), expected_le, "le width {} round {}", n, round);
        }
    }
}

#[test]
fn test_straddling_read_at_refill_edge() {
    // Position the cursor so a 40-bit read begins with only 3 bytes left in
    // the window, for each capacity.
    let data = test_vector();
    for &cap in &CAPACITIES {
        let mut bs =
            Bitstream::memory_with_capacity(SharedBuffer::from_vec(data.clone()), Mode::Input, cap);
        let lead_bits = (cap - 3) * 8;
        bs.skip_bits(lead_bits as u64);
        let straddling = bs.read_bits(40);

        let mut direct = Bitstream::memory(SharedBuffer::from_vec(data.clone()), Mode::Input);
        direct.skip_bits(lead_bits as u64);
        assert_eq!(straddling, direct.read_bits(40), "capacity {}", cap);
    }
}

#[test]
fn test_exp_golomb_identical_across_capacities() {
    let buffer = SharedBuffer::new();
    {
        let mut bs = Bitstream::memory(buffer.clone(), Mode::Output);
        for v in 0..500u64 {
            bs.write_exp_golomb(v * v + 3, 64);
            bs.write_exp_golomb_signed(-(v as i64), 64);
        }
    }
    let data = buffer.to_vec();
    for &cap in &CAPACITIES {
        let mut bs =
            Bitstream::memory_with_capacity(SharedBuffer::from_vec(data.clone()), Mode::Input, cap);
        for v in 0..500u64 {
            assert_eq!(bs.read_exp_golomb(64), Some(v * v + 3), "capacity {}", cap);
            assert_eq!(bs.read_exp_golomb_signed(64), Some(-(v as i64)));
        }
    }
}

#[test]
fn test_writes_identical_across_capacities() {
    let widths = [3u32, 11, 8, 64, 1, 27, 40, 16, 5, 63];
    let mut outputs: Vec<Vec<u8>> = Vec::new();
    for &cap in &CAPACITIES {
        let buffer = SharedBuffer::new();
        {
            let mut bs = Bitstream::memory_with_capacity(buffer.clone(), Mode::Output, cap);
            let mut seed = 7u64;
            for round in 0..200 {
                let n = widths[round % widths.len()];
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                bs.write_bits(seed, n);
            }
        }
        outputs.push(buffer.to_vec());
    }
    for pair in outputs.windows(2) {
        assert_eq!(pair[0], pair[1]);
    }
}

#[test]
fn test_drain_at_every_sub_byte_offset() {
    // A field written right at the drain edge must come out byte-identical
    // for every starting phase.
    for phase in 0..8u32 {
        for &cap in &CAPACITIES[..3] {
            let buffer = SharedBuffer::new();
            {
                let mut bs = Bitstream::memory_with_capacity(buffer.clone(), Mode::Output, cap);
                // Fill up to one byte short of capacity, then offset by `phase`.
                for _ in 0..cap - 1 {
                    bs.write_bits(0xA5, 8);
                }
                bs.write_bits(0x7F, phase.max(1));
                bs.write_bits(0x0123_4567_89AB_CDEF, 64);
            }
            let mut bs = Bitstream::memory(buffer, Mode::Input);
            bs.skip_bits(((cap - 1) * 8) as u64 + u64::from(phase.max(1)));
            assert_eq!(
                bs.read_bits(64),
                0x0123_4567_89AB_CDEF,
                "capacity {} phase {}",
                cap,
                phase
            );
        }
    }
}

#[test]
fn test_end_of_data_reporting() {
    let mut bs = Bitstream::memory(SharedBuffer::from_vec(vec![0xFF, 0xFF]), Mode::Input);
    assert_eq!(bs.read_bits(16), 0xFFFF);
    assert!(bs.last_error().is_none());

    // The read past the last bit raises end-of-data and reports eof.
    assert_eq!(bs.read_bits(8), 0);
    assert!(bs.at_end());
    assert!(bs.eof());
    assert_eq!(bs.last_error(), Some(StreamError::EndOfData));

    // Further reads stay zero-valued, for every accessor family.
    assert_eq!(bs.read_bits(64), 0);
    assert_eq!(bs.read_bits_le(32), 0);
    assert_eq!(bs.read_signed(16), 0);
    assert_eq!(bs.read_f64().to_bits(), 0);
    assert_eq!(bs.read_exp_golomb(8), None);
}

/// A cloneable sink over shared bytes, so the test can inspect what the
/// engine wrote after dropping it.
#[derive(Clone, Default)]
struct VecSink(std::rc::Rc<std::cell::RefCell<Cursor<Vec<u8>>>>);

impl Write for VecSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

impl Seek for VecSink {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.0.borrow_mut().seek(pos)
    }
}

#[test]
fn test_source_and_sink_media_match_memory() {
    // The same operations against a Cursor-backed sink and a SharedBuffer
    // must produce identical bytes.
    let sink = VecSink::default();
    {
        let mut bs = Bitstream::output_with_capacity(sink.clone(), 16);
        bs.write_bits(0b110, 3);
        bs.write_exp_golomb(99, 32);
        bs.write_f32(0.5);
        bs.write_bits(0xFFFF_FFFF, 32);
    }
    let sink_bytes = sink.0.borrow().get_ref().clone();

    let buffer = SharedBuffer::new();
    {
        let mut bs = Bitstream::memory_with_capacity(buffer.clone(), Mode::Output, 16);
        bs.write_bits(0b110, 3);
        bs.write_exp_golomb(99, 32);
        bs.write_f32(0.5);
        bs.write_bits(0xFFFF_FFFF, 32);
    }
    assert_eq!(sink_bytes, buffer.to_vec());

    // And a Cursor-backed source reads them back like the memory engine.
    let mut src = Bitstream::input_with_capacity(Cursor::new(sink_bytes), 16);
    assert_eq!(src.read_bits(3), 0b110);
    assert_eq!(src.read_exp_golomb(32), Some(99));
    assert_eq!(src.read_f32(), 0.5);
    assert_eq!(src.read_bits(32), 0xFFFF_FFFF);
}

#[test]
fn test_write_two_positions_seek_back_reread() {
    let buffer = SharedBuffer::new();
    {
        let mut bs = Bitstream::memory(buffer.clone(), Mode::Output);
        bs.write_bits(0xCAFE, 16);
        bs.seek(64);
        bs.write_bits(0xBEEF, 16);
    }
    let mut bs = Bitstream::memory(buffer, Mode::Input);
    assert_eq!(bs.read_bits(16), 0xCAFE);
    bs.seek(64);
    assert_eq!(bs.tell(), 64);
    assert_eq!(bs.read_bits(16), 0xBEEF);
    bs.seek(0);
    assert_eq!(bs.tell(), 0);
    assert_eq!(bs.read_bits(16), 0xCAFE);
}

#[test]
fn test_tell_tracks_positions_on_cursor_media() {
    let data = test_vector();
    let mut bs = Bitstream::input_with_capacity(Cursor::new(data), 64);
    assert_eq!(bs.tell(), 0);
    bs.read_bits(13);
    assert_eq!(bs.tell(), 13);
    bs.skip_bits(1000);
    assert_eq!(bs.tell(), 1013);
    bs.seek(777);
    assert_eq!(bs.tell(), 777);

    let mut out = Bitstream::output(Cursor::new(Vec::new()));
    out.write_bits(0x3, 5);
    assert_eq!(out.tell(), 5);
    out.write_bits(0, 59);
    assert_eq!(out.tell(), 64);
}

//! Bitstream integration tests across the shipped byte stream back-ends.

use oxibits_core::{
    AccessMode, Bitstream, ByteOrder, ByteStream, MemoryByteStream, OxiBitsError,
    ReaderByteStream, WriterByteStream,
};
use std::io::Cursor;

/// Simple PRNG for reproducible field widths and values.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }
}

fn mask(n: usize) -> u64 {
    if n == 64 { u64::MAX } else { (1u64 << n) - 1 }
}

fn random_fields(count: usize, seed: u64) -> Vec<(usize, u64)> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|_| {
            let n = (rng.next() % 65) as usize;
            (n, rng.next() & mask(n))
        })
        .collect()
}

#[test]
fn test_mixed_width_roundtrip_memory() {
    let fields = random_fields(500, 0x1234_5678);
    let total: u64 = fields.iter().map(|&(n, _)| n as u64).sum();

    let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
    for &(n, value) in &fields {
        bits.write_bits64(n, value).unwrap();
    }
    assert_eq!(bits.position(), total);

    bits.set_immutable().unwrap();
    for (i, &(n, value)) in fields.iter().enumerate() {
        assert_eq!(bits.read_bits64(n).unwrap(), value, "field {i} ({n} bits)");
    }
    assert_eq!(bits.position(), total);
}

#[test]
fn test_writer_then_reader_streams() {
    let fields = random_fields(200, 42);

    let sink = WriterByteStream::new(Vec::new()).with_byte_order(ByteOrder::Big);
    let mut bits = Bitstream::new(sink, AccessMode::Write).unwrap();
    for &(n, value) in &fields {
        bits.write_bits64(n, value).unwrap();
    }
    bits.write_u32(0xCAFE_BABE).unwrap();
    let bytes = bits.into_inner().unwrap().into_inner();

    let source = ReaderByteStream::new(Cursor::new(bytes)).with_byte_order(ByteOrder::Big);
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();
    for &(n, value) in &fields {
        assert_eq!(bits.read_bits64(n).unwrap(), value);
    }
    assert_eq!(bits.read_u32().unwrap(), 0xCAFE_BABE);
}

#[test]
fn test_writer_stream_rejects_read_access() {
    let sink = WriterByteStream::new(Vec::new());
    assert!(matches!(
        Bitstream::new(sink, AccessMode::Read),
        Err(OxiBitsError::IllegalArgument { .. })
    ));
}

#[test]
fn test_mark_over_forward_only_stream() {
    let data: Vec<u8> = (0..=255u8).collect();
    let source = ReaderByteStream::new(Cursor::new(data));
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();

    bits.skip(3).unwrap();
    bits.set_mark(32).unwrap();
    let ahead: Vec<u64> = (0..10).map(|_| bits.read_bits64(17).unwrap()).collect();
    let after = bits.position();

    bits.seek_mark().unwrap();
    assert_eq!(bits.position(), 3);
    for &value in &ahead {
        assert_eq!(bits.read_bits64(17).unwrap(), value);
    }
    assert_eq!(bits.position(), after);
}

#[test]
fn test_backward_seek_needs_rewindable_stream() {
    let source = ReaderByteStream::new(Cursor::new(vec![0u8; 64]));
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();
    bits.skip(100).unwrap();
    assert!(matches!(
        bits.seek(10),
        Err(OxiBitsError::SeekFailed { target: 0 })
    ));
}

#[test]
fn test_failed_backward_seek_keeps_position() {
    let data: Vec<u8> = (0..64u8).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
    let source = ReaderByteStream::new(Cursor::new(data.clone()));
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();
    assert_eq!(bits.read_bits64(5).unwrap(), (data[0] & 0x1F) as u64);

    assert!(matches!(
        bits.seek(2),
        Err(OxiBitsError::SeekFailed { target: 0 })
    ));
    assert_eq!(bits.position(), 5);
    assert_eq!(bits.read_bits64(3).unwrap(), (data[0] >> 5) as u64);
    assert_eq!(bits.read_u8().unwrap(), data[1]);
}

#[test]
fn test_backward_seek_to_mid_stream_mark() {
    let data: Vec<u8> = (0..64u8).collect();
    let source = ReaderByteStream::new(Cursor::new(data.clone()));
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();
    bits.skip(80).unwrap();
    bits.set_mark(32).unwrap();
    bits.skip(120).unwrap();

    assert_eq!(bits.seek(96).unwrap(), 96);
    assert_eq!(bits.read_u8().unwrap(), data[12]);
    // Before the mark there is nothing to replay.
    assert!(matches!(
        bits.seek(8),
        Err(OxiBitsError::SeekFailed { target: 0 })
    ));
    assert_eq!(bits.position(), 104);
}

#[test]
fn test_backward_seek_within_mark_at_start() {
    let data: Vec<u8> = (0..64u8).collect();
    let source = ReaderByteStream::new(Cursor::new(data.clone()));
    let mut bits = Bitstream::new(source, AccessMode::Read).unwrap();
    bits.set_mark(64).unwrap();
    bits.skip(300).unwrap();

    assert_eq!(bits.seek(16).unwrap(), 16);
    assert_eq!(bits.read_u8().unwrap(), data[2]);
}

#[test]
fn test_skip_over_large_distance() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    let mut bits = Bitstream::new(MemoryByteStream::from_vec(data.clone()), AccessMode::Read)
        .unwrap();
    bits.read_bits64(7).unwrap();
    let skipped = bits.skip(8 * 3000 + 1).unwrap();
    assert_eq!(skipped, 8 * 3000 + 1);
    assert_eq!(bits.position(), 8 * 3001);
    assert_eq!(bits.read_u8().unwrap(), data[3001]);
}

#[test]
fn test_boxed_dyn_stream() {
    let stream: Box<dyn ByteStream> = Box::new(MemoryByteStream::new());
    let mut bits = Bitstream::new(stream, AccessMode::Write).unwrap();
    bits.write_u16(0x0102).unwrap();
    bits.write_bits64(12, 0xABC).unwrap();
    bits.set_access(AccessMode::Read).unwrap();
    assert_eq!(bits.read_u16().unwrap(), 0x0102);
    assert_eq!(bits.read_bits64(12).unwrap(), 0xABC);
}

#[test]
fn test_mode_switch_restarts_position() {
    let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
    bits.write_u32(0x1122_3344).unwrap();
    assert_eq!(bits.position(), 32);
    bits.set_access(AccessMode::Read).unwrap();
    assert_eq!(bits.position(), 0);
    bits.set_access(AccessMode::Write).unwrap();
    assert_eq!(bits.position(), 0);
    bits.write_u8(0xFF).unwrap();
    let stream = bits.into_inner().unwrap();
    assert_eq!(stream.as_slice()[0], 0xFF);
    assert_eq!(stream.len(), 4);
}

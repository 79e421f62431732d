//! Performance benchmarks for Bitstream
//!
//! This benchmark suite evaluates:
//! - Single-bit writes and reads
//! - Bit field writes and reads across common widths
//! - Typed (u32) fast path vs unaligned path
//! - Forward skips

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxibits_core::{AccessMode, Bitstream, MemoryByteStream};
use std::hint::black_box;

/// Number of bits moved per iteration.
const BITS: u64 = 1 << 20;

fn written_stream(width: usize) -> Vec<u8> {
    let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..BITS / width as u64 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        bits.write_bits64(width, seed).unwrap();
    }
    bits.into_inner().unwrap().into_inner()
}

fn bench_single_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_bits");
    group.throughput(Throughput::Bytes(BITS / 8));

    group.bench_function("write_bit", |b| {
        b.iter(|| {
            let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
            for i in 0..BITS {
                bits.write_bit(black_box(i & 1 == 1)).unwrap();
            }
            bits.flush().unwrap();
        })
    });

    let data = written_stream(1);
    group.bench_function("read_bit", |b| {
        b.iter(|| {
            let stream = MemoryByteStream::from_vec(data.clone());
            let mut bits = Bitstream::new(stream, AccessMode::Read).unwrap();
            for _ in 0..BITS {
                black_box(bits.read_bit().unwrap());
            }
        })
    });

    group.finish();
}

fn bench_bit_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_fields");
    group.throughput(Throughput::Bytes(BITS / 8));

    for width in [3usize, 13, 32, 57, 64] {
        group.bench_with_input(BenchmarkId::new("write", width), &width, |b, &width| {
            b.iter(|| {
                let mut bits =
                    Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
                for i in 0..BITS / width as u64 {
                    bits.write_bits64(width, black_box(i)).unwrap();
                }
                bits.flush().unwrap();
            })
        });

        let data = written_stream(width);
        group.bench_with_input(BenchmarkId::new("read", width), &width, |b, &width| {
            b.iter(|| {
                let stream = MemoryByteStream::from_vec(data.clone());
                let mut bits = Bitstream::new(stream, AccessMode::Read).unwrap();
                for _ in 0..BITS / width as u64 {
                    black_box(bits.read_bits64(width).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("typed_u32");
    group.throughput(Throughput::Bytes(BITS / 8));

    for offset in [0usize, 3] {
        let label = if offset == 0 { "aligned" } else { "unaligned" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let mut bits =
                    Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
                bits.write_bits64(offset, 0).unwrap();
                for i in 0..BITS / 32 {
                    bits.write_u32(black_box(i as u32)).unwrap();
                }
                bits.flush().unwrap();
            })
        });
    }

    group.finish();
}

fn bench_skip(c: &mut Criterion) {
    let data = written_stream(64);
    c.bench_function("skip_forward", |b| {
        b.iter(|| {
            let stream = MemoryByteStream::from_vec(data.clone());
            let mut bits = Bitstream::new(stream, AccessMode::Read).unwrap();
            while bits.skip(black_box(1000)).unwrap() == 1000 {}
        })
    });
}

criterion_group!(
    benches,
    bench_single_bits,
    bench_bit_fields,
    bench_typed,
    bench_skip
);
criterion_main!(benches);

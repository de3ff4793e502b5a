//! Benchmarks for flagchunk.
//!
//! Run with:
//!     cargo bench

use bytes::Bytes;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use flagchunk::{ChunkConfig, ChunkError, Chunker};

/// Text-like data with a newline roughly every 80 bytes.
fn lines(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| if i % 81 == 80 { b'\n' } else { b'a' + (i % 26) as u8 })
        .collect()
}

fn bench_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunker");

    for size in [64 * 1024, 1024 * 1024, 10 * 1024 * 1024] {
        let data = Bytes::from(lines(size));
        let chunker = Chunker::new(ChunkConfig::new("\n").unwrap()).unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            format!("lines_{}kb", size / 1024),
            &data,
            |b, data| {
                b.iter(|| {
                    let chunks = chunker.chunk_bytes(black_box(data.clone()));
                    black_box(chunks.len())
                });
            },
        );

        // No pattern at all: only size cuts
        let zeros = Bytes::from(vec![0u8; size]);
        group.bench_with_input(format!("zeros_{}kb", size / 1024), &zeros, |b, data| {
            b.iter(|| {
                let chunks = chunker.chunk_bytes(black_box(data.clone()));
                black_box(chunks.len())
            });
        });
    }

    group.finish();
}

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");
    let size = 1024 * 1024;
    let data = Bytes::from(lines(size));
    group.throughput(Throughput::Bytes(size as u64));

    for pattern in ["\n", "xyz", "\nabcdefgh"] {
        let chunker = Chunker::new(ChunkConfig::new(pattern).unwrap()).unwrap();
        group.bench_function(format!("pattern_len_{}", pattern.len()), |b| {
            b.iter(|| {
                let chunks = chunker.chunk_bytes(black_box(data.clone()));
                black_box(chunks.len())
            });
        });
    }

    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");
    let size = 1024 * 1024;
    let data = lines(size);
    let chunker = Chunker::new(ChunkConfig::new("\n").unwrap()).unwrap();

    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("reader", |b| {
        b.iter(|| {
            let cursor = std::io::Cursor::new(black_box(&data));
            let mut count = 0;
            for chunk in chunker.chunk_reader(cursor) {
                let _ = chunk.unwrap();
                count += 1;
            }
            black_box(count)
        });
    });

    // Tiny reads stress cross-segment search
    group.bench_function("reads_of_7_bytes", |b| {
        b.iter(|| {
            let source = data
                .chunks(7)
                .map(|piece| Ok::<_, ChunkError>(Bytes::copy_from_slice(piece)));
            black_box(chunker.chunk(source).count())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chunker, bench_patterns, bench_streaming);
criterion_main!(benches);

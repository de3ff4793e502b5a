#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use flagchunk::{ChunkConfig, ChunkError, Chunker};

fuzz_target!(|input: (Vec<u8>, Vec<u8>, u8)| {
    let (data, cuts, chunk_size) = input;
    let chunk_size = usize::from(chunk_size).max(1);

    // First bytes of `cuts` choose read sizes; the rest is the pattern
    let (sizes, pattern) = cuts.split_at(cuts.len() / 2);
    let Ok(config) = ChunkConfig::new(pattern) else {
        return;
    };
    let chunker = Chunker::new(config.with_chunk_size(chunk_size)).unwrap();

    let mut reads = Vec::new();
    let mut rest = &data[..];
    for &size in sizes {
        let n = usize::from(size).min(rest.len());
        reads.push(Ok::<_, ChunkError>(Bytes::copy_from_slice(&rest[..n])));
        rest = &rest[n..];
    }
    reads.push(Ok(Bytes::copy_from_slice(rest)));

    let chunks: Vec<_> = chunker
        .chunk(reads)
        .collect::<Result<_, _>>()
        .unwrap();

    // Verify: output reproduces input regardless of read sizes
    let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
    assert_eq!(joined, data);

    for chunk in &chunks {
        if chunk.is_boundary() {
            assert_eq!(&chunk.data[..], pattern);
        } else {
            assert!(chunk.len() <= chunk_size);
        }
    }
});

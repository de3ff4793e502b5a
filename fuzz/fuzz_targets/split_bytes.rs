#![no_main]

use libfuzzer_sys::fuzz_target;
use flagchunk::{ChunkConfig, Chunker};

fuzz_target!(|data: Vec<u8>| {
    // Test with various pattern / size configurations
    let configs = vec![
        // Single byte, tiny chunks
        ChunkConfig::new(b"\n").unwrap().with_chunk_size(1),
        // Multi byte, small chunks
        ChunkConfig::new(b"\r\n").unwrap().with_chunk_size(16),
        // Long pattern, medium chunks
        ChunkConfig::new(b"\x00\x00\x00\x00").unwrap().with_chunk_size(1024),
        // Default size
        ChunkConfig::new(b" ").unwrap(),
    ];

    for config in configs {
        let chunker = Chunker::new(config.clone()).unwrap();
        let chunks = chunker.chunk_bytes(data.clone());

        // Verify: boundary chunks are the pattern, data chunks within cap
        for chunk in &chunks {
            if chunk.is_boundary() {
                assert_eq!(&chunk.data[..], config.pattern().as_bytes());
            } else {
                assert!(chunk.len() <= config.chunk_size());
            }
        }

        // Verify: output reproduces input
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(joined, data);

        // Verify: offsets are correct
        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            expected_offset += chunk.len() as u64;
        }

        // Verify: determinism - same input produces same chunks
        let chunks2 = chunker.chunk_bytes(data.clone());
        assert_eq!(chunks, chunks2);
    }
});

//! Splits a short text on spaces with the synchronous API.
//!
//! Run with:
//!     RUST_LOG=flagchunk=trace cargo run --example split_words

use bytes::Bytes;
use flagchunk::{ChunkConfig, ChunkError, Chunker};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let chunker = Chunker::new(ChunkConfig::new(" ")?)?;

    // The same text, delivered the way a file reader might hand it over
    let reads = ["Hello", " ", "world", " and good", "bye"];
    let source = reads
        .iter()
        .map(|s| Ok::<_, ChunkError>(Bytes::from_static(s.as_bytes())));

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    for chunk in chunker.chunk(source) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {:>2}: {:<8} offset={:>3}, len={:>3}, {:?}",
            total_chunks,
            chunk.kind,
            chunk.offset,
            chunk.len(),
            String::from_utf8_lossy(&chunk.data)
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    Ok(())
}

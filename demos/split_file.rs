//! Async chunking of a file read through tokio.
//!
//! Splits the given file (or this demo's own source) on newlines with a
//! 4 KiB size cap.
//!
//! Run with:
//!     cargo run --example split_file -- path/to/file

use flagchunk::{ChunkConfig, chunk_async};
use futures_util::StreamExt;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| file!().to_string());
    let file = tokio::fs::File::open(&path).await?;

    let config = ChunkConfig::new("\n")?.with_chunk_size(4 * 1024);
    let mut stream = chunk_async(file.compat(), config)?;

    let mut lines = 0;
    let mut data_chunks = 0;
    let mut total_bytes = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total_bytes += chunk.len();
        if chunk.is_boundary() {
            lines += 1;
        } else {
            data_chunks += 1;
        }
    }

    println!("{}: {} bytes", path, total_bytes);
    println!("  {} newline boundaries, {} data chunks", lines, data_chunks);
    Ok(())
}

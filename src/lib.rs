//! flagchunk
//!
//! Streaming boundary-pattern chunking for Rust.
//!
//! `flagchunk` transforms a byte stream into a sequence of chunks, splitting
//! at the earlier of a fixed boundary pattern or a maximum chunk size. Each
//! occurrence of the pattern is emitted as its own chunk, tagged
//! [`ChunkKind::Boundary`], so a downstream importer can build one node per
//! delimited record.
//!
//! The crate intentionally:
//! - does NOT compute content identifiers or hashes
//! - does NOT manage files or paths
//! - does NOT persist chunks
//! - does NOT spawn tasks or threads
//!
//! It only does one thing: **Read buffers → yield data and boundary chunks**
//!
//! Concatenating every emitted chunk, in order, reproduces the input exactly.
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use flagchunk::{Chunker, ChunkConfig, ChunkError};
//!
//! fn main() -> Result<(), ChunkError> {
//!     let file = File::open("records.txt")?;
//!     let chunker = Chunker::new(ChunkConfig::new("\n")?)?;
//!
//!     for chunk in chunker.chunk_reader(file) {
//!         let chunk = chunk?;
//!         println!("{} chunk, {} bytes", chunk.kind, chunk.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use flagchunk::{chunk_stream, ChunkConfig};
//!
//! async fn demo<S>(source: S) -> Result<(), std::io::Error>
//! where
//!     S: futures_core::Stream<Item = Result<bytes::Bytes, std::io::Error>> + Unpin,
//! {
//!     let config = ChunkConfig::new(" ").expect("non-empty pattern");
//!     let mut stream = chunk_stream(source, config).expect("valid config");
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;

mod buffer; // internal segmented accumulator

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::{Chunk, ChunkKind};
pub use chunker::{ChunkIter, Chunker, READ_BUFFER_SIZE, ReadSource, Splitter};
pub use config::{BoundaryPattern, ChunkConfig, DEFAULT_CHUNK_SIZE};
pub use error::ChunkError;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, ReaderStream, chunk_async, chunk_stream};

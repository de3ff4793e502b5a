//! Chunking engine and synchronous drivers.
//!
//! - [`Splitter`] - Stateful boundary-pattern engine with `push()`/`next_chunk()` API
//! - [`Chunker`] - Configured entry point that binds the engine to a source
//! - [`ChunkIter`] - Iterator that yields chunks from a buffer source
//! - [`ReadSource`] - Adapts a [`std::io::Read`] into a buffer source

mod engine;
mod iter;

pub use engine::Splitter;
pub use iter::{ChunkIter, Chunker, READ_BUFFER_SIZE, ReadSource};

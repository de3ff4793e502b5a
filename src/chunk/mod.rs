//! Chunk types.
//!
//! - [`Chunk`] - One unit of chunker output with data and offset
//! - [`ChunkKind`] - Whether a chunk is data or a boundary pattern

mod data;

pub use data::{Chunk, ChunkKind};

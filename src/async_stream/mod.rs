//! Async streaming support for chunking.
//!
//! This module provides asynchronous chunking over `futures-core` streams of
//! buffers and `futures-io::AsyncRead` readers, making it runtime-agnostic
//! and compatible with tokio, async-std, smol, and other async runtimes.
//!
//! - [`chunk_stream`] - Creates a chunk stream from a stream of buffers
//! - [`chunk_async`] - Creates a chunk stream from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ChunkStream, ReaderStream, chunk_async, chunk_stream};

//! Async stream adapters for chunking.
//!
//! This module provides asynchronous chunking over `futures-core` streams
//! and `futures-io::AsyncRead` readers, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use flagchunk::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead>(reader: R) -> Result<(), flagchunk::ChunkError> {
//!     let stream = chunk_async(reader, ChunkConfig::new("\n")?)?;
//!     futures_util::pin_mut!(stream);
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("{}", chunk);
//!     }
//!     Ok(())
//! }
//! ```

use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_core::stream::FusedStream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::debug;

use crate::chunk::Chunk;
use crate::chunker::{Chunker, READ_BUFFER_SIZE, Splitter};
use crate::config::ChunkConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields chunks from a stream of buffers.
    ///
    /// The source is only polled once every chunk derivable from the bytes
    /// already received has been yielded. Dropping the stream early leaves
    /// the rest of the source unread. A source error is yielded unchanged
    /// and ends the stream.
    pub struct ChunkStream<S> {
        #[pin]
        source: S,
        splitter: Splitter,
        finished: bool,
    }
}

impl<S> ChunkStream<S> {
    fn new(source: S, splitter: Splitter) -> Self {
        Self {
            source,
            splitter,
            finished: false,
        }
    }

    /// Returns the stream offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.splitter.offset()
    }
}

impl<S, B, E> Stream for ChunkStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    type Item = Result<Chunk, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(chunk) = this.splitter.next_chunk() {
                return Poll::Ready(Some(Ok(chunk)));
            }
            if *this.finished {
                return Poll::Ready(None);
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(data))) => this.splitter.push(data),
                Poll::Ready(Some(Err(e))) => {
                    debug!(offset = this.splitter.offset(), "source failed, stopping");
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    debug!(offset = this.splitter.offset(), "source exhausted");
                    *this.finished = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl<S, B, E> FusedStream for ChunkStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    fn is_terminated(&self) -> bool {
        self.finished && !self.splitter.has_pending()
    }
}

impl<S> std::fmt::Debug for ChunkStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkStream")
            .field("splitter", &self.splitter)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

pin_project! {
    /// A stream of buffers read from an async reader.
    ///
    /// Each poll reads up to [`READ_BUFFER_SIZE`] bytes into a reused
    /// buffer and yields a copy. [`ErrorKind::Interrupted`] is retried; the
    /// stream ends at the first zero-length read or the first error.
    pub struct ReaderStream<R> {
        #[pin]
        reader: R,
        buffer: Vec<u8>,
        done: bool,
    }
}

impl<R> ReaderStream<R> {
    /// Wraps an async reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0u8; READ_BUFFER_SIZE],
            done: false,
        }
    }
}

impl<R: AsyncRead> Stream for ReaderStream<R> {
    type Item = Result<Bytes, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }

        loop {
            match this.reader.as_mut().poll_read(cx, &mut this.buffer[..]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
                Poll::Ready(Ok(n)) => {
                    return Poll::Ready(Some(Ok(Bytes::copy_from_slice(&this.buffer[..n]))));
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.done = true;
                    return Poll::Ready(Some(Err(ChunkError::Io(e))));
                }
            }
        }
    }
}

impl<R: AsyncRead> FusedStream for ReaderStream<R> {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

impl Chunker {
    /// Creates a chunk stream over an async source of buffers.
    pub fn chunk_stream<S, B, E>(&self, source: S) -> ChunkStream<S>
    where
        S: Stream<Item = Result<B, E>>,
        B: Into<Bytes>,
    {
        ChunkStream::new(source, self.splitter())
    }

    /// Creates a chunk stream that reads from an async reader.
    pub fn chunk_async<R: AsyncRead>(&self, reader: R) -> ChunkStream<ReaderStream<R>> {
        self.chunk_stream(ReaderStream::new(reader))
    }
}

/// Creates a chunk stream from an async source of buffers.
///
/// This is the importer-facing entry point: any
/// `Stream<Item = Result<B, E>>` with `B: Into<Bytes>` goes in, a
/// `Stream<Item = Result<Chunk, E>>` comes out.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidConfig`] before the source is polled if the
/// configuration does not validate.
///
/// # Example
///
/// ```ignore
/// use flagchunk::{chunk_stream, ChunkConfig};
/// use futures_util::{stream, StreamExt};
///
/// async fn demo() -> Result<(), flagchunk::ChunkError> {
///     let source = stream::iter(vec![Ok::<_, std::io::Error>("ab "), Ok(" cd")]);
///     let chunks: Vec<_> = chunk_stream(source, ChunkConfig::new(" ")?)?
///         .collect()
///         .await;
///     assert_eq!(chunks.len(), 5);
///     Ok(())
/// }
/// ```
pub fn chunk_stream<S, B, E>(source: S, config: ChunkConfig) -> Result<ChunkStream<S>, ChunkError>
where
    S: Stream<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    Ok(Chunker::new(config)?.chunk_stream(source))
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use flagchunk::{chunk_async, ChunkConfig};
///
/// let tokio_reader = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(tokio_reader.compat(), ChunkConfig::new("\n")?)?;
/// ```
///
/// # Errors
///
/// Returns [`ChunkError::InvalidConfig`] before the reader is touched if the
/// configuration does not validate.
pub fn chunk_async<R: AsyncRead>(
    reader: R,
    config: ChunkConfig,
) -> Result<ChunkStream<ReaderStream<R>>, ChunkError> {
    Ok(Chunker::new(config)?.chunk_async(reader))
}

//! Synchronous drivers - Chunker and ChunkIter.
//!
//! - [`Chunker`] - Holds a validated configuration and starts chunking runs
//! - [`ChunkIter`] - Iterator that pulls buffers from a source and yields chunks
//! - [`ReadSource`] - Turns a [`std::io::Read`] into a source of buffers
//!
//! # Example
//!
//! ```
//! use flagchunk::{ChunkConfig, Chunker};
//! use std::io::Cursor;
//!
//! let chunker = Chunker::new(ChunkConfig::new("\n")?)?;
//!
//! for chunk in chunker.chunk_reader(Cursor::new("one\ntwo\n")) {
//!     let chunk = chunk?;
//!     println!("{}", chunk);
//! }
//! # Ok::<(), flagchunk::ChunkError>(())
//! ```

use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;

use bytes::Bytes;
use tracing::debug;

use crate::chunk::Chunk;
use crate::chunker::Splitter;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// Size of each read issued by the reader-based drivers (8 KiB).
pub const READ_BUFFER_SIZE: usize = 8 * 1024;

/// A configured boundary-pattern chunker.
///
/// `Chunker` holds a validated [`ChunkConfig`] and no stream state. Every
/// call that takes a source starts an independent run with its own buffer,
/// so one `Chunker` can split any number of streams, concurrently or not.
///
/// # Example
///
/// ```
/// use flagchunk::{ChunkConfig, Chunker};
///
/// let chunker = Chunker::new(ChunkConfig::new(" ")?.with_chunk_size(100))?;
/// let chunks = chunker.chunk_bytes(&b"ab cd"[..]);
///
/// let parts: Vec<_> = chunks.iter().map(|c| &c.data[..]).collect();
/// assert_eq!(parts, [&b"ab"[..], &b" "[..], &b"cd"[..]]);
/// # Ok::<(), flagchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate. No source is touched before this check.
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a chunker that splits on `pattern` with the default chunk size.
    ///
    /// # Example
    ///
    /// ```
    /// use flagchunk::Chunker;
    ///
    /// assert!(Chunker::with_pattern(",").is_ok());
    /// assert!(Chunker::with_pattern("").is_err());
    /// ```
    pub fn with_pattern(pattern: impl AsRef<[u8]>) -> Result<Self, ChunkError> {
        Self::new(ChunkConfig::new(pattern)?)
    }

    /// Returns a fresh push/pull engine bound to this configuration.
    pub fn splitter(&self) -> Splitter {
        Splitter::with_validated(self.config.clone())
    }

    /// Creates a chunking iterator over a source of buffers.
    ///
    /// The source yields `Result<B, E>` items; buffers may be any size,
    /// including empty. A source error is handed through unchanged and ends
    /// the iteration.
    ///
    /// # Example
    ///
    /// ```
    /// use flagchunk::{ChunkConfig, Chunker};
    ///
    /// let chunker = Chunker::new(ChunkConfig::new(" ")?)?;
    /// let source = vec![Ok::<_, std::io::Error>(&b"ab "[..]), Ok(&b" cd"[..])];
    ///
    /// let chunks: Vec<_> = chunker.chunk(source).collect::<Result<_, _>>()?;
    /// assert_eq!(chunks.len(), 5);
    /// assert!(chunks[2].is_empty());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn chunk<I, B, E>(&self, source: I) -> ChunkIter<I::IntoIter>
    where
        I: IntoIterator<Item = Result<B, E>>,
        B: Into<Bytes>,
    {
        ChunkIter::new(source.into_iter(), self.splitter())
    }

    /// Creates a chunking iterator that reads from `reader`.
    ///
    /// Each read requests up to [`READ_BUFFER_SIZE`] bytes. Because small
    /// runs are flushed as soon as they are read, data chunk boundaries
    /// follow the reader's read sizes.
    pub fn chunk_reader<R: Read>(&self, reader: R) -> ChunkIter<ReadSource<R>> {
        self.chunk(ReadSource::new(reader))
    }

    /// Chunks an in-memory buffer, treated as a single source item.
    ///
    /// # Example
    ///
    /// ```
    /// use flagchunk::{ChunkConfig, Chunker};
    ///
    /// let chunker = Chunker::new(ChunkConfig::new("X")?.with_chunk_size(10))?;
    /// let chunks = chunker.chunk_bytes(&b"abcdef"[..]);
    /// assert_eq!(chunks.len(), 1);
    /// # Ok::<(), flagchunk::ChunkError>(())
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let mut splitter = self.splitter();
        splitter.push(data);
        std::iter::from_fn(|| splitter.next_chunk()).collect()
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

/// An iterator that yields chunks from a source of buffers.
///
/// `ChunkIter` only pulls the next buffer once every chunk derivable from
/// the bytes already read has been yielded, so dropping it early leaves the
/// rest of the source untouched. It is not restartable.
pub struct ChunkIter<I> {
    source: I,
    splitter: Splitter,
    finished: bool,
}

impl<I> ChunkIter<I> {
    fn new(source: I, splitter: Splitter) -> Self {
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

impl<I, B, E> Iterator for ChunkIter<I>
where
    I: Iterator<Item = Result<B, E>>,
    B: Into<Bytes>,
{
    type Item = Result<Chunk, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(chunk) = self.splitter.next_chunk() {
                return Some(Ok(chunk));
            }
            if self.finished {
                return None;
            }

            match self.source.next() {
                Some(Ok(data)) => self.splitter.push(data),
                Some(Err(e)) => {
                    debug!(offset = self.splitter.offset(), "source failed, stopping");
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    debug!(offset = self.splitter.offset(), "source exhausted");
                    self.finished = true;
                    return None;
                }
            }
        }
    }
}

impl<I, B, E> FusedIterator for ChunkIter<I>
where
    I: Iterator<Item = Result<B, E>>,
    B: Into<Bytes>,
{
}

impl<I> std::fmt::Debug for ChunkIter<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkIter")
            .field("splitter", &self.splitter)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

/// A source of buffers read from a [`std::io::Read`].
///
/// Yields one `Bytes` per successful non-empty read, retries
/// [`ErrorKind::Interrupted`], and ends at the first zero-length read or
/// the first error.
pub struct ReadSource<R> {
    reader: R,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: Read> ReadSource<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0u8; READ_BUFFER_SIZE],
            done: false,
        }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for ReadSource<R> {
    type Item = Result<Bytes, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                // Copy out only the filled part; the read buffer is reused
                Ok(n) => return Some(Ok(Bytes::copy_from_slice(&self.buffer[..n]))),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for ReadSource<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn space_chunker(chunk_size: usize) -> Chunker {
        Chunker::new(ChunkConfig::new(" ").unwrap().with_chunk_size(chunk_size)).unwrap()
    }

    #[test]
    fn test_chunker_empty() {
        let chunker = space_chunker(100);
        assert!(chunker.chunk_bytes(&b""[..]).is_empty());

        let source: Vec<Result<Bytes, ChunkError>> = Vec::new();
        assert_eq!(chunker.chunk(source).count(), 0);
    }

    #[test]
    fn test_chunker_rejects_empty_pattern() {
        assert!(matches!(
            Chunker::with_pattern(b""),
            Err(ChunkError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_chunker_rejects_zero_size() {
        let config = ChunkConfig::new(" ").unwrap().with_chunk_size(0);
        assert!(Chunker::new(config).is_err());
    }

    #[test]
    fn test_chunker_iterator() {
        let chunker = space_chunker(100);
        let source = vec![Ok::<_, ChunkError>("ab "), Ok(""), Ok(" cd")];

        let chunks: Vec<_> = chunker.chunk(source).collect::<Result<_, _>>().unwrap();
        let parts: Vec<_> = chunks.iter().map(|c| &c.data[..]).collect();
        assert_eq!(
            parts,
            [&b"ab"[..], &b" "[..], &b""[..], &b" "[..], &b"cd"[..]]
        );
    }

    #[test]
    fn test_source_error_propagates_and_ends() {
        #[derive(Debug, PartialEq)]
        struct Boom;

        let chunker = space_chunker(100);
        let source = vec![Ok("a b"), Err(Boom), Ok("never")];
        let mut iter = chunker.chunk(source);

        assert_eq!(&iter.next().unwrap().unwrap().data[..], b"a");
        assert!(iter.next().unwrap().unwrap().is_boundary());
        assert_eq!(&iter.next().unwrap().unwrap().data[..], b"b");
        assert_eq!(iter.next().unwrap().unwrap_err(), Boom);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_stops_reading_when_consumer_stops() {
        let chunker = space_chunker(100);
        let mut reads = 0;
        let source = std::iter::from_fn(|| {
            reads += 1;
            Some(Ok::<_, ChunkError>("x y"))
        });

        let taken: Vec<_> = chunker.chunk(source).take(3).collect();
        assert_eq!(taken.len(), 3);
        assert_eq!(reads, 1);
    }

    #[test]
    fn test_chunk_reader() {
        let data: Vec<u8> = (0..20_000u32)
            .map(|i| if i % 1000 == 999 { b'|' } else { b'a' })
            .collect();
        let chunker = Chunker::new(ChunkConfig::new("|").unwrap().with_chunk_size(4096)).unwrap();

        let chunks: Vec<_> = chunker
            .chunk_reader(Cursor::new(&data))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.iter().copied()).collect();
        assert_eq!(joined, data);
        assert_eq!(chunks.iter().filter(|c| c.is_boundary()).count(), 20);
    }

    #[test]
    fn test_reader_error_wrapped() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(ErrorKind::BrokenPipe, "gone"))
            }
        }

        let chunker = space_chunker(100);
        let mut iter = chunker.chunk_reader(Failing);
        assert!(matches!(iter.next(), Some(Err(ChunkError::Io(_)))));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_read_source_retries_interrupted() {
        struct Flaky {
            interrupted: bool,
            data: Cursor<&'static [u8]>,
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(std::io::Error::from(ErrorKind::Interrupted));
                }
                self.data.read(buf)
            }
        }

        let mut source = ReadSource::new(Flaky {
            interrupted: false,
            data: Cursor::new(&b"hello"[..]),
        });
        assert_eq!(&source.next().unwrap().unwrap()[..], b"hello");
        assert!(source.next().is_none());
    }

    #[test]
    fn test_read_source_short_reads_copy_out() {
        struct Trickle(Cursor<&'static [u8]>);
        impl Read for Trickle {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                let n = buf.len().min(3);
                self.0.read(&mut buf[..n])
            }
        }

        let source = ReadSource::new(Trickle(Cursor::new(&b"abcdefgh"[..])));
        let items: Vec<Bytes> = source.collect::<Result<_, _>>().unwrap();

        // Earlier items must not see later reads through a shared buffer
        assert_eq!(items, ["abc", "def", "gh"]);
        assert!(items.iter().all(|b| b.len() <= 3));
    }

    #[test]
    fn test_chunk_offsets() {
        let chunker = space_chunker(3);
        let chunks = chunker.chunk_bytes(&b"hello big world"[..]);

        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            expected_offset += chunk.len() as u64;
        }
        assert_eq!(expected_offset, 15);
    }

    #[test]
    fn test_independent_runs() {
        let chunker = space_chunker(100);
        let first = chunker.chunk_bytes(&b"a b"[..]);
        let second = chunker.chunk_bytes(&b"a b"[..]);
        assert_eq!(first, second);
        assert_eq!(second[0].offset, 0);
    }
}

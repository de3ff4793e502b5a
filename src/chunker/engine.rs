//! Core splitting engine - Splitter with a push/pull API.
//!
//! This module implements the boundary-pattern state machine. It is driven
//! from outside:
//!
//! - [`Splitter`] - Stateful engine that owns the accumulator
//! - `push()` - Feed one source item in any size (including empty)
//! - `next_chunk()` - Pull the next finished chunk, or `None` when more
//!   input is needed
//!
//! # Example
//!
//! ```
//! use flagchunk::{ChunkConfig, Splitter};
//! use bytes::Bytes;
//!
//! let mut splitter = Splitter::new(ChunkConfig::new(" ")?)?;
//!
//! splitter.push(Bytes::from_static(b"ab cd"));
//! let mut out = Vec::new();
//! while let Some(chunk) = splitter.next_chunk() {
//!     out.push(chunk.data);
//! }
//! assert_eq!(out, vec!["ab", " ", "cd"]);
//! # Ok::<(), flagchunk::ChunkError>(())
//! ```

use bytes::Bytes;
use tracing::trace;

use crate::buffer::Accumulator;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::ChunkError;

/// A pull-driven splitter for one byte stream.
///
/// `Splitter` holds the bytes that have been pushed but not yet emitted and
/// decides, one chunk at a time, where the next split falls:
///
/// 1. If the pattern starts before `chunk_size`, the bytes in front of it
///    are emitted as a data chunk (possibly empty), followed by a boundary
///    chunk.
/// 2. Otherwise, if fewer than `chunk_size` bytes are buffered, all of them
///    are emitted as one data chunk right away.
/// 3. Otherwise exactly `chunk_size` bytes are emitted as a data chunk.
///
/// # Read Granularity
///
/// Rule 2 means a long run without the pattern is split where the source
/// happened to split it, not only at `chunk_size`. Feeding `"abcdef"` as one
/// item yields one data chunk; feeding `"abc"` and `"def"` yields two. The
/// concatenated output is identical either way. The same rule means a
/// multi-byte pattern that straddles two source items is not recognised,
/// and neither is one that straddles a size-based cut.
///
/// # Example
///
/// ```
/// use flagchunk::{ChunkConfig, ChunkKind, Splitter};
/// use bytes::Bytes;
///
/// let config = ChunkConfig::new(" ")?.with_chunk_size(100);
/// let mut splitter = Splitter::new(config)?;
///
/// splitter.push(Bytes::from_static(b"ab "));
/// splitter.push(Bytes::from_static(b" cd"));
///
/// let kinds: Vec<_> = std::iter::from_fn(|| splitter.next_chunk())
///     .map(|c| c.kind)
///     .collect();
/// assert_eq!(
///     kinds,
///     [
///         ChunkKind::Data,
///         ChunkKind::Boundary,
///         ChunkKind::Data,
///         ChunkKind::Boundary,
///         ChunkKind::Data,
///     ]
/// );
/// # Ok::<(), flagchunk::ChunkError>(())
/// ```
#[derive(Debug)]
pub struct Splitter {
    config: ChunkConfig,
    accumulator: Accumulator,
    /// Start of the earliest pattern match in the accumulator, if known.
    boundary: Option<usize>,
    /// Set when `boundary` no longer reflects the accumulator front.
    stale: bool,
    /// Boundary chunk owed after the data chunk that preceded it.
    pending_boundary: Option<Chunk>,
    offset: u64,
}

impl Splitter {
    /// Creates a new splitter with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self::with_validated(config))
    }

    /// Creates a splitter from a configuration already checked by the caller.
    pub(crate) fn with_validated(config: ChunkConfig) -> Self {
        Self {
            config,
            accumulator: Accumulator::new(),
            boundary: None,
            stale: false,
            pending_boundary: None,
            offset: 0,
        }
    }

    /// Appends one source item.
    ///
    /// Empty items are accepted and change nothing. Callers should drain
    /// [`Splitter::next_chunk`] between pushes to keep the buffer bounded;
    /// items pushed without draining in between split as if they had
    /// arrived as one item.
    pub fn push(&mut self, data: impl Into<Bytes>) {
        let data = data.into();
        if data.is_empty() {
            return;
        }

        let old_len = self.accumulator.len();
        self.accumulator.append(data);

        // A known match stays the earliest; otherwise only the new tail
        // (plus overlap) can hold one.
        if !self.stale && self.boundary.is_none() {
            let from = old_len.saturating_sub(self.config.pattern().len() - 1);
            self.boundary = self
                .accumulator
                .find_from(self.config.pattern().as_bytes(), from);
        }
    }

    /// Returns the next finished chunk, or `None` if more input is needed.
    ///
    /// Once this returns `None`, everything pushed so far has been emitted.
    pub fn next_chunk(&mut self) -> Option<Chunk> {
        if let Some(chunk) = self.pending_boundary.take() {
            return Some(chunk);
        }
        if self.accumulator.is_empty() {
            return None;
        }

        if self.stale {
            self.boundary = self.accumulator.find(self.config.pattern().as_bytes());
            self.stale = false;
        }

        let chunk_size = self.config.chunk_size();
        match self.boundary {
            Some(pos) if pos < chunk_size => {
                let data = self.accumulator.take(pos);
                let data = self.emit_data(data);

                let pattern = self.config.pattern().to_bytes();
                self.accumulator.advance(pattern.len());
                let boundary = Chunk::boundary(pattern, self.offset);
                self.offset += boundary.len() as u64;
                trace!(offset = boundary.offset, len = boundary.len(), "boundary chunk");

                self.pending_boundary = Some(boundary);
                self.stale = true;
                Some(data)
            }
            _ if self.accumulator.len() < chunk_size => {
                let data = self.accumulator.take_all();
                self.boundary = None;
                self.stale = false;
                Some(self.emit_data(data))
            }
            _ => {
                // Any match lies past the cut, so it shifts with the front.
                let data = self.accumulator.take(chunk_size);
                self.boundary = self.boundary.map(|pos| pos - chunk_size);
                Some(self.emit_data(data))
            }
        }
    }

    fn emit_data(&mut self, data: Bytes) -> Chunk {
        let chunk = Chunk::data(data, self.offset);
        self.offset += chunk.len() as u64;
        trace!(offset = chunk.offset, len = chunk.len(), "data chunk");
        chunk
    }

    /// Resets the splitter state for a new stream.
    ///
    /// Discards any buffered bytes and restarts offsets at zero.
    pub fn reset(&mut self) {
        self.accumulator.clear();
        self.boundary = None;
        self.stale = false;
        self.pending_boundary = None;
        self.offset = 0;
    }

    /// Returns the stream offset of the next chunk to be emitted.
    pub fn offset(&self) -> u64 {
        self.pending_boundary
            .as_ref()
            .map_or(self.offset, |chunk| chunk.offset)
    }

    /// Returns the number of buffered bytes not yet emitted, including an
    /// owed boundary chunk.
    pub fn pending_len(&self) -> usize {
        self.accumulator.len() + self.pending_boundary.as_ref().map_or(0, Chunk::len)
    }

    /// Returns true if [`Splitter::next_chunk`] would yield a chunk.
    pub fn has_pending(&self) -> bool {
        self.pending_len() > 0
    }

    /// Returns the configuration used by this splitter.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }
}

//! The Chunk type - one unit of chunker output.

use bytes::Bytes;
use std::fmt;

/// What a chunk represents in the split stream.
///
/// Downstream consumers should branch on the kind rather than compare bytes
/// with the pattern: a data chunk may coincidentally hold the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    /// Bytes between boundaries, or a size-based slice.
    Data,
    /// An occurrence of the boundary pattern.
    Boundary,
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkKind::Data => f.pad("data"),
            ChunkKind::Boundary => f.pad("boundary"),
        }
    }
}

/// A chunk of the input stream.
///
/// # Example
///
/// ```
/// use flagchunk::{Chunk, ChunkKind};
/// use bytes::Bytes;
///
/// let chunk = Chunk::data(Bytes::from_static(b"hello"), 0);
/// assert_eq!(chunk.kind, ChunkKind::Data);
/// assert_eq!(chunk.range(), 0..5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Whether this chunk is data or a boundary.
    pub kind: ChunkKind,

    /// The chunk bytes (zero-copy where the source allowed it).
    pub data: Bytes,

    /// The offset of the first byte in the original stream.
    pub offset: u64,
}

impl Chunk {
    /// Creates a data chunk.
    pub fn data(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            kind: ChunkKind::Data,
            data: data.into(),
            offset,
        }
    }

    /// Creates a boundary chunk.
    pub fn boundary(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            kind: ChunkKind::Boundary,
            data: data.into(),
            offset,
        }
    }

    /// Returns true for a data chunk.
    pub fn is_data(&self) -> bool {
        self.kind == ChunkKind::Data
    }

    /// Returns true for a boundary chunk.
    pub fn is_boundary(&self) -> bool {
        self.kind == ChunkKind::Boundary
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    ///
    /// Empty data chunks are legitimate: they sit between adjacent
    /// boundaries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    /// Returns the start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({}, {} bytes @ {})", self.kind, self.len(), self.offset)
    }
}

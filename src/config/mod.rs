//! Configuration for chunking behavior.
//!
//! This module provides types to configure how a stream is split:
//!
//! - [`BoundaryPattern`] - The flag bytes that force a split
//! - [`ChunkConfig`] - Pattern plus the maximum data chunk size
//!
//! # Example
//!
//! ```
//! use flagchunk::ChunkConfig;
//!
//! // Split on newlines, default chunk size
//! let config = ChunkConfig::new("\n")?;
//!
//! // Raw byte pattern, custom chunk size
//! let config = ChunkConfig::new([0xFFu8, 0x00])?.with_chunk_size(4096);
//! config.validate()?;
//!
//! # Ok::<(), flagchunk::ChunkError>(())
//! ```

use std::fmt;

use bytes::Bytes;

use crate::error::ChunkError;

/// Default maximum data chunk size (256 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 256 * 1024;

/// A non-empty byte sequence that marks a chunk boundary.
///
/// Text patterns are stored as their UTF-8 encoding. The bytes are held in a
/// [`Bytes`] so every emitted boundary chunk shares the same allocation.
///
/// # Example
///
/// ```
/// use flagchunk::BoundaryPattern;
///
/// let pattern = BoundaryPattern::new("--")?;
/// assert_eq!(pattern.as_bytes(), b"--");
///
/// assert!(BoundaryPattern::new("").is_err());
/// # Ok::<(), flagchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundaryPattern(Bytes);

impl BoundaryPattern {
    /// Creates a pattern from raw bytes or text.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the pattern is empty.
    pub fn new(pattern: impl AsRef<[u8]>) -> Result<Self, ChunkError> {
        let pattern = pattern.as_ref();
        if pattern.is_empty() {
            return Err(ChunkError::InvalidConfig {
                message: "boundary pattern must not be empty",
            });
        }
        Ok(Self(Bytes::copy_from_slice(pattern)))
    }

    /// Returns the pattern bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns a cheap handle to the pattern bytes.
    pub fn to_bytes(&self) -> Bytes {
        self.0.clone()
    }

    /// Returns the pattern length in bytes (always at least 1).
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for BoundaryPattern {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&str> for BoundaryPattern {
    type Error = ChunkError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for BoundaryPattern {
    type Error = ChunkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for BoundaryPattern {
    type Error = ChunkError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Vec<u8>> for BoundaryPattern {
    type Error = ChunkError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for BoundaryPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Configuration for boundary-pattern chunking.
///
/// `ChunkConfig` binds a [`BoundaryPattern`] to a maximum data chunk size.
/// A stream is split at whichever comes first: the next occurrence of the
/// pattern, or `chunk_size` bytes.
///
/// # Example
///
/// ```
/// use flagchunk::{ChunkConfig, DEFAULT_CHUNK_SIZE};
///
/// let config = ChunkConfig::new(" ")?;
/// assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
///
/// // Builder pattern
/// let config = ChunkConfig::new(b"\r\n")?.with_chunk_size(1024);
/// assert_eq!(config.chunk_size(), 1024);
/// # Ok::<(), flagchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    /// Bytes that force a split and are emitted as their own chunk.
    pattern: BoundaryPattern,

    /// Maximum size of a data chunk produced by a size-based split.
    chunk_size: usize,
}

impl ChunkConfig {
    /// Creates a configuration with the default chunk size.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if the pattern is empty.
    pub fn new(pattern: impl AsRef<[u8]>) -> Result<Self, ChunkError> {
        Ok(Self::from_pattern(BoundaryPattern::new(pattern)?))
    }

    /// Creates a configuration from an already validated pattern.
    pub fn from_pattern(pattern: BoundaryPattern) -> Self {
        Self {
            pattern,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the maximum data chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check it; the drivers validate on
    /// construction.
    ///
    /// # Example
    ///
    /// ```
    /// use flagchunk::ChunkConfig;
    ///
    /// let config = ChunkConfig::new("|")?.with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// # Ok::<(), flagchunk::ChunkError>(())
    /// ```
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Replaces the boundary pattern.
    pub fn with_pattern(mut self, pattern: BoundaryPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Returns the boundary pattern.
    pub fn pattern(&self) -> &BoundaryPattern {
        &self.pattern
    }

    /// Returns the maximum data chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }
        Ok(())
    }
}

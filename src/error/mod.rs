//! Error types for flagchunk.

use thiserror::Error;

/// Errors that can occur while configuring or driving a chunker.
///
/// Errors raised by a caller-supplied source are not wrapped in this type:
/// [`ChunkIter`](crate::ChunkIter) and `ChunkStream` hand them through
/// unchanged. Only the reader-based drivers produce [`ChunkError::Io`].
#[derive(Debug, Error)]
pub enum ChunkError {
    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

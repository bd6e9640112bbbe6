//! Errors raised while reassembling chunks.
//!
//! Every variant is terminal for the session it occurred in: the reassembler
//! discards all buffered bytes before returning it.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::chunk::{ChunkError, SessionTag};

/// Reasons a chunk was rejected by a [`ChunkReassembler`](super::ChunkReassembler).
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// The chunk could not be decoded.
    #[error("malformed chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// The chunk payload would be written past the declared message size.
    #[error(
        "session {tag}: {len} byte chunk at offset {offset} overruns declared size {total_size}"
    )]
    OutOfBounds {
        tag: SessionTag,
        offset: u16,
        len: usize,
        total_size: usize,
    },
    /// A chunk declared a different total size than its session.
    #[error("session {tag}: declared size changed from {previous} to {declared}")]
    SizeRedeclared {
        tag: SessionTag,
        previous: usize,
        declared: usize,
    },
    /// The declared message size exceeds the configured cap.
    #[error("session {tag}: declared size {declared} exceeds limit {limit}")]
    MessageTooLarge {
        tag: SessionTag,
        declared: usize,
        limit: NonZeroUsize,
    },
}

impl ReassemblyError {
    /// Short, stable label naming the failure, for logs and metrics.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Chunk(_) => "malformed_chunk",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::SizeRedeclared { .. } => "size_redeclared",
            Self::MessageTooLarge { .. } => "message_too_large",
        }
    }
}

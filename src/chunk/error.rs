//! Error types emitted while decoding or producing chunks.

use thiserror::Error;

use super::{HEADER_LEN, MAX_MESSAGE_SIZE};

/// Errors produced while decoding a chunk header.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// The chunk is shorter than the fixed header.
    #[error("chunk of {len} bytes is shorter than the {header} byte header", header = HEADER_LEN)]
    TooShort { len: usize },
    /// A declared message size falls outside `1..=65536`.
    #[error("declared message size {size} is outside 1..={max}", max = MAX_MESSAGE_SIZE)]
    InvalidTotalSize { size: usize },
}

/// Errors produced while splitting an outbound message into chunks.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ChunkingError {
    /// Messages must carry at least one byte.
    #[error("cannot chunk an empty message")]
    EmptyMessage,
    /// The message exceeds what the 16-bit size field can describe.
    #[error("message of {len} bytes exceeds the {max} byte limit", max = MAX_MESSAGE_SIZE)]
    MessageTooLarge { len: usize },
    /// The transport MTU leaves no room for payload after the header.
    #[error("mtu of {mtu} bytes cannot fit a {header} byte header and payload", header = HEADER_LEN)]
    MtuTooSmall { mtu: usize },
}

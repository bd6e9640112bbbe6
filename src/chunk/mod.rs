//! Chunk wire format for size-limited transports.
//!
//! Every chunk starts with a fixed five byte header followed by a slice of the
//! message body:
//!
//! ```text
//! offset 0    : session tag              (u8)
//! offset 1..2 : chunk offset             (u16, little-endian)
//! offset 3..4 : total message size - 1   (u16, little-endian)
//! offset 5..  : chunk payload            (0 or more bytes)
//! ```
//!
//! All chunks of one message share a [`SessionTag`]. A change of tag marks the
//! start of a new message, which lets the receiver discard partial data from a
//! message the sender abandoned. The inbound side lives in
//! [`reassembler`](crate::reassembler); [`Chunker`] is the matching outbound
//! helper.

pub mod chunker;
pub mod error;
pub mod header;
pub mod tag;

pub use chunker::{ChunkBatch, Chunker, OutboundChunk};
pub use error::{ChunkError, ChunkingError};
pub use header::{Chunk, ChunkHeader, HEADER_LEN, MAX_MESSAGE_SIZE};
pub use tag::SessionTag;

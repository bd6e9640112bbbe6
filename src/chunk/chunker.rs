//! Outbound helper that splits message bodies into transport chunks.
//!
//! [`Chunker`] mirrors the receiving [`ChunkReassembler`](crate::reassembler::ChunkReassembler):
//! every chunk of a message carries the same [`SessionTag`], and the tag
//! advances (wrapping at 255) once the message has been split.

use std::num::NonZeroUsize;

use super::{ChunkHeader, ChunkingError, HEADER_LEN, MAX_MESSAGE_SIZE, SessionTag};

/// Splits message bodies into chunks that fit a transport MTU.
#[derive(Debug)]
pub struct Chunker {
    payload_cap: NonZeroUsize,
    next_tag: SessionTag,
}

impl Chunker {
    /// Create a chunker for a transport accepting at most `mtu` bytes per write.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::MtuTooSmall`] when `mtu` cannot hold the header
    /// plus at least one payload byte.
    pub fn new(mtu: usize) -> Result<Self, ChunkingError> {
        Self::with_starting_tag(mtu, SessionTag::new(0))
    }

    /// Create a chunker whose first message uses `start_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::MtuTooSmall`] when `mtu` cannot hold the header
    /// plus at least one payload byte.
    pub fn with_starting_tag(mtu: usize, start_at: SessionTag) -> Result<Self, ChunkingError> {
        let payload_cap = NonZeroUsize::new(mtu.saturating_sub(HEADER_LEN))
            .ok_or(ChunkingError::MtuTooSmall { mtu })?;
        Ok(Self {
            payload_cap,
            next_tag: start_at,
        })
    }

    /// Maximum number of body bytes carried by one chunk.
    #[must_use]
    pub const fn payload_cap(&self) -> NonZeroUsize { self.payload_cap }

    /// Tag the next message will be sent with.
    #[must_use]
    pub const fn next_tag(&self) -> SessionTag { self.next_tag }

    /// Split `body` into chunks and advance the session tag.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::EmptyMessage`] for an empty body and
    /// [`ChunkingError::MessageTooLarge`] for bodies over 65536 bytes. The tag
    /// is left untouched on error.
    pub fn chunk(&mut self, body: impl AsRef<[u8]>) -> Result<ChunkBatch, ChunkingError> {
        let body = body.as_ref();
        let tag = self.next_tag;
        let chunks = self.build_chunks(tag, body)?;
        self.next_tag = tag.next();
        Ok(ChunkBatch { tag, chunks })
    }

    fn build_chunks(&self, tag: SessionTag, body: &[u8]) -> Result<Vec<OutboundChunk>, ChunkingError> {
        let total = body.len();
        if total == 0 {
            return Err(ChunkingError::EmptyMessage);
        }
        if total > MAX_MESSAGE_SIZE {
            return Err(ChunkingError::MessageTooLarge { len: total });
        }

        let cap = self.payload_cap.get();
        body.chunks(cap)
            .enumerate()
            .map(|(index, payload)| {
                let offset = u16::try_from(index * cap)
                    .map_err(|_| ChunkingError::MessageTooLarge { len: total })?;
                let header = ChunkHeader::try_new(tag, offset, total)
                    .map_err(|_| ChunkingError::MessageTooLarge { len: total })?;
                Ok(OutboundChunk {
                    header,
                    payload: payload.to_vec(),
                })
            })
            .collect()
    }
}

/// Header and payload for a single outbound chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundChunk {
    header: ChunkHeader,
    payload: Vec<u8>,
}

impl OutboundChunk {
    /// Return the chunk header.
    #[must_use]
    pub fn header(&self) -> &ChunkHeader { &self.header }

    /// Return the body bytes carried by this chunk.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.payload.as_slice() }

    /// Encode header and payload into the bytes written to the transport.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.payload.len());
        bytes.extend_from_slice(&self.header.encode());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// Chunks produced for a single message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkBatch {
    tag: SessionTag,
    chunks: Vec<OutboundChunk>,
}

impl ChunkBatch {
    /// Return the tag shared by all chunks.
    #[must_use]
    pub const fn tag(&self) -> SessionTag { self.tag }

    /// Return the chunks as a slice.
    #[must_use]
    pub fn chunks(&self) -> &[OutboundChunk] { self.chunks.as_slice() }

    /// Number of chunks in the batch.
    #[expect(
        clippy::len_without_is_empty,
        reason = "batches are guaranteed non-empty"
    )]
    #[must_use]
    pub fn len(&self) -> usize { self.chunks.len() }

    /// Encode every chunk into transport writes, in send order.
    #[must_use]
    pub fn to_wire(&self) -> Vec<Vec<u8>> { self.chunks.iter().map(OutboundChunk::to_bytes).collect() }
}

impl IntoIterator for ChunkBatch {
    type Item = OutboundChunk;
    type IntoIter = std::vec::IntoIter<OutboundChunk>;

    fn into_iter(self) -> Self::IntoIter { self.chunks.into_iter() }
}

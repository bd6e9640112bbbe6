use super::{ChunkError, SessionTag};
use crate::byte_order::{read_le_u16, write_le_u16};

/// Length of the fixed header preceding every chunk payload.
pub const HEADER_LEN: usize = 5;

/// Largest message size the 16-bit `size - 1` field can describe.
pub const MAX_MESSAGE_SIZE: usize = u16::MAX as usize + 1;

/// Header describing a single chunk.
///
/// The total size is stored exactly as it travels on the wire (`size - 1`), so
/// every header value is representable and round-trips without loss.
///
/// # Examples
///
/// ```
/// use pushwire::chunk::{ChunkHeader, SessionTag};
/// let header = ChunkHeader::try_new(SessionTag::new(3), 16, 64).expect("valid size");
/// assert_eq!(header.encode(), [3, 16, 0, 63, 0]);
/// assert_eq!(header.total_size(), 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHeader {
    tag: SessionTag,
    offset: u16,
    total_size_minus_one: u16,
}

impl ChunkHeader {
    /// Create a header declaring a message of `total_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidTotalSize`] unless `total_size` lies in
    /// `1..=65536`.
    pub fn try_new(tag: SessionTag, offset: u16, total_size: usize) -> Result<Self, ChunkError> {
        let total_size_minus_one = total_size
            .checked_sub(1)
            .and_then(|size| u16::try_from(size).ok())
            .ok_or(ChunkError::InvalidTotalSize { size: total_size })?;
        Ok(Self {
            tag,
            offset,
            total_size_minus_one,
        })
    }

    /// Decode a header from the first [`HEADER_LEN`] bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::TooShort`] when fewer than [`HEADER_LEN`] bytes are
    /// available.
    pub fn decode(bytes: &[u8]) -> Result<Self, ChunkError> {
        let Some(&[tag, offset_lo, offset_hi, size_lo, size_hi]) = bytes.first_chunk::<HEADER_LEN>()
        else {
            return Err(ChunkError::TooShort { len: bytes.len() });
        };
        Ok(Self {
            tag: SessionTag::new(tag),
            offset: read_le_u16([offset_lo, offset_hi]),
            total_size_minus_one: read_le_u16([size_lo, size_hi]),
        })
    }

    /// Encode the header into its wire representation.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let [offset_lo, offset_hi] = write_le_u16(self.offset);
        let [size_lo, size_hi] = write_le_u16(self.total_size_minus_one);
        [self.tag.get(), offset_lo, offset_hi, size_lo, size_hi]
    }

    /// Return the session tag shared by all chunks of the message.
    #[must_use]
    pub const fn tag(&self) -> SessionTag { self.tag }

    /// Return the byte offset of this chunk's payload within the message.
    #[must_use]
    pub const fn offset(&self) -> u16 { self.offset }

    /// Return the declared size of the complete message, in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize { usize::from(self.total_size_minus_one) + 1 }
}

/// Borrowed view over a decoded chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk<'a> {
    header: ChunkHeader,
    payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// Split raw transport bytes into header and payload.
    ///
    /// Zero-length payloads are legal.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::TooShort`] for inputs shorter than [`HEADER_LEN`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pushwire::chunk::{Chunk, ChunkError};
    /// let chunk = Chunk::parse(&[7, 0, 0, 2, 0, b'a', b'b', b'c']).expect("valid chunk");
    /// assert_eq!(chunk.payload(), b"abc");
    /// assert_eq!(
    ///     Chunk::parse(&[7, 0]),
    ///     Err(ChunkError::TooShort { len: 2 })
    /// );
    /// ```
    pub fn parse(bytes: &'a [u8]) -> Result<Self, ChunkError> {
        let header = ChunkHeader::decode(bytes)?;
        Ok(Self {
            header,
            payload: &bytes[HEADER_LEN..],
        })
    }

    /// Return the decoded header.
    #[must_use]
    pub const fn header(&self) -> &ChunkHeader { &self.header }

    /// Return the payload bytes following the header.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] { self.payload }

    /// Offset one past the last message byte this chunk covers.
    #[must_use]
    pub fn end_offset(&self) -> usize { usize::from(self.header.offset()) + self.payload.len() }
}

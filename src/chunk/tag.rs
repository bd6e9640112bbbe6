use derive_more::{Display, From, Into};

/// Identifier shared by every chunk of one message.
///
/// Senders advance the tag once a message has been fully transmitted; the
/// counter wraps from 255 back to 0.
///
/// # Examples
///
/// ```
/// use pushwire::chunk::SessionTag;
/// let tag = SessionTag::new(255);
/// assert_eq!(tag.next(), SessionTag::new(0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, From, Into)]
#[display("{_0}")]
pub struct SessionTag(u8);

impl SessionTag {
    /// Create a new tag.
    #[must_use]
    pub const fn new(value: u8) -> Self { Self(value) }

    /// Return the raw tag byte.
    #[must_use]
    pub const fn get(self) -> u8 { self.0 }

    /// Return the tag that follows this one, wrapping at `u8::MAX`.
    #[must_use]
    pub const fn next(self) -> Self { Self(self.0.wrapping_add(1)) }
}

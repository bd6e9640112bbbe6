//! Helpers for explicit little-endian byte-order conversions.
//!
//! Chunk headers carry their multi-byte fields in little-endian order. These
//! helpers keep Clippy expectations scoped to the conversion points so the
//! header code can stay explicit about wire endianness without repeating lint
//! annotations.

/// Serialise a `u16` in little-endian byte order.
///
/// # Examples
///
/// ```
/// use pushwire::byte_order::write_le_u16;
///
/// assert_eq!(write_le_u16(0x1234), [0x34, 0x12]);
/// ```
#[must_use]
pub fn write_le_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Chunk headers are little-endian on the wire."
    )]
    value.to_le_bytes()
}

/// Parse a little-endian `u16` from its on-wire representation.
///
/// # Examples
///
/// ```
/// use pushwire::byte_order::read_le_u16;
///
/// assert_eq!(read_le_u16([0x34, 0x12]), 0x1234);
/// ```
#[must_use]
pub fn read_le_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::little_endian_bytes,
        reason = "Chunk headers are little-endian on the wire."
    )]
    u16::from_le_bytes(bytes)
}

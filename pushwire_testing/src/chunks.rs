//! Raw chunk builders.
//!
//! These write headers by hand so tests can produce chunks a well-behaved
//! sender never would: overlapping offsets, mismatched sizes, truncations.

use pushwire::{ChunkHeader, SessionTag};

/// Build a chunk declaring a `total_size` byte message.
///
/// # Panics
///
/// Panics when `total_size` lies outside `1..=65536`.
#[must_use]
pub fn chunk(tag: u8, offset: u16, total_size: usize, payload: &[u8]) -> Vec<u8> {
    let header = ChunkHeader::try_new(SessionTag::new(tag), offset, total_size)
        .expect("test chunk size must be representable");
    let mut bytes = header.encode().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

/// Split `body` into in-order chunks carrying at most `payload_cap` bytes.
///
/// # Panics
///
/// Panics when `payload_cap` is zero or `body` is empty or over 65536 bytes.
#[must_use]
pub fn message_chunks(tag: u8, body: &[u8], payload_cap: usize) -> Vec<Vec<u8>> {
    assert!(payload_cap > 0, "payload cap must be non-zero");
    let cuts: Vec<usize> = (payload_cap..body.len()).step_by(payload_cap).collect();
    split_at(tag, body, &cuts)
}

/// Split `body` into in-order chunks at the given cut points.
///
/// Cut points are sorted first; those outside `1..body.len()` are ignored.
///
/// # Panics
///
/// Panics when `body` is empty or over 65536 bytes.
#[must_use]
pub fn split_at(tag: u8, body: &[u8], cuts: &[usize]) -> Vec<Vec<u8>> {
    let mut bounds = vec![0];
    bounds.extend(cuts.iter().copied().filter(|&cut| cut > 0 && cut < body.len()));
    bounds.push(body.len());
    bounds.sort_unstable();
    bounds.dedup();

    bounds
        .windows(2)
        .map(|window| {
            let (start, end) = (window[0], window[1]);
            let offset = u16::try_from(start).expect("offset fits in u16");
            chunk(tag, offset, body.len(), &body[start..end])
        })
        .collect()
}

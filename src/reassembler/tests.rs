//! Tests for session tracking, bounds checks, and eviction.

use std::{
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use rstest::{fixture, rstest};

use super::{ChunkReassembler, ReassemblyConfig, ReassemblyError, SizeRedeclaration};
use crate::chunk::{ChunkError, ChunkHeader, MAX_MESSAGE_SIZE, SessionTag};

fn chunk(tag: u8, offset: u16, total_size: usize, payload: &[u8]) -> Vec<u8> {
    let header =
        ChunkHeader::try_new(SessionTag::new(tag), offset, total_size).expect("valid test header");
    let mut bytes = header.encode().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

#[fixture]
fn reassembler() -> ChunkReassembler { ChunkReassembler::default() }

fn assert_fresh(reassembler: &ChunkReassembler) {
    assert!(reassembler.is_idle());
    assert_eq!(reassembler.current_tag(), None);
    assert_eq!(reassembler.buffered_len(), 0);
    assert_eq!(reassembler.bytes_received(), 0);
}

#[rstest]
fn single_chunk_completes_message(mut reassembler: ChunkReassembler) {
    let message = reassembler
        .push(chunk(1, 0, 5, b"hello"))
        .expect("chunk accepted")
        .expect("message complete");

    assert_eq!(message.tag(), SessionTag::new(1));
    assert_eq!(message.body(), b"hello");
    assert_fresh(&reassembler);
}

#[rstest]
fn chunks_are_placed_at_their_offsets(mut reassembler: ChunkReassembler) {
    assert!(
        reassembler
            .push(chunk(4, 3, 6, b"def"))
            .expect("second half accepted")
            .is_none()
    );
    assert_eq!(reassembler.current_tag(), Some(SessionTag::new(4)));
    assert_eq!(reassembler.bytes_received(), 3);
    assert_eq!(reassembler.buffered_len(), 6);

    let message = reassembler
        .push(chunk(4, 0, 6, b"abc"))
        .expect("first half accepted")
        .expect("message complete");
    assert_eq!(message.into_body(), b"abcdef");
    assert_fresh(&reassembler);
}

#[rstest]
fn zero_length_chunk_keeps_session_open(mut reassembler: ChunkReassembler) {
    assert!(
        reassembler
            .push(chunk(2, 0, 3, b""))
            .expect("empty payload is legal")
            .is_none()
    );
    assert_eq!(reassembler.current_tag(), Some(SessionTag::new(2)));
    assert_eq!(reassembler.buffered_len(), 3);
    assert_eq!(reassembler.bytes_received(), 0);
}

#[rstest]
fn new_tag_discards_partial_message(mut reassembler: ChunkReassembler) {
    assert!(
        reassembler
            .push(chunk(10, 0, 6, b"AAA"))
            .expect("accepted")
            .is_none()
    );

    assert!(
        reassembler
            .push(chunk(11, 3, 6, b"BBB"))
            .expect("accepted")
            .is_none(),
        "bytes from the abandoned session must not count towards the new one",
    );
    assert_eq!(reassembler.bytes_received(), 3);

    let message = reassembler
        .push(chunk(11, 0, 6, b"CCC"))
        .expect("accepted")
        .expect("complete");
    assert_eq!(message.body(), b"CCCBBB");
}

#[rstest]
fn tag_wraparound_starts_new_session(mut reassembler: ChunkReassembler) {
    reassembler
        .push(chunk(255, 0, 4, b"xx"))
        .expect("accepted");
    assert_eq!(reassembler.current_tag(), Some(SessionTag::new(255)));

    reassembler.push(chunk(0, 0, 4, b"yy")).expect("accepted");
    assert_eq!(reassembler.current_tag(), Some(SessionTag::new(0)));
    assert_eq!(reassembler.bytes_received(), 2);
}

#[rstest]
#[case::empty(&[][..])]
#[case::four_bytes(&[3, 0, 0, 9][..])]
fn short_chunk_resets_session(mut reassembler: ChunkReassembler, #[case] bytes: &[u8]) {
    reassembler
        .push(chunk(3, 0, 10, b"abcd"))
        .expect("accepted");

    let err = reassembler.push(bytes).expect_err("short chunk rejected");
    assert_eq!(
        err,
        ReassemblyError::Chunk(ChunkError::TooShort { len: bytes.len() })
    );
    assert_fresh(&reassembler);

    reassembler
        .push(chunk(3, 4, 10, b"efghij"))
        .expect("same tag starts a fresh session after a reset");
    assert_eq!(reassembler.bytes_received(), 6);
}

#[rstest]
#[case::past_end(4, b"abc".as_slice())]
#[case::offset_beyond_size(7, b"".as_slice())]
#[case::max_offset(u16::MAX, b"z".as_slice())]
fn out_of_bounds_write_is_rejected(
    mut reassembler: ChunkReassembler,
    #[case] offset: u16,
    #[case] payload: &[u8],
) {
    let err = reassembler
        .push(chunk(5, offset, 6, payload))
        .expect_err("write past declared size rejected");
    assert_eq!(
        err,
        ReassemblyError::OutOfBounds {
            tag: SessionTag::new(5),
            offset,
            len: payload.len(),
            total_size: 6,
        }
    );
    assert_eq!(err.reason(), "out_of_bounds");
    assert_fresh(&reassembler);
}

#[rstest]
fn size_redeclaration_is_rejected_by_default(mut reassembler: ChunkReassembler) {
    reassembler
        .push(chunk(6, 0, 8, b"abcd"))
        .expect("accepted");

    let err = reassembler
        .push(chunk(6, 4, 9, b"efgh"))
        .expect_err("changed size rejected");
    assert_eq!(
        err,
        ReassemblyError::SizeRedeclared {
            tag: SessionTag::new(6),
            previous: 8,
            declared: 9,
        }
    );
    assert_fresh(&reassembler);
}

#[test]
fn size_redeclaration_resizes_when_configured() {
    let config = ReassemblyConfig::default().with_size_redeclaration(SizeRedeclaration::Resize);
    let mut reassembler = ChunkReassembler::new(config);

    reassembler
        .push(chunk(6, 0, 8, b"abcdef"))
        .expect("accepted");
    let message = reassembler
        .push(chunk(6, 0, 4, b""))
        .expect("shrinking resize accepted")
        .expect("counter already covers the smaller size");
    assert_eq!(message.body(), b"abcd");
}

#[test]
fn growing_resize_zero_fills_and_keeps_count() {
    let config = ReassemblyConfig::default().with_size_redeclaration(SizeRedeclaration::Resize);
    let mut reassembler = ChunkReassembler::new(config);

    reassembler
        .push(chunk(7, 0, 4, b"abc"))
        .expect("accepted");
    assert!(
        reassembler
            .push(chunk(7, 6, 8, b"z"))
            .expect("growing resize accepted")
            .is_none()
    );
    assert_eq!(reassembler.buffered_len(), 8);
    assert_eq!(reassembler.bytes_received(), 4);

    // Byte 7 is never written and keeps its zero fill.
    let message = reassembler
        .push(chunk(7, 3, 8, b"defz"))
        .expect("accepted")
        .expect("count reaches the new size");
    assert_eq!(message.body(), b"abcdefz\0");
}

#[test]
fn declared_size_over_cap_is_rejected() {
    let limit = NonZeroUsize::new(16).expect("non-zero");
    let mut reassembler =
        ChunkReassembler::new(ReassemblyConfig::default().with_max_message_size(limit));

    let err = reassembler
        .push(chunk(1, 0, 17, b"x"))
        .expect_err("oversized declaration rejected");
    assert_eq!(
        err,
        ReassemblyError::MessageTooLarge {
            tag: SessionTag::new(1),
            declared: 17,
            limit,
        }
    );
    assert_fresh(&reassembler);
}

#[rstest]
fn largest_declared_size_is_accepted_by_default(mut reassembler: ChunkReassembler) {
    reassembler
        .push(chunk(1, 0, MAX_MESSAGE_SIZE, b"x"))
        .expect("protocol maximum accepted");
    assert_eq!(reassembler.buffered_len(), MAX_MESSAGE_SIZE);
}

#[rstest]
fn duplicate_chunks_count_twice(mut reassembler: ChunkReassembler) {
    reassembler.push(chunk(8, 0, 4, b"ab")).expect("accepted");
    let message = reassembler
        .push(chunk(8, 0, 4, b"ab"))
        .expect("accepted")
        .expect("running counter reaches the declared size");
    assert_eq!(message.body(), &[b'a', b'b', 0, 0]);
}

#[test]
fn idle_session_is_evicted_before_next_chunk() {
    let timeout = Duration::from_secs(30);
    let mut reassembler =
        ChunkReassembler::new(ReassemblyConfig::default().with_idle_timeout(timeout));
    let start = Instant::now();

    reassembler
        .push_at(chunk(9, 0, 4, b"ab"), start)
        .expect("accepted");
    assert_eq!(reassembler.purge_idle_at(start + Duration::from_secs(29)), None);

    assert!(
        reassembler
            .push_at(chunk(9, 2, 4, b"cd"), start + timeout)
            .expect("accepted into a fresh session")
            .is_none(),
        "stale bytes must not complete the message",
    );
    assert_eq!(reassembler.bytes_received(), 2);
}

#[test]
fn purge_idle_reports_evicted_tag() {
    let timeout = Duration::from_millis(100);
    let mut reassembler =
        ChunkReassembler::new(ReassemblyConfig::default().with_idle_timeout(timeout));
    let start = Instant::now();

    reassembler
        .push_at(chunk(12, 0, 4, b"a"), start)
        .expect("accepted");
    assert_eq!(
        reassembler.purge_idle_at(start + timeout),
        Some(SessionTag::new(12))
    );
    assert_fresh(&reassembler);
}

#[rstest]
fn sessions_persist_without_idle_timeout(mut reassembler: ChunkReassembler) {
    let start = Instant::now();
    reassembler
        .push_at(chunk(1, 0, 2, b"a"), start)
        .expect("accepted");
    assert_eq!(
        reassembler.purge_idle_at(start + Duration::from_secs(86_400)),
        None
    );
    assert_eq!(reassembler.current_tag(), Some(SessionTag::new(1)));
}

#[rstest]
fn completed_message_parses_into_fields(mut reassembler: ChunkReassembler) {
    let message = reassembler
        .push(chunk(1, 0, 15, b"abc\ndef\nPAYLOAD"))
        .expect("accepted")
        .expect("complete");
    let parsed = message.parse().expect("valid frame");
    assert_eq!(parsed.source(), "abc");
    assert_eq!(parsed.destination(), "def");
    assert_eq!(parsed.payload(), b"PAYLOAD");
}

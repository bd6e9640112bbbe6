use std::time::Instant;

use super::{ReassemblyError, SizeRedeclaration};
use crate::chunk::SessionTag;

/// Buffer and counters for the message currently being assembled.
#[derive(Debug)]
pub(super) struct Session {
    tag: SessionTag,
    buffer: Vec<u8>,
    bytes_received: usize,
    last_activity: Instant,
}

impl Session {
    pub(super) fn new(tag: SessionTag, total_size: usize, now: Instant) -> Self {
        Self {
            tag,
            buffer: vec![0; total_size],
            bytes_received: 0,
            last_activity: now,
        }
    }

    pub(super) const fn tag(&self) -> SessionTag { self.tag }

    pub(super) fn buffered_len(&self) -> usize { self.buffer.len() }

    pub(super) const fn bytes_received(&self) -> usize { self.bytes_received }

    pub(super) const fn last_activity(&self) -> Instant { self.last_activity }

    pub(super) fn touch(&mut self, now: Instant) { self.last_activity = now; }

    /// Make the buffer match `declared`, applying `policy` on mismatch.
    pub(super) fn ensure_size(
        &mut self,
        declared: usize,
        policy: SizeRedeclaration,
    ) -> Result<(), ReassemblyError> {
        let previous = self.buffer.len();
        if previous == declared {
            return Ok(());
        }
        match policy {
            SizeRedeclaration::Reject => Err(ReassemblyError::SizeRedeclared {
                tag: self.tag,
                previous,
                declared,
            }),
            SizeRedeclaration::Resize => {
                self.buffer.resize(declared, 0);
                Ok(())
            }
        }
    }

    /// Copy `payload` into the buffer at `offset`.
    ///
    /// The write must stay within the buffer; nothing is copied otherwise.
    pub(super) fn write(&mut self, offset: u16, payload: &[u8]) -> Result<(), ReassemblyError> {
        let start = usize::from(offset);
        let out_of_bounds = ReassemblyError::OutOfBounds {
            tag: self.tag,
            offset,
            len: payload.len(),
            total_size: self.buffer.len(),
        };
        let Some(target) = start
            .checked_add(payload.len())
            .and_then(|end| self.buffer.get_mut(start..end))
        else {
            return Err(out_of_bounds);
        };
        target.copy_from_slice(payload);
        self.bytes_received = self.bytes_received.saturating_add(payload.len());
        Ok(())
    }

    pub(super) fn is_complete(&self) -> bool { self.bytes_received >= self.buffer.len() }

    pub(super) fn into_buffer(self) -> Vec<u8> { self.buffer }
}

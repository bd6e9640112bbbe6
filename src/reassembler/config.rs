//! Configuration bounding reassembly resource usage.

use std::{num::NonZeroUsize, time::Duration};

use crate::chunk::MAX_MESSAGE_SIZE;

/// How to treat a chunk that declares a different total size than earlier
/// chunks of the same session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeRedeclaration {
    /// Treat the chunk as malformed and discard the session.
    #[default]
    Reject,
    /// Resize the buffer to the new size, zero-filling growth and truncating
    /// data beyond the new end. Bytes already counted stay counted.
    Resize,
}

/// Settings that bound a [`ChunkReassembler`](super::ChunkReassembler).
///
/// None of these limits change the wire protocol: a sender that stays within
/// 65536 byte messages and keeps sending its chunks never observes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReassemblyConfig {
    /// Largest declared message size that will be buffered.
    pub max_message_size: NonZeroUsize,
    /// Discard a partial message when no chunk has arrived for this long.
    /// `None` keeps partial messages until a new session supersedes them.
    pub idle_timeout: Option<Duration>,
    /// Policy for sessions whose declared size changes mid-message.
    pub size_redeclaration: SizeRedeclaration,
}

/// Largest size the chunk header can declare.
const PROTOCOL_MAX: NonZeroUsize = NonZeroUsize::MIN.saturating_add(MAX_MESSAGE_SIZE - 1);

impl ReassemblyConfig {
    /// Return a copy with the given message size cap.
    #[must_use]
    pub fn with_max_message_size(mut self, max_message_size: NonZeroUsize) -> Self {
        self.max_message_size = max_message_size;
        self
    }

    /// Return a copy that discards partial messages idle for `timeout`.
    #[must_use]
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Return a copy using the given size redeclaration policy.
    #[must_use]
    pub fn with_size_redeclaration(mut self, policy: SizeRedeclaration) -> Self {
        self.size_redeclaration = policy;
        self
    }
}

impl Default for ReassemblyConfig {
    fn default() -> Self {
        Self {
            max_message_size: PROTOCOL_MAX,
            idle_timeout: None,
            size_redeclaration: SizeRedeclaration::Reject,
        }
    }
}

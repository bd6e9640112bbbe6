//! Inbound helper that stitches chunks back into complete message bodies.
//!
//! [`ChunkReassembler`] tracks a single in-flight message keyed by its
//! [`SessionTag`]. Chunks are written into a buffer sized to the declared
//! message length; the message completes once the running count of received
//! payload bytes reaches that length. A chunk carrying a different tag starts
//! a new message and silently abandons any partial data.
//!
//! Completion relies on a plain byte counter rather than tracking covered
//! ranges, which is sound for transports that deliver chunks in order and
//! without duplication.
//!
//! Any rejected chunk discards the session; see [`ReassemblyError`].

mod config;
mod error;
mod session;

use std::time::Instant;

use log::{debug, info};

pub use self::{
    config::{ReassemblyConfig, SizeRedeclaration},
    error::ReassemblyError,
};
use self::session::Session;
use crate::{
    chunk::{Chunk, SessionTag},
    frame::{self, FrameError, ParsedMessage},
};

/// A fully reassembled message body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReassembledMessage {
    tag: SessionTag,
    body: Vec<u8>,
}

impl ReassembledMessage {
    /// Tag shared by the chunks that formed this message.
    #[must_use]
    pub const fn tag(&self) -> SessionTag { self.tag }

    /// Borrow the body; its length equals the declared message size.
    #[must_use]
    pub fn body(&self) -> &[u8] { self.body.as_slice() }

    /// Consume the message, returning the owned body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> { self.body }

    /// Parse the body into a validated message.
    ///
    /// # Errors
    ///
    /// Returns any [`FrameError`] raised by [`frame::parse`].
    pub fn parse(&self) -> Result<ParsedMessage, FrameError> { frame::parse(&self.body) }
}

/// Single-session chunk re-assembler.
///
/// The reassembler is not thread-safe and expects one writer feeding chunks in
/// arrival order; each call finishes before the next chunk is accepted.
#[derive(Debug, Default)]
pub struct ChunkReassembler {
    config: ReassemblyConfig,
    session: Option<Session>,
}

impl ChunkReassembler {
    /// Create a re-assembler with the given limits.
    #[must_use]
    pub fn new(config: ReassemblyConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Return the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReassemblyConfig { &self.config }

    /// Process raw chunk bytes using the current time.
    ///
    /// Returns `Ok(Some(_))` when the chunk completes a message, `Ok(None)`
    /// while more bytes are required, or an error when the chunk is rejected.
    /// The session is reset after a completed message and after every error.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError`] for chunks shorter than the header, writes
    /// beyond the declared size, size redeclarations rejected by the
    /// configuration, and sizes over the configured cap.
    pub fn push(
        &mut self,
        chunk: impl AsRef<[u8]>,
    ) -> Result<Option<ReassembledMessage>, ReassemblyError> {
        self.push_at(chunk, Instant::now())
    }

    /// Process raw chunk bytes using an explicit clock reading.
    ///
    /// Accepting an explicit `now` keeps idle eviction deterministic in tests.
    ///
    /// # Errors
    ///
    /// See [`push`](Self::push).
    pub fn push_at(
        &mut self,
        chunk: impl AsRef<[u8]>,
        now: Instant,
    ) -> Result<Option<ReassembledMessage>, ReassemblyError> {
        self.purge_idle_at(now);

        let chunk = match Chunk::parse(chunk.as_ref()) {
            Ok(chunk) => chunk,
            Err(err) => return Err(self.fail(err.into())),
        };
        let header = *chunk.header();
        let tag = header.tag();
        let declared = header.total_size();

        if self.current_tag() != Some(tag) {
            self.begin(tag);
        }

        let limit = self.config.max_message_size;
        if declared > limit.get() {
            return Err(self.fail(ReassemblyError::MessageTooLarge {
                tag,
                declared,
                limit,
            }));
        }

        let policy = self.config.size_redeclaration;
        let session = self
            .session
            .get_or_insert_with(|| Session::new(tag, declared, now));
        if let Err(err) = session
            .ensure_size(declared, policy)
            .and_then(|()| session.write(header.offset(), chunk.payload()))
        {
            return Err(self.fail(err));
        }
        session.touch(now);

        debug!(
            "chunk accepted: tag={tag}, offset={}, len={}, received={}, total={declared}",
            header.offset(),
            chunk.payload().len(),
            session.bytes_received(),
        );

        if !session.is_complete() {
            return Ok(None);
        }
        Ok(self.session.take().map(|session| ReassembledMessage {
            tag: session.tag(),
            body: session.into_buffer(),
        }))
    }

    /// Discard the partial message if it has been idle for the configured
    /// timeout.
    ///
    /// Returns the tag of the evicted session, if any.
    pub fn purge_idle(&mut self) -> Option<SessionTag> { self.purge_idle_at(Instant::now()) }

    /// Discard the partial message if it has been idle for the configured
    /// timeout, using an explicit clock reading.
    ///
    /// Returns the tag of the evicted session, if any.
    pub fn purge_idle_at(&mut self, now: Instant) -> Option<SessionTag> {
        let timeout = self.config.idle_timeout?;
        let session = self.session.as_ref()?;
        if now.saturating_duration_since(session.last_activity()) < timeout {
            return None;
        }
        let tag = session.tag();
        info!(
            "partial message evicted after idle timeout: tag={tag}, received={}, timeout={timeout:?}",
            session.bytes_received(),
        );
        self.session = None;
        Some(tag)
    }

    /// Discard any partial message, returning to the freshly constructed state.
    pub fn reset(&mut self) { self.session = None; }

    /// Tag of the message currently being assembled.
    #[must_use]
    pub fn current_tag(&self) -> Option<SessionTag> { self.session.as_ref().map(Session::tag) }

    /// Payload bytes counted towards the current message.
    #[must_use]
    pub fn bytes_received(&self) -> usize {
        self.session.as_ref().map_or(0, Session::bytes_received)
    }

    /// Size of the buffer allocated for the current message.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.session.as_ref().map_or(0, Session::buffered_len) }

    /// Whether no message is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool { self.session.is_none() }

    fn begin(&mut self, tag: SessionTag) {
        match self.session.take() {
            Some(previous) if previous.bytes_received() > 0 => info!(
                "session tag changed from {} to {tag}; discarding {} byte(s) of unfinished message",
                previous.tag(),
                previous.bytes_received(),
            ),
            Some(previous) => debug!("session tag changed from {} to {tag}", previous.tag()),
            None => debug!("new session started: tag={tag}"),
        }
    }

    fn fail(&mut self, err: ReassemblyError) -> ReassemblyError {
        self.reset();
        err
    }
}

#[cfg(test)]
mod tests;

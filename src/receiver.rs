//! Transport-facing entry point tying reassembly, framing, and dispatch
//! together.
//!
//! [`PushReceiver::on_chunk`] is the only operation a transport needs: it
//! accepts one chunk's raw bytes and returns nothing. Every failure is
//! terminal for the current message, logged, and otherwise swallowed so the
//! receiver keeps accepting later messages.

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    time::Instant,
};

use log::{debug, error, warn};

use crate::{
    dispatch::{Dispatch, DispatchError},
    frame::{FrameError, ParsedMessage},
    metrics::{self, MessageOutcome},
    panic::DispatchPanic,
    reassembler::{ChunkReassembler, ReassemblyConfig, ReassemblyError},
};

/// What a single chunk led to.
#[derive(Debug)]
pub enum ChunkOutcome {
    /// The chunk was buffered; the message is not complete yet.
    Pending,
    /// The chunk completed a message that was forwarded.
    Forwarded(ParsedMessage),
    /// The chunk was rejected and the session discarded.
    Rejected(ReassemblyError),
    /// The completed body failed validation and was dropped.
    Invalid(FrameError),
    /// The dispatcher reported an error.
    DispatchFailed(DispatchError),
    /// The dispatcher panicked; the panic was contained.
    DispatchPanicked(DispatchPanic),
}

/// Reassembles chunks and forwards each valid message exactly once.
#[derive(Debug)]
pub struct PushReceiver<D> {
    reassembler: ChunkReassembler,
    dispatcher: D,
}

impl<D: Dispatch> PushReceiver<D> {
    /// Create a receiver with default reassembly limits.
    #[must_use]
    pub fn new(dispatcher: D) -> Self { Self::with_config(ReassemblyConfig::default(), dispatcher) }

    /// Create a receiver with explicit reassembly limits.
    #[must_use]
    pub fn with_config(config: ReassemblyConfig, dispatcher: D) -> Self {
        Self {
            reassembler: ChunkReassembler::new(config),
            dispatcher,
        }
    }

    /// Borrow the underlying re-assembler, e.g. to inspect session state.
    #[must_use]
    pub const fn reassembler(&self) -> &ChunkReassembler { &self.reassembler }

    /// Borrow the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &D { &self.dispatcher }

    /// Consume the receiver, returning its dispatcher.
    #[must_use]
    pub fn into_dispatcher(self) -> D { self.dispatcher }

    /// Handle one chunk delivered by the transport.
    pub fn on_chunk(&mut self, chunk: impl AsRef<[u8]>) { self.process_chunk(chunk); }

    /// Handle one chunk and report what it led to.
    pub fn process_chunk(&mut self, chunk: impl AsRef<[u8]>) -> ChunkOutcome {
        self.process_chunk_at(chunk, Instant::now())
    }

    /// Handle one chunk using an explicit clock reading.
    pub fn process_chunk_at(&mut self, chunk: impl AsRef<[u8]>, now: Instant) -> ChunkOutcome {
        metrics::inc_chunks();
        if self.reassembler.purge_idle_at(now).is_some() {
            metrics::inc_discards("idle_timeout");
        }

        let message = match self.reassembler.push_at(chunk, now) {
            Ok(Some(message)) => message,
            Ok(None) => return ChunkOutcome::Pending,
            Err(err) => {
                warn!(
                    "chunk rejected; discarding any partially received message: reason={}, error={err}",
                    err.reason()
                );
                metrics::inc_discards(err.reason());
                return ChunkOutcome::Rejected(err);
            }
        };

        let parsed = match message.parse() {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    "dropping invalid message: tag={}, len={}, error={err}",
                    message.tag(),
                    message.body().len()
                );
                metrics::inc_messages(MessageOutcome::Invalid);
                return ChunkOutcome::Invalid(err);
            }
        };

        debug!(
            "message reassembled: tag={}, source={}, destination={}, payload_len={}",
            message.tag(),
            parsed.source(),
            parsed.destination(),
            parsed.payload().len()
        );
        self.forward(parsed)
    }

    fn forward(&self, message: ParsedMessage) -> ChunkOutcome {
        let dispatcher = &self.dispatcher;
        match catch_unwind(AssertUnwindSafe(|| dispatcher.forward(&message))) {
            Ok(Ok(())) => {
                metrics::inc_messages(MessageOutcome::Forwarded);
                ChunkOutcome::Forwarded(message)
            }
            Ok(Err(err)) => {
                error!(
                    "dispatch failed: source={}, destination={}, error={err}",
                    message.source(),
                    message.destination()
                );
                metrics::inc_messages(MessageOutcome::DispatchFailed);
                ChunkOutcome::DispatchFailed(err)
            }
            Err(payload) => {
                let panic = DispatchPanic::new(message.destination(), payload);
                error!("dispatcher panicked: source={}, {panic}", message.source());
                metrics::inc_messages(MessageOutcome::DispatchFailed);
                ChunkOutcome::DispatchPanicked(panic)
            }
        }
    }
}

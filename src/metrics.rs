//! Metric helpers for `pushwire`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

/// Name of the counter tracking chunks handed to the receiver.
pub const CHUNKS_RECEIVED: &str = "pushwire_chunks_received_total";
/// Name of the counter tracking completed messages, labelled by outcome.
pub const MESSAGES_TOTAL: &str = "pushwire_messages_total";
/// Name of the counter tracking discarded sessions, labelled by reason.
pub const DISCARDS_TOTAL: &str = "pushwire_discards_total";

/// What happened to a fully reassembled message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageOutcome {
    /// The dispatcher accepted the message.
    Forwarded,
    /// The body failed framing validation.
    Invalid,
    /// The dispatcher reported an error or panicked.
    DispatchFailed,
}

impl MessageOutcome {
    /// Label value recorded for this outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forwarded => "forwarded",
            Self::Invalid => "invalid",
            Self::DispatchFailed => "dispatch_failed",
        }
    }
}

/// Record a chunk handed to the receiver.
pub fn inc_chunks() {
    #[cfg(feature = "metrics")]
    ::metrics::counter!(CHUNKS_RECEIVED).increment(1);
}

/// Record the outcome of a completed message.
pub fn inc_messages(outcome: MessageOutcome) {
    #[cfg(feature = "metrics")]
    ::metrics::counter!(MESSAGES_TOTAL, "outcome" => outcome.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = outcome;
}

/// Record a session discarded for `reason`.
pub fn inc_discards(reason: &'static str) {
    #[cfg(feature = "metrics")]
    ::metrics::counter!(DISCARDS_TOTAL, "reason" => reason).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}

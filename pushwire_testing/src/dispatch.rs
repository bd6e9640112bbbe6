//! Dispatchers for observing receiver behaviour.

use std::sync::Mutex;

use pushwire::{Dispatch, DispatchError, ParsedMessage};

/// Records every forwarded message.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    messages: Mutex<Vec<ParsedMessage>>,
}

impl RecordingDispatcher {
    /// Messages forwarded so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the lock panicked.
    #[must_use]
    pub fn messages(&self) -> Vec<ParsedMessage> {
        self.messages.lock().expect("recorder lock poisoned").clone()
    }
}

impl Dispatch for RecordingDispatcher {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        self.messages
            .lock()
            .expect("recorder lock poisoned")
            .push(message.clone());
        Ok(())
    }
}

/// Rejects every message with the configured reason.
#[derive(Debug)]
pub struct FailingDispatcher {
    reason: String,
}

impl FailingDispatcher {
    /// Create a dispatcher rejecting with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Dispatch for FailingDispatcher {
    fn forward(&self, _message: &ParsedMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Rejected(self.reason.clone()))
    }
}

/// Panics on every message.
#[derive(Debug, Default)]
pub struct PanickingDispatcher;

impl Dispatch for PanickingDispatcher {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        panic!("dispatcher exploded for {}", message.destination())
    }
}

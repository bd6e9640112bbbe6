//! Panics caught while a dispatcher forwards a message.
//!
//! A dispatcher that panics must not take the receiver down with it. The
//! receiver catches the unwind and wraps the payload in a [`DispatchPanic`]
//! naming the destination that was being served, so the log line identifies
//! the failing target.

use std::{any::Any, fmt};

/// Panic payload caught around [`Dispatch::forward`](crate::Dispatch::forward).
///
/// ```
/// use pushwire::panic::DispatchPanic;
/// let panic = DispatchPanic::new("weather", Box::new("boom"));
/// assert_eq!(panic.message(), Some("boom"));
/// assert_eq!(panic.to_string(), "dispatch to weather panicked: boom");
///
/// let opaque = DispatchPanic::new("weather", Box::new(5_u32));
/// assert_eq!(opaque.message(), None);
/// ```
#[derive(Debug)]
pub struct DispatchPanic {
    destination: String,
    payload: Box<dyn Any + Send>,
}

impl DispatchPanic {
    /// Wrap `payload` caught while forwarding to `destination`.
    #[must_use]
    pub fn new(destination: impl Into<String>, payload: Box<dyn Any + Send>) -> Self {
        Self {
            destination: destination.into(),
            payload,
        }
    }

    /// Destination the panicking dispatcher was serving.
    #[must_use]
    pub fn destination(&self) -> &str { &self.destination }

    /// Panic message, when the payload is a `String` or `&'static str`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.payload.downcast_ref::<&'static str>().copied())
    }

    /// Consume the wrapper, returning the raw payload for `resume_unwind`.
    #[must_use]
    pub fn into_payload(self) -> Box<dyn Any + Send> { self.payload }
}

impl fmt::Display for DispatchPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "dispatch to {} panicked: {message}", self.destination),
            None => write!(
                f,
                "dispatch to {} panicked with a non-string payload",
                self.destination
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::panic::catch_unwind;

    use super::DispatchPanic;

    #[test]
    fn formatted_panic_message_is_recovered() {
        let payload = catch_unwind(|| panic!("lost {} bytes", 3)).expect_err("closure panics");
        let panic = DispatchPanic::new("sink", payload);
        assert_eq!(panic.message(), Some("lost 3 bytes"));
        assert_eq!(panic.destination(), "sink");
    }

    #[test]
    fn opaque_payload_still_names_destination() {
        let panic = DispatchPanic::new("sink", Box::new(7_i64));
        assert_eq!(
            panic.to_string(),
            "dispatch to sink panicked with a non-string payload"
        );
        assert!(panic.into_payload().downcast::<i64>().is_ok());
    }
}

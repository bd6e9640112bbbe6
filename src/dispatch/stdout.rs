//! Dispatcher printing messages as text lines.

use std::io::{self, Write};

use super::{Dispatch, DispatchConfig, DispatchError};
use crate::frame::ParsedMessage;

/// Writes one line per message to standard output:
///
/// ```text
/// <service> <source> <hex payload>
/// ```
#[derive(Clone, Debug, Default)]
pub struct StdoutDispatcher {
    config: DispatchConfig,
}

impl StdoutDispatcher {
    /// Create a dispatcher naming targets with `config`.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self { Self { config } }

    /// Render the line printed for `message`, without the trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use pushwire::{ParsedMessage, StdoutDispatcher};
    /// let message = ParsedMessage::new("app", "sink", b"\n\xff".to_vec()).expect("valid tokens");
    /// assert_eq!(
    ///     StdoutDispatcher::default().render(&message),
    ///     "io.pushwire.ExtAppMsg.sink app 0aff"
    /// );
    /// ```
    #[must_use]
    pub fn render(&self, message: &ParsedMessage) -> String {
        format!(
            "{} {} {}",
            self.config.resolve(message.destination()).service(),
            message.source(),
            hex::encode(message.payload())
        )
    }
}

impl Dispatch for StdoutDispatcher {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        let line = self.render(message);
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")
            .and_then(|()| stdout.flush())
            .map_err(|source| DispatchError::Io {
                target: self.config.resolve(message.destination()),
                source,
            })
    }
}

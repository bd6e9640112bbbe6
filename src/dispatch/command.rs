//! Dispatcher that hands each message to an external program.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use log::debug;

use super::{Dispatch, DispatchConfig, DispatchError};
use crate::frame::ParsedMessage;

/// Runs a program once per message.
///
/// The program receives the resolved target and the source as arguments:
///
/// ```text
/// <program> <service> <object-path> <interface> <method> <source>
/// ```
///
/// The payload is written verbatim to its standard input. A non-zero exit
/// status is reported as [`DispatchError::Exited`].
#[derive(Clone, Debug)]
pub struct CommandDispatcher {
    program: PathBuf,
    config: DispatchConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher invoking `program` with targets resolved by `config`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, config: DispatchConfig) -> Self {
        Self {
            program: program.into(),
            config,
        }
    }

    /// Program started for each message.
    #[must_use]
    pub fn program(&self) -> &std::path::Path { &self.program }
}

impl Dispatch for CommandDispatcher {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        let target = self.config.resolve(message.destination());
        debug!(
            "starting delivery program: program={}, target={target}",
            self.program.display()
        );

        let mut child = Command::new(&self.program)
            .arg(target.service())
            .arg(target.object_path())
            .arg(target.interface())
            .arg(target.method())
            .arg(message.source())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| DispatchError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Dropping stdin closes the pipe so the program sees end of input.
        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(message.payload()));
        if let Err(source) = written {
            let _ = child.kill();
            let _ = child.wait();
            return Err(DispatchError::Io { target, source });
        }

        let status = child.wait().map_err(|source| DispatchError::Io {
            target: target.clone(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(DispatchError::Exited { target, status })
        }
    }
}

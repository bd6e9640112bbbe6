use std::{io, process::ExitStatus};

use thiserror::Error;

use super::DispatchTarget;

/// Reasons a message could not be forwarded.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The delivery program could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    /// Writing the payload to the target failed.
    #[error("failed to deliver payload to {target}: {source}")]
    Io {
        target: DispatchTarget,
        source: io::Error,
    },
    /// The delivery program reported failure.
    #[error("delivery to {target} failed: {status}")]
    Exited {
        target: DispatchTarget,
        status: ExitStatus,
    },
    /// The target refused the message.
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

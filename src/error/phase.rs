use std::process::ExitStatus;

use thiserror::Error;

/// Reason a phase did not complete. Logged and skipped, never fatal to the run.
#[derive(Debug, Error)]
pub enum PhaseFailure {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },
}

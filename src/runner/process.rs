use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::ProcessPort;
use crate::error::PhaseFailure;
use crate::phase::{ExecutionOutcome, Invocation};

/// Runs the load generator as a child process sharing this terminal's output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

#[async_trait]
impl ProcessPort for SystemProcess {
    async fn spawn(&self, invocation: &Invocation, token: &CancellationToken) -> ExecutionOutcome {
        let program = invocation.program();
        let mut command = Command::new(program);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .kill_on_drop(true);
        // Own process group: a terminal Ctrl+C reaches only this process,
        // which then stops the child through the token.
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                return ExecutionOutcome::Failed(PhaseFailure::Spawn {
                    program: program.to_owned(),
                    source: err,
                });
            }
        };

        tokio::select! {
            biased;
            () = token.cancelled() => {
                // kill() also reaps the child, so nothing is left behind.
                if let Err(err) = child.kill().await {
                    tracing::debug!("Failed to kill '{}': {}", program, err);
                }
                ExecutionOutcome::Cancelled
            }
            status = child.wait() => {
                // A signal sent to the child directly can still make it exit
                // just before the token flips.
                if token.is_cancelled() {
                    return ExecutionOutcome::Cancelled;
                }
                match status {
                    Ok(status) if status.success() => ExecutionOutcome::Completed,
                    Ok(status) => ExecutionOutcome::Failed(PhaseFailure::ExitStatus {
                        program: program.to_owned(),
                        status,
                    }),
                    Err(err) => ExecutionOutcome::Failed(PhaseFailure::Wait {
                        program: program.to_owned(),
                        source: err,
                    }),
                }
            }
        }
    }
}

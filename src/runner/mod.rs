//! Runs a single phase through the external load generator.
mod process;


use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::phase::{ExecutionOutcome, Invocation, Phase};

pub use process::SystemProcess;

/// Capability to start the load generator and wait for it.
///
/// Implementations must stop the process and return
/// [`ExecutionOutcome::Cancelled`] once `token` is cancelled.
#[async_trait]
pub trait ProcessPort: Send + Sync {
    async fn spawn(&self, invocation: &Invocation, token: &CancellationToken) -> ExecutionOutcome;
}

#[async_trait]
impl<T> ProcessPort for Arc<T>
where
    T: ProcessPort + ?Sized,
{
    async fn spawn(&self, invocation: &Invocation, token: &CancellationToken) -> ExecutionOutcome {
        (**self).spawn(invocation, token).await
    }
}

/// Turns phases into invocations against one target and executes them.
pub struct PhaseRunner<P> {
    port: P,
    program: String,
    target: Url,
}

impl<P> PhaseRunner<P>
where
    P: ProcessPort,
{
    #[must_use]
    pub fn new(port: P, program: impl Into<String>, target: Url) -> Self {
        Self {
            port,
            program: program.into(),
            target,
        }
    }

    #[must_use]
    pub fn invocation(&self, phase: &Phase) -> Invocation {
        Invocation::for_phase(&self.program, phase, &self.target)
    }

    /// Executes `invocation`, blocking until the process exits or `token` is cancelled.
    ///
    /// Nothing is spawned when the token is already cancelled.
    pub async fn run(&self, invocation: &Invocation, token: &CancellationToken) -> ExecutionOutcome {
        if token.is_cancelled() {
            return ExecutionOutcome::Cancelled;
        }
        self.port.spawn(invocation, token).await
    }
}

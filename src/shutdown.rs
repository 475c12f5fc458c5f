//! Coordinates process shutdown with the background scheduler.
use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::AppResult;
use crate::scheduler::{CompletionReceiver, SchedulerReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPath {
    /// Every phase ran to the end.
    Completed,
    /// An interrupt cancelled the run.
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shutdown {
    pub path: ShutdownPath,
    pub report: SchedulerReport,
}

pub struct ShutdownCoordinator {
    token: CancellationToken,
    completion: CompletionReceiver,
}

impl ShutdownCoordinator {
    #[must_use]
    pub const fn new(token: CancellationToken, completion: CompletionReceiver) -> Self {
        Self { token, completion }
    }

    /// Waits for either `interrupt` or the scheduler's completion.
    ///
    /// On interrupt the shared token is cancelled and the wait continues until
    /// the scheduler confirms it has stopped, so no child process outlives
    /// this call.
    ///
    /// # Errors
    ///
    /// Returns an error when the scheduler drops its completion latch without
    /// reporting (for example because its task panicked).
    pub async fn wait<I>(self, interrupt: I) -> AppResult<Shutdown>
    where
        I: Future<Output = ()>,
    {
        let Self {
            token,
            mut completion,
        } = self;

        tokio::select! {
            biased;
            report = &mut completion => {
                Ok(Shutdown {
                    path: ShutdownPath::Completed,
                    report: report?,
                })
            }
            () = interrupt => {
                tracing::info!("interrupt received, stopping the current phase...");
                token.cancel();
                let report = completion.await?;
                Ok(Shutdown {
                    path: ShutdownPath::Interrupted,
                    report,
                })
            }
        }
    }
}

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::AppResult;
use crate::phase::PhasePlan;
use crate::runner::{PhaseRunner, ProcessPort};
use crate::scheduler::{PhaseObserver, PhaseScheduler, completion_latch};
use crate::shutdown::{Shutdown, ShutdownCoordinator};

/// Runs `plan` on a background scheduler task while the caller waits for
/// completion or `interrupt`.
///
/// # Errors
///
/// Returns an error when the scheduler task fails before reporting.
pub async fn execute<P, O, I>(
    runner: PhaseRunner<P>,
    plan: PhasePlan,
    observer: O,
    interrupt: I,
) -> AppResult<Shutdown>
where
    P: ProcessPort + 'static,
    O: PhaseObserver + 'static,
    I: Future<Output = ()>,
{
    let token = CancellationToken::new();
    let (completion_tx, completion_rx) = completion_latch();

    tracing::debug!("running {} phase(s)", plan.len());
    let handle = PhaseScheduler::new(plan, runner, observer, token.clone()).spawn(completion_tx);

    let shutdown = ShutdownCoordinator::new(token, completion_rx)
        .wait(interrupt)
        .await;
    handle.await?;
    shutdown
}

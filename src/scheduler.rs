//! Sequential phase scheduler.
//!
//! The scheduler walks a [`PhasePlan`] strictly in order, one load-generator
//! process at a time. A failed phase is logged and skipped; a cancelled phase
//! stops the whole sequence. When the last phase finishes on its own the
//! scheduler cancels the shared token itself so every waiter is released, and
//! it always reports through the one-shot completion latch exactly once.
use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

use crate::phase::{ExecutionOutcome, Invocation, PhasePlan};
use crate::runner::{PhaseRunner, ProcessPort};

pub type CompletionSender = oneshot::Sender<SchedulerReport>;
pub type CompletionReceiver = oneshot::Receiver<SchedulerReport>;

#[must_use]
pub fn completion_latch() -> (CompletionSender, CompletionReceiver) {
    oneshot::channel()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// Index of the phase currently handed to the runner.
    Running(usize),
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerReport {
    /// Phases handed to the runner; a phase skipped because the run was
    /// already cancelled is not counted.
    pub started: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Sink for scheduler progress. Production code logs through `tracing`.
pub trait PhaseObserver: Send + Sync {
    fn phase_started(&self, index: usize, invocation: &Invocation);
    fn phase_finished(&self, index: usize, outcome: &ExecutionOutcome);
    fn sequence_finished(&self, report: &SchedulerReport);
}

impl<T> PhaseObserver for Arc<T>
where
    T: PhaseObserver + ?Sized,
{
    fn phase_started(&self, index: usize, invocation: &Invocation) {
        (**self).phase_started(index, invocation);
    }

    fn phase_finished(&self, index: usize, outcome: &ExecutionOutcome) {
        (**self).phase_finished(index, outcome);
    }

    fn sequence_finished(&self, report: &SchedulerReport) {
        (**self).sequence_finished(report);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PhaseObserver for TracingObserver {
    fn phase_started(&self, index: usize, invocation: &Invocation) {
        tracing::info!(phase = index, "{}", invocation);
    }

    fn phase_finished(&self, index: usize, outcome: &ExecutionOutcome) {
        match outcome {
            ExecutionOutcome::Completed => tracing::info!(phase = index, "finished"),
            ExecutionOutcome::Cancelled => tracing::info!(phase = index, "operation canceled"),
            ExecutionOutcome::Failed(err) => {
                tracing::error!(phase = index, "could not execute command, skipping...: {}", err);
            }
        }
    }

    fn sequence_finished(&self, report: &SchedulerReport) {
        tracing::debug!(
            "phases started={} completed={} failed={}",
            report.started,
            report.completed,
            report.failed
        );
        tracing::info!("all commands finished, exiting...");
    }
}

pub struct PhaseScheduler<P, O> {
    plan: PhasePlan,
    runner: PhaseRunner<P>,
    observer: O,
    token: CancellationToken,
    state_tx: watch::Sender<SchedulerState>,
}

impl<P, O> PhaseScheduler<P, O>
where
    P: ProcessPort,
    O: PhaseObserver,
{
    #[must_use]
    pub fn new(
        plan: PhasePlan,
        runner: PhaseRunner<P>,
        observer: O,
        token: CancellationToken,
    ) -> Self {
        let (state_tx, _) = watch::channel(SchedulerState::Idle);
        Self {
            plan,
            runner,
            observer,
            token,
            state_tx,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
        self.state_tx.subscribe()
    }

    /// Runs every phase in order and reports through `completion`.
    pub async fn run(self, completion: CompletionSender) -> SchedulerReport {
        let mut report = SchedulerReport::default();

        for (index, phase) in self.plan.iter().enumerate() {
            if self.token.is_cancelled() {
                report.cancelled = true;
                break;
            }
            self.state_tx.send_replace(SchedulerState::Running(index));

            let invocation = self.runner.invocation(phase);
            self.observer.phase_started(index, &invocation);
            report.started = report.started.saturating_add(1);

            let outcome = self.runner.run(&invocation, &self.token).await;
            self.observer.phase_finished(index, &outcome);

            match outcome {
                ExecutionOutcome::Completed => {
                    report.completed = report.completed.saturating_add(1);
                }
                ExecutionOutcome::Failed(_) => {
                    report.failed = report.failed.saturating_add(1);
                }
                ExecutionOutcome::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        if !report.cancelled {
            self.observer.sequence_finished(&report);
            self.token.cancel();
        }

        self.state_tx.send_replace(SchedulerState::Stopped);
        if completion.send(report).is_err() {
            tracing::debug!("Completion receiver dropped before the scheduler stopped.");
        }
        report
    }
}

impl<P, O> PhaseScheduler<P, O>
where
    P: ProcessPort + 'static,
    O: PhaseObserver + 'static,
{
    /// Moves the scheduler onto its own task.
    pub fn spawn(self, completion: CompletionSender) -> tokio::task::JoinHandle<SchedulerReport> {
        tokio::spawn(self.run(completion))
    }
}

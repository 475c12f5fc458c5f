use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult, PhaseFailure};
use crate::phase::{ExecutionOutcome, Invocation};
use crate::runner::ProcessPort;
use crate::scheduler::{PhaseObserver, SchedulerReport};

const STARTED_CHANNEL_CAPACITY: usize = 16;

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn poisoned<E: std::fmt::Display>(err: E) -> AppError {
    AppError::validation(format!("lock poisoned: {}", err))
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Scripted {
    Complete,
    Fail,
    BlockUntilCancelled,
}

/// Process port that plays back scripted outcomes and records every invocation.
pub(crate) struct ScriptedPort {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<Invocation>>,
    started_tx: broadcast::Sender<usize>,
}

impl ScriptedPort {
    pub(crate) fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Scripted>,
    {
        let (started_tx, _) = broadcast::channel(STARTED_CHANNEL_CAPACITY);
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
            started_tx,
        }
    }

    /// Receives the zero-based call index each time a process is "spawned".
    pub(crate) fn started(&self) -> broadcast::Receiver<usize> {
        self.started_tx.subscribe()
    }

    pub(crate) fn invocation_lines(&self) -> AppResult<Vec<String>> {
        let calls = self.calls.lock().map_err(poisoned)?;
        Ok(calls.iter().map(ToString::to_string).collect())
    }
}

#[async_trait]
impl ProcessPort for ScriptedPort {
    async fn spawn(&self, invocation: &Invocation, token: &CancellationToken) -> ExecutionOutcome {
        let index = match self.calls.lock() {
            Ok(mut calls) => {
                calls.push(invocation.clone());
                calls.len().saturating_sub(1)
            }
            Err(_) => 0,
        };
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(Scripted::Complete);
        drop(self.started_tx.send(index));

        match next {
            Scripted::Complete => ExecutionOutcome::Completed,
            Scripted::Fail => ExecutionOutcome::Failed(PhaseFailure::Spawn {
                program: invocation.program().to_owned(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted failure"),
            }),
            Scripted::BlockUntilCancelled => {
                token.cancelled().await;
                ExecutionOutcome::Cancelled
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Observed {
    Started(usize, String),
    Finished(usize, &'static str),
    SequenceFinished(SchedulerReport),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<Observed>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> AppResult<Vec<Observed>> {
        Ok(self.events.lock().map_err(poisoned)?.clone())
    }

    pub(crate) fn finished_labels(&self) -> AppResult<Vec<&'static str>> {
        Ok(self
            .events()?
            .into_iter()
            .filter_map(|event| match event {
                Observed::Finished(_, label) => Some(label),
                Observed::Started(..) | Observed::SequenceFinished(_) => None,
            })
            .collect())
    }

    fn push(&self, event: Observed) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl PhaseObserver for RecordingObserver {
    fn phase_started(&self, index: usize, invocation: &Invocation) {
        self.push(Observed::Started(index, invocation.to_string()));
    }

    fn phase_finished(&self, index: usize, outcome: &ExecutionOutcome) {
        let label = match outcome {
            ExecutionOutcome::Completed => "finished",
            ExecutionOutcome::Cancelled => "operation canceled",
            ExecutionOutcome::Failed(_) => "failed",
        };
        self.push(Observed::Finished(index, label));
    }

    fn sequence_finished(&self, report: &SchedulerReport) {
        self.push(Observed::SequenceFinished(*report));
    }
}

use std::time::Duration;

use crate::args::PositiveU64;
use crate::error::PhaseFailure;

/// One bounded load-test window.
///
/// `connections` and `rate` are independently optional; `None` leaves the
/// load generator's own default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub duration: Duration,
    pub connections: Option<PositiveU64>,
    pub rate: Option<PositiveU64>,
}

impl Phase {
    #[must_use]
    pub const fn new(
        duration: Duration,
        connections: Option<PositiveU64>,
        rate: Option<PositiveU64>,
    ) -> Self {
        Self {
            duration,
            connections,
            rate,
        }
    }
}

/// Ordered, never-empty sequence of phases. Insertion order is execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePlan {
    phases: Vec<Phase>,
}

impl PhasePlan {
    /// Wraps `phases`, substituting `fallback` when the list is empty.
    #[must_use]
    pub(crate) fn new_or(phases: Vec<Phase>, fallback: Phase) -> Self {
        if phases.is_empty() {
            return Self {
                phases: vec![fallback],
            };
        }
        Self { phases }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }
}

impl IntoIterator for PhasePlan {
    type Item = Phase;
    type IntoIter = std::vec::IntoIter<Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.into_iter()
    }
}

impl<'plan> IntoIterator for &'plan PhasePlan {
    type Item = &'plan Phase;
    type IntoIter = std::slice::Iter<'plan, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}

/// Result of running a single phase.
#[derive(Debug)]
pub enum ExecutionOutcome {
    Completed,
    Cancelled,
    Failed(PhaseFailure),
}

impl ExecutionOutcome {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, ExecutionOutcome::Cancelled)
    }
}

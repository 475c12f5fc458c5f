use std::ops::Range;
use std::time::Duration;

use rand::Rng;

use super::types::{Phase, PhasePlan};
use crate::args::PositiveU64;

/// Duration of the single phase used when nothing else is requested.
pub const DEFAULT_PHASE_DURATION: Duration = Duration::from_secs(60);
/// Random phase length, in whole minutes (upper bound exclusive).
pub const RANDOM_MINUTES: Range<u64> = 1..5;
/// Random connection count (upper bound exclusive).
pub const RANDOM_CONNECTIONS: Range<u64> = 1..50;
/// Random requests-per-second cap (upper bound exclusive).
pub const RANDOM_RATE: Range<u64> = 3..100;

const SECONDS_PER_MINUTE: u64 = 60;

/// Declarative description of the phases to run.
///
/// `connections[i]` and `rate[i]` pair with `durations[i]`; shorter lists
/// leave the remaining phases without an override. A non-zero `random`
/// count replaces the explicit lists entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRequest {
    pub durations: Vec<Duration>,
    pub connections: Vec<PositiveU64>,
    pub rates: Vec<PositiveU64>,
    pub random: usize,
}

impl PlanRequest {
    /// True when the plan will be the single default phase.
    #[must_use]
    pub fn uses_default_phase(&self) -> bool {
        self.random == 0 && self.durations.is_empty()
    }
}

/// Builds the ordered phase plan. Never fails and never returns an empty plan.
pub fn build_plan<R>(request: &PlanRequest, rng: &mut R) -> PhasePlan
where
    R: Rng + ?Sized,
{
    let default_phase = Phase::new(DEFAULT_PHASE_DURATION, None, None);

    if request.random > 0 {
        let phases = (0..request.random)
            .map(|_| random_phase(rng))
            .collect::<Vec<_>>();
        return PhasePlan::new_or(phases, default_phase);
    }

    let phases = request
        .durations
        .iter()
        .enumerate()
        .map(|(index, duration)| {
            Phase::new(
                *duration,
                request.connections.get(index).copied(),
                request.rates.get(index).copied(),
            )
        })
        .collect::<Vec<_>>();

    PhasePlan::new_or(phases, default_phase)
}

fn random_phase<R>(rng: &mut R) -> Phase
where
    R: Rng + ?Sized,
{
    let minutes = rng.gen_range(RANDOM_MINUTES);
    let connections = rng.gen_range(RANDOM_CONNECTIONS);
    let rate = rng.gen_range(RANDOM_RATE);

    Phase::new(
        Duration::from_secs(minutes.saturating_mul(SECONDS_PER_MINUTE)),
        PositiveU64::try_from(connections).ok(),
        PositiveU64::try_from(rate).ok(),
    )
}

//! Phase descriptors, plan building and load-generator invocation encoding.
mod invocation;
mod plan;
mod types;


pub use invocation::{Invocation, format_duration};
pub use plan::{
    DEFAULT_PHASE_DURATION, PlanRequest, RANDOM_CONNECTIONS, RANDOM_MINUTES, RANDOM_RATE,
    build_plan,
};
pub use types::{ExecutionOutcome, Phase, PhasePlan};

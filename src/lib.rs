//! Core library for the `hey-phases` CLI.
//!
//! A run is a [`phase::PhasePlan`] executed strictly in order by a
//! [`scheduler::PhaseScheduler`], one external load-generator process per
//! phase. A [`shutdown::ShutdownCoordinator`] turns Ctrl+C into cancellation
//! and waits until the scheduler has stopped its child before returning.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod phase;
pub mod runner;
pub mod scheduler;
pub mod shutdown;
mod system;

#[cfg(test)]
mod test_support;

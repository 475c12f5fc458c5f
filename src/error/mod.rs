mod app;
mod config;
mod phase;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use phase::PhaseFailure;
pub use validation::ValidationError;

//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::PhaseArgs;
pub use types::PositiveU64;

pub(crate) use defaults::DEFAULT_EXECUTABLE;
pub(crate) use parsers::parse_duration_value;

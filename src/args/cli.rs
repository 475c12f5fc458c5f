use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u64};
use super::types::PositiveU64;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run a sequence of hey load-test phases against one endpoint, one phase at a time."
)]
pub struct PhaseArgs {
    /// The URL to send requests to, must include the scheme
    #[arg(long, short)]
    pub url: Option<String>,

    /// Phase durations in execution order, comma separated (e.g. 1m,90s,1m30s)
    #[arg(
        long = "periods",
        short = 'p',
        value_delimiter = ',',
        value_parser = parse_duration_arg
    )]
    pub periods: Vec<Duration>,

    /// Connections per phase, matched to --periods by position
    #[arg(
        long = "connections",
        short = 'c',
        value_delimiter = ',',
        value_parser = parse_positive_u64
    )]
    pub connections: Vec<PositiveU64>,

    /// Request rate cap per phase, matched to --periods by position
    #[arg(
        long = "rate",
        short = 'q',
        value_delimiter = ',',
        value_parser = parse_positive_u64
    )]
    pub rate: Vec<PositiveU64>,

    /// Generate this many random phases (1-4m, 1-49 connections, 3-99 rps), ignoring explicit phases
    #[arg(long = "random", short = 'r')]
    pub random: Option<usize>,

    /// Seed for random phase generation (defaults to OS entropy)
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Load generator executable to run for every phase (defaults to `hey`)
    #[arg(long = "executable")]
    pub executable: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./hey-phases.toml or ./hey-phases.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by HEY_PHASES_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

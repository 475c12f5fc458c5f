use crate::args::{PhaseArgs, PositiveU64};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Fills every setting the command line left unset from `config`.
///
/// Lists are taken as a whole: a non-empty CLI list always wins.
///
/// # Errors
///
/// Returns an error when a config period or count is zero or malformed.
pub fn apply_config(mut args: PhaseArgs, config: ConfigFile) -> AppResult<PhaseArgs> {
    if args.url.is_none() {
        args.url = config.url;
    }

    if args.periods.is_empty()
        && let Some(periods) = config.periods
    {
        args.periods = periods
            .iter()
            .map(|value| value.to_duration())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| AppError::config(ConfigError::InvalidPeriod { source: err }))?;
    }

    if args.connections.is_empty()
        && let Some(connections) = config.connections
    {
        args.connections = positive_list("connections", connections)?;
    }

    if args.rate.is_empty()
        && let Some(rate) = config.rate
    {
        args.rate = positive_list("rate", rate)?;
    }

    args.random = args.random.or(config.random);
    args.seed = args.seed.or(config.seed);
    if args.executable.is_none() {
        args.executable = config.executable;
    }

    Ok(args)
}

fn positive_list(field: &'static str, values: Vec<u64>) -> AppResult<Vec<PositiveU64>> {
    values
        .into_iter()
        .map(|value| {
            PositiveU64::try_from(value)
                .map_err(|err| AppError::config(ConfigError::FieldMustBePositive { field, source: err }))
        })
        .collect()
}

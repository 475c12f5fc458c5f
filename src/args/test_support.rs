use clap::Parser;

use super::PhaseArgs;
use crate::error::{AppError, AppResult};

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<PhaseArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    PhaseArgs::try_parse_from(args).map_err(AppError::from)
}

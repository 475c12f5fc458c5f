use rand::SeedableRng;
use rand::rngs::StdRng;
use url::Url;

use crate::args::{DEFAULT_EXECUTABLE, PhaseArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::phase::{PhasePlan, PlanRequest, build_plan};

/// Validated inputs for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub target: Url,
    pub executable: String,
    pub request: PlanRequest,
    pub seed: Option<u64>,
}

impl RunSettings {
    /// Merges the config file into `args` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the config file is invalid, the URL is missing,
    /// or the URL cannot be parsed.
    pub fn resolve(args: PhaseArgs) -> AppResult<Self> {
        let args = match load_config(args.config.as_deref())? {
            Some(config) => apply_config(args, config)?,
            None => args,
        };
        Self::from_args(args)
    }

    /// # Errors
    ///
    /// Returns an error when the URL is missing or cannot be parsed.
    pub fn from_args(args: PhaseArgs) -> AppResult<Self> {
        let Some(raw_url) = args.url.as_deref().filter(|url| !url.trim().is_empty()) else {
            tracing::error!("no url provided, exiting...");
            return Err(AppError::validation(ValidationError::MissingUrl));
        };
        let target = parse_target(raw_url.trim()).inspect_err(|err| {
            tracing::error!("could not parse url, exiting...: {}", err);
        })?;

        Ok(Self {
            target,
            executable: args
                .executable
                .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_owned()),
            request: PlanRequest {
                durations: args.periods,
                connections: args.connections,
                rates: args.rate,
                random: args.random.unwrap_or_default(),
            },
            seed: args.seed,
        })
    }

    /// Builds the phase plan, seeding the random source once for the whole run.
    #[must_use]
    pub fn build_plan(&self) -> PhasePlan {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        if self.request.uses_default_phase() {
            tracing::info!("no periods provided, going to use a default 1m period");
        }
        build_plan(&self.request, &mut rng)
    }
}

fn parse_target(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    if url.host().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost {
            url: raw.to_owned(),
        }));
    }
    Ok(url)
}

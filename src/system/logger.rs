use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV_VARS: [&str; 2] = ["HEY_PHASES_LOG", "RUST_LOG"];
const DEFAULT_DIRECTIVE: &str = "info";
const VERBOSE_DIRECTIVE: &str = "debug";

pub fn init_logging(verbose: bool, no_color: bool) {
    let directive = filter_directive(verbose, |name| std::env::var(name).ok());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_err| EnvFilter::new(DEFAULT_DIRECTIVE));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

/// `HEY_PHASES_LOG` wins over `RUST_LOG`; `--verbose` only applies when neither is set.
fn filter_directive<F>(verbose: bool, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    LOG_ENV_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| {
            if verbose {
                VERBOSE_DIRECTIVE.to_owned()
            } else {
                DEFAULT_DIRECTIVE.to_owned()
            }
        })
}

mod execute;
mod settings;


use clap::Parser;

use crate::args::PhaseArgs;
use crate::error::AppResult;
use crate::runner::{PhaseRunner, SystemProcess};
use crate::scheduler::TracingObserver;
use crate::shutdown::ShutdownPath;
use crate::system::shutdown_handlers::wait_for_interrupt;

pub use execute::execute;
pub use settings::RunSettings;

/// Parses the command line and runs the phase sequence to completion or interrupt.
///
/// # Errors
///
/// Returns an error when configuration is invalid or the runtime cannot start.
pub fn run() -> AppResult<()> {
    let args = PhaseArgs::parse();

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

async fn run_async(args: PhaseArgs) -> AppResult<()> {
    let settings = RunSettings::resolve(args)?;
    let plan = settings.build_plan();
    let RunSettings {
        target, executable, ..
    } = settings;

    let runner = PhaseRunner::new(SystemProcess, executable, target);
    let shutdown = execute(runner, plan, TracingObserver, wait_for_interrupt()).await?;

    if shutdown.path == ShutdownPath::Interrupted {
        tracing::debug!(
            "stopped after {} of the planned phases",
            shutdown.report.started
        );
    }
    tracing::info!("good bye!");
    Ok(())
}

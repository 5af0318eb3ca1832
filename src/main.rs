use std::io;
use std::process::ExitCode;

use anyhow::Context;
use radial_stripes::config::init;
use radial_stripes::driver::{Driver, Outcome};
use tracing::debug;

fn main() -> anyhow::Result<ExitCode> {
    let settings = init().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_writer(io::stderr)
        .init();
    debug!(?settings, "resolved settings");

    let stdin = io::stdin();
    let outcome = Driver::new(stdin.lock(), io::stdout(), &settings.output_dir)
        .with_shape(settings.shape)
        .with_progress(settings.progress)
        .run()?;

    match outcome {
        Outcome::Saved(_) | Outcome::Cancelled => Ok(ExitCode::SUCCESS),
        Outcome::Failed(e) => {
            debug!(error = ?e, "run failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

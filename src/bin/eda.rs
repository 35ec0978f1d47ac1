use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::{error, info};

use talkprep::{config::DataPaths, inspect, logging};

fn main() -> Result<()> {
    logging::init_logging();

    let paths = DataPaths::from_cwd()?;

    let report = inspect::run_eda(&paths.input).inspect_err(|e| error!("{:#}", e))?;

    let mut stdout = io::stdout().lock();
    report
        .render(&mut stdout)
        .context("writing EDA report to stdout")?;
    stdout.flush()?;

    info!("EDA finished");
    Ok(())
}

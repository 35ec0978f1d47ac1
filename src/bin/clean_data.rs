use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::error;

use talkprep::{clean, config::DataPaths, logging};

fn main() -> Result<()> {
    logging::init_logging();

    let paths = DataPaths::from_cwd()?;
    let report =
        clean::run_clean(&paths.input, &paths.output).inspect_err(|e| error!("{:#}", e))?;

    let mut stdout = io::stdout().lock();
    report
        .render(&mut stdout)
        .context("writing cleaning summary to stdout")?;
    stdout.flush()?;
    Ok(())
}

use anyhow::Result;
use sessiongate::cli;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let action = cli::start()?;

    if action.execute()? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

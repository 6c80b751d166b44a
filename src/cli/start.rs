use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;
use tracing::Level;

/// No `-v` leaves the level to telemetry (errors only); each `-v` goes one
/// step further, saturating at trace.
const fn tracing_level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Parses the command line, sets up stderr logging, and picks the gate
/// action to run.
///
/// # Errors
///
/// Returns an error if logging cannot be installed or the arguments do not
/// describe a usable gate.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .unwrap_or_default();
    telemetry::init(tracing_level(verbosity))?;

    dispatch::handler(&matches)
}

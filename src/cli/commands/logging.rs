use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Log level names, indexed by verbosity count.
pub const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Highest numeric verbosity accepted from the environment.
const MAX_VERBOSITY: u8 = 5;

/// Accepts a level name (any case) or a verbosity count up to 5.
fn parse_level(value: &str) -> Result<u8, String> {
    if let Ok(count) = value.parse::<u8>() {
        return if count <= MAX_VERBOSITY {
            Ok(count)
        } else {
            Err(format!("verbosity must be at most {MAX_VERBOSITY}"))
        };
    }

    LEVEL_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(value))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("unknown log level {value:?}, expected one of {LEVEL_NAMES:?}"))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

/// `-v` repeated raises gate logging on stderr; stdout stays reserved for
/// command output.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more on stderr, repeat for more detail (-v warn .. -vvvv trace)")
            .env("SESSIONGATE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

pub mod logging;
pub mod store;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_STATUS: &str = "status";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_REQUIRE: &str = "require";
pub const CMD_INIT: &str = "init";

pub const ARG_CODE: &str = "code";
pub const ARG_PAGE: &str = "page";
pub const ARG_NO_REDIRECT: &str = "no-redirect";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("sessiongate")
        .about("Single access-code session gate")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_STATUS)
                .about("Check the session, exits with 1 when logged out"),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Start a session with the access code")
                .arg(
                    Arg::new(ARG_CODE)
                        .help("Access code entered by the visitor")
                        .required(true),
                ),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Clear the session"))
        .subcommand(
            Command::new(CMD_REQUIRE)
                .about("Check the session and redirect to the login page when logged out")
                .arg(
                    Arg::new(ARG_PAGE)
                        .short('p')
                        .long("page")
                        .help("Path of the current page, used as the post-login return target")
                        .env("SESSIONGATE_PAGE")
                        .default_value("/index.html"),
                )
                .arg(
                    Arg::new(ARG_NO_REDIRECT)
                        .long("no-redirect")
                        .help("Only report the session state")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(CMD_INIT).about("Stamp a logged-in session that has no login time"),
        );

    let command = store::with_args(command);
    logging::with_args(command)
}

use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const ARG_STORE: &str = "store";
pub const ARG_ORIGIN: &str = "origin";
pub const ARG_CONFIG: &str = "config";
pub const ARG_ACCESS_CODE: &str = "access-code";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_STORE)
                .short('s')
                .long("store")
                .help("Path of the JSON session store")
                .env("SESSIONGATE_STORE")
                .default_value(".sessiongate.json")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_ORIGIN)
                .short('o')
                .long("origin")
                .help("Origin the session belongs to, example: https://tv.example.com")
                .env("SESSIONGATE_ORIGIN")
                .default_value("http://localhost")
                .global(true),
        )
        .arg(
            Arg::new(ARG_CONFIG)
                .short('c')
                .long("config")
                .help("JSON configuration object, example: {\"accessCode\": \"...\"}")
                .env("SESSIONGATE_CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_ACCESS_CODE)
                .long("access-code")
                .help("Expected access code, overrides the configuration file")
                .env("SESSIONGATE_ACCESS_CODE")
                .hide_env_values(true)
                .global(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub store: PathBuf,
    pub origin: String,
    pub config: Option<PathBuf>,
    pub access_code: Option<String>,
}

impl Options {
    /// # Errors
    /// Returns an error if a defaulted argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let store = matches
            .get_one::<PathBuf>(ARG_STORE)
            .cloned()
            .context("missing required argument: --store")?;
        let origin = matches
            .get_one::<String>(ARG_ORIGIN)
            .cloned()
            .context("missing required argument: --origin")?;

        Ok(Self {
            store,
            origin,
            config: matches.get_one::<PathBuf>(ARG_CONFIG).cloned(),
            access_code: matches.get_one::<String>(ARG_ACCESS_CODE).cloned(),
        })
    }
}

//! Maps validated CLI matches to an [`Action`].

use crate::cli::actions::Action;
use crate::cli::commands::{
    ARG_CODE, ARG_NO_REDIRECT, ARG_PAGE, CMD_INIT, CMD_LOGIN, CMD_LOGOUT, CMD_REQUIRE, CMD_STATUS,
    store,
};
use crate::cli::globals::GlobalArgs;
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = GlobalArgs::from_options(store::Options::parse(matches)?);

    let (name, sub_m) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    match name {
        CMD_STATUS => Ok(Action::Status { globals }),
        CMD_LOGIN => {
            let code = sub_m
                .get_one::<String>(ARG_CODE)
                .cloned()
                .context("missing required argument: <code>")?;
            Ok(Action::Login {
                globals,
                code: SecretString::from(code),
            })
        }
        CMD_LOGOUT => Ok(Action::Logout { globals }),
        CMD_REQUIRE => Ok(Action::Require {
            globals,
            page: sub_m
                .get_one::<String>(ARG_PAGE)
                .cloned()
                .unwrap_or_default(),
            redirect: !sub_m.get_flag(ARG_NO_REDIRECT),
        }),
        CMD_INIT => Ok(Action::Init { globals }),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;
    use std::path::PathBuf;

    fn matches(args: &[&str]) -> clap::ArgMatches {
        temp_env::with_vars(
            [
                ("SESSIONGATE_STORE", None::<&str>),
                ("SESSIONGATE_ORIGIN", None),
                ("SESSIONGATE_CONFIG", None),
                ("SESSIONGATE_ACCESS_CODE", None),
                ("SESSIONGATE_PAGE", None),
            ],
            || commands::new().get_matches_from(args),
        )
    }

    #[test]
    fn test_login_action() -> Result<()> {
        let action = handler(&matches(&[
            "sessiongate",
            "--store",
            "gate.json",
            "--access-code",
            "secret123",
            "login",
            "wrong",
        ]))?;

        let Action::Login { globals, code } = action else {
            return Err(anyhow!("expected login action"));
        };
        assert_eq!(globals.store, PathBuf::from("gate.json"));
        assert_eq!(globals.origin, "http://localhost");
        assert_eq!(
            globals.access_code.as_ref().map(|c| c.expose_secret().to_string()),
            Some("secret123".to_string())
        );
        assert_eq!(code.expose_secret(), "wrong");
        Ok(())
    }

    #[test]
    fn test_require_action() -> Result<()> {
        let action = handler(&matches(&["sessiongate", "require", "--page", "/a/b.html"]))?;
        let Action::Require { page, redirect, .. } = action else {
            return Err(anyhow!("expected require action"));
        };
        assert_eq!(page, "/a/b.html");
        assert!(redirect);

        let action = handler(&matches(&["sessiongate", "require", "--no-redirect"]))?;
        let Action::Require { redirect, .. } = action else {
            return Err(anyhow!("expected require action"));
        };
        assert!(!redirect);
        Ok(())
    }

    #[test]
    fn test_simple_actions() -> Result<()> {
        assert!(matches!(
            handler(&matches(&["sessiongate", "status"]))?,
            Action::Status { .. }
        ));
        assert!(matches!(
            handler(&matches(&["sessiongate", "logout"]))?,
            Action::Logout { .. }
        ));
        assert!(matches!(
            handler(&matches(&["sessiongate", "init"]))?,
            Action::Init { .. }
        ));
        Ok(())
    }
}

use crate::cli::globals::GlobalArgs;
use crate::gate::{Clock, Navigator, SessionGate, SessionState, SystemClock};
use crate::storage::{FileStorage, Storage};
use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Prints navigations instead of performing them; the caller follows them.
#[derive(Debug)]
pub struct PrintNavigator {
    current_path: String,
}

impl PrintNavigator {
    #[must_use]
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
        }
    }
}

impl Navigator for PrintNavigator {
    fn current_path(&self) -> String {
        self.current_path.clone()
    }

    fn navigate(&self, destination: &str) {
        println!("redirect: {destination}");
    }
}

type CliGate = SessionGate<FileStorage, SystemClock, PrintNavigator>;

fn open_gate(globals: &GlobalArgs, current_path: &str) -> Result<CliGate> {
    let config = globals.gate_config()?;
    let storage = globals.open_storage()?;
    debug!(
        "store {} for origin {}",
        storage.path().display(),
        storage.origin()
    );
    Ok(SessionGate::new(
        storage,
        SystemClock,
        PrintNavigator::new(current_path),
        config,
    ))
}

fn describe(state: SessionState) -> String {
    match state {
        SessionState::LoggedOut => "logged-out".to_string(),
        SessionState::Expired => "expired".to_string(),
        SessionState::LoggedIn { login_time: None } => "logged-in".to_string(),
        SessionState::LoggedIn {
            login_time: Some(millis),
        } => match Utc.timestamp_millis_opt(millis).single() {
            Some(at) => format!("logged-in since {}", at.to_rfc3339()),
            None => "logged-in".to_string(),
        },
    }
}

/// Normalizes the session, then describes what is left of it. An expired
/// session has been cleared by then and reads as logged out.
fn check_status<S, C, N>(gate: &SessionGate<S, C, N>) -> Result<(bool, String)>
where
    S: Storage,
    C: Clock,
    N: Navigator,
{
    let logged_in = gate.is_logged_in().context("failed to check session")?;
    let state = gate.inspect().context("failed to read session")?;
    Ok((logged_in, describe(state)))
}

/// # Errors
/// Returns an error if the configuration or the store cannot be used.
pub fn status(globals: &GlobalArgs) -> Result<bool> {
    let gate = open_gate(globals, "")?;
    let (logged_in, line) = check_status(&gate)?;
    println!("{line}");
    Ok(logged_in)
}

/// # Errors
/// Returns an error if the configuration or the store cannot be used.
pub fn login(globals: &GlobalArgs, code: &SecretString) -> Result<bool> {
    let gate = open_gate(globals, "")?;
    let accepted = gate
        .login(code.expose_secret())
        .context("failed to store session")?;
    println!("{}", if accepted { "accepted" } else { "rejected" });
    Ok(accepted)
}

/// # Errors
/// Returns an error if the configuration or the store cannot be used.
pub fn logout(globals: &GlobalArgs) -> Result<bool> {
    let gate = open_gate(globals, "")?;
    gate.logout().context("failed to clear session")?;
    Ok(true)
}

/// # Errors
/// Returns an error if the configuration or the store cannot be used.
pub fn require(globals: &GlobalArgs, page: String, redirect: bool) -> Result<bool> {
    let gate = open_gate(globals, &page)?;
    gate.require_login(redirect)
        .context("failed to check session")
}

/// # Errors
/// Returns an error if the configuration or the store cannot be used.
pub fn init(globals: &GlobalArgs) -> Result<bool> {
    let gate = open_gate(globals, "")?;
    gate.initialize().context("failed to initialize session")?;
    Ok(true)
}

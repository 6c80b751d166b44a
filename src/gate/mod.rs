//! Session gate: access-code login, 24 hour session marker, and redirects to
//! the login page. UX-only; anyone who can write the store can forge a session.
//!
//! State machine:
//!
//! ```text
//! LoggedOut --login(correct code)--> LoggedIn(t0)
//! LoggedIn(t0) --now - t0 > 24h | logout--> LoggedOut
//! ```
//!
//! Domain outcomes are booleans. Errors returned by gate operations only come
//! from the backing [`Storage`].

mod clock;
mod config;
mod navigation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_ACCESS_CODE, DEFAULT_LOGIN_PAGE, GateConfig};
pub use navigation::{Navigator, RecordingNavigator, page_identifier, redirect_destination};

use crate::storage::{self, Storage};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument, warn};

/// Key holding the logged-in flag.
pub const LOGGED_IN_KEY: &str = "libreTvLoggedIn";

/// Key holding the login time in epoch milliseconds.
pub const LOGIN_TIME_KEY: &str = "libreTvLoginTime";

/// Value of [`LOGGED_IN_KEY`] for an established session.
pub const LOGGED_IN_MARKER: &str = "true";

/// Session lifetime: 24 hours in milliseconds.
pub const SESSION_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Read-only view of the stored session marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    /// `login_time` is `None` until the marker gets its first timestamp.
    LoggedIn { login_time: Option<i64> },
    Expired,
}

impl SessionState {
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

/// Single access-code gate over an injected store, clock, and navigator.
#[derive(Debug)]
pub struct SessionGate<S, C, N> {
    storage: S,
    clock: C,
    navigator: N,
    config: GateConfig,
}

impl<S, C, N> SessionGate<S, C, N>
where
    S: Storage,
    C: Clock,
    N: Navigator,
{
    pub fn new(storage: S, clock: C, navigator: N, config: GateConfig) -> Self {
        Self {
            storage,
            clock,
            navigator,
            config,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Checks the session marker, normalizing it on the way.
    ///
    /// A marker with a missing or empty timestamp is stamped with the current
    /// time. An expired or unreadable timestamp triggers [`Self::logout`].
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn is_logged_in(&self) -> storage::Result<bool> {
        match self.inspect()? {
            SessionState::LoggedOut => Ok(false),
            SessionState::LoggedIn { login_time: None } => {
                debug!("session marker has no login time, stamping it");
                self.stamp_login_time()?;
                Ok(true)
            }
            SessionState::LoggedIn { login_time: Some(_) } => Ok(true),
            SessionState::Expired => {
                warn!("session expired");
                self.logout()?;
                Ok(false)
            }
        }
    }

    /// Classifies the stored marker without writing or navigating.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn inspect(&self) -> storage::Result<SessionState> {
        let flag = self.storage.get(LOGGED_IN_KEY)?;
        if flag.as_deref() != Some(LOGGED_IN_MARKER) {
            return Ok(SessionState::LoggedOut);
        }

        let Some(raw) = self.stored_login_time()? else {
            return Ok(SessionState::LoggedIn { login_time: None });
        };

        let Ok(login_time) = raw.trim().parse::<i64>() else {
            warn!("unparsable login time {raw:?}, treating session as expired");
            return Ok(SessionState::Expired);
        };

        // A login time in the future yields a negative age and stays valid.
        let age = self.clock.now_millis().saturating_sub(login_time);
        if age > SESSION_DURATION_MS {
            Ok(SessionState::Expired)
        } else {
            Ok(SessionState::LoggedIn {
                login_time: Some(login_time),
            })
        }
    }

    /// The code visitors must enter.
    #[must_use]
    pub fn access_code(&self) -> SecretString {
        self.config.resolve_access_code()
    }

    /// Starts a session when `candidate` equals the access code exactly.
    /// Nothing is written on a mismatch.
    ///
    /// # Errors
    /// Returns an error if the session marker cannot be written.
    #[instrument(skip_all)]
    pub fn login(&self, candidate: &str) -> storage::Result<bool> {
        let expected = self.access_code();
        if candidate != expected.expose_secret() {
            info!("login rejected");
            return Ok(false);
        }

        self.storage.set(LOGGED_IN_KEY, LOGGED_IN_MARKER)?;
        self.stamp_login_time()?;
        info!("login accepted");
        Ok(true)
    }

    /// Clears the session marker and navigates to the login page. Safe to call
    /// repeatedly.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    #[instrument(skip(self))]
    pub fn logout(&self) -> storage::Result<()> {
        self.storage.remove(LOGGED_IN_KEY)?;
        self.storage.remove(LOGIN_TIME_KEY)?;
        info!("session cleared");
        self.navigator.navigate(&self.config.login_page);
        Ok(())
    }

    /// Checks the session and, when `redirect` is set and there is none, sends
    /// the visitor to the login page with the current page as the return target.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    #[instrument(skip(self))]
    pub fn require_login(&self, redirect: bool) -> storage::Result<bool> {
        let logged_in = self.is_logged_in()?;
        if !logged_in && redirect {
            let destination =
                redirect_destination(&self.config.login_page, &self.navigator.current_path());
            debug!("redirecting to {destination}");
            self.navigator.navigate(&destination);
        }
        Ok(logged_in)
    }

    /// Page-load normalization: stamps a logged-in marker that has no login
    /// time. Leaves the flag alone and never navigates.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn initialize(&self) -> storage::Result<()> {
        let flag = self.storage.get(LOGGED_IN_KEY)?;
        if flag.as_deref() == Some(LOGGED_IN_MARKER) && self.stored_login_time()?.is_none() {
            debug!("initializing missing login time");
            self.stamp_login_time()?;
        }
        Ok(())
    }

    /// Raw login time; an empty value counts as no timestamp at all.
    fn stored_login_time(&self) -> storage::Result<Option<String>> {
        Ok(self
            .storage
            .get(LOGIN_TIME_KEY)?
            .filter(|raw| !raw.is_empty()))
    }

    fn stamp_login_time(&self) -> storage::Result<()> {
        let now = self.clock.now_millis();
        self.storage.set(LOGIN_TIME_KEY, &now.to_string())
    }
}

pub mod session;

use crate::cli::globals::GlobalArgs;
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Status { globals: GlobalArgs },
    Login { globals: GlobalArgs, code: SecretString },
    Logout { globals: GlobalArgs },
    Require {
        globals: GlobalArgs,
        page: String,
        redirect: bool,
    },
    Init { globals: GlobalArgs },
}

impl Action {
    /// Runs the action. `Ok(false)` means the gate said no: logged out, or a
    /// rejected code.
    ///
    /// # Errors
    /// Returns an error if the configuration or the store cannot be used.
    pub fn execute(self) -> Result<bool> {
        match self {
            Self::Status { globals } => session::status(&globals),
            Self::Login { globals, code } => session::login(&globals, &code),
            Self::Logout { globals } => session::logout(&globals),
            Self::Require {
                globals,
                page,
                redirect,
            } => session::require(&globals, page, redirect),
            Self::Init { globals } => session::init(&globals),
        }
    }
}

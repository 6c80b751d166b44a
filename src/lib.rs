//! # sessiongate
//!
//! `sessiongate` is a single-secret session gate. A visitor who supplies the
//! shared access code gets a session marker that stays valid for 24 hours;
//! anyone without a valid marker is sent to the login page.
//!
//! ## Session Marker
//!
//! The marker is two entries in an origin-scoped key-value store:
//!
//! - `libreTvLoggedIn`: the `"true"` sentinel.
//! - `libreTvLoginTime`: the login time as decimal epoch milliseconds.
//!
//! A marker older than [`gate::SESSION_DURATION_MS`] is expired and cleared the
//! next time it is read.
//!
//! ## Not a Security Boundary
//!
//! The code comparison and the marker both live on the visitor's side, so
//! anyone with access to the store can forge a session. Treat the gate as a UX
//! convenience; real access control must live on a server.
//!
//! ## Collaborators
//!
//! The gate owns no state. Storage ([`storage::Storage`]), time
//! ([`gate::Clock`]), and page location ([`gate::Navigator`]) are injected so the
//! same logic runs in tests, in the `sessiongate` CLI, or behind any other
//! front end.

pub mod cli;
pub mod gate;
pub mod storage;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub use gate::{GateConfig, SessionGate, SessionState};
pub use storage::{FileStorage, MemoryStorage, Storage};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}

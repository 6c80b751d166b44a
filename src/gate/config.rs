//! Gate configuration with layered overrides. Defaults are compiled in, an
//! optional JSON configuration object (the `AUTH_CONFIG` shape, e.g.
//! `{"accessCode": "..."}`) replaces them, and explicit overrides from the
//! command line or environment win over both. Empty values never override.
//!
//! The fallback access code is public. Deployments that care about the gate at
//! all should configure their own code.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

/// Access code used when no configuration provides one.
pub const DEFAULT_ACCESS_CODE: &str = "admin";

/// Page unauthenticated visitors are sent to.
pub const DEFAULT_LOGIN_PAGE: &str = "login.html";

#[derive(Clone, Debug)]
pub struct GateConfig {
    pub access_code: Option<SecretString>,
    pub login_page: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            access_code: None,
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
        }
    }
}

/// Externally provided configuration object.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigObject {
    access_code: Option<String>,
    login_page: Option<String>,
}

impl GateConfig {
    /// Config with an explicit access code and the default login page.
    #[must_use]
    pub fn with_access_code(code: impl Into<String>) -> Self {
        Self {
            access_code: non_empty(code.into()).map(SecretString::from),
            ..Self::default()
        }
    }

    /// Applies a JSON configuration object on top of the defaults.
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: ConfigObject =
            serde_json::from_str(json).context("invalid gate configuration object")?;
        let mut config = Self::default();
        apply_config_object(&mut config, object);
        Ok(config)
    }

    /// Reads the configuration object from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read gate config: {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("in {}", path.display()))
    }

    /// Replaces the access code when `code` is present and non-empty.
    pub fn override_access_code(&mut self, code: Option<String>) {
        if let Some(code) = code.and_then(non_empty) {
            self.access_code = Some(SecretString::from(code));
        }
    }

    /// The configured access code, or [`DEFAULT_ACCESS_CODE`].
    #[must_use]
    pub fn resolve_access_code(&self) -> SecretString {
        match &self.access_code {
            Some(code) if !code.expose_secret().is_empty() => code.clone(),
            _ => {
                warn!("no access code configured, using the built-in default");
                SecretString::from(DEFAULT_ACCESS_CODE.to_string())
            }
        }
    }
}

fn apply_config_object(config: &mut GateConfig, object: ConfigObject) {
    config.override_access_code(object.access_code);
    if let Some(page) = object.login_page.as_deref().and_then(normalize_page) {
        config.login_page = page;
    }
}

// Access codes are compared verbatim, so only emptiness is rejected.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn normalize_page(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_falls_back_to_admin() {
        let config = GateConfig::default();
        assert!(config.access_code.is_none());
        assert_eq!(config.login_page, "login.html");
        assert_eq!(config.resolve_access_code().expose_secret(), "admin");
    }

    #[test]
    fn test_empty_access_code_falls_back() {
        let config = GateConfig::with_access_code("");
        assert!(config.access_code.is_none());
        assert_eq!(config.resolve_access_code().expose_secret(), "admin");

        let config = GateConfig {
            access_code: Some(SecretString::from(String::new())),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
        };
        assert_eq!(config.resolve_access_code().expose_secret(), "admin");
    }

    #[test]
    fn test_access_code_is_not_trimmed() {
        let config = GateConfig::with_access_code(" secret ");
        assert_eq!(config.resolve_access_code().expose_secret(), " secret ");
    }

    #[test]
    fn test_from_json() -> Result<()> {
        let config = GateConfig::from_json(r#"{"accessCode": "secret123"}"#)?;
        assert_eq!(config.resolve_access_code().expose_secret(), "secret123");
        assert_eq!(config.login_page, "login.html");

        let config =
            GateConfig::from_json(r#"{"accessCode": "", "loginPage": "  auth/login.html "}"#)?;
        assert!(config.access_code.is_none());
        assert_eq!(config.login_page, "auth/login.html");

        let config = GateConfig::from_json("{}")?;
        assert!(config.access_code.is_none());
        Ok(())
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GateConfig::from_json("accessCode=secret").is_err());
        assert!(GateConfig::from_json(r#"{"accessCode": 42}"#).is_err());
    }

    #[test]
    fn test_override_access_code_ignores_empty() {
        let mut config = GateConfig::with_access_code("from-file");

        config.override_access_code(None);
        assert_eq!(config.resolve_access_code().expose_secret(), "from-file");

        config.override_access_code(Some(String::new()));
        assert_eq!(config.resolve_access_code().expose_secret(), "from-file");

        config.override_access_code(Some("from-env".to_string()));
        assert_eq!(config.resolve_access_code().expose_secret(), "from-env");
    }

    #[test]
    fn test_debug_does_not_leak_code() {
        let config = GateConfig::with_access_code("secret123");
        assert!(!format!("{config:?}").contains("secret123"));
    }

    #[test]
    fn test_from_json_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("auth-config.json");
        fs::write(&path, r#"{"accessCode": "from-file"}"#)?;

        let config = GateConfig::from_json_file(&path)?;
        assert_eq!(config.resolve_access_code().expose_secret(), "from-file");

        assert!(GateConfig::from_json_file(&dir.path().join("missing.json")).is_err());
        Ok(())
    }
}

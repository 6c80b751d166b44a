use crate::cli::commands::store::Options;
use crate::gate::GateConfig;
use crate::storage::FileStorage;
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub store: PathBuf,
    pub origin: String,
    pub config: Option<PathBuf>,
    pub access_code: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(store: PathBuf, origin: String) -> Self {
        Self {
            store,
            origin,
            config: None,
            access_code: None,
        }
    }

    #[must_use]
    pub fn from_options(options: Options) -> Self {
        let mut args = Self::new(options.store, options.origin);
        args.config = options.config;
        if let Some(code) = options.access_code {
            args.set_access_code(SecretString::from(code));
        }
        args
    }

    /// Explicit code, taking precedence over the config file.
    pub fn set_access_code(&mut self, code: SecretString) {
        self.access_code = Some(code);
    }

    /// Builds the gate configuration: file first, then the explicit code.
    ///
    /// # Errors
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn gate_config(&self) -> Result<GateConfig> {
        let mut config = match &self.config {
            Some(path) => GateConfig::from_json_file(path)?,
            None => GateConfig::default(),
        };
        if let Some(code) = &self.access_code {
            config.override_access_code(Some(code.expose_secret().to_string()));
        }
        Ok(config)
    }

    /// Opens the file store for the configured origin.
    ///
    /// # Errors
    /// Returns an error if the origin is not a valid URL.
    pub fn open_storage(&self) -> Result<FileStorage> {
        FileStorage::open(&self.store, &self.origin)
            .with_context(|| format!("invalid --origin: {}", self.origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            PathBuf::from(".sessiongate.json"),
            "http://localhost".to_string(),
        );
        assert_eq!(args.store, PathBuf::from(".sessiongate.json"));
        assert!(args.config.is_none());
        assert!(args.access_code.is_none());
    }

    #[test]
    fn test_gate_config_defaults_to_admin() -> Result<()> {
        let args = GlobalArgs::new(PathBuf::from("store.json"), "http://localhost".to_string());
        let config = args.gate_config()?;
        assert_eq!(config.resolve_access_code().expose_secret(), "admin");
        Ok(())
    }

    #[test]
    fn test_access_code_overrides_file() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("auth.json");
        fs::write(&path, r#"{"accessCode": "from-file", "loginPage": "enter.html"}"#)?;

        let mut args = GlobalArgs::new(dir.path().join("store.json"), "http://localhost".into());
        args.config = Some(path);
        let config = args.gate_config()?;
        assert_eq!(config.resolve_access_code().expose_secret(), "from-file");
        assert_eq!(config.login_page, "enter.html");

        args.set_access_code(SecretString::from("from-flag".to_string()));
        let config = args.gate_config()?;
        assert_eq!(config.resolve_access_code().expose_secret(), "from-flag");
        assert_eq!(config.login_page, "enter.html");
        Ok(())
    }

    #[test]
    fn test_from_options_carries_every_field() -> Result<()> {
        let args = GlobalArgs::from_options(Options {
            store: PathBuf::from("/tmp/store.json"),
            origin: "https://tv.example.com".to_string(),
            config: Some(PathBuf::from("/etc/sessiongate/auth.json")),
            access_code: Some("secret123".to_string()),
        });
        assert_eq!(args.store, PathBuf::from("/tmp/store.json"));
        assert_eq!(args.origin, "https://tv.example.com");
        assert_eq!(
            args.config.as_deref(),
            Some(PathBuf::from("/etc/sessiongate/auth.json").as_path())
        );
        assert_eq!(
            args.access_code.as_ref().map(|code| code.expose_secret()),
            Some("secret123")
        );

        let args = GlobalArgs::from_options(Options {
            store: PathBuf::from("store.json"),
            origin: "http://localhost".to_string(),
            config: None,
            access_code: None,
        });
        assert!(args.access_code.is_none());
        assert_eq!(args.gate_config()?.resolve_access_code().expose_secret(), "admin");
        Ok(())
    }

    #[test]
    fn test_open_storage_rejects_bad_origin() {
        let args = GlobalArgs::new(PathBuf::from("store.json"), "localhost".to_string());
        assert!(args.open_storage().is_err());
    }
}

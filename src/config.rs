//! Process configuration.
//!
//! The API key is a secret and is only ever read from the environment or a
//! `.env` file. The other settings have defaults and can also be overridden on
//! the command line.

use crate::{
    client::{DEFAULT_BASE_URL, DEFAULT_SHELTER_ID},
    Error, PetfinderClient, Result,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const API_KEY_VAR: &str = "PETFINDER_KEY";
/// Older deployments exported the key in lower case.
pub const LEGACY_API_KEY_VAR: &str = "petfinder_key";
pub const SHELTER_ID_VAR: &str = "PETFINDER_SHELTER_ID";
pub const BASE_URL_VAR: &str = "PETFINDER_BASE_URL";
pub const TIMEOUT_VAR: &str = "PETFINDER_TIMEOUT_SECS";

/// Settings needed to talk to Petfinder.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub shelter_id: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Loads `.env` from the current directory (or a parent) into the process
    /// environment, then reads the configuration from it.
    ///
    /// Variables that are already exported win over the file.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        Self::from_env()
    }

    /// Reads the configuration from the process environment, falling back to
    /// the variables in the dotenv file at `path`. Does not modify the environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = dotenvy::from_path_iter(path)
            .and_then(|vars| vars.collect::<std::result::Result<HashMap<_, _>, _>>())
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to read {}: {}", path.display(), e))
            })?;

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if no API key is set or the
    /// timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_VAR)
            .or_else(|| non_empty(LEGACY_API_KEY_VAR))
            .ok_or_else(|| {
                Error::ConfigurationError(format!("{} is not set", API_KEY_VAR))
            })?;

        let timeout = match non_empty(TIMEOUT_VAR) {
            Some(secs) => {
                let secs = secs.trim().parse::<u64>().map_err(|e| {
                    Error::ConfigurationError(format!("Invalid {}: {}", TIMEOUT_VAR, e))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            shelter_id: non_empty(SHELTER_ID_VAR).unwrap_or_else(|| DEFAULT_SHELTER_ID.to_string()),
            base_url: non_empty(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
        })
    }

    /// Builds a [`PetfinderClient`] from these settings.
    pub fn client(&self) -> Result<PetfinderClient> {
        let mut builder = PetfinderClient::builder()
            .base_url(&self.base_url)?
            .api_key(self.api_key.clone())
            .shelter_id(self.shelter_id.clone())
            .default_header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )?;

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("shelter_id", &self.shelter_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.shelter_id, "MA38");
        assert_eq!(config.base_url, "http://api.petfinder.com");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_legacy_key_name() {
        let config = Config::from_lookup(lookup(&[(LEGACY_API_KEY_VAR, "old")])).unwrap();
        assert_eq!(config.api_key, "old");

        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "new"),
            (LEGACY_API_KEY_VAR, "old"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "new");
    }

    #[test]
    fn test_missing_key() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, " ")])).unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (SHELTER_ID_VAR, "MA01"),
            (BASE_URL_VAR, "http://localhost:8080"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.shelter_id, "MA01");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(config.client().is_ok());
    }

    #[test]
    fn test_bad_timeout() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret"), (TIMEOUT_VAR, "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn test_key_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# deployment secrets").unwrap();
        writeln!(file, "petfinder_key=from-dotenv").unwrap();
        writeln!(file, "PETFINDER_SHELTER_ID=MA12").unwrap();
        file.flush().unwrap();

        let config = Config::from_env_file(file.path()).unwrap();
        assert_eq!(config.api_key, "from-dotenv");
        assert_eq!(config.shelter_id, "MA12");
    }

    #[test]
    fn test_missing_env_file() {
        let err = Config::from_env_file("/nonexistent/cuties/.env").unwrap_err();
        assert!(matches!(err, Error::ConfigurationError(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "hunter2")])).unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}

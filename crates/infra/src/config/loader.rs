//! Configuration loader
//!
//! Builds a [`ClientConfig`] from process environment variables.
//!
//! ## Environment Variables
//! Every [`ClientConfig`] field maps to `PAYBRIDGE_<FIELD>`:
//! - `PAYBRIDGE_APP_ID`, `PAYBRIDGE_SECRET` (required)
//! - `PAYBRIDGE_MCH_ID`, `PAYBRIDGE_KEY`, `PAYBRIDGE_AES_KEY`
//! - `PAYBRIDGE_SUB_MCH_ID`, `PAYBRIDGE_SUB_APPID`
//! - `PAYBRIDGE_CERT_PATH`, `PAYBRIDGE_KEY_PATH`, `PAYBRIDGE_ROOTCA_PATH`
//! - `PAYBRIDGE_SANDBOX` (`1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off`)
//! - `PAYBRIDGE_API_BASE_URL`, `PAYBRIDGE_TOKEN_BASE_URL`
//! - `PAYBRIDGE_CACHE_NAMESPACE`, `PAYBRIDGE_TIMEOUT_SECS`
//!
//! A `.env` file is only read when [`load_dotenv`] is called.

use std::path::PathBuf;

use paybridge_domain::{ClientConfig, ConfigSource, PayBridgeError, Result};

/// Default variable prefix
pub const ENV_PREFIX: &str = "PAYBRIDGE_";

/// [`ConfigSource`] over `std::env`, keyed `<prefix><KEY>`.
#[derive(Debug, Clone)]
pub struct EnvConfigSource {
    prefix: String,
}

impl EnvConfigSource {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    fn var_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_ascii_uppercase())
    }
}

impl Default for EnvConfigSource {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}

impl ConfigSource for EnvConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(self.var_name(key)).ok()
    }
}

/// Load configuration from `PAYBRIDGE_*` environment variables
///
/// # Errors
/// Returns `PayBridgeError::Config` if `PAYBRIDGE_APP_ID` or
/// `PAYBRIDGE_SECRET` is missing.
pub fn load_from_env() -> Result<ClientConfig> {
    load_from_env_with_prefix(ENV_PREFIX)
}

/// Load configuration from environment variables with a custom prefix
///
/// # Errors
/// See [`load_from_env`].
pub fn load_from_env_with_prefix(prefix: &str) -> Result<ClientConfig> {
    let config = ClientConfig::from_source(&EnvConfigSource::new(prefix))?;
    tracing::info!(app_id = %config.app_id, sandbox = config.sandbox, "Configuration loaded from environment variables");
    Ok(config)
}

/// Read a `.env` file from the current directory or its parents into the
/// process environment. Variables that are already set win.
///
/// # Returns
/// The file that was loaded, or `None` when no `.env` file exists.
///
/// # Errors
/// Returns `PayBridgeError::Config` if a file exists but cannot be parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(Some(path))
        }
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(PayBridgeError::Config(format!("Failed to load .env file: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_var_names_are_prefixed_and_uppercased() {
        let source = EnvConfigSource::new("TEST_PB_");
        assert_eq!(source.var_name("app_id"), "TEST_PB_APP_ID");
        assert_eq!(EnvConfigSource::default().var_name("rootca_path"), "PAYBRIDGE_ROOTCA_PATH");
    }

    #[test]
    fn test_load_from_env_with_prefix() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TEST_PB_LOADER_APP_ID", "wx2421b1c4370ec43b");
        std::env::set_var("TEST_PB_LOADER_SECRET", "app-secret");
        std::env::set_var("TEST_PB_LOADER_MCH_ID", "10000100");
        std::env::set_var("TEST_PB_LOADER_SANDBOX", "on");
        std::env::set_var("TEST_PB_LOADER_TIMEOUT_SECS", "15");

        let config = load_from_env_with_prefix("TEST_PB_LOADER_").unwrap();
        assert_eq!(config.app_id, "wx2421b1c4370ec43b");
        assert_eq!(config.mch_id, "10000100");
        assert!(config.sandbox);
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.key, None);

        for key in ["APP_ID", "SECRET", "MCH_ID", "SANDBOX", "TIMEOUT_SECS"] {
            std::env::remove_var(format!("TEST_PB_LOADER_{key}"));
        }
    }

    #[test]
    fn test_load_from_env_missing_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("TEST_PB_MISSING_APP_ID", "wx1");
        std::env::remove_var("TEST_PB_MISSING_SECRET");

        let result = load_from_env_with_prefix("TEST_PB_MISSING_");
        assert!(matches!(result, Err(PayBridgeError::Config(_))), "Should be a Config error");

        std::env::remove_var("TEST_PB_MISSING_APP_ID");
    }
}

//! Integration tests for configuration loader
//!
//! Tests the end-to-end path from environment variables to a working
//! client.

use std::sync::Mutex;

use paybridge_domain::{ConfigSource, PayBridgeError};
use paybridge_infra::config::{self, EnvConfigSource};
use paybridge_infra::PlatformClient;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: &[(&str, &str)] = &[
    ("IT_PB_APP_ID", "wx2421b1c4370ec43b"),
    ("IT_PB_SECRET", "app-secret"),
    ("IT_PB_MCH_ID", "10000100"),
    ("IT_PB_KEY", "192006250b4c09247ec02edce69f6a2d"),
    ("IT_PB_SANDBOX", "yes"),
    ("IT_PB_API_BASE_URL", "https://api.example.com/"),
    ("IT_PB_CACHE_NAMESPACE", "it"),
];

#[test]
fn test_env_config_builds_a_client() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    for (key, value) in VARS {
        std::env::set_var(key, value);
    }

    let result = config::load_from_env_with_prefix("IT_PB_");
    assert!(result.is_ok(), "Failed to load config from env: {:?}", result.err());
    let config = result.unwrap();

    assert_eq!(config.mch_id, "10000100");
    assert_eq!(config.cache_namespace, "it");
    assert!(config.sandbox);

    let client = PlatformClient::new(config).expect("client should build without certificates");
    assert_eq!(client.link("pay/micropay"), "https://api.example.com/sandboxnew/pay/micropay");
    assert!(client.credential().sign_key.is_some());
    assert!(!client.dispatcher().has_mutual_tls());

    for (key, _) in VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn test_env_source_typed_lookups() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    std::env::set_var("IT_PB_TYPED_TIMEOUT_SECS", "30");
    std::env::set_var("IT_PB_TYPED_SANDBOX", "off");

    let source = EnvConfigSource::new("IT_PB_TYPED_");
    assert_eq!(source.int_or("timeout_secs", 0), 30);
    assert!(!source.bool_or("sandbox", true));
    assert_eq!(source.string_or("missing", "fallback"), "fallback");

    std::env::remove_var("IT_PB_TYPED_TIMEOUT_SECS");
    std::env::remove_var("IT_PB_TYPED_SANDBOX");
}

#[test]
fn test_missing_required_vars_is_config_error() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let result = config::load_from_env_with_prefix("IT_PB_ABSENT_");
    assert!(matches!(result, Err(PayBridgeError::Config(_))));
}

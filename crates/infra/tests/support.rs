#![allow(dead_code)]

use std::sync::Once;

use paybridge_domain::ClientConfig;

pub const APP_ID: &str = "wx2421b1c4370ec43b";
pub const SECRET: &str = "app-secret";
pub const MCH_ID: &str = "10000100";
pub const SIGN_KEY: &str = "192006250b4c09247ec02edce69f6a2d";

static TRACING: Once = Once::new();

/// Route SDK logs through the test harness output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("paybridge_core=debug,paybridge_infra=debug").try_init();
    });
}

/// Merchant configuration pointing both base URLs at `base_url`.
pub fn merchant_config(base_url: &str) -> ClientConfig {
    let mut config = ClientConfig::new(APP_ID, SECRET);
    config.mch_id = MCH_ID.to_string();
    config.key = Some(SIGN_KEY.to_string());
    config.api_base_url = base_url.to_string();
    config.token_base_url = base_url.to_string();
    config
}

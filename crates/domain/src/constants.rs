//! Protocol constants
//!
//! Field names, URL suffixes and token timing shared by every crate in the
//! workspace.

// Signing fields
pub const FIELD_SIGN: &str = "sign";
pub const FIELD_SIGN_TYPE: &str = "sign_type";
pub const FIELD_NONCE_STR: &str = "nonce_str";

// Payment boilerplate fields
pub const FIELD_APPID: &str = "appid";
pub const FIELD_MCH_ID: &str = "mch_id";
pub const FIELD_SUB_MCH_ID: &str = "sub_mch_id";
pub const FIELD_SUB_APPID: &str = "sub_appid";
pub const FIELD_PREPAY_ID: &str = "prepay_id";

// Notify payload and acknowledgement fields
pub const FIELD_REQ_INFO: &str = "req_info";
pub const FIELD_RETURN_CODE: &str = "return_code";
pub const FIELD_RETURN_MSG: &str = "return_msg";
pub const FIELD_ERR_CODE_DES: &str = "err_code_des";
pub const RETURN_CODE_SUCCESS: &str = "SUCCESS";
pub const RETURN_CODE_FAIL: &str = "FAIL";

// Access token exchange
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const EXPIRES_IN_KEY: &str = "expires_in";
pub const GRANT_TYPE_CLIENT_CREDENTIAL: &str = "client_credential";
pub const TOKEN_URL_SUFFIX: &str = "/cgi-bin/token";
pub const TOKEN_SAFE_SECONDS: i64 = 500;
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 7200;

// Endpoints
pub const DEFAULT_API_BASE_URL: &str = "https://api.mch.weixin.qq.com";
pub const DEFAULT_TOKEN_BASE_URL: &str = "https://api.weixin.qq.com";
pub const SANDBOX_URL_SUFFIX: &str = "/sandboxnew";

// Cache
pub const DEFAULT_CACHE_NAMESPACE: &str = "paybridge";

// XML wire format
pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;
pub const XML_ROOT: &str = "xml";

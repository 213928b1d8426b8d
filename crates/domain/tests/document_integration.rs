//! Integration tests for the document model
//!
//! Exercises path lookups, typed fallbacks and the serde bridge the way the
//! codecs and the token cache use them.

use paybridge_domain::{ClientConfig, Document, DocumentValue, PayBridgeError};
use serde_json::json;

fn order_query_reply() -> Document {
    serde_json::from_value(json!({
        "return_code": "SUCCESS",
        "total_fee": 888,
        "settlement_ratio": 0.6,
        "is_subscribe": true,
        "promotion_detail": {
            "promotion_id": "109519",
            "goods_detail": [{"goods_id": "g-1"}, {"goods_id": "g-2"}]
        }
    }))
    .expect("JSON object")
}

/// Validates typed lookups over a decoded reply.
///
/// Assertions:
/// - Dotted paths resolve through nested documents
/// - Typed getters fall back on absent keys and mismatched variants
#[test]
fn typed_lookups_with_fallbacks() {
    let doc = order_query_reply();

    assert_eq!(doc.get_str("promotion_detail.promotion_id"), Some("109519"));
    assert_eq!(doc.i64_or("total_fee", 0), 888);
    assert!((doc.f64_or("settlement_ratio", 0.0) - 0.6).abs() < f64::EPSILON);
    assert!(doc.bool_or("is_subscribe", false));
    assert_eq!(doc.get_array("promotion_detail.goods_detail").map(<[_]>::len), Some(2));

    assert_eq!(doc.i64_or("return_code", -1), -1);
    assert_eq!(doc.string_or("missing.path", "none"), "none");
    assert!(doc.get_path("total_fee.nested").is_none());
}

#[test]
fn without_keys_leaves_original_untouched() {
    let doc = order_query_reply();
    let trimmed = doc.without_keys(&["promotion_detail", "is_subscribe"]);

    assert_eq!(trimmed.sorted_keys(), vec!["return_code", "settlement_ratio", "total_fee"]);
    assert!(doc.contains_key("promotion_detail"));
}

#[test]
fn json_integers_narrow_and_floats_stay_floats() {
    let doc = order_query_reply();
    assert_eq!(doc.get("total_fee"), Some(&DocumentValue::Integer(888)));
    assert_eq!(doc.get("settlement_ratio"), Some(&DocumentValue::Float(0.6)));

    let back = serde_json::Value::from(&doc);
    assert_eq!(back["promotion_detail"]["goods_detail"][1]["goods_id"], "g-2");
}

#[test]
fn non_object_json_is_rejected() {
    assert!(serde_json::from_value::<Document>(json!([1, 2, 3])).is_err());
}

#[test]
fn client_config_round_trips_through_serde() {
    let config: ClientConfig = serde_json::from_value(json!({
        "app_id": "wx2421b1c4370ec43b",
        "secret": "app-secret",
        "key_path": "/etc/paybridge/apiclient_key.pem"
    }))
    .expect("config");

    assert_eq!(config.api_base_url, "https://api.mch.weixin.qq.com");
    assert!(matches!(config.credential(), Err(PayBridgeError::ConfigurationFatal(_))));
}

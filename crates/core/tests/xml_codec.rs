//! Integration tests for the XML wire codec
//!
//! Covers the repeated-tag and padding conventions end to end, plus the
//! malformed inputs the decoder must reject.

use paybridge_core::codec::{self, XmlCodec, XmlOptions};
use paybridge_domain::{Document, DocumentValue, PayBridgeError, WireFormat};

fn decode(xml: &str) -> Document {
    XmlCodec::default().decode(xml.as_bytes()).expect("valid XML")
}

#[test]
fn repeated_siblings_become_an_array() {
    let doc = decode("<xml><item>1</item><item>2</item></xml>");
    assert_eq!(
        doc.get("item"),
        Some(&DocumentValue::Array(vec![DocumentValue::Integer(1), DocumentValue::Integer(2)]))
    );
}

#[test]
fn single_element_array_survives_with_padding() {
    let codec = XmlCodec::new(XmlOptions::default().with_padding(true));
    let doc = Document::new().with("coupon_id", DocumentValue::Array(vec!["C100".into()]));

    let encoded = codec.encode(&doc);
    assert!(encoded.is_complete());
    let xml = String::from_utf8(encoded.bytes.clone()).unwrap();
    assert!(xml.contains("<coupon_id><![CDATA[C100]]></coupon_id><coupon_id><![CDATA[]]></coupon_id>"));

    let decoded = codec.decode(&encoded.bytes).unwrap();
    assert_eq!(decoded, doc);
}

#[test]
fn single_element_array_collapses_without_padding() {
    let codec = XmlCodec::new(XmlOptions::default().with_padding(false));
    let doc = Document::new().with("coupon_id", DocumentValue::Array(vec!["C100".into()]));

    let decoded = codec.decode(&codec.encode(&doc).bytes).unwrap();
    assert_eq!(decoded.get_str("coupon_id"), Some("C100"));
}

#[test]
fn always_array_paths_decode_as_arrays() {
    let codec = XmlCodec::new(XmlOptions::default().with_array_path("detail.goods"));
    let doc = codec
        .decode(b"<xml><detail><goods><goods_id>1001</goods_id></goods></detail></xml>")
        .unwrap();

    let goods = doc.get_array("detail.goods").expect("goods array");
    assert_eq!(goods.len(), 1);
    assert_eq!(goods[0].as_document().map(|g| g.i64_or("goods_id", 0)), Some(1001));
}

#[test]
fn nested_documents_and_cdata() {
    let doc = decode(
        "<xml><body><![CDATA[coffee & <cake>]]></body><scene><store_id>SZ001</store_id></scene></xml>",
    );
    assert_eq!(doc.get_str("body"), Some("coffee & <cake>"));
    assert_eq!(doc.get_str("scene.store_id"), Some("SZ001"));
}

#[test]
fn outermost_element_is_skipped_whatever_its_name() {
    let doc = decode("<root><return_code>SUCCESS</return_code></root>");
    assert_eq!(doc.get_str("return_code"), Some("SUCCESS"));
}

#[test]
fn declaration_and_whitespace_are_ignored() {
    let doc = decode("<?xml version=\"1.0\"?>\n<xml>\n  <total_fee>88</total_fee>\n</xml>\n");
    assert_eq!(doc.i64_or("total_fee", 0), 88);
}

#[test]
fn malformed_input_is_an_encoding_error() {
    for input in ["<xml><a>1</b></xml>", "<xml><a>1</a>", "", "<xml></xml><xml></xml>"] {
        let result = XmlCodec::default().decode(input.as_bytes());
        assert!(matches!(result, Err(PayBridgeError::Encoding(_))), "accepted {input:?}");
    }
}

#[test]
fn unrepresentable_fields_are_reported_not_fatal() {
    let doc = Document::new().with("ok", "yes").with("ratio", f64::NAN).with("1bad", "x");

    let encoded = XmlCodec::default().encode(&doc);

    let paths: Vec<_> = encoded.skipped.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["1bad", "ratio"]);
    let decoded = XmlCodec::default().decode(&encoded.bytes).unwrap();
    assert_eq!(decoded.len(), 1);
}

#[test]
fn format_dispatch_covers_json() {
    let doc = Document::new().with("errcode", 0).with("errmsg", "ok");
    let bytes = codec::encode(&doc, WireFormat::Json).unwrap();
    assert_eq!(codec::decode(&bytes, WireFormat::Json).unwrap(), doc);
}

//! Acknowledgement documents returned to notify callbacks

use paybridge_domain::constants::{
    FIELD_ERR_CODE_DES, FIELD_RETURN_CODE, FIELD_RETURN_MSG, RETURN_CODE_FAIL, RETURN_CODE_SUCCESS,
};
use paybridge_domain::{Document, DocumentValue};

use crate::codec::XmlCodec;

/// Reply body for an inbound notification.
///
/// Always carries `return_code`; failures carry either `return_msg` or, for
/// scanned-order callbacks, `err_code_des`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyAck {
    document: Document,
}

impl NotifyAck {
    #[must_use]
    pub fn success() -> Self {
        let document =
            Document::new().with(FIELD_RETURN_CODE, RETURN_CODE_SUCCESS).with(FIELD_RETURN_MSG, "OK");
        Self { document }
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        let document =
            Document::new().with(FIELD_RETURN_CODE, RETURN_CODE_FAIL).with(FIELD_RETURN_MSG, message.into());
        Self { document }
    }

    /// Failure reported through `err_code_des` instead of `return_msg`.
    #[must_use]
    pub fn fail_with_description(description: impl Into<String>) -> Self {
        let document = Document::new()
            .with(FIELD_RETURN_CODE, RETURN_CODE_FAIL)
            .with(FIELD_ERR_CODE_DES, description.into());
        Self { document }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.document.get_str(FIELD_RETURN_CODE) == Some(RETURN_CODE_SUCCESS)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<DocumentValue>) {
        self.document.insert(key, value);
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Encoded reply body. Every field is a plain string, so nothing is ever
    /// skipped.
    #[must_use]
    pub fn to_xml(&self) -> Vec<u8> {
        XmlCodec::default().encode(&self.document).bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_ack_xml() {
        let xml = String::from_utf8(NotifyAck::success().to_xml()).unwrap();
        assert!(xml.ends_with(
            "<xml><return_code><![CDATA[SUCCESS]]></return_code><return_msg><![CDATA[OK]]></return_msg></xml>"
        ));
    }

    #[test]
    fn failure_variants() {
        let fail = NotifyAck::fail("bad sign");
        assert!(!fail.is_success());
        assert_eq!(fail.document().get_str(FIELD_RETURN_MSG), Some("bad sign"));

        let described = NotifyAck::fail_with_description("nil prepay_id");
        assert_eq!(described.document().get_str(FIELD_ERR_CODE_DES), Some("nil prepay_id"));
        assert!(!described.document().contains_key(FIELD_RETURN_MSG));
    }
}

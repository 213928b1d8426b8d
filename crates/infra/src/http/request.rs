//! Outbound call description

use paybridge_domain::{Document, DocumentValue, RequestMethod, TransportProfile, WireFormat};

/// Request body before encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Encoded in the request's wire format, signed first for payment calls
    Document(Document),
    /// Sent as-is
    Raw(Vec<u8>),
}

/// Everything the dispatcher needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    pub profile: TransportProfile,
    pub url: String,
    pub method: RequestMethod,
    pub format: WireFormat,
    pub body: RequestBody,
    pub query: Document,
    /// Add merchant id, nonce and MD5 signature before encoding
    pub payment: bool,
}

impl DispatchRequest {
    /// POST over the insecure profile with an XML body, no query.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            profile: TransportProfile::Insecure,
            url: url.into(),
            method: RequestMethod::Post,
            format: WireFormat::Xml,
            body: RequestBody::Empty,
            query: Document::new(),
            payment: false,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(RequestMethod::Get)
    }

    #[must_use]
    pub const fn profile(mut self, profile: TransportProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub const fn method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub const fn format(mut self, format: WireFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn document(mut self, doc: Document) -> Self {
        self.body = RequestBody::Document(doc);
        self
    }

    #[must_use]
    pub fn raw(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = RequestBody::Raw(bytes.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: Document) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<DocumentValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    #[must_use]
    pub const fn payment(mut self, enabled: bool) -> Self {
        self.payment = enabled;
        self
    }

    /// Query pairs in key order. Values use their signing text, so nested
    /// documents and arrays collapse to empty strings and are dropped.
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(key, value)| (key.to_string(), value.text()))
            .filter(|(_, value)| !value.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_insecure_xml_post() {
        let request = DispatchRequest::new("https://example.com/pay/unifiedorder");
        assert_eq!(request.profile, TransportProfile::Insecure);
        assert_eq!(request.method, RequestMethod::Post);
        assert_eq!(request.format, WireFormat::Xml);
        assert_eq!(request.body, RequestBody::Empty);
        assert!(!request.payment);
    }

    #[test]
    fn query_pairs_skip_empty_values() {
        let request = DispatchRequest::get("https://example.com")
            .query_param("access_token", "T")
            .query_param("offset", 0)
            .query_param("blank", "");
        assert_eq!(
            request.query_pairs(),
            vec![("access_token".to_string(), "T".to_string()), ("offset".to_string(), "0".to_string())]
        );
    }
}

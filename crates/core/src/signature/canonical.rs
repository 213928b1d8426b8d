//! Canonical signing strings

use std::collections::BTreeSet;

use paybridge_domain::constants::FIELD_SIGN;
use paybridge_domain::Document;

/// Build `k1=v1&k2=v2…` over the top-level keys in byte order.
///
/// Keys in `excluded` (case-sensitive) and keys whose trimmed text is empty
/// are left out. Values are trimmed.
#[must_use]
pub fn canonicalize<S: AsRef<str>>(doc: &Document, excluded: &[S]) -> String {
    let mut out = String::new();
    for (key, value) in doc.iter() {
        if excluded.iter().any(|name| name.as_ref() == key) {
            continue;
        }
        let text = value.text();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(text);
    }
    out
}

/// A document together with the field names left out of its signature.
///
/// `sign` is always excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct SignablePayload {
    document: Document,
    excluded: BTreeSet<String>,
}

impl SignablePayload {
    #[must_use]
    pub fn new(document: Document) -> Self {
        let excluded = BTreeSet::from([FIELD_SIGN.to_string()]);
        Self { document, excluded }
    }

    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    #[must_use]
    pub fn canonical_string(&self) -> String {
        let excluded: Vec<&str> = self.excluded().collect();
        canonicalize(&self.document, &excluded)
    }
}

impl From<Document> for SignablePayload {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_and_excluded_fields() {
        let doc = Document::new().with("b", "2").with("a", "1").with("c", "").with("sign", "X");
        assert_eq!(SignablePayload::new(doc).canonical_string(), "a=1&b=2");
    }

    #[test]
    fn trims_values_and_skips_containers() {
        let doc = Document::new()
            .with("amount", 100)
            .with("memo", "  hi  ")
            .with("blank", "   ")
            .with("nested", Document::new().with("x", 1));
        assert_eq!(canonicalize::<&str>(&doc, &[]), "amount=100&memo=hi");
    }

    #[test]
    fn exclusion_is_case_sensitive() {
        let doc = Document::new().with("Sign", "kept").with("sign", "dropped");
        assert_eq!(SignablePayload::new(doc).canonical_string(), "Sign=kept");
    }

    #[test]
    fn extra_exclusions_apply() {
        let doc = Document::new().with("a", "1").with("sign_type", "MD5");
        let payload = SignablePayload::new(doc).exclude("sign_type");
        assert_eq!(payload.canonical_string(), "a=1");
        assert_eq!(payload.excluded().collect::<Vec<_>>(), vec!["sign", "sign_type"]);
    }
}

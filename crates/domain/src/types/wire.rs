//! Protocol enums: wire formats, signing schemes, TLS profiles, methods

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Body encoding of a request or response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    #[default]
    Xml,
    Json,
}

impl_wire_name_conversions!(WireFormat {
    Xml => "xml",
    Json => "json",
});

impl WireFormat {
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Xml => "application/xml; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
        }
    }
}

/// Signing scheme. `Sha1` is reserved for ticket/URL signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignType {
    #[default]
    #[serde(rename = "MD5")]
    Md5,
    #[serde(rename = "HMAC-SHA256")]
    HmacSha256,
    #[serde(rename = "SHA1")]
    Sha1,
}

impl_wire_name_conversions!(SignType {
    Md5 => "MD5",
    HmacSha256 => "HMAC-SHA256",
    Sha1 => "SHA1",
});

/// TLS trust configuration, chosen per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportProfile {
    /// Certificate verification disabled; primary trusted endpoint only.
    #[default]
    Insecure,
    /// Client certificate plus custom root CA, verification enabled.
    MutualTls,
}

impl_wire_name_conversions!(TransportProfile {
    Insecure => "insecure",
    MutualTls => "mutual_tls",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    #[default]
    Post,
}

impl_wire_name_conversions!(RequestMethod {
    Get => "GET",
    Post => "POST",
});

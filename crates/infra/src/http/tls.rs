//! Loading of mutual-TLS material
//!
//! Every failure here is [`PayBridgeError::ConfigurationFatal`]: the
//! material was configured, so a client without it must not start.

use std::fs;
use std::path::Path;

use paybridge_domain::{ClientCertificate, PayBridgeError, Result};
use reqwest::{Certificate, Identity};
use tracing::debug;

/// Client identity and trust anchor read from PEM files.
pub(crate) struct TlsMaterial {
    pub identity: Identity,
    pub root_ca: Certificate,
}

impl TlsMaterial {
    pub(crate) fn load(certificate: &ClientCertificate) -> Result<Self> {
        let mut identity_pem = read_pem(&certificate.cert_path, "client certificate")?;
        identity_pem.push(b'\n');
        identity_pem.extend(read_pem(&certificate.key_path, "client key")?);
        let ca_pem = read_pem(&certificate.root_ca_path, "root CA")?;

        let identity = Identity::from_pem(&identity_pem)
            .map_err(|e| PayBridgeError::ConfigurationFatal(format!("invalid client certificate or key: {e}")))?;
        let root_ca = Certificate::from_pem(&ca_pem)
            .map_err(|e| PayBridgeError::ConfigurationFatal(format!("invalid root CA: {e}")))?;

        debug!(cert = %certificate.cert_path.display(), "Loaded mutual-TLS material");
        Ok(Self { identity, root_ca })
    }
}

fn read_pem(path: &Path, what: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        PayBridgeError::ConfigurationFatal(format!("cannot read {what} at {}: {e}", path.display()))
    })
}

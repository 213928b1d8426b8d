//! Conversions from external infrastructure errors into domain errors.

use paybridge_domain::PayBridgeError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PayBridgeError);

impl From<InfraError> for PayBridgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PayBridgeError> for InfraError {
    fn from(value: PayBridgeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPayBridgeError {
    fn into_paybridge(self) -> PayBridgeError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PayBridgeError */
/* -------------------------------------------------------------------------- */

impl IntoPayBridgeError for HttpError {
    fn into_paybridge(self) -> PayBridgeError {
        if self.is_builder() {
            return PayBridgeError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_timeout() {
            return PayBridgeError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PayBridgeError::Transport(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            return PayBridgeError::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        PayBridgeError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_paybridge())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → PayBridgeError */
/* -------------------------------------------------------------------------- */

impl IntoPayBridgeError for UrlError {
    fn into_paybridge(self) -> PayBridgeError {
        PayBridgeError::InvalidInput(format!("invalid request URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_paybridge())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::Client;

    use super::*;

    #[test]
    fn url_parse_failure_maps_to_invalid_input() {
        let err = url::Url::parse("not a url").unwrap_err();
        let mapped: PayBridgeError = InfraError::from(err).into();
        match mapped {
            PayBridgeError::InvalidInput(msg) => assert!(msg.contains("URL")),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: PayBridgeError = InfraError::from(error).into();
        assert!(mapped.is_retryable(), "expected transport error, got {mapped:?}");
    }
}

use std::io;
use std::time::Duration;

use ureq::Agent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The address has no usable scheme/host or could not be turned into a request URI.
    #[error("invalid address {address:?}: {detail}")]
    InvalidAddress { address: String, detail: String },
    /// Certificate validation or handshake failure.
    #[error("TLS failure for {address}: {detail}")]
    Tls { address: String, detail: String },
    /// Anything else on the wire: DNS, refused connection, timeout, truncated body.
    #[error("network failure for {address}: {detail}")]
    Network { address: String, detail: String },
}

/// Blocking HTTP access used by the checks. Non-2xx statuses are returned as
/// responses, not errors.
pub trait Transport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError>;

    fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FetchError>;
}

pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        tracing::debug!(url, "GET");
        let mut request = self.agent.get(url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        let mut response = request.call().map_err(|err| classify_error(url, err))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| classify_error(url, err))?;
        tracing::debug!(url, status, bytes = body.len(), "GET complete");
        Ok(HttpResponse { status, body })
    }

    fn post_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &serde_json::Value,
    ) -> Result<HttpResponse, FetchError> {
        tracing::debug!(url, "POST");
        let mut request = self.agent.post(url);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        let mut response = request
            .send_json(body)
            .map_err(|err| classify_error(url, err))?;
        let status = response.status().as_u16();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| classify_error(url, err))?;
        tracing::debug!(url, status, bytes = text.len(), "POST complete");
        Ok(HttpResponse { status, body: text })
    }
}

fn classify_error(address: &str, err: ureq::Error) -> FetchError {
    let address = address.to_string();
    match err {
        ureq::Error::BadUri(detail) => FetchError::InvalidAddress { address, detail },
        ureq::Error::Http(e) => FetchError::InvalidAddress {
            address,
            detail: e.to_string(),
        },
        ureq::Error::Tls(detail) => FetchError::Tls {
            address,
            detail: detail.to_string(),
        },
        ureq::Error::Rustls(e) => FetchError::Tls {
            address,
            detail: e.to_string(),
        },
        ureq::Error::Io(e) if is_tls_io_error(&e) => FetchError::Tls {
            address,
            detail: e.to_string(),
        },
        other => FetchError::Network {
            address,
            detail: other.to_string(),
        },
    }
}

/// rustls surfaces handshake and certificate failures through the stream as
/// `InvalidData` io errors.
pub fn is_tls_io_error(err: &io::Error) -> bool {
    if err.kind() != io::ErrorKind::InvalidData {
        return false;
    }
    let message = err.to_string().to_lowercase();
    ["certificate", "handshake", "tls", "alert"]
        .iter()
        .any(|needle| message.contains(needle))
}

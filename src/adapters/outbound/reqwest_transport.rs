//! Reqwest Transport
//!
//! Implements HttpTransport on top of a shared `reqwest::Client`.

use crate::domain::entities::{HttpMethod, HttpRequest, RawResponse};
use crate::domain::error::LocateError;
use crate::domain::ports::HttpTransport;
use async_trait::async_trait;

/// HTTP transport backed by reqwest.
///
/// The client is cheap to clone and pools connections, so one transport
/// can serve every provider client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, LocateError> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Post => self.client.post(request.url.clone()),
        };
        let mut builder = builder
            .timeout(request.timeout)
            .header("accept", "application/json");
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        // The query string may hold an API key: log the path only.
        tracing::debug!(
            "{} {}{}",
            request.method.as_str(),
            request.url.host_str().unwrap_or_default(),
            request.url.path()
        );

        let response = builder
            .send()
            .await
            .map_err(|e| LocateError::Transport(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| LocateError::Transport(e.without_url().to_string()))?;

        tracing::debug!("response status={} bytes={}", status, body.len());

        Ok(RawResponse::new(status, body))
    }
}

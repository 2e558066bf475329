//! IPStack Service
//!
//! Implements IpGeoService for https://ipstack.com.
//! ipstack answers most failures with HTTP 200 and an error object in the
//! body, so validation inspects the body as well as the status.

use crate::adapters::outbound::endpoint;
use crate::domain::entities::HttpRequest;
use crate::domain::error::LocateError;
use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};
use serde::Deserialize;

/// Error body returned by ipstack, e.g.
/// `{"success": false, "error": {"code": 104, "type": "usage_limit_reached"}}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    success: bool,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: u16,
}

/// ipstack.com client.
pub struct IpStackService {
    options: ServiceOptions,
}

impl IpStackService {
    pub const ENDPOINT: &'static str = "https://api.ipstack.com/";

    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }

    fn embedded_error(body: &[u8]) -> Option<LocateError> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        if parsed.success {
            return None;
        }
        let Some(detail) = parsed.error else {
            return Some(LocateError::Parse(
                "error response without an error object".into(),
            ));
        };
        Some(match detail.code {
            // missing/invalid access key, inactive user, unsupported
            // endpoint, usage limit reached, function restricted by plan
            101..=105 => LocateError::UsageLimitReached,
            // invalid ip address
            106 => LocateError::NotFound,
            other => LocateError::Other(other),
        })
    }
}

impl IpGeoService for IpStackService {
    fn provider(&self) -> Provider {
        Provider::IpStack
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn build_request(&self) -> Result<HttpRequest, LocateError> {
        let opts = &self.options;
        let target = endpoint::single_target(opts, "ipstack")?.unwrap_or("check");
        let url = endpoint::with_segments(endpoint::base(opts, Self::ENDPOINT)?, &[target])?;

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = opts.api_key.as_deref() {
            query.push(("access_key", key));
        }
        query.push(("language", opts.locale.as_str()));
        if opts.hostname_lookup {
            query.push(("hostname", "1"));
        }

        Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
    }

    fn validate_response(&self, status: u16, body: &[u8]) -> Option<LocateError> {
        match status {
            200 => Self::embedded_error(body),
            401 | 403 | 429 => Some(LocateError::UsageLimitReached),
            404 => Some(LocateError::NotFound),
            other => Some(LocateError::Other(other)),
        }
    }
}

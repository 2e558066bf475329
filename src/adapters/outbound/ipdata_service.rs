//! IPData Service
//!
//! Implements IpGeoService for https://ipdata.co.

use crate::adapters::outbound::endpoint;
use crate::domain::entities::HttpRequest;
use crate::domain::error::LocateError;
use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};

/// ipdata.co client.
///
/// Several addresses are resolved through the `/bulk` endpoint, which takes
/// a JSON array of addresses.
pub struct IpDataService {
    options: ServiceOptions,
}

impl IpDataService {
    pub const ENDPOINT: &'static str = "https://api.ipdata.co/";

    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }

    fn classify_message(message: &str) -> LocateError {
        let message = message.to_lowercase();
        if message.contains("private") || message.contains("reserved") {
            LocateError::ReservedAddress
        } else {
            LocateError::NotFound
        }
    }
}

impl IpGeoService for IpDataService {
    fn provider(&self) -> Provider {
        Provider::IpData
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn build_request(&self) -> Result<HttpRequest, LocateError> {
        let opts = &self.options;
        let base = endpoint::base(opts, Self::ENDPOINT)?;

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = opts.api_key.as_deref() {
            query.push(("api-key", key));
        }

        match opts.target_ips.as_slice() {
            [] => {
                let url = endpoint::with_segments(base, &[])?;
                Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
            }
            [ip] => {
                let url = endpoint::with_segments(base, &[ip.as_str()])?;
                Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
            }
            ips => {
                let url = endpoint::with_segments(base, &["bulk"])?;
                Ok(HttpRequest::post(
                    endpoint::with_query(url, &query),
                    serde_json::json!(ips),
                    opts.timeout,
                ))
            }
        }
    }

    fn validate_response(&self, status: u16, body: &[u8]) -> Option<LocateError> {
        match status {
            200 => endpoint::failed_entry_message(body).map(|m| Self::classify_message(&m)),
            // private or reserved address
            400 => Some(LocateError::ReservedAddress),
            // missing key, invalid key or quota exceeded
            401 | 403 => Some(LocateError::UsageLimitReached),
            404 => Some(LocateError::NotFound),
            other => Some(LocateError::Other(other)),
        }
    }
}

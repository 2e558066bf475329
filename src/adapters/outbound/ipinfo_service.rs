//! IPInfo Service
//!
//! Implements IpGeoService for https://ipinfo.io.

use crate::adapters::outbound::endpoint;
use crate::domain::entities::HttpRequest;
use crate::domain::error::LocateError;
use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};
use serde::Deserialize;

/// ipinfo.io answers bogon queries with HTTP 200 and `"bogon": true`.
#[derive(Debug, Deserialize)]
struct BogonBody {
    #[serde(default)]
    bogon: bool,
}

/// ipinfo.io client.
pub struct IpInfoService {
    options: ServiceOptions,
}

impl IpInfoService {
    pub const ENDPOINT: &'static str = "https://ipinfo.io/";

    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }
}

impl IpGeoService for IpInfoService {
    fn provider(&self) -> Provider {
        Provider::IpInfo
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn build_request(&self) -> Result<HttpRequest, LocateError> {
        let opts = &self.options;
        let base = endpoint::base(opts, Self::ENDPOINT)?;
        let url = match endpoint::single_target(opts, "ipinfo")? {
            Some(ip) => endpoint::with_segments(base, &[ip, "json"])?,
            None => endpoint::with_segments(base, &["json"])?,
        };

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = opts.api_key.as_deref() {
            query.push(("token", token));
        }

        Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
    }

    fn validate_response(&self, status: u16, body: &[u8]) -> Option<LocateError> {
        match status {
            200 => match serde_json::from_slice::<BogonBody>(body) {
                Ok(parsed) if parsed.bogon => Some(LocateError::ReservedAddress),
                _ => None,
            },
            // invalid token, or monthly/rate limit exceeded
            401 | 403 | 429 => Some(LocateError::UsageLimitReached),
            404 => Some(LocateError::NotFound),
            other => Some(LocateError::Other(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_lookup() {
        let req = IpInfoService::new(ServiceOptions::default())
            .build_request()
            .unwrap();
        assert_eq!(req.url.as_str(), "https://ipinfo.io/json");
    }

    #[test]
    fn test_single_ip_with_token() {
        let options = ServiceOptions::new().target_ips(["8.8.8.8"]).api_key("tok");
        let req = IpInfoService::new(options).build_request().unwrap();
        assert_eq!(req.url.as_str(), "https://ipinfo.io/8.8.8.8/json?token=tok");
    }

    #[test]
    fn test_multiple_ips_rejected() {
        let options = ServiceOptions::new().target_ips(["8.8.8.8", "1.1.1.1"]);
        let err = IpInfoService::new(options).build_request().unwrap_err();
        assert!(matches!(err, LocateError::Config(_)));
    }

    #[test]
    fn test_validate_bogon() {
        let svc = IpInfoService::new(ServiceOptions::default());
        assert_eq!(
            svc.validate_response(200, br#"{"ip":"10.0.0.1","bogon":true}"#),
            Some(LocateError::ReservedAddress)
        );
        assert_eq!(
            svc.validate_response(200, br#"{"ip":"8.8.8.8","loc":"1,2"}"#),
            None
        );
    }

    #[test]
    fn test_validate_status_codes() {
        let svc = IpInfoService::new(ServiceOptions::default());
        assert_eq!(
            svc.validate_response(429, b""),
            Some(LocateError::UsageLimitReached)
        );
        assert_eq!(svc.validate_response(404, b""), Some(LocateError::NotFound));
        assert_eq!(svc.validate_response(500, b""), Some(LocateError::Other(500)));
    }
}

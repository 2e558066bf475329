//! IPGeolocation Service
//!
//! Implements IpGeoService for https://ipgeolocation.io.
//! Batch lookups are POSTed to the same endpoint with an `{"ips": [...]}` body.

use crate::adapters::outbound::endpoint;
use crate::domain::entities::HttpRequest;
use crate::domain::error::LocateError;
use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};

/// ipgeolocation.io client.
pub struct IpGeolocationService {
    options: ServiceOptions,
}

impl IpGeolocationService {
    pub const ENDPOINT: &'static str = "https://api.ipgeolocation.io/";

    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }

    fn classify_message(message: &str) -> LocateError {
        if message.to_lowercase().contains("bogon") {
            LocateError::ReservedAddress
        } else {
            LocateError::NotFound
        }
    }
}

impl IpGeoService for IpGeolocationService {
    fn provider(&self) -> Provider {
        Provider::IpGeolocation
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn build_request(&self) -> Result<HttpRequest, LocateError> {
        let opts = &self.options;
        let url = endpoint::with_segments(endpoint::base(opts, Self::ENDPOINT)?, &["ipgeo"])?;

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = opts.api_key.as_deref() {
            query.push(("apiKey", key));
        }
        query.push(("lang", opts.locale.as_str()));
        if opts.hostname_lookup {
            query.push(("include", "hostname"));
        }

        match opts.target_ips.as_slice() {
            [] => Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout)),
            [ip] => {
                query.push(("ip", ip.as_str()));
                Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
            }
            ips => Ok(HttpRequest::post(
                endpoint::with_query(url, &query),
                serde_json::json!({ "ips": ips }),
                opts.timeout,
            )),
        }
    }

    fn validate_response(&self, status: u16, body: &[u8]) -> Option<LocateError> {
        match status {
            200 => endpoint::failed_entry_message(body).map(|m| Self::classify_message(&m)),
            // Invalid key, disabled account, expired trial, exhausted quota,
            // paid feature on a free plan or missing authorization.
            400 | 401 => Some(LocateError::UsageLimitReached),
            404 => Some(LocateError::NotFound),
            // Bogon address (private, multicast, ...).
            423 => Some(LocateError::ReservedAddress),
            other => Some(LocateError::Other(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Coordinates, HttpMethod};
    use crate::domain::value_objects::LocationKey;

    fn service(options: ServiceOptions) -> IpGeolocationService {
        IpGeolocationService::new(options)
    }

    #[test]
    fn test_self_lookup_omits_ip() {
        let req = service(ServiceOptions::new().api_key("abc")).build_request().unwrap();

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url.path(), "/ipgeo");
        assert_eq!(req.query("apiKey").as_deref(), Some("abc"));
        assert_eq!(req.query("lang").as_deref(), Some("en"));
        assert_eq!(req.query("ip"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_single_ip_is_query_parameter() {
        let options = ServiceOptions::new().target_ips(["8.8.8.8"]).api_key("abc");
        let req = service(options).build_request().unwrap();

        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.query("ip").as_deref(), Some("8.8.8.8"));
        assert!(req.body.is_none());
    }

    #[test]
    fn test_batch_switches_to_post() {
        let options = ServiceOptions::new()
            .target_ips(["8.8.8.8", "1.1.1.1"])
            .api_key("abc");
        let req = service(options).build_request().unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.query("ip"), None);
        assert_eq!(
            req.body,
            Some(serde_json::json!({ "ips": ["8.8.8.8", "1.1.1.1"] }))
        );
    }

    #[test]
    fn test_request_projects_options() {
        let options = ServiceOptions::new()
            .target_ips(["8.8.8.8", "1.1.1.1", "9.9.9.9"])
            .api_key("k3y")
            .locale("IT")
            .timeout(std::time::Duration::from_secs(9));
        let req = service(options.clone()).build_request().unwrap();

        assert_eq!(req.query("apiKey"), options.api_key);
        assert_eq!(req.query("lang").as_deref(), Some("it"));
        assert_eq!(req.timeout, options.timeout);
        let ips = req.body.as_ref().unwrap()["ips"].as_array().unwrap().len();
        assert_eq!(ips, options.target_ips.len());
    }

    #[test]
    fn test_hostname_lookup() {
        let req = service(ServiceOptions::new().hostname_lookup(true))
            .build_request()
            .unwrap();
        assert_eq!(req.query("include").as_deref(), Some("hostname"));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = service(ServiceOptions::new().base_url("::"))
            .build_request()
            .unwrap_err();
        assert!(matches!(err, LocateError::Config(_)));
    }

    #[test]
    fn test_validate_response() {
        let svc = service(ServiceOptions::default());
        let tests = vec![
            (200, None),
            (400, Some(LocateError::UsageLimitReached)),
            (401, Some(LocateError::UsageLimitReached)),
            (404, Some(LocateError::NotFound)),
            (423, Some(LocateError::ReservedAddress)),
            (500, Some(LocateError::Other(500))),
            (302, Some(LocateError::Other(302))),
        ];

        for (status, expected) in tests {
            assert_eq!(svc.validate_response(status, b""), expected, "status {}", status);
        }
    }

    #[test]
    fn test_decode_fixture() {
        let options = ServiceOptions::new().target_ips(["8.8.8.8"]).api_key("abc");
        let svc = service(options);
        let body = br#"{"ip":"8.8.8.8","latitude":"37.4","longitude":"-122.1","country_name":"United States","country_code2":"US"}"#;

        assert!(svc.validate_response(200, body).is_none());
        let records = svc.decode(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ip(), "8.8.8.8");
        assert_eq!(records[0].coordinates(), Coordinates::new(37.4, -122.1));
        assert_eq!(records[0].info().len(), 2);
        assert_eq!(records[0].get(LocationKey::Country), Some("United States"));
        assert_eq!(records[0].get(LocationKey::CountryCode), Some("US"));
    }

    #[test]
    fn test_validate_bulk_entries() {
        let svc = service(ServiceOptions::default());
        let tests = vec![
            (
                r#"[{"ip":"8.8.8.8","latitude":"37.4","longitude":"-122.1"},{"message":"'10.0.0.1' is a bogon IP address."}]"#,
                Some(LocateError::ReservedAddress),
            ),
            (
                r#"[{"message":"'nope' is not a valid IP address or domain."}]"#,
                Some(LocateError::NotFound),
            ),
            (r#"[{"ip":"8.8.8.8"},{"ip":"1.1.1.1"}]"#, None),
        ];

        for (body, expected) in tests {
            assert_eq!(svc.validate_response(200, body.as_bytes()), expected, "{}", body);
        }
    }
}

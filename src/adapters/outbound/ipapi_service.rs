//! IP-API Service
//!
//! Implements IpGeoService for https://ip-api.com.
//! The free endpoint takes no key; with a key the pro endpoint is used.
//! Lookup failures come back as HTTP 200 with `"status": "fail"`.

use crate::adapters::outbound::endpoint;
use crate::domain::entities::HttpRequest;
use crate::domain::error::LocateError;
use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};
use serde::Deserialize;

/// Fields requested from ip-api. `continent` and `district` are not part of
/// the default response.
const FIELDS: &str = "status,message,query,lat,lon,continent,continentCode,country,countryCode,\
region,regionName,city,district,zip,timezone,isp";

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: Option<String>,
    message: Option<String>,
}

/// A single lookup answers with one status object, a batch with an array
/// holding one per address.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusBodies {
    Many(Vec<StatusBody>),
    One(StatusBody),
}

/// ip-api.com client.
pub struct IpApiService {
    options: ServiceOptions,
}

impl IpApiService {
    pub const ENDPOINT: &'static str = "http://ip-api.com/";
    pub const PRO_ENDPOINT: &'static str = "https://pro.ip-api.com/";

    pub fn new(options: ServiceOptions) -> Self {
        Self { options }
    }

    /// First failed entry of the body, if any.
    fn embedded_error(body: &[u8]) -> Option<LocateError> {
        let entries = match serde_json::from_slice(body).ok()? {
            StatusBodies::One(entry) => vec![entry],
            StatusBodies::Many(entries) => entries,
        };
        entries.iter().find_map(Self::classify)
    }

    fn classify(entry: &StatusBody) -> Option<LocateError> {
        if entry.status.as_deref() != Some("fail") {
            return None;
        }
        match entry.message.as_deref() {
            Some("private range") | Some("reserved range") => Some(LocateError::ReservedAddress),
            // "invalid query" and anything undocumented
            _ => Some(LocateError::NotFound),
        }
    }
}

impl IpGeoService for IpApiService {
    fn provider(&self) -> Provider {
        Provider::IpApi
    }

    fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn build_request(&self) -> Result<HttpRequest, LocateError> {
        let opts = &self.options;
        let default = if opts.api_key.is_some() {
            Self::PRO_ENDPOINT
        } else {
            Self::ENDPOINT
        };
        let base = endpoint::base(opts, default)?;

        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = opts.api_key.as_deref() {
            query.push(("key", key));
        }
        query.push(("fields", FIELDS));
        query.push(("lang", opts.locale.as_str()));

        match opts.target_ips.as_slice() {
            [] => {
                let url = endpoint::with_segments(base, &["json"])?;
                Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
            }
            [ip] => {
                let url = endpoint::with_segments(base, &["json", ip.as_str()])?;
                Ok(HttpRequest::get(endpoint::with_query(url, &query), opts.timeout))
            }
            ips => {
                let url = endpoint::with_segments(base, &["batch"])?;
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
            200 => Self::embedded_error(body),
            // invalid key, or the free tier's rate limit
            403 | 429 => Some(LocateError::UsageLimitReached),
            other => Some(LocateError::Other(other)),
        }
    }
}

//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the lookup domain:
//! the normalized location record and the HTTP exchange descriptors
//! passed between provider clients and the transport.

use crate::domain::value_objects::LocationKey;
use bytes::Bytes;
use reqwest::Url;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Normalized, provider-independent result of a lookup.
///
/// Built once by the decoder from a single response body and never
/// modified afterwards. A key missing from `info` means the provider did not
/// report it; a key mapped to `None` means the provider reported it empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpLocation {
    ip: String,
    coordinates: Coordinates,
    info: BTreeMap<LocationKey, Option<String>>,
}

impl IpLocation {
    pub(crate) fn new(
        ip: String,
        coordinates: Coordinates,
        info: BTreeMap<LocationKey, Option<String>>,
    ) -> Self {
        Self {
            ip,
            coordinates,
            info,
        }
    }

    /// Address this record describes.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// All attributes reported by the provider.
    pub fn info(&self) -> &BTreeMap<LocationKey, Option<String>> {
        &self.info
    }

    /// Value of an attribute, flattening "not reported" and "reported empty".
    pub fn get(&self, key: LocationKey) -> Option<&str> {
        self.info.get(&key).and_then(|v| v.as_deref())
    }

    /// Whether the provider reported the attribute at all.
    pub fn contains(&self, key: LocationKey) -> bool {
        self.info.contains_key(&key)
    }
}

impl std::fmt::Display for IpLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ip={}, lat={}, lng={}, info={{",
            self.ip, self.coordinates.latitude, self.coordinates.longitude
        )?;
        for (i, (key, value)) in self.info.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value.as_deref().unwrap_or("-"))?;
        }
        write!(f, "}}}}")
    }
}

/// HTTP verb used by a provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Transport-agnostic description of one provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Full URL, query string included
    pub url: Url,
    /// JSON body for batch lookups
    pub body: Option<serde_json::Value>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Create a GET request without body.
    pub fn get(url: Url, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            body: None,
            timeout,
        }
    }

    /// Create a POST request carrying a JSON body.
    pub fn post(url: Url, body: serde_json::Value, timeout: Duration) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            body: Some(body),
            timeout,
        }
    }

    /// First value of a query parameter.
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// All query parameters, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Raw outcome of an HTTP exchange, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

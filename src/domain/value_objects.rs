//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Supported IP geolocation providers.
///
/// The provider is the discriminator that selects which wire schema a
/// response body is decoded with. Payloads carry no schema tag of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// https://ipstack.com
    IpStack,
    /// https://ipdata.co
    IpData,
    /// https://ipinfo.io
    IpInfo,
    /// https://ip-api.com
    IpApi,
    /// https://ipgeolocation.io
    IpGeolocation,
}

impl Provider {
    /// All providers, in declaration order.
    pub const ALL: [Provider; 5] = [
        Self::IpStack,
        Self::IpData,
        Self::IpInfo,
        Self::IpApi,
        Self::IpGeolocation,
    ];

    /// Parse a provider name.
    ///
    /// Unlike region codes there is no fallback: an unknown name yields `None`.
    ///
    /// # Examples
    /// ```
    /// use ip_locator::Provider;
    ///
    /// assert_eq!(Provider::parse("ipinfo"), Some(Provider::IpInfo));
    /// assert_eq!(Provider::parse("IP-API"), Some(Provider::IpApi));
    /// assert_eq!(Provider::parse("maxmind"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ipstack" => Some(Self::IpStack),
            "ipdata" => Some(Self::IpData),
            "ipinfo" => Some(Self::IpInfo),
            "ipapi" | "ip-api" => Some(Self::IpApi),
            "ipgeolocation" => Some(Self::IpGeolocation),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IpStack => "ipstack",
            Self::IpData => "ipdata",
            Self::IpInfo => "ipinfo",
            Self::IpApi => "ipapi",
            Self::IpGeolocation => "ipgeolocation",
        }
    }

    /// Whether the provider resolves several addresses in one request.
    pub fn supports_batch(&self) -> bool {
        matches!(self, Self::IpData | Self::IpApi | Self::IpGeolocation)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Closed set of attribute keys a location record may carry.
///
/// Providers populate different subsets, but none may go outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationKey {
    Hostname,
    Continent,
    ContinentCode,
    Country,
    CountryCode,
    Region,
    RegionCode,
    City,
    PostalCode,
    District,
    Timezone,
    Isp,
}

impl LocationKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Continent => "continent",
            Self::ContinentCode => "continentCode",
            Self::Country => "country",
            Self::CountryCode => "countryCode",
            Self::Region => "region",
            Self::RegionCode => "regionCode",
            Self::City => "city",
            Self::PostalCode => "postalCode",
            Self::District => "district",
            Self::Timezone => "timezone",
            Self::Isp => "isp",
        }
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-client lookup settings.
///
/// Supplied when a provider client is constructed and never mutated
/// afterwards; build a new client for different settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOptions {
    /// Addresses to resolve; empty resolves the caller's own address
    pub target_ips: Vec<String>,
    /// API key or token, when the provider requires one
    pub api_key: Option<String>,
    /// Language for localized names (default: "en")
    pub locale: String,
    /// Ask the provider to resolve the hostname too (default: false)
    pub hostname_lookup: bool,
    /// Timeout handed to the transport (default: 5s)
    pub timeout: Duration,
    /// Endpoint override, mostly for tests and self-hosted mirrors
    pub base_url: Option<String>,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            target_ips: Vec::new(),
            api_key: None,
            locale: "en".to_string(),
            hostname_lookup: false,
            timeout: Duration::from_secs(5),
            base_url: None,
        }
    }
}

impl ServiceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the addresses to resolve.
    pub fn target_ips<I, S>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_ips = ips.into_iter().map(Into::into).collect();
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the locale. Stored lowercased.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into().to_lowercase();
        self
    }

    pub fn hostname_lookup(mut self, enabled: bool) -> Self {
        self.hostname_lookup = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the provider endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

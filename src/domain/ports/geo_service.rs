//! IP Geolocation Service Port
//!
//! Defines the capability set every provider client implements.

use crate::domain::entities::{HttpRequest, IpLocation};
use crate::domain::error::LocateError;
use crate::domain::services::decoder;
use crate::domain::value_objects::{Provider, ServiceOptions};

/// A remote IP geolocation provider.
///
/// This is an outbound port. Each implementation knows how to phrase a
/// request for its provider and how to read that provider's error signaling.
/// Decoding is tied to [`IpGeoService::provider`], so callers never need a
/// separate provider-to-decoder table.
pub trait IpGeoService: Send + Sync {
    /// Discriminator selecting the wire schema of responses.
    fn provider(&self) -> Provider;

    /// Settings the client was built with.
    fn options(&self) -> &ServiceOptions;

    /// Build the HTTP request for the configured lookup.
    fn build_request(&self) -> Result<HttpRequest, LocateError>;

    /// Classify a raw response.
    ///
    /// Returns `None` when the body should be decoded, or the error the
    /// provider signaled through its status code or an embedded error body.
    fn validate_response(&self, status: u16, body: &[u8]) -> Option<LocateError>;

    /// Decode a validated response body into location records.
    fn decode(&self, body: &[u8]) -> Result<Vec<IpLocation>, LocateError> {
        decoder::decode_all(body, self.provider())
    }
}

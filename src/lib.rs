//! ip-locator Library
//!
//! Resolves the geographic location of IP addresses through interchangeable
//! web providers and normalizes their responses into one record type.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{build_service, ReqwestTransport};
pub use application::LocatorService;
pub use config::load_config;
pub use domain::entities::{Coordinates, HttpMethod, HttpRequest, IpLocation, RawResponse};
pub use domain::error::LocateError;
pub use domain::ports::{HttpTransport, IpGeoService};
pub use domain::services::decoder;
pub use domain::value_objects::{LocationKey, Provider, ServiceOptions};
pub use infrastructure::CancelToken;

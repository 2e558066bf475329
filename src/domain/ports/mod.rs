mod geo_service;
mod http_transport;

pub use geo_service::IpGeoService;
pub use http_transport::HttpTransport;

mod endpoint;
mod ipapi_service;
mod ipdata_service;
mod ipgeolocation_service;
mod ipinfo_service;
mod ipstack_service;
mod reqwest_transport;

pub use ipapi_service::IpApiService;
pub use ipdata_service::IpDataService;
pub use ipgeolocation_service::IpGeolocationService;
pub use ipinfo_service::IpInfoService;
pub use ipstack_service::IpStackService;
pub use reqwest_transport::ReqwestTransport;

use crate::domain::ports::IpGeoService;
use crate::domain::value_objects::{Provider, ServiceOptions};

/// Build the client for a caller-chosen provider.
pub fn build_service(provider: Provider, options: ServiceOptions) -> Box<dyn IpGeoService> {
    match provider {
        Provider::IpStack => Box::new(IpStackService::new(options)),
        Provider::IpData => Box::new(IpDataService::new(options)),
        Provider::IpInfo => Box::new(IpInfoService::new(options)),
        Provider::IpApi => Box::new(IpApiService::new(options)),
        Provider::IpGeolocation => Box::new(IpGeolocationService::new(options)),
    }
}

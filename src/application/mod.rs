mod locator_service;

pub use locator_service::LocatorService;

pub mod entities;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Coordinates, HttpMethod, HttpRequest, IpLocation, RawResponse};
pub use error::LocateError;
pub use value_objects::{LocationKey, Provider, ServiceOptions};

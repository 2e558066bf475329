//! Response Decoder
//!
//! Pure domain logic turning a provider response body into [`IpLocation`]
//! records. The provider is always passed alongside the payload: bodies from
//! different providers overlap too much to guess the schema from their shape.

use crate::domain::entities::{Coordinates, IpLocation};
use crate::domain::error::LocateError;
use crate::domain::value_objects::{LocationKey, Provider};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// How a schema encodes coordinates.
#[derive(Debug, Clone, Copy)]
enum CoordFormat {
    /// Two mandatory JSON numbers.
    Numeric {
        latitude: &'static str,
        longitude: &'static str,
    },
    /// Two mandatory strings holding decimal numbers.
    Text {
        latitude: &'static str,
        longitude: &'static str,
    },
    /// One mandatory "lat,lng" string.
    Combined(&'static str),
}

/// Wire schema of one provider.
#[derive(Debug)]
struct Schema {
    ip: &'static str,
    coordinates: CoordFormat,
    aliases: &'static [(LocationKey, &'static str)],
}

const IPSTACK: Schema = Schema {
    ip: "ip",
    coordinates: CoordFormat::Numeric {
        latitude: "latitude",
        longitude: "longitude",
    },
    aliases: &[
        (LocationKey::Hostname, "hostname"),
        (LocationKey::Continent, "continent_name"),
        (LocationKey::ContinentCode, "continent_code"),
        (LocationKey::Country, "country_name"),
        (LocationKey::CountryCode, "country_code"),
        (LocationKey::Region, "region_name"),
        (LocationKey::RegionCode, "region_code"),
    ],
};

const IPDATA: Schema = Schema {
    ip: "ip",
    coordinates: CoordFormat::Numeric {
        latitude: "latitude",
        longitude: "longitude",
    },
    aliases: &[
        (LocationKey::Continent, "continent_name"),
        (LocationKey::ContinentCode, "continent_code"),
        (LocationKey::Country, "country_name"),
        (LocationKey::CountryCode, "country_code"),
        (LocationKey::Region, "region"),
        (LocationKey::RegionCode, "region_code"),
        (LocationKey::City, "city"),
        (LocationKey::PostalCode, "postal"),
    ],
};

const IPINFO: Schema = Schema {
    ip: "ip",
    coordinates: CoordFormat::Combined("loc"),
    aliases: &[
        (LocationKey::Hostname, "hostname"),
        (LocationKey::Country, "country"),
        (LocationKey::Region, "region"),
        (LocationKey::City, "city"),
        (LocationKey::PostalCode, "postal"),
        (LocationKey::Timezone, "timezone"),
    ],
};

const IPAPI: Schema = Schema {
    ip: "query",
    coordinates: CoordFormat::Numeric {
        latitude: "lat",
        longitude: "lon",
    },
    aliases: &[
        (LocationKey::Continent, "continent"),
        (LocationKey::ContinentCode, "continentCode"),
        (LocationKey::Country, "country"),
        (LocationKey::CountryCode, "countryCode"),
        // ip-api's `region` is the short code, `regionName` the full name.
        (LocationKey::Region, "regionName"),
        (LocationKey::RegionCode, "region"),
        (LocationKey::City, "city"),
        (LocationKey::PostalCode, "zip"),
        (LocationKey::District, "district"),
        (LocationKey::Timezone, "timezone"),
        (LocationKey::Isp, "isp"),
    ],
};

const IPGEOLOCATION: Schema = Schema {
    ip: "ip",
    coordinates: CoordFormat::Text {
        latitude: "latitude",
        longitude: "longitude",
    },
    aliases: &[
        (LocationKey::Hostname, "hostname"),
        (LocationKey::Continent, "continent_name"),
        (LocationKey::ContinentCode, "continent_code"),
        (LocationKey::Country, "country_name"),
        (LocationKey::CountryCode, "country_code2"),
        (LocationKey::Region, "state_prov"),
        (LocationKey::City, "city"),
        (LocationKey::PostalCode, "zipcode"),
        (LocationKey::District, "district"),
        (LocationKey::Isp, "isp"),
    ],
};

fn schema(provider: Provider) -> &'static Schema {
    match provider {
        Provider::IpStack => &IPSTACK,
        Provider::IpData => &IPDATA,
        Provider::IpInfo => &IPINFO,
        Provider::IpApi => &IPAPI,
        Provider::IpGeolocation => &IPGEOLOCATION,
    }
}

/// Attribute keys a provider's schema can populate.
pub fn schema_keys(provider: Provider) -> Vec<LocationKey> {
    schema(provider).aliases.iter().map(|(key, _)| *key).collect()
}

/// Decode a single-object response body.
pub fn decode(payload: &[u8], provider: Provider) -> Result<IpLocation, LocateError> {
    let value: Value = serde_json::from_slice(payload)?;
    decode_value(&value, provider)
}

/// Decode a body whose provider is only known by name.
///
/// A missing or unknown tag is a parse error whatever the payload holds.
pub fn decode_tagged(payload: &[u8], tag: Option<&str>) -> Result<IpLocation, LocateError> {
    let tag = tag.ok_or_else(|| LocateError::Parse("missing provider discriminator".into()))?;
    let provider = Provider::parse(tag)
        .ok_or_else(|| LocateError::Parse(format!("unknown provider '{}'", tag)))?;
    decode(payload, provider)
}

/// Decode a body holding either one object or an array of objects
/// (batch responses).
pub fn decode_all(payload: &[u8], provider: Provider) -> Result<Vec<IpLocation>, LocateError> {
    let value: Value = serde_json::from_slice(payload)?;
    match &value {
        Value::Array(items) => items
            .iter()
            .map(|item| decode_value(item, provider))
            .collect(),
        _ => Ok(vec![decode_value(&value, provider)?]),
    }
}

fn decode_value(value: &Value, provider: Provider) -> Result<IpLocation, LocateError> {
    let obj = value.as_object().ok_or_else(|| {
        LocateError::Parse(format!("{} response is not a JSON object", provider))
    })?;
    let schema = schema(provider);

    let ip = match obj.get(schema.ip) {
        Some(Value::String(ip)) => ip.clone(),
        _ => return Err(missing(schema.ip, "string")),
    };

    let coordinates = match schema.coordinates {
        CoordFormat::Numeric {
            latitude,
            longitude,
        } => Coordinates::new(number(obj, latitude)?, number(obj, longitude)?),
        CoordFormat::Text {
            latitude,
            longitude,
        } => Coordinates::new(
            parse_degrees(text(obj, latitude)?),
            parse_degrees(text(obj, longitude)?),
        ),
        CoordFormat::Combined(field) => parse_combined(text(obj, field)?),
    };

    let mut info = BTreeMap::new();
    for (key, field) in schema.aliases {
        match obj.get(*field) {
            None => {}
            Some(Value::Null) => {
                info.insert(*key, None);
            }
            Some(Value::String(s)) if s.is_empty() => {
                info.insert(*key, None);
            }
            Some(Value::String(s)) => {
                info.insert(*key, Some(s.clone()));
            }
            Some(other) => {
                return Err(LocateError::Parse(format!(
                    "field '{}' should be a string, got {}",
                    field, other
                )))
            }
        }
    }

    Ok(IpLocation::new(ip, coordinates, info))
}

fn number(obj: &Map<String, Value>, field: &str) -> Result<f64, LocateError> {
    obj.get(field)
        .and_then(Value::as_f64)
        .ok_or_else(|| missing(field, "number"))
}

fn text<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, LocateError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| missing(field, "string"))
}

fn missing(field: &str, kind: &str) -> LocateError {
    LocateError::Parse(format!("missing or invalid {} field '{}'", kind, field))
}

/// Parse decimal degrees, falling back to 0 when unparseable or not finite.
///
/// Surrounding whitespace is ignored. Parsing never depends on the process
/// locale.
pub fn parse_degrees(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(degrees) if degrees.is_finite() => degrees,
        _ => 0.0,
    }
}

/// Parse a "lat,lng" string.
///
/// The first component is the latitude and the last the longitude. Each
/// unparseable component becomes 0 instead of failing the decode.
pub fn parse_combined(s: &str) -> Coordinates {
    let mut parts = s.split(',');
    let first = parts.next().unwrap_or_default();
    let last = parts.last().unwrap_or(first);
    Coordinates::new(parse_degrees(first), parse_degrees(last))
}

//! URL helpers shared by the provider clients.

use crate::domain::error::LocateError;
use crate::domain::value_objects::ServiceOptions;
use reqwest::Url;

/// Resolve the endpoint to call: the override from the options, or the
/// provider's default.
pub(crate) fn base(options: &ServiceOptions, default: &str) -> Result<Url, LocateError> {
    let raw = options.base_url.as_deref().unwrap_or(default);
    let url = Url::parse(raw)
        .map_err(|e| LocateError::Config(format!("invalid base url '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(LocateError::Config(format!("base url '{}' has no path", raw)));
    }
    Ok(url)
}

/// Append path segments. Segments are percent-encoded, so IPv6 addresses
/// are safe to pass as-is.
pub(crate) fn with_segments(mut url: Url, segments: &[&str]) -> Result<Url, LocateError> {
    if url.cannot_be_a_base() {
        return Err(LocateError::Config(format!("base url '{}' has no path", url)));
    }
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Append query parameters. Leaves the URL untouched when there are none.
pub(crate) fn with_query(mut url: Url, pairs: &[(&str, &str)]) -> Url {
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (k, v) in pairs {
            query.append_pair(k, v);
        }
    }
    url
}

/// Reject several targets for a provider that resolves one address per call.
pub(crate) fn single_target<'a>(
    options: &'a ServiceOptions,
    provider: &str,
) -> Result<Option<&'a str>, LocateError> {
    match options.target_ips.as_slice() {
        [] => Ok(None),
        [ip] => Ok(Some(ip.as_str())),
        ips => Err(LocateError::Config(format!(
            "{} does not support batch lookup ({} addresses given)",
            provider,
            ips.len()
        ))),
    }
}

/// Message of the first failed entry in a bulk response.
///
/// Bulk endpoints answer 200 as long as the request itself is valid; an
/// address that could not be resolved comes back as an entry carrying a
/// `message` and no `ip`. Single-object bodies are left to the status code.
pub(crate) fn failed_entry_message(body: &[u8]) -> Option<String> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(body).ok()?;
    entries.iter().find_map(|entry| {
        if entry.get("ip").is_some() {
            return None;
        }
        entry.get("message")?.as_str().map(str::to_string)
    })
}

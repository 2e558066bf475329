//! Lookup error taxonomy
//!
//! Every provider maps its own status codes and error bodies onto these kinds,
//! so callers never see provider-specific vocabulary.

/// Errors produced by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// The configuration does not allow building a request.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// No HTTP response was received (network failure, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The provider rejected the credentials or the quota is exhausted.
    #[error("usage limit reached or invalid credentials")]
    UsageLimitReached,
    /// The queried address is unknown to the provider.
    #[error("address not found")]
    NotFound,
    /// The queried address is private, reserved or otherwise not routable.
    #[error("reserved address range")]
    ReservedAddress,
    /// A response arrived but does not match the provider schema.
    #[error("parse error: {0}")]
    Parse(String),
    /// Unmapped provider code, carried as-is.
    #[error("provider error code {0}")]
    Other(u16),
    /// The cancel token fired before a response was received.
    #[error("lookup cancelled")]
    Cancelled,
}

impl LocateError {
    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<serde_json::Error> for LocateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(LocateError::Transport("timeout".into()).is_retryable());

        let others = vec![
            LocateError::Config("bad".into()),
            LocateError::UsageLimitReached,
            LocateError::NotFound,
            LocateError::ReservedAddress,
            LocateError::Parse("eof".into()),
            LocateError::Other(500),
            LocateError::Cancelled,
        ];
        for e in others {
            assert!(!e.is_retryable(), "{:?}", e);
        }
    }

    #[test]
    fn test_other_display_carries_code() {
        assert_eq!(LocateError::Other(418).to_string(), "provider error code 418");
    }

    #[test]
    fn test_from_serde_json_error_is_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: LocateError = err.into();
        assert!(matches!(e, LocateError::Parse(_)));
    }
}

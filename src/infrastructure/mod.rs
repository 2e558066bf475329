//! Infrastructure Layer
//!
//! Cross-cutting runtime helpers used by the application layer.

pub mod cancel;

pub use cancel::CancelToken;

//! HTTP Transport Port
//!
//! Defines the interface for executing provider requests.
//! Implementations may use reqwest, a test double, or any other client.

use crate::domain::entities::{HttpRequest, RawResponse};
use crate::domain::error::LocateError;
use async_trait::async_trait;

/// Executes one HTTP exchange.
///
/// Any HTTP status, success or not, is returned as a [`RawResponse`];
/// only failures to obtain a response at all are reported as
/// [`LocateError::Transport`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, LocateError>;
}

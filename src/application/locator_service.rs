//! Locator Service - Main application use case
//!
//! Runs one lookup against a caller-chosen provider client:
//! build the request, execute it, validate the response, decode it.

use crate::domain::entities::IpLocation;
use crate::domain::error::LocateError;
use crate::domain::ports::{HttpTransport, IpGeoService};
use crate::infrastructure::CancelToken;
use std::sync::Arc;

/// Locator service - main application use case.
///
/// Stateless apart from the shared transport: every call is a single
/// attempt and the first failing step is returned as-is. Retry policy
/// belongs to the caller.
#[derive(Clone)]
pub struct LocatorService {
    transport: Arc<dyn HttpTransport>,
}

impl LocatorService {
    /// Create a new locator service.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Resolve the addresses configured on `service`.
    ///
    /// The cancel token only interrupts the HTTP exchange. Once a response
    /// has been received it is always validated and decoded.
    ///
    /// # Returns
    /// One record per resolved address (a single record unless the service
    /// issued a batch request).
    pub async fn locate(
        &self,
        service: &dyn IpGeoService,
        cancel: Option<&CancelToken>,
    ) -> Result<Vec<IpLocation>, LocateError> {
        let provider = service.provider();

        // 1. Build
        let request = service.build_request()?;

        // 2. Execute
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(LocateError::Cancelled);
        }
        let exchange = self.transport.execute(&request);
        let response = match cancel {
            Some(token) => tokio::select! {
                response = exchange => response?,
                _ = token.cancelled() => {
                    tracing::info!("{} lookup cancelled", provider);
                    return Err(LocateError::Cancelled);
                }
            },
            None => exchange.await?,
        };

        // 3. Validate
        if let Some(err) = service.validate_response(response.status, &response.body) {
            tracing::warn!(
                "{} lookup rejected: status={} error={}",
                provider,
                response.status,
                err
            );
            return Err(err);
        }

        // 4. Decode
        let records = service.decode(&response.body)?;
        tracing::debug!("{} lookup resolved {} record(s)", provider, records.len());

        Ok(records)
    }

    /// Resolve a single address and return its record.
    pub async fn locate_one(
        &self,
        service: &dyn IpGeoService,
        cancel: Option<&CancelToken>,
    ) -> Result<IpLocation, LocateError> {
        self.locate(service, cancel)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LocateError::Parse("empty response".into()))
    }
}

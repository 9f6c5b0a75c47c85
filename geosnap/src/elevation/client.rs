//! Elevation client trait and Open-Elevation implementation.
//!
//! The [`ElevationClient`] trait abstracts over the remote DEM service so the
//! cache can be exercised without network access. [`OpenElevationClient`]
//! queries an Open-Elevation compatible endpoint via `reqwest`.

use std::future::Future;

use serde::Deserialize;

use super::config::ElevationConfig;
use super::error::ElevationError;

/// Trait for fetching terrain elevation for a coordinate.
pub trait ElevationClient: Send + Sync {
    /// Fetch the terrain elevation (meters) at the given coordinate.
    fn fetch_elevation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<f64, ElevationError>> + Send;
}

// Allow a shared client to back several caches.
impl<T: ElevationClient> ElevationClient for std::sync::Arc<T> {
    fn fetch_elevation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> impl Future<Output = Result<f64, ElevationError>> + Send {
        (**self).fetch_elevation(latitude, longitude)
    }
}

/// Open-Elevation lookup response.
///
/// Only `results[].elevation` is read; other fields are ignored.
#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: Option<f64>,
}

/// Client for Open-Elevation compatible lookup endpoints.
///
/// Uses a reusable `reqwest::Client` with the configured timeout applied to
/// every request.
pub struct OpenElevationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OpenElevationClient {
    /// Create a client from configuration.
    pub fn new(config: &ElevationConfig) -> Result<Self, ElevationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ElevationError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the lookup URL for a coordinate.
    fn lookup_url(&self, latitude: f64, longitude: f64) -> String {
        lookup_url(&self.endpoint, latitude, longitude)
    }
}

impl ElevationClient for OpenElevationClient {
    async fn fetch_elevation(&self, latitude: f64, longitude: f64) -> Result<f64, ElevationError> {
        let url = self.lookup_url(latitude, longitude);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ElevationError::Http(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ElevationError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ElevationError::Http(e.to_string()))?;

        let elevation = parse_elevation(&bytes)?;

        tracing::debug!(
            lat = format!("{:.6}", latitude),
            lon = format!("{:.6}", longitude),
            elevation,
            "Elevation lookup succeeded"
        );

        Ok(elevation)
    }
}

/// Format a lookup URL with coordinates rendered to six decimal places.
pub(crate) fn lookup_url(endpoint: &str, latitude: f64, longitude: f64) -> String {
    format!("{}?locations={:.6},{:.6}", endpoint, latitude, longitude)
}

/// Parse `{"results":[{"elevation": z}, ...]}` and return the first elevation.
pub(crate) fn parse_elevation(body: &[u8]) -> Result<f64, ElevationError> {
    let response: LookupResponse =
        serde_json::from_slice(body).map_err(|e| ElevationError::Json(e.to_string()))?;

    response
        .results
        .first()
        .and_then(|r| r.elevation)
        .ok_or(ElevationError::MissingElevation)
}

//! One-shot user location lookup.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

use super::geo::Coordinate;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    Denied,

    #[error("Location unavailable")]
    Unavailable,

    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),
}

/// Source of the user's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Position taken from `lat`/`lng` request parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl QueryLocation {
    pub fn new(lat: Option<f64>, lng: Option<f64>) -> Self {
        Self { lat, lng }
    }
}

#[async_trait]
impl LocationProvider for QueryLocation {
    async fn current_position(&self) -> Result<Coordinate, LocationError> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Ok(Coordinate::new(lat, lng))
            }
            (None, None) => Err(LocationError::Denied),
            _ => Err(LocationError::Unavailable),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Resolved,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    pub status: LocationStatus,
    pub coordinate: Option<Coordinate>,
}

impl ResolvedLocation {
    pub fn unavailable() -> Self {
        Self {
            status: LocationStatus::Unavailable,
            coordinate: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeolocationService {
    timeout: Duration,
}

impl GeolocationService {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Ask the provider once. Denial, failure and timeout all come back as
    /// `Unavailable`; the caller continues without distances.
    pub async fn resolve(&self, provider: &dyn LocationProvider) -> ResolvedLocation {
        let outcome = match tokio::time::timeout(self.timeout, provider.current_position()).await
        {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout(self.timeout)),
        };

        match outcome {
            Ok(coordinate) => ResolvedLocation {
                status: LocationStatus::Resolved,
                coordinate: Some(coordinate),
            },
            Err(e) => {
                tracing::debug!("User location not resolved: {}", e);
                ResolvedLocation::unavailable()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowProvider;

    #[async_trait]
    impl LocationProvider for SlowProvider {
        async fn current_position(&self) -> Result<Coordinate, LocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinate::new(-7.27, 112.75))
        }
    }

    #[tokio::test]
    async fn test_query_location_resolves() {
        let service = GeolocationService::new(Duration::from_secs(1));
        let resolved = service
            .resolve(&QueryLocation::new(Some(-7.27), Some(112.75)))
            .await;

        assert_eq!(resolved.status, LocationStatus::Resolved);
        assert_eq!(resolved.coordinate, Some(Coordinate::new(-7.27, 112.75)));
    }

    #[tokio::test]
    async fn test_query_location_absent_is_denied() {
        let result = QueryLocation::default().current_position().await;
        assert_eq!(result, Err(LocationError::Denied));
    }

    #[tokio::test]
    async fn test_query_location_partial_or_nan_is_unavailable() {
        let partial = QueryLocation::new(Some(-7.27), None).current_position().await;
        assert_eq!(partial, Err(LocationError::Unavailable));

        let nan = QueryLocation::new(Some(f64::NAN), Some(112.75))
            .current_position()
            .await;
        assert_eq!(nan, Err(LocationError::Unavailable));
    }

    #[tokio::test]
    async fn test_denied_maps_to_unavailable() {
        let service = GeolocationService::new(Duration::from_secs(1));
        let resolved = service.resolve(&QueryLocation::default()).await;
        assert_eq!(resolved, ResolvedLocation::unavailable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_unavailable() {
        let service = GeolocationService::new(Duration::from_millis(10_000));
        let resolved = service.resolve(&SlowProvider).await;
        assert_eq!(resolved.status, LocationStatus::Unavailable);
        assert!(resolved.coordinate.is_none());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::Result;
use crate::features::hospitals::dtos::HospitalListingDto;
use crate::features::locator::filter::{DistanceBand, FilteredHospital, SERVICE_OPTIONS};
use crate::features::locator::geolocation::LocationStatus;
use crate::features::locator::map_view::{MapEvent, MapView};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LocatorQuery {
    /// Case-insensitive substring of the hospital name
    pub search: Option<String>,
    /// Comma-separated service names; every one must be offered
    pub services: Option<String>,
    /// One of `1 km`, `5 km`, `10 km`, `15 km`, `Semua`
    pub max_distance: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Service chip just clicked; toggled against `services`
    pub toggle_service: Option<String>,
    /// Hospital code whose popup the user opened; empty closes the popup
    pub popup: Option<String>,
}

impl LocatorQuery {
    pub fn selected_services(&self) -> Vec<String> {
        self.services
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn toggled_service(&self) -> Option<String> {
        self.toggle_service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn popup_event(&self) -> Option<MapEvent> {
        match self.popup.as_deref().map(str::trim) {
            None => None,
            Some("") => Some(MapEvent::PopupClosed),
            Some(code) => Some(MapEvent::PopupOpened(code.to_string())),
        }
    }

    pub fn distance_band(&self) -> Result<DistanceBand> {
        match self.max_distance.as_deref() {
            Some(label) => label.parse(),
            None => Ok(DistanceBand::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocatorHospitalDto {
    #[serde(flatten)]
    pub hospital: HospitalListingDto,
    /// Kilometres from the user, two decimals
    pub jarak: Option<f64>,
    pub highlight: bool,
}

impl From<FilteredHospital> for LocatorHospitalDto {
    fn from(f: FilteredHospital) -> Self {
        Self {
            hospital: f.hospital.into(),
            jarak: f.distance_km,
            highlight: f.highlight,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocatorResponseDto {
    pub hospitals: Vec<LocatorHospitalDto>,
    pub map: MapView,
    pub location_status: LocationStatus,
    /// Set when live data could not be loaded and the static dataset is shown
    pub warning: Option<String>,
    /// When the hospital feed last refreshed; null before the first poll
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LocatorOptionsDto {
    pub services: Vec<String>,
    pub distance_bands: Vec<String>,
}

impl Default for LocatorOptionsDto {
    fn default() -> Self {
        Self {
            services: SERVICE_OPTIONS.iter().map(|s| s.to_string()).collect(),
            distance_bands: DistanceBand::OPTIONS
                .iter()
                .map(|b| b.label().to_string())
                .collect(),
        }
    }
}

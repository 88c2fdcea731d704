use std::sync::Arc;

use crate::core::error::Result;
use crate::features::locator::dataset::LoadOutcome;
use crate::features::locator::dtos::{LocatorOptionsDto, LocatorQuery, LocatorResponseDto};
use crate::features::locator::feed::HospitalFeed;
use crate::features::locator::geolocation::{GeolocationService, LocationStatus, QueryLocation};
use crate::features::locator::page_state::{LocatorEvent, LocatorState};

/// Runs the locator pipeline over the current feed snapshot
pub struct LocatorService {
    feed: Arc<HospitalFeed>,
    geolocation: GeolocationService,
}

impl LocatorService {
    pub fn new(feed: Arc<HospitalFeed>, geolocation: GeolocationService) -> Self {
        Self { feed, geolocation }
    }

    pub async fn locate(&self, query: LocatorQuery) -> Result<LocatorResponseDto> {
        let band = query.distance_band()?;
        let services = query.selected_services();
        let search = query.search.clone().unwrap_or_default();

        let snapshot = self.feed.snapshot().await;
        let resolved = self
            .geolocation
            .resolve(&QueryLocation::new(query.lat, query.lng))
            .await;

        let location_event = match resolved.coordinate {
            Some(coordinate) => LocatorEvent::LocationResolved(coordinate),
            None => LocatorEvent::LocationUnavailable,
        };

        let state = LocatorState::new(Vec::new(), None).apply(LocatorEvent::RefreshIssued);
        let generation = state.issued_generation();
        let mut state = state
            .apply(LocatorEvent::RefreshCompleted {
                generation,
                outcome: LoadOutcome {
                    hospitals: snapshot.hospitals,
                    warning: snapshot.warning,
                },
            })
            .apply(location_event)
            .apply(LocatorEvent::SearchChanged(search))
            .apply(LocatorEvent::ServicesReplaced(services))
            .apply(LocatorEvent::MaxDistanceChanged(band));

        if let Some(service) = query.toggled_service() {
            state = state.apply(LocatorEvent::ServiceToggled(service));
        }
        if let Some(event) = query.popup_event() {
            state = state.apply(LocatorEvent::Map(event));
        }

        let view = state.view();

        tracing::debug!(
            "Locator matched {} hospitals (search: {:?}, services: {:?}, band: {}, location: {:?})",
            view.hospitals.len(),
            view.criteria.search,
            view.criteria.services,
            view.criteria.max_distance,
            resolved.status
        );

        Ok(LocatorResponseDto {
            hospitals: view.hospitals.into_iter().map(Into::into).collect(),
            map: view.map,
            location_status: view.location_status.unwrap_or(LocationStatus::Unavailable),
            warning: view.warning,
            refreshed_at: snapshot.refreshed_at,
        })
    }

    pub fn options(&self) -> LocatorOptionsDto {
        LocatorOptionsDto::default()
    }
}

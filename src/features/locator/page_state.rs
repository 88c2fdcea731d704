//! Locator page state driven by user and data events.

use super::dataset::LoadOutcome;
use super::filter::{apply_filters, DistanceBand, FilterCriteria, FilteredHospital};
use super::geo::Coordinate;
use super::geolocation::LocationStatus;
use super::map_view::{MapEvent, MapView};
use crate::features::hospitals::models::Hospital;

#[derive(Debug, Clone)]
pub enum LocatorEvent {
    SearchChanged(String),
    /// Select the service if unselected, otherwise deselect it
    ServiceToggled(String),
    ServicesReplaced(Vec<String>),
    MaxDistanceChanged(DistanceBand),
    LocationResolved(Coordinate),
    LocationUnavailable,
    RefreshIssued,
    RefreshCompleted {
        generation: u64,
        outcome: LoadOutcome,
    },
    Map(MapEvent),
}

#[derive(Debug, Clone, Default)]
pub struct LocatorState {
    hospitals: Vec<Hospital>,
    warning: Option<String>,
    criteria: FilterCriteria,
    location: Option<Coordinate>,
    location_status: Option<LocationStatus>,
    issued_generation: u64,
    applied_generation: u64,
    map: MapView,
}

/// Everything a client needs to draw the page
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorView {
    pub hospitals: Vec<FilteredHospital>,
    pub map: MapView,
    pub warning: Option<String>,
    pub location_status: Option<LocationStatus>,
    pub criteria: FilterCriteria,
}

impl LocatorState {
    pub fn new(hospitals: Vec<Hospital>, warning: Option<String>) -> Self {
        Self {
            hospitals,
            warning,
            ..Default::default()
        }
        .refilter()
    }

    pub fn issued_generation(&self) -> u64 {
        self.issued_generation
    }

    pub fn apply(mut self, event: LocatorEvent) -> LocatorState {
        match event {
            LocatorEvent::SearchChanged(search) => self.criteria.search = search,
            LocatorEvent::ServiceToggled(service) => {
                match self.criteria.services.iter().position(|s| *s == service) {
                    Some(index) => {
                        self.criteria.services.remove(index);
                    }
                    None => self.criteria.services.push(service),
                }
            }
            LocatorEvent::ServicesReplaced(services) => self.criteria.services = services,
            LocatorEvent::MaxDistanceChanged(band) => self.criteria.max_distance = band,
            LocatorEvent::LocationResolved(coordinate) => {
                self.location = Some(coordinate);
                self.location_status = Some(LocationStatus::Resolved);
                self.map = self.map.apply(MapEvent::UserLocated(Some(coordinate)));
            }
            LocatorEvent::LocationUnavailable => {
                self.location = None;
                self.location_status = Some(LocationStatus::Unavailable);
                self.map = self.map.apply(MapEvent::UserLocated(None));
            }
            LocatorEvent::RefreshIssued => {
                self.issued_generation += 1;
                return self;
            }
            LocatorEvent::RefreshCompleted {
                generation,
                outcome,
            } => {
                if generation <= self.applied_generation {
                    tracing::debug!(
                        generation,
                        applied = self.applied_generation,
                        "Discarding stale hospital refresh"
                    );
                    return self;
                }
                self.applied_generation = generation;
                self.hospitals = outcome.hospitals;
                self.warning = outcome.warning;
            }
            LocatorEvent::Map(event) => {
                self.map = self.map.apply(event);
                return self;
            }
        }

        self.refilter()
    }

    fn filtered(&self) -> Vec<FilteredHospital> {
        apply_filters(&self.hospitals, &self.criteria, self.location)
    }

    fn refilter(mut self) -> Self {
        let filtered = self.filtered();
        self.map = self.map.apply(MapEvent::HospitalsChanged(filtered));
        self
    }

    pub fn view(&self) -> LocatorView {
        LocatorView {
            hospitals: self.filtered(),
            map: self.map.clone(),
            warning: self.warning.clone(),
            location_status: self.location_status,
            criteria: self.criteria.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locator::dataset::{fixtures::hospital, FALLBACK_WARNING};

    fn codes(view: &LocatorView) -> Vec<String> {
        view.hospitals.iter().map(|f| f.hospital.code.clone()).collect()
    }

    fn initial() -> LocatorState {
        LocatorState::new(
            vec![
                hospital("RS001", "RSUD Dr. Soetomo", -7.27, 112.75, &["UGD 24 Jam"]),
                hospital("RS002", "RS Airlangga", -7.30, 112.78, &["Poli Anak"]),
            ],
            None,
        )
    }

    fn outcome(codes: &[&str], warning: Option<&str>) -> LoadOutcome {
        LoadOutcome {
            hospitals: codes
                .iter()
                .map(|c| hospital(c, c, -7.25, 112.75, &[]))
                .collect(),
            warning: warning.map(str::to_string),
        }
    }

    #[test]
    fn test_initial_view_opens_first_popup() {
        let view = initial().view();
        assert_eq!(codes(&view), vec!["RS001", "RS002"]);
        assert_eq!(view.map.open_popup.as_deref(), Some("RS001"));
        assert!(view.location_status.is_none());
    }

    #[test]
    fn test_service_toggle_adds_and_removes() {
        let state = initial().apply(LocatorEvent::ServiceToggled("Poli Anak".into()));
        assert_eq!(codes(&state.view()), vec!["RS002"]);
        assert!(state.view().hospitals[0].highlight);
        assert_eq!(state.view().map.open_popup.as_deref(), Some("RS002"));

        let state = state.apply(LocatorEvent::ServiceToggled("Poli Anak".into()));
        assert!(state.view().criteria.services.is_empty());
        assert_eq!(codes(&state.view()), vec!["RS001", "RS002"]);
    }

    #[test]
    fn test_search_and_services_replaced() {
        let state = initial()
            .apply(LocatorEvent::SearchChanged("soetomo".into()))
            .apply(LocatorEvent::ServicesReplaced(vec!["ugd".into()]));
        assert_eq!(codes(&state.view()), vec!["RS001"]);
    }

    #[test]
    fn test_location_then_distance_band() {
        let state = initial()
            .apply(LocatorEvent::LocationResolved(Coordinate::new(-7.30, 112.78)))
            .apply(LocatorEvent::MaxDistanceChanged(DistanceBand::OneKm));

        let view = state.view();
        assert_eq!(codes(&view), vec!["RS002"]);
        assert_eq!(view.location_status, Some(LocationStatus::Resolved));
        assert_eq!(view.map.center, Coordinate::new(-7.30, 112.78));
    }

    #[test]
    fn test_location_unavailable_with_band_hides_everything() {
        let state = initial()
            .apply(LocatorEvent::LocationUnavailable)
            .apply(LocatorEvent::MaxDistanceChanged(DistanceBand::FifteenKm));

        let view = state.view();
        assert!(view.hospitals.is_empty());
        assert_eq!(view.location_status, Some(LocationStatus::Unavailable));
        assert!(view.map.open_popup.is_none());
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let state = initial()
            .apply(LocatorEvent::RefreshIssued)
            .apply(LocatorEvent::RefreshIssued);
        assert_eq!(state.issued_generation(), 2);

        let state = state
            .apply(LocatorEvent::RefreshCompleted {
                generation: 2,
                outcome: outcome(&["NEW"], None),
            })
            .apply(LocatorEvent::RefreshCompleted {
                generation: 1,
                outcome: outcome(&["OLD"], None),
            });

        assert_eq!(codes(&state.view()), vec!["NEW"]);
    }

    #[test]
    fn test_failed_refresh_carries_warning() {
        let state = initial().apply(LocatorEvent::RefreshIssued).apply(
            LocatorEvent::RefreshCompleted {
                generation: 1,
                outcome: outcome(&["RS001"], Some(FALLBACK_WARNING)),
            },
        );
        assert_eq!(state.view().warning.as_deref(), Some(FALLBACK_WARNING));
    }

    #[test]
    fn test_map_popup_events_pass_through() {
        let state = initial().apply(LocatorEvent::Map(MapEvent::PopupOpened("RS002".into())));
        assert_eq!(state.view().map.open_popup.as_deref(), Some("RS002"));

        let state = state.apply(LocatorEvent::Map(MapEvent::PopupClosed));
        assert!(state.view().map.open_popup.is_none());
    }
}

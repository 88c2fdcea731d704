//! Map state: markers, popups, center and tiles.

use serde::Serialize;
use utoipa::ToSchema;

use super::filter::FilteredHospital;
use super::geo::{Coordinate, FALLBACK_CENTER};

pub const DEFAULT_ZOOM: u8 = 13;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    r#"© <a href="https://www.openstreetmap.org/">OpenStreetMap</a> contributors"#;
const EXTERNAL_MAP_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserMarker {
    pub position: Coordinate,
    pub label: String,
}

impl UserMarker {
    fn at(position: Coordinate) -> Self {
        Self {
            position,
            label: format!(
                "Lokasi Anda\nLat: {:.4}\nLng: {:.4}",
                position.lat, position.lng
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HospitalMarker {
    pub code: String,
    pub position: Coordinate,
    pub name: String,
    pub address: String,
    pub distance_km: Option<f64>,
    pub services: Vec<String>,
    pub highlight: bool,
    pub popup_open: bool,
    pub detail_url: String,
    pub external_map_url: String,
}

impl HospitalMarker {
    fn from_filtered(entry: &FilteredHospital) -> Self {
        let hospital = &entry.hospital;
        Self {
            code: hospital.code.clone(),
            position: hospital.coordinate,
            name: hospital.name.clone(),
            address: hospital.address.clone(),
            distance_km: entry.distance_km,
            services: hospital.services.clone(),
            highlight: entry.highlight,
            popup_open: false,
            detail_url: detail_url(&hospital.code),
            external_map_url: external_map_url(&hospital.name, &hospital.address),
        }
    }
}

pub fn detail_url(code: &str) -> String {
    format!("/hospitals/{}", code)
}

/// Google Maps search link for a hospital's name and address
pub fn external_map_url(name: &str, address: &str) -> String {
    let query = format!("{} {}", name, address);
    format!("{}{}", EXTERNAL_MAP_BASE, urlencoding::encode(&query))
}

#[derive(Debug, Clone)]
pub enum MapEvent {
    /// New filtered, sorted hospital list
    HospitalsChanged(Vec<FilteredHospital>),
    UserLocated(Option<Coordinate>),
    PopupOpened(String),
    PopupClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub user_marker: Option<UserMarker>,
    pub markers: Vec<HospitalMarker>,
    pub open_popup: Option<String>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
            tiles: TileLayer::default(),
            user_marker: None,
            markers: Vec::new(),
            open_popup: None,
        }
    }
}

impl MapView {
    pub fn apply(mut self, event: MapEvent) -> MapView {
        match event {
            MapEvent::HospitalsChanged(filtered) => {
                let same_set = filtered.len() == self.markers.len()
                    && filtered
                        .iter()
                        .zip(&self.markers)
                        .all(|(f, m)| f.hospital.code == m.code);

                self.markers = filtered.iter().map(HospitalMarker::from_filtered).collect();
                if !same_set {
                    self.open_popup = self.markers.first().map(|m| m.code.clone());
                }
            }
            MapEvent::UserLocated(position) => {
                self.center = position.unwrap_or(FALLBACK_CENTER);
                self.user_marker = position.map(UserMarker::at);
            }
            MapEvent::PopupOpened(code) => {
                if self.markers.iter().any(|m| m.code == code) {
                    self.open_popup = Some(code);
                }
            }
            MapEvent::PopupClosed => self.open_popup = None,
        }

        self.sync_popups();
        self
    }

    fn sync_popups(&mut self) {
        let open = self.open_popup.as_deref();
        for marker in &mut self.markers {
            marker.popup_open = Some(marker.code.as_str()) == open;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locator::dataset::fixtures::hospital;

    fn filtered(codes: &[&str]) -> Vec<FilteredHospital> {
        codes
            .iter()
            .enumerate()
            .map(|(i, code)| FilteredHospital {
                hospital: hospital(code, &format!("RS {}", code), -7.25, 112.75, &["ICU"]),
                distance_km: Some(i as f64),
                highlight: false,
            })
            .collect()
    }

    fn open_codes(view: &MapView) -> Vec<&str> {
        view.markers
            .iter()
            .filter(|m| m.popup_open)
            .map(|m| m.code.as_str())
            .collect()
    }

    #[test]
    fn test_defaults_to_fallback_center() {
        let view = MapView::default();
        assert_eq!(view.center, FALLBACK_CENTER);
        assert_eq!(view.zoom, 13);
        assert_eq!(view.tiles.url, TILE_URL);
        assert!(view.user_marker.is_none());
    }

    #[test]
    fn test_first_hospital_popup_forced_open() {
        let view = MapView::default().apply(MapEvent::HospitalsChanged(filtered(&["A", "B", "C"])));

        assert_eq!(view.open_popup.as_deref(), Some("A"));
        assert_eq!(open_codes(&view), vec!["A"]);
    }

    #[test]
    fn test_user_can_open_another_popup_until_set_changes() {
        let view = MapView::default()
            .apply(MapEvent::HospitalsChanged(filtered(&["A", "B"])))
            .apply(MapEvent::PopupOpened("B".to_string()));
        assert_eq!(view.open_popup.as_deref(), Some("B"));

        let view = view.apply(MapEvent::HospitalsChanged(filtered(&["A", "B"])));
        assert_eq!(view.open_popup.as_deref(), Some("B"));

        let view = view.apply(MapEvent::HospitalsChanged(filtered(&["C", "A"])));
        assert_eq!(view.open_popup.as_deref(), Some("C"));
        assert_eq!(open_codes(&view), vec!["C"]);
    }

    #[test]
    fn test_popup_closed_and_unknown_code() {
        let view = MapView::default()
            .apply(MapEvent::HospitalsChanged(filtered(&["A"])))
            .apply(MapEvent::PopupOpened("ZZZ".to_string()));
        assert_eq!(view.open_popup.as_deref(), Some("A"));

        let view = view.apply(MapEvent::PopupClosed);
        assert!(view.open_popup.is_none());
        assert!(open_codes(&view).is_empty());
    }

    #[test]
    fn test_empty_list_has_no_popup() {
        let view = MapView::default()
            .apply(MapEvent::HospitalsChanged(filtered(&["A"])))
            .apply(MapEvent::HospitalsChanged(Vec::new()));
        assert!(view.open_popup.is_none());
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_user_location_centers_map() {
        let user = Coordinate::new(-7.2912, 112.73);
        let view = MapView::default().apply(MapEvent::UserLocated(Some(user)));

        assert_eq!(view.center, user);
        let marker = view.user_marker.as_ref().unwrap();
        assert_eq!(marker.label, "Lokasi Anda\nLat: -7.2912\nLng: 112.7300");

        let view = view.apply(MapEvent::UserLocated(None));
        assert_eq!(view.center, FALLBACK_CENTER);
        assert!(view.user_marker.is_none());
    }

    #[test]
    fn test_popup_actions() {
        assert_eq!(detail_url("RS001"), "/hospitals/RS001");
        assert_eq!(
            external_map_url("RS Islam", "Jl. A. Yani 2-4"),
            "https://www.google.com/maps/search/?api=1&query=RS%20Islam%20Jl.%20A.%20Yani%202-4"
        );
    }
}

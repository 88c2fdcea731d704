//! Search, service and distance filtering with distance ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::geo::{haversine_km, round_km, Coordinate};
use crate::core::error::AppError;
use crate::features::hospitals::models::Hospital;

/// Services offered as filter checkboxes
pub const SERVICE_OPTIONS: &[&str] = &[
    "UGD 24 Jam",
    "IGD 24 Jam",
    "Poli Umum",
    "Poli Anak",
    "Poli Jiwa",
    "Andrologi",
    "Toraks dan Kardiak",
    "Anestesiologi dan Reanimasi",
    "Poli Gigi",
    "Poli Mata",
    "Poli THT-KL",
    "Poli Jantung",
    "Poli Paru",
    "Poli Penyakit Dalam",
    "Poli Bedah Umum",
    "Poli Kandungan",
    "Poli Saraf",
    "Laboratorium",
    "Radiologi",
    "ICU",
    "Rawat Inap",
    "Medical Check-Up",
    "Fisioterapi",
    "Farmasi",
    "Ruang Isolasi",
    "Layanan BPJS",
];

const ALL_LABEL: &str = "Semua";

/// Maximum distance selection; the wire form is the literal label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistanceBand {
    OneKm,
    FiveKm,
    TenKm,
    FifteenKm,
    #[default]
    All,
}

impl DistanceBand {
    pub const OPTIONS: [DistanceBand; 5] = [
        DistanceBand::OneKm,
        DistanceBand::FiveKm,
        DistanceBand::TenKm,
        DistanceBand::FifteenKm,
        DistanceBand::All,
    ];

    /// Upper bound in kilometres, `None` for "Semua"
    pub fn max_km(&self) -> Option<f64> {
        match self {
            DistanceBand::OneKm => Some(1.0),
            DistanceBand::FiveKm => Some(5.0),
            DistanceBand::TenKm => Some(10.0),
            DistanceBand::FifteenKm => Some(15.0),
            DistanceBand::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceBand::OneKm => "1 km",
            DistanceBand::FiveKm => "5 km",
            DistanceBand::TenKm => "10 km",
            DistanceBand::FifteenKm => "15 km",
            DistanceBand::All => ALL_LABEL,
        }
    }

    fn admits(&self, distance_km: Option<f64>) -> bool {
        match (self.max_km(), distance_km) {
            (None, _) => true,
            (Some(max), Some(distance)) => distance <= max,
            (Some(_), None) => false,
        }
    }
}

impl FromStr for DistanceBand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceBand::OPTIONS
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| AppError::Validation(format!("Jarak maksimum tidak dikenal: {}", s)))
    }
}

impl TryFrom<String> for DistanceBand {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistanceBand> for String {
    fn from(band: DistanceBand) -> Self {
        band.label().to_string()
    }
}

impl fmt::Display for DistanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub services: Vec<String>,
    pub max_distance: DistanceBand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredHospital {
    pub hospital: Hospital,
    /// Rounded to two decimals; `None` without a user location
    pub distance_km: Option<f64>,
    pub highlight: bool,
}

fn offers_all(hospital: &Hospital, selected: &[String]) -> bool {
    selected.iter().all(|wanted| {
        let wanted = wanted.to_lowercase();
        hospital
            .services
            .iter()
            .any(|offered| offered.to_lowercase().contains(&wanted))
    })
}

fn by_distance(a: &FilteredHospital, b: &FilteredHospital) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter `hospitals` by `criteria` and order them nearest first.
///
/// Hospitals without a distance sort last and keep their relative order.
pub fn apply_filters(
    hospitals: &[Hospital],
    criteria: &FilterCriteria,
    user: Option<Coordinate>,
) -> Vec<FilteredHospital> {
    let search = criteria.search.to_lowercase();
    let has_selection = !criteria.services.is_empty();

    let mut filtered: Vec<FilteredHospital> = hospitals
        .iter()
        .filter_map(|hospital| {
            let distance_km = user.map(|u| round_km(haversine_km(u, hospital.coordinate)));
            let matches_services = offers_all(hospital, &criteria.services);

            let keep = hospital.name.to_lowercase().contains(&search)
                && matches_services
                && criteria.max_distance.admits(distance_km);

            keep.then(|| FilteredHospital {
                hospital: hospital.clone(),
                distance_km,
                highlight: has_selection && matches_services,
            })
        })
        .collect();

    filtered.sort_by(by_distance);
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locator::dataset::fixtures::hospital;

    fn codes(filtered: &[FilteredHospital]) -> Vec<&str> {
        filtered.iter().map(|f| f.hospital.code.as_str()).collect()
    }

    fn sample() -> Vec<Hospital> {
        vec![
            hospital("RS001", "RSUD Dr. Soetomo", -7.27, 112.75, &["UGD 24 Jam", "ICU"]),
            hospital("RS002", "RS Airlangga", -7.30, 112.78, &["Poli Anak", "Radiologi"]),
            hospital("RS003", "RS Islam", -7.20, 112.70, &["ugd 24 jam", "Poli Anak Terpadu"]),
        ]
    }

    #[test]
    fn test_distance_band_parses_exact_literals() {
        for band in DistanceBand::OPTIONS {
            assert_eq!(band.label().parse::<DistanceBand>().unwrap(), band);
        }
        assert_eq!("5 km".parse::<DistanceBand>().unwrap().max_km(), Some(5.0));
        assert_eq!("Semua".parse::<DistanceBand>().unwrap().max_km(), None);
    }

    #[test]
    fn test_distance_band_rejects_unknown() {
        for input in [
            "2 km", "5km", "semua", "", "5 KM", "-1 km", "01 km", "+5 km", "010 km", " 5 km",
        ] {
            assert!(input.parse::<DistanceBand>().is_err(), "{input}");
        }
    }

    #[test]
    fn test_distance_band_serde_uses_label() {
        let json = serde_json::to_string(&DistanceBand::TenKm).unwrap();
        assert_eq!(json, "\"10 km\"");
        let band: DistanceBand = serde_json::from_str("\"15 km\"").unwrap();
        assert_eq!(band, DistanceBand::FifteenKm);
        assert!(serde_json::from_str::<DistanceBand>("\"3 km\"").is_err());
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let result = apply_filters(&sample(), &FilterCriteria::default(), None);
        assert_eq!(codes(&result), vec!["RS001", "RS002", "RS003"]);
        assert!(result.iter().all(|f| !f.highlight && f.distance_km.is_none()));
    }

    #[test]
    fn test_search_is_case_insensitive_on_name() {
        let criteria = FilterCriteria {
            search: "airLANGGA".to_string(),
            ..Default::default()
        };
        assert_eq!(codes(&apply_filters(&sample(), &criteria, None)), vec!["RS002"]);
    }

    #[test]
    fn test_every_selected_service_must_be_offered() {
        let criteria = FilterCriteria {
            services: vec!["UGD 24 Jam".to_string(), "Poli Anak".to_string()],
            ..Default::default()
        };
        let result = apply_filters(&sample(), &criteria, None);

        assert_eq!(codes(&result), vec!["RS003"]);
        assert!(result[0].highlight);
    }

    #[test]
    fn test_selecting_all_offered_services_keeps_hospital_highlighted() {
        let hospitals = sample();
        for target in &hospitals {
            let criteria = FilterCriteria {
                services: target.services.clone(),
                ..Default::default()
            };

            let filtered = apply_filters(&hospitals, &criteria, None);
            let entry = filtered
                .iter()
                .find(|f| f.hospital.code == target.code)
                .unwrap_or_else(|| panic!("{} dropped", target.code));
            assert!(entry.highlight, "{} not highlighted", target.code);
        }

        let criteria = FilterCriteria {
            services: vec!["Poli Anak".to_string(), "Radiologi".to_string()],
            ..Default::default()
        };
        assert_eq!(codes(&apply_filters(&hospitals, &criteria, None)), vec!["RS002"]);
    }

    #[test]
    fn test_service_match_is_substring() {
        let criteria = FilterCriteria {
            services: vec!["anak".to_string()],
            ..Default::default()
        };
        assert_eq!(
            codes(&apply_filters(&sample(), &criteria, None)),
            vec!["RS002", "RS003"]
        );
    }

    #[test]
    fn test_distance_band_without_location_excludes_all() {
        let criteria = FilterCriteria {
            max_distance: DistanceBand::FifteenKm,
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &criteria, None).is_empty());
    }

    #[test]
    fn test_sorted_by_distance() {
        let user = Coordinate::new(-7.30, 112.78);
        let result = apply_filters(&sample(), &FilterCriteria::default(), Some(user));

        assert_eq!(codes(&result), vec!["RS002", "RS001", "RS003"]);
        assert_eq!(result[0].distance_km, Some(0.0));
        let distances: Vec<f64> = result.iter().filter_map(|f| f.distance_km).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_undefined_distance_sorts_last_stably() {
        let entry = |code: &str, distance_km: Option<f64>| FilteredHospital {
            hospital: hospital(code, code, -7.2, 112.7, &[]),
            distance_km,
            highlight: false,
        };

        let mut items = vec![entry("A", None), entry("B", Some(3.0)), entry("C", None)];
        items.sort_by(by_distance);

        assert_eq!(codes(&items), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_rs001_end_to_end() {
        let hospitals = vec![
            hospital("RS001", "RSUD Dr. Soetomo", -7.27, 112.75, &["UGD 24 Jam"]),
            hospital("RS099", "RS Dekat", -7.2808, 112.75, &["UGD 24 Jam"]),
        ];
        let user = Coordinate::new(-7.27, 112.75);

        let within_five = FilterCriteria {
            search: String::new(),
            services: vec!["UGD 24 Jam".to_string()],
            max_distance: DistanceBand::FiveKm,
        };
        let result = apply_filters(&hospitals[..1], &within_five, Some(user));
        assert_eq!(codes(&result), vec!["RS001"]);
        assert_eq!(result[0].distance_km, Some(0.0));
        assert!(result[0].highlight);

        let near = apply_filters(&hospitals, &within_five, Some(user));
        let far_distance = near[1].distance_km.unwrap();
        assert!(far_distance > 1.0 && far_distance < 1.3, "{far_distance}");

        let within_one = FilterCriteria {
            max_distance: DistanceBand::OneKm,
            ..within_five
        };
        assert_eq!(
            codes(&apply_filters(&hospitals, &within_one, Some(user))),
            vec!["RS001"]
        );
    }
}

//! Bundled hospital dataset and the static + live merge.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::features::hospitals::dtos::HospitalListingDto;
use crate::features::hospitals::models::Hospital;

const BUNDLED_DATASET: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/hospitals.json"
));

/// Notice shown when live data could not be fetched
pub const FALLBACK_WARNING: &str = "Gagal memuat data rumah sakit. Menggunakan data lokal.";

#[derive(Debug, Deserialize)]
struct DatasetFile {
    rumah_sakit: Vec<HospitalListingDto>,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a `{"rumah_sakit": [...]}` document
pub fn parse(json: &str) -> Result<Vec<Hospital>, DatasetError> {
    let file: DatasetFile = serde_json::from_str(json)?;
    Ok(file.rumah_sakit.into_iter().map(Hospital::from).collect())
}

/// The dataset compiled into the binary
pub fn bundled() -> Result<Vec<Hospital>, DatasetError> {
    parse(BUNDLED_DATASET)
}

/// Read the baseline from `path` when given, else use the bundled copy
pub fn load_baseline(path: Option<&str>) -> Result<Vec<Hospital>, DatasetError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(Path::new(path)).map_err(|source| {
                DatasetError::Io {
                    path: path.to_string(),
                    source,
                }
            })?;
            parse(&json)
        }
        None => bundled(),
    }
}

/// Merge the static baseline with fetched records, keyed by hospital code.
///
/// Fetched entries replace baseline entries with the same code and keep the
/// baseline slot; unseen codes are appended in fetched order. Entries outside
/// the bounding box are dropped, from either side.
pub fn merge(baseline: &[Hospital], fetched: &[Hospital]) -> Vec<Hospital> {
    let mut merged: Vec<Hospital> = Vec::with_capacity(baseline.len() + fetched.len());
    let mut slots: HashMap<String, usize> = HashMap::new();

    let visible_baseline = baseline.iter().filter(|h| h.coordinate.in_bounds());

    for hospital in visible_baseline.chain(fetched.iter()) {
        match slots.get(&hospital.code) {
            Some(&slot) => merged[slot] = hospital.clone(),
            None => {
                slots.insert(hospital.code.clone(), merged.len());
                merged.push(hospital.clone());
            }
        }
    }

    merged.retain(|h| h.coordinate.in_bounds());
    merged
}

/// Merged hospitals plus an optional user-facing warning
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub hospitals: Vec<Hospital>,
    pub warning: Option<String>,
}

/// Combine the baseline with a fetch attempt; a failed fetch yields the baseline and a warning
pub fn load<E>(baseline: &[Hospital], fetched: Result<Vec<Hospital>, E>) -> LoadOutcome {
    match fetched {
        Ok(fetched) => LoadOutcome {
            hospitals: merge(baseline, &fetched),
            warning: None,
        },
        Err(_) => LoadOutcome {
            hospitals: merge(baseline, &[]),
            warning: Some(FALLBACK_WARNING.to_string()),
        },
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::hospital;
    use super::*;

    fn codes(hospitals: &[Hospital]) -> Vec<&str> {
        hospitals.iter().map(|h| h.code.as_str()).collect()
    }

    #[test]
    fn test_bundled_dataset_parses_and_is_in_bounds() {
        let hospitals = bundled().unwrap();
        assert_eq!(hospitals.len(), 9);
        assert_eq!(hospitals[0].code, "RS001");
        assert!(hospitals.iter().all(|h| h.coordinate.in_bounds()));
        assert!(hospitals.iter().all(|h| !h.services.is_empty()));
    }

    #[test]
    fn test_merge_fetched_overrides_by_code() {
        let baseline = vec![
            hospital("RS001", "Nama Lama", -7.27, 112.75, &["UGD 24 Jam"]),
            hospital("RS002", "RS Dua", -7.28, 112.76, &[]),
        ];
        let fetched = vec![hospital("RS001", "Nama Baru", -7.27, 112.75, &["ICU"])];

        let merged = merge(&baseline, &fetched);

        assert_eq!(codes(&merged), vec!["RS001", "RS002"]);
        assert_eq!(merged[0].name, "Nama Baru");
        assert_eq!(merged[0].services, vec!["ICU"]);
    }

    #[test]
    fn test_merge_appends_new_fetched_codes_in_order() {
        let baseline = vec![hospital("RS001", "Satu", -7.27, 112.75, &[])];
        let fetched = vec![
            hospital("RS010", "Sepuluh", -7.20, 112.70, &[]),
            hospital("RS001", "Satu Baru", -7.27, 112.75, &[]),
            hospital("RS011", "Sebelas", -7.21, 112.71, &[]),
        ];

        assert_eq!(
            codes(&merge(&baseline, &fetched)),
            vec!["RS001", "RS010", "RS011"]
        );
    }

    #[test]
    fn test_merge_drops_out_of_box_entries() {
        let baseline = vec![
            hospital("IN-EDGE", "Tepi", -7.4, 112.6, &[]),
            hospital("OUT", "Jakarta", -6.2, 106.8, &[]),
            hospital("OUT-LAT", "Lat", -7.4001, 112.7, &[]),
        ];
        let fetched = vec![
            hospital("FETCH-OUT", "Luar", -7.25, 112.8001, &[]),
            hospital("FETCH-EDGE", "Tepi", -7.1, 112.8, &[]),
        ];

        assert_eq!(
            codes(&merge(&baseline, &fetched)),
            vec!["IN-EDGE", "FETCH-EDGE"]
        );
    }

    #[test]
    fn test_merge_fetched_can_replace_invalid_baseline() {
        let baseline = vec![hospital("RS001", "Salah", 0.0, 0.0, &[])];
        let fetched = vec![hospital("RS001", "Benar", -7.27, 112.75, &[])];

        let merged = merge(&baseline, &fetched);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Benar");
    }

    #[test]
    fn test_load_failure_falls_back_to_baseline_with_warning() {
        let baseline = vec![
            hospital("RS001", "Satu", -7.27, 112.75, &[]),
            hospital("OUT", "Luar", 1.0, 1.0, &[]),
        ];

        let outcome = load::<&str>(&baseline, Err("connection refused"));

        assert_eq!(codes(&outcome.hospitals), vec!["RS001"]);
        assert_eq!(outcome.warning.as_deref(), Some(FALLBACK_WARNING));
    }

    #[test]
    fn test_load_success_has_no_warning() {
        let baseline = vec![hospital("RS001", "Satu", -7.27, 112.75, &[])];
        let outcome = load::<&str>(&baseline, Ok(vec![]));
        assert!(outcome.warning.is_none());
        assert_eq!(outcome.hospitals.len(), 1);
    }

    #[test]
    fn test_parse_rejects_wrong_root() {
        assert!(matches!(parse("[]"), Err(DatasetError::Parse(_))));
    }

    #[test]
    fn test_load_baseline_missing_file() {
        let result = load_baseline(Some("/definitely/not/here.json"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}

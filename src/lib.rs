pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod fields;
pub mod geo;
pub mod index;
pub mod metadata;
pub mod normalizer;
pub mod ranker;
pub mod scorer;
pub mod timing;
pub mod tokenizer;

pub use config::GeocoderConfig;
pub use engine::Geocoder;
pub use error::GeocodeError;

use serde::{Deserialize, Serialize};

pub type DocId = usize;

/// One row of the reference dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressRecord {
    pub locality_raw: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
    /// Address as written in the source data.
    pub address: String,
    /// Normalized token form of `address`, computed once at construction.
    pub canonical_address: String,
}

impl AddressRecord {
    pub fn new(
        locality_raw: impl Into<String>,
        lat: Option<f64>,
        lon: Option<f64>,
        name: Option<String>,
        address: impl Into<String>,
    ) -> Self {
        let address = address.into();
        let canonical_address = normalizer::normalize(&address);
        Self {
            locality_raw: locality_raw.into(),
            lat,
            lon,
            name: name.filter(|n| !n.is_empty()),
            address,
            canonical_address,
        }
    }

    /// Both coordinates, if present and finite.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Relative importance of the two ranking signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    #[serde(alias = "dl")]
    pub edit: f64,
    #[serde(alias = "bm25")]
    pub lexical: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            edit: 1.0,
            lexical: 1.0,
        }
    }
}

impl Weights {
    pub fn new(edit: f64, lexical: f64) -> Self {
        Self { edit, lexical }
    }

    pub fn is_zero(&self) -> bool {
        self.edit == 0.0 && self.lexical == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.edit.is_finite() && self.lexical.is_finite()
    }
}

/// A reference record scored against one query. `None` means the signal
/// did not return this record.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub record_index: DocId,
    pub edit_score: Option<f64>,
    pub lexical_score: Option<f64>,
    pub combined_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredAddress {
    pub locality: String,
    pub street: String,
    /// House number, with any building qualifiers appended (`"25 корп.3"`).
    pub number: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub address_1: String,
    pub address_2: String,
    pub point_1: StructuredAddress,
    pub point_2: StructuredAddress,
    pub distance_m: f64,
    /// `max(0, 1 - distance_m / 1000)`.
    pub similarity: f64,
}

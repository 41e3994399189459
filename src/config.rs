use crate::error::GeocodeError;
use serde::Deserialize;

/// Width of the character n-grams fed to the lexical index.
pub const DEFAULT_NGRAM_WIDTH: usize = 3;

/// Each signal returns `top_n * CANDIDATE_MULTIPLIER` candidates so the
/// fusion step has room to reorder.
pub const CANDIDATE_MULTIPLIER: usize = 5;

/// BM25 Okapi term frequency saturation.
pub const BM25_K1: f64 = 1.5;

/// BM25 Okapi document length normalization.
pub const BM25_B: f64 = 0.75;

/// Floor for negative IDF values, as a fraction of the average IDF.
pub const BM25_EPSILON: f64 = 0.25;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Distance at which `compare` similarity reaches zero.
pub const SIMILARITY_SCALE_M: f64 = 1000.0;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_REVERSE_TOP_N: usize = 1;
pub const DEFAULT_RADIUS_M: f64 = 200.0;

/// City written into every canonical form.
pub const DEFAULT_CITY: &str = "москва";

/// Locality reported when a canonical form carries no city.
pub const DEFAULT_LOCALITY: &str = "Москва";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
    pub epsilon: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: BM25_K1,
            b: BM25_B,
            epsilon: BM25_EPSILON,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub ngram_width: usize,
    pub candidate_multiplier: usize,
    pub bm25: Bm25Params,
    pub earth_radius_m: f64,
    /// When false, `reverse` accepts `radius_m` but does not cut off by it.
    pub enforce_radius: bool,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            ngram_width: DEFAULT_NGRAM_WIDTH,
            candidate_multiplier: CANDIDATE_MULTIPLIER,
            bm25: Bm25Params::default(),
            earth_radius_m: EARTH_RADIUS_M,
            enforce_radius: false,
        }
    }
}

impl GeocoderConfig {
    pub fn from_json(text: &str) -> Result<Self, GeocodeError> {
        let config: GeocoderConfig =
            serde_json::from_str(text).map_err(|e| GeocodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GeocodeError> {
        if self.ngram_width == 0 {
            return Err(GeocodeError::Config("ngram_width must be at least 1".into()));
        }
        if self.candidate_multiplier == 0 {
            return Err(GeocodeError::Config(
                "candidate_multiplier must be at least 1".into(),
            ));
        }
        if !(self.earth_radius_m.is_finite() && self.earth_radius_m > 0.0) {
            return Err(GeocodeError::Config(
                "earth_radius_m must be a positive number".into(),
            ));
        }
        let Bm25Params { k1, b, epsilon } = self.bm25;
        if k1 < 0.0 || !(0.0..=1.0).contains(&b) || epsilon < 0.0 {
            return Err(GeocodeError::Config(format!(
                "bm25 parameters out of range: k1={}, b={}, epsilon={}",
                k1, b, epsilon
            )));
        }
        Ok(())
    }
}

use crate::config::{GeocoderConfig, SIMILARITY_SCALE_M};
use crate::dataset;
use crate::error::GeocodeError;
use crate::fields::extract_fields;
use crate::geo::{haversine, nearest};
use crate::index::NgramIndex;
use crate::normalizer;
use crate::ranker::HybridRanker;
use crate::scorer::{Bm25Scorer, EditDistanceScorer};
use crate::timing::Timer;
use crate::{AddressRecord, Comparison, DocId, ScoredCandidate, StructuredAddress, Weights};
use log::{debug, info};
use std::io;
use std::path::Path;

/// Immutable geocoding engine: the reference dataset with its canonical forms
/// and lexical index, built once and then only read. Share it across threads
/// by reference or `Arc`.
pub struct Geocoder {
    records: Vec<AddressRecord>,
    lexical: Bm25Scorer,
    config: GeocoderConfig,
}

impl Geocoder {
    pub fn build(
        records: Vec<AddressRecord>,
        config: GeocoderConfig,
    ) -> Result<Self, GeocodeError> {
        config.validate()?;
        if records.is_empty() {
            return Err(GeocodeError::EmptyDataset);
        }

        let _timer = Timer::new("Geocoder::build");
        let index = NgramIndex::build(
            records.iter().map(|r| r.canonical_address.as_str()),
            config.ngram_width,
            config.bm25.epsilon,
        );
        let lexical = Bm25Scorer::new(index, &config.bm25);
        info!(
            "[ENGINE] Ready: {} records, {} n-gram terms",
            records.len(),
            lexical.index.term_count()
        );

        Ok(Self {
            records,
            lexical,
            config,
        })
    }

    pub fn from_reader<R: io::Read>(
        reader: R,
        config: GeocoderConfig,
    ) -> Result<Self, GeocodeError> {
        Self::build(dataset::read_records(reader)?, config)
    }

    pub fn from_path(
        path: impl AsRef<Path>,
        config: GeocoderConfig,
    ) -> Result<Self, GeocodeError> {
        Self::build(dataset::load_records(path.as_ref())?, config)
    }

    pub fn records(&self) -> &[AddressRecord] {
        &self.records
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &str) -> String {
        normalizer::normalize(raw)
    }

    /// Scored reference records for `query`, best first, at most `top_n`.
    /// Queries with neither a street nor a house number yield nothing.
    pub fn rank(&self, query: &str, top_n: usize, weights: Weights) -> Vec<ScoredCandidate> {
        if weights.is_zero() || !weights.is_finite() || top_n == 0 {
            return Vec::new();
        }

        let parsed = normalizer::parse(query);
        if parsed.is_degenerate() {
            debug!("[ENGINE] '{}' has no street or house number", query);
            return Vec::new();
        }
        let canonical = parsed.to_canonical();
        info!("[ENGINE] Query '{}' normalized to '{}'", query, canonical);

        let _timer = Timer::new("Geocoder::rank");
        let edit = EditDistanceScorer::new(&self.records);
        let ranker = HybridRanker {
            edit: &edit,
            lexical: &self.lexical,
            candidate_multiplier: self.config.candidate_multiplier,
        };
        ranker.rank(&canonical, top_n, weights)
    }

    pub fn search(&self, query: &str, top_n: usize, weights: Weights) -> Vec<StructuredAddress> {
        let results: Vec<StructuredAddress> = self
            .rank(query, top_n, weights)
            .into_iter()
            .map(|c| {
                let mut address = self.structured(c.record_index);
                address.score = Some(c.combined_score);
                address
            })
            .collect();
        info!("[ENGINE] Returning {} results for '{}'", results.len(), query);
        results
    }

    pub fn best_candidate(
        &self,
        query: &str,
        weights: Weights,
    ) -> Result<StructuredAddress, GeocodeError> {
        self.search(query, 1, weights)
            .into_iter()
            .next()
            .ok_or(GeocodeError::NoMatchFound)
    }

    /// Nearest records to a point. `radius_m` only cuts off results when
    /// `enforce_radius` is set in the config.
    pub fn reverse(
        &self,
        lat: f64,
        lon: f64,
        top_n: usize,
        radius_m: f64,
    ) -> Vec<StructuredAddress> {
        let cutoff = if self.config.enforce_radius {
            Some(radius_m)
        } else {
            debug!("[ENGINE] radius_m={} accepted but not enforced", radius_m);
            None
        };

        nearest(&self.records, lat, lon, top_n, cutoff, self.config.earth_radius_m)
            .into_iter()
            .map(|n| {
                let mut address = self.structured(n.record_index);
                address.distance_m = Some(n.distance_m);
                address
            })
            .collect()
    }

    /// Resolves both addresses and measures the distance between their best
    /// candidates.
    pub fn compare(
        &self,
        address_1: &str,
        address_2: &str,
        weights: Weights,
    ) -> Result<Comparison, GeocodeError> {
        let locate = |query: &str| {
            let point = self.best_candidate(query, weights).ok()?;
            let coords = point.lat.zip(point.lon)?;
            Some((point, coords))
        };

        let ((point_1, (lat1, lon1)), (point_2, (lat2, lon2))) =
            match (locate(address_1), locate(address_2)) {
                (Some(first), Some(second)) => (first, second),
                (first, second) => {
                    return Err(GeocodeError::AmbiguousOrMissingCoordinates {
                        first_resolved: first.is_some(),
                        second_resolved: second.is_some(),
                    });
                }
            };

        let distance_m = haversine(lat1, lon1, lat2, lon2, self.config.earth_radius_m);
        let similarity = (1.0 - distance_m / SIMILARITY_SCALE_M).max(0.0);
        info!(
            "[ENGINE] Compared '{}' and '{}': {:.1} m apart, similarity {:.3}",
            address_1, address_2, distance_m, similarity
        );

        Ok(Comparison {
            address_1: address_1.to_string(),
            address_2: address_2.to_string(),
            point_1,
            point_2,
            distance_m,
            similarity,
        })
    }

    fn structured(&self, record_index: DocId) -> StructuredAddress {
        let record = &self.records[record_index];
        let fields = extract_fields(&record.canonical_address);
        let (lat, lon) = match record.coordinates() {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };
        StructuredAddress {
            locality: fields.locality,
            street: fields.street,
            number: fields.number,
            lat,
            lon,
            name: record.name.clone(),
            address: record.address.clone(),
            score: None,
            distance_m: None,
        }
    }
}

use crate::{AddressRecord, DocId};
use log::debug;

/// Haversine distance between two points given in degrees, in the unit of
/// `radius`.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub record_index: DocId,
    pub distance_m: f64,
}

/// Records closest to `(lat, lon)`, ascending by distance, at most `top_n`.
/// Records without coordinates are skipped; equal distances keep dataset
/// order. With `max_distance_m` set, farther records are excluded.
pub fn nearest(
    records: &[AddressRecord],
    lat: f64,
    lon: f64,
    top_n: usize,
    max_distance_m: Option<f64>,
    earth_radius_m: f64,
) -> Vec<Neighbor> {
    if top_n == 0 || !lat.is_finite() || !lon.is_finite() {
        return Vec::new();
    }

    let mut neighbors: Vec<Neighbor> = records
        .iter()
        .enumerate()
        .filter_map(|(record_index, record)| {
            let (rlat, rlon) = record.coordinates()?;
            Some(Neighbor {
                record_index,
                distance_m: haversine(lat, lon, rlat, rlon, earth_radius_m),
            })
        })
        .filter(|n| max_distance_m.is_none_or(|max| n.distance_m <= max))
        .collect();

    neighbors.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    neighbors.truncate(top_n);
    debug!(
        "[GEO] {} neighbors of ({}, {}), closest {:?} m",
        neighbors.len(),
        lat,
        lon,
        neighbors.first().map(|n| n.distance_m)
    );
    neighbors
}

use crate::AddressRecord;
use crate::error::GeocodeError;
use crate::timing::Timer;
use log::info;
use serde::Deserialize;
use std::io;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(default, alias = "city")]
    locality: String,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lon: Option<f64>,
    #[serde(default, alias = "display_name")]
    name: Option<String>,
    #[serde(default, alias = "full_address")]
    address: String,
}

impl From<DatasetRow> for AddressRecord {
    fn from(row: DatasetRow) -> Self {
        AddressRecord::new(row.locality, row.lat, row.lon, row.name, row.address)
    }
}

/// Reads every record, normalizing each address once. Any malformed row
/// aborts the load.
pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<AddressRecord>, GeocodeError> {
    let timer = Timer::new("dataset::read_records");
    let mut rdr = csv::Reader::from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize::<DatasetRow>() {
        records.push(AddressRecord::from(result?));
    }

    if records.is_empty() {
        return Err(GeocodeError::EmptyDataset);
    }

    let missing = records.iter().filter(|r| r.coordinates().is_none()).count();
    timer.finish_with_count(records.len());
    info!(
        "[DATASET] Loaded {} records ({} without coordinates)",
        records.len(),
        missing
    );
    Ok(records)
}

pub fn load_records(path: &Path) -> Result<Vec<AddressRecord>, GeocodeError> {
    info!("[DATASET] Reading {}", path.display());
    let file = std::fs::File::open(path)?;
    read_records(io::BufReader::new(file))
}

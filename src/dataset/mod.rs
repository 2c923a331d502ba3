//! Loading of the JSON exports the map is built from

pub mod error;
pub mod shipyard;

pub use error::{DatasetError, Result};
pub use shipyard::parse_shipyard;

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

use crate::domain::{FacilityShape, MooringRecord, QuayGeometry, TyphoonInfo};

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = read(path)?;
    serde_json::from_str(&contents).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Static facility geometry from a shipyard export
pub fn load_shipyard(path: &Path) -> Result<Vec<FacilityShape>> {
    let contents = read(path)?;
    let shapes = parse_shipyard(&contents).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), shapes = shapes.len(), "loaded facility geometry");
    Ok(shapes)
}

/// Quay placements
pub fn load_quays(path: &Path) -> Result<Vec<QuayGeometry>> {
    let quays: Vec<QuayGeometry> = load_json(path)?;
    info!(path = %path.display(), quays = quays.len(), "loaded quay geometry");
    Ok(quays)
}

/// Mooring schedule records
pub fn load_moorings(path: &Path) -> Result<Vec<MooringRecord>> {
    let records: Vec<MooringRecord> = load_json(path)?;
    info!(path = %path.display(), records = records.len(), "loaded mooring records");
    Ok(records)
}

/// Typhoon forecast revisions
pub fn load_typhoons(path: &Path) -> Result<Vec<TyphoonInfo>> {
    let infos: Vec<TyphoonInfo> = load_json(path)?;
    info!(path = %path.display(), typhoons = infos.len(), "loaded typhoon infos");
    Ok(infos)
}

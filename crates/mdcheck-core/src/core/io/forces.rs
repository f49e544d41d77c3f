use super::error::SourceError;
use crate::core::models::forces::ForceField;
use crate::core::units::ForceUnit;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug)]
struct ForceRecord {
    x: f64,
    y: f64,
    z: f64,
}

pub fn read_forces(path: &Path, unit: ForceUnit) -> Result<ForceField, SourceError> {
    let path_str = path.to_string_lossy().to_string();
    debug!("Reading per-particle forces from {:?}", path);
    let file = std::fs::File::open(path).map_err(|e| SourceError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    parse_forces_csv(file, &path_str, unit)
}

/// Parses `x,y,z` rows. Non-finite values are kept as-is; rejecting them is the
/// comparator's job so that the offending particle index can be reported.
pub fn parse_forces_csv(
    reader: impl Read,
    origin: &str,
    unit: ForceUnit,
) -> Result<ForceField, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let components = csv_reader
        .deserialize::<ForceRecord>()
        .map(|result| {
            result
                .map(|r| [r.x, r.y, r.z])
                .map_err(|e| SourceError::Csv {
                    path: origin.to_string(),
                    source: e,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForceField::from_components(unit, components))
}

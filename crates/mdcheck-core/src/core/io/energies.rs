use super::error::SourceError;
use crate::core::models::decomposition::EnergyDecomposition;
use crate::core::units::EnergyUnit;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EnergyFile {
    unit: Option<EnergyUnit>,
    #[serde(default, rename = "term")]
    terms: Vec<EnergyRecord>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct EnergyRecord {
    label: String,
    value: f64,
}

/// Reads an energy decomposition, choosing the format from the file extension.
///
/// A unit declared inside the file wins over `fallback_unit`; a CSV file carries no
/// unit of its own and always relies on the fallback.
pub fn read_energies(
    path: &Path,
    fallback_unit: Option<EnergyUnit>,
) -> Result<EnergyDecomposition, SourceError> {
    let path_str = path.to_string_lossy().to_string();
    debug!("Reading energy decomposition from {:?}", path);

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("toml") => {
            let content = std::fs::read_to_string(path).map_err(|e| SourceError::Io {
                path: path_str.clone(),
                source: e,
            })?;
            parse_energy_toml(&content, &path_str, fallback_unit)
        }
        Some("csv") => {
            let file = std::fs::File::open(path).map_err(|e| SourceError::Io {
                path: path_str.clone(),
                source: e,
            })?;
            parse_energy_csv(file, &path_str, fallback_unit)
        }
        _ => Err(SourceError::UnsupportedFormat { path: path_str }),
    }
}

pub fn parse_energy_toml(
    content: &str,
    origin: &str,
    fallback_unit: Option<EnergyUnit>,
) -> Result<EnergyDecomposition, SourceError> {
    let file: EnergyFile = toml::from_str(content).map_err(|e| SourceError::Toml {
        path: origin.to_string(),
        source: e,
    })?;
    let unit = file
        .unit
        .or(fallback_unit)
        .ok_or_else(|| SourceError::MissingUnit {
            path: origin.to_string(),
        })?;

    Ok(EnergyDecomposition::from_entries(
        unit,
        file.terms.into_iter().map(|r| (r.label, r.value)),
    ))
}

pub fn parse_energy_csv(
    reader: impl Read,
    origin: &str,
    fallback_unit: Option<EnergyUnit>,
) -> Result<EnergyDecomposition, SourceError> {
    let unit = fallback_unit.ok_or_else(|| SourceError::MissingUnit {
        path: origin.to_string(),
    })?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut decomposition = EnergyDecomposition::new(unit);
    for result in csv_reader.deserialize::<EnergyRecord>() {
        let record = result.map_err(|e| SourceError::Csv {
            path: origin.to_string(),
            source: e,
        })?;
        decomposition.push(record.label, record.value);
    }
    Ok(decomposition)
}

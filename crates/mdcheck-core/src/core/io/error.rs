use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Unsupported file format for '{path}'. Expected a .toml or .csv file.")]
    UnsupportedFormat { path: String },
    #[error("No energy unit for '{path}'. Declare `unit` in the file or supply one explicitly.")]
    MissingUnit { path: String },
}

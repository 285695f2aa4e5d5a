use thiserror::Error;

use crate::tle::TleParseError;

#[derive(Error, Debug)]
pub enum SattrainError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the TLE set parsing: {0}")]
    TleParsingError(#[from] TleParseError),

    #[error("Invalid launch catalog: {0}")]
    CatalogFormatError(#[from] serde_json::Error),

    #[error("Batch name ({0}) not found in launch list")]
    UnknownLaunch(String),

    #[error("No TLE found for international designator {0}")]
    NoTleForLaunch(u32),

    #[error("Satellite not found: {0}")]
    SatelliteNotFound(String),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Invalid clustering parameter: {0}")]
    InvalidClusterParameter(String),

    #[error("No visible pass for {0} within the search horizon")]
    NoVisiblePass(String),

    #[error("Cannot compute a visibility window for an empty batch")]
    EmptyBatch,
}

impl PartialEq for SattrainError {
    fn eq(&self, other: &Self) -> bool {
        use SattrainError::*;
        match (self, other) {
            // Ces erreurs ne sont pas comparables : égalité si même variant
            (IoError(_), IoError(_)) => true,
            (CatalogFormatError(_), CatalogFormatError(_)) => true,

            (TleParsingError(a), TleParsingError(b)) => a == b,
            (UnknownLaunch(a), UnknownLaunch(b)) => a == b,
            (NoTleForLaunch(a), NoTleForLaunch(b)) => a == b,
            (SatelliteNotFound(a), SatelliteNotFound(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,
            (InvalidClusterParameter(a), InvalidClusterParameter(b)) => a == b,
            (NoVisiblePass(a), NoVisiblePass(b)) => a == b,

            // Variantes unitaires
            (EmptyBatch, EmptyBatch) => true,

            _ => false,
        }
    }
}

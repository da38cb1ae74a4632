use std::{io, path::PathBuf};

use thiserror::Error;

use crate::components::FacilityId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scenario validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("no city named '{0}' in the catalog")]
    UnknownCity(String),
    #[error("no facility with id '{0}'")]
    UnknownFacility(FacilityId),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

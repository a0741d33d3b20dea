use thiserror::Error;

use super::config::ConfigError;
use crate::core::error::PuckerError;
use crate::core::systems::registry::RegistryError;
use crate::workflows::report::ReportError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Data directory not found: {}", path.display())]
    DataDirectory { path: PathBuf },

    #[error("Ring index registry error: {source}")]
    Registry {
        #[from]
        source: RegistryError,
    },

    #[error("Puckering analysis failed: {source}")]
    Pucker {
        #[from]
        source: PuckerError,
    },

    #[error("Failed to write report: {source}")]
    Report {
        #[from]
        source: ReportError,
    },

    #[error("I/O error while scanning '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
}

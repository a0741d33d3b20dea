use crate::cli::ReportFormat;
use ringpucker::engine::config::{DEFAULT_CHIRALITIES, DEFAULT_EXTENSION};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub chiralities: Vec<String>,
    pub extension: String,
    pub include_builtin: bool,
    pub output_directory: PathBuf,
    pub formats: Vec<ReportFormat>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chiralities: DEFAULT_CHIRALITIES.map(String::from).to_vec(),
            extension: DEFAULT_EXTENSION.to_string(),
            include_builtin: true,
            output_directory: PathBuf::from("output"),
            formats: vec![ReportFormat::Json],
        }
    }
}

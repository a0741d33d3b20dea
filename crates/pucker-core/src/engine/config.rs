use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CHIRALITIES: [&str; 2] = ["SS", "SR"];
pub const DEFAULT_EXTENSION: &str = "xyz";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("At least one chirality group is required")]
    NoChiralities,
}

/// Where ring-atom indices come from, applied in order: built-in table, registry file,
/// then inline entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrySource {
    pub include_builtin: bool,
    pub registry_path: Option<PathBuf>,
    pub inline: BTreeMap<String, Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Root folder holding one sub-folder per chirality label.
    pub data_dir: PathBuf,
    pub chiralities: Vec<String>,
    pub extension: String,
    pub registry: RegistrySource,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    data_dir: Option<PathBuf>,
    chiralities: Option<Vec<String>>,
    extension: Option<String>,
    include_builtin: Option<bool>,
    registry_path: Option<PathBuf>,
    inline_systems: BTreeMap<String, Vec<usize>>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_dir(mut self, path: PathBuf) -> Self {
        self.data_dir = Some(path);
        self
    }
    pub fn chiralities(mut self, labels: Vec<String>) -> Self {
        self.chiralities = Some(labels);
        self
    }
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }
    pub fn include_builtin_systems(mut self, include: bool) -> Self {
        self.include_builtin = Some(include);
        self
    }
    pub fn registry_path(mut self, path: Option<PathBuf>) -> Self {
        self.registry_path = path;
        self
    }
    pub fn system(mut self, name: impl Into<String>, indices: Vec<usize>) -> Self {
        self.inline_systems.insert(name.into(), indices);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let data_dir = self
            .data_dir
            .ok_or(ConfigError::MissingParameter("data_dir"))?;
        let chiralities = self
            .chiralities
            .unwrap_or_else(|| DEFAULT_CHIRALITIES.map(String::from).to_vec());
        if chiralities.is_empty() {
            return Err(ConfigError::NoChiralities);
        }

        Ok(AnalysisConfig {
            data_dir,
            chiralities,
            extension: self
                .extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            registry: RegistrySource {
                include_builtin: self.include_builtin.unwrap_or(true),
                registry_path: self.registry_path,
                inline: self.inline_systems,
            },
        })
    }
}

mod defaults;

use crate::cli::{AnalyzeArgs, ReportFormat};
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use ringpucker::engine::config as core_config;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialInputConfig {
    chiralities: Option<Vec<String>>,
    registry: Option<PathBuf>,
    extension: Option<String>,
    include_builtin: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialOutputConfig {
    directory: Option<PathBuf>,
    formats: Option<Vec<ReportFormat>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    input: Option<PartialInputConfig>,
    output: Option<PartialOutputConfig>,
    #[serde(default)]
    systems: BTreeMap<String, Vec<usize>>,
}

/// Everything the `analyze` command needs once file, flags and overrides are merged.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub analysis: core_config::AnalysisConfig,
    pub output_directory: PathBuf,
    pub formats: Vec<ReportFormat>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn merge_with_cli(mut self, args: &AnalyzeArgs) -> Result<AnalysisSettings> {
        self.apply_cli_args(args);
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let input = self.input.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let mut builder = core_config::AnalysisConfigBuilder::new()
            .data_dir(args.data_dir.clone())
            .chiralities(input.chiralities.unwrap_or(defaults.chiralities))
            .extension(input.extension.unwrap_or(defaults.extension))
            .include_builtin_systems(input.include_builtin.unwrap_or(defaults.include_builtin))
            .registry_path(input.registry);
        for (name, indices) in self.systems {
            builder = builder.system(name, indices);
        }
        let analysis = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let mut formats = output.formats.unwrap_or(defaults.formats);
        formats.sort();
        formats.dedup();
        if formats.is_empty() {
            return Err(CliError::Config(
                "At least one output format is required.".to_string(),
            ));
        }

        Ok(AnalysisSettings {
            analysis,
            output_directory: output.directory.unwrap_or(defaults.output_directory),
            formats,
        })
    }

    fn apply_cli_args(&mut self, args: &AnalyzeArgs) {
        let input = self.input.get_or_insert_with(Default::default);
        if !args.chiralities.is_empty() {
            input.chiralities = Some(args.chiralities.clone());
        }
        if let Some(registry) = &args.registry {
            input.registry = Some(registry.clone());
        }
        if args.no_builtin {
            input.include_builtin = Some(false);
        }

        let output = self.output.get_or_insert_with(Default::default);
        if let Some(directory) = &args.output {
            output.directory = Some(directory.clone());
        }
        if !args.formats.is_empty() {
            output.formats = Some(args.formats.clone());
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "input.chiralities" => {
                    self.input
                        .get_or_insert_with(Default::default)
                        .chiralities = Some(split_list(value_str).map(String::from).collect());
                }
                "input.registry" => {
                    self.input.get_or_insert_with(Default::default).registry =
                        Some(PathBuf::from(value_str));
                }
                "input.extension" => {
                    self.input.get_or_insert_with(Default::default).extension =
                        Some(value_str.to_string());
                }
                "input.include-builtin" => {
                    self.input
                        .get_or_insert_with(Default::default)
                        .include_builtin = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "output.directory" => {
                    self.output.get_or_insert_with(Default::default).directory =
                        Some(PathBuf::from(value_str));
                }
                "output.formats" => {
                    let formats = split_list(value_str)
                        .map(|name| {
                            <ReportFormat as clap::ValueEnum>::from_str(name, true).map_err(|_| {
                                CliError::Config(format!(
                                    "Invalid report format for {}: {}",
                                    key, name
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    self.output.get_or_insert_with(Default::default).formats = Some(formats);
                }
                _ => {
                    let Some(system) = key.strip_prefix("systems.").filter(|s| !s.is_empty())
                    else {
                        return Err(CliError::Config(format!(
                            "Unsupported configuration key for --set: '{}'",
                            key
                        )));
                    };
                    let indices = split_list(value_str)
                        .map(|index| {
                            index.parse::<usize>().map_err(|_| {
                                CliError::Config(format!(
                                    "Invalid ring index for {}: {}",
                                    key, index
                                ))
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    self.systems.insert(system.to_string(), indices);
                }
            }
        }
        Ok(())
    }
}

/// Splits `a,b,c` or `[a, b, c]` into trimmed, non-empty items.
fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["pucker", "analyze", "data"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Analyze(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    const FULL_CONFIG: &str = r#"
[input]
chiralities = ["RR"]
registry = "rings.toml"
extension = "XYZ"
include-builtin = false

[output]
directory = "results"
formats = ["csv"]

[systems]
cProPro = [0, 1, 2, 3, 4, 5]
"#;

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let settings = PartialAnalysisConfig::default()
            .merge_with_cli(&analyze_args(&[]))
            .unwrap();
        assert_eq!(settings.analysis.data_dir, PathBuf::from("data"));
        assert_eq!(
            settings.analysis.chiralities,
            vec!["SS".to_string(), "SR".to_string()]
        );
        assert_eq!(settings.analysis.extension, "xyz");
        assert!(settings.analysis.registry.include_builtin);
        assert_eq!(settings.output_directory, PathBuf::from("output"));
        assert_eq!(settings.formats, vec![ReportFormat::Json]);
    }

    #[test]
    fn file_values_are_used() {
        let partial = PartialAnalysisConfig::from_toml_str(FULL_CONFIG).unwrap();
        let settings = partial.merge_with_cli(&analyze_args(&[])).unwrap();
        assert_eq!(settings.analysis.chiralities, vec!["RR".to_string()]);
        assert_eq!(settings.analysis.extension, "XYZ");
        assert!(!settings.analysis.registry.include_builtin);
        assert_eq!(
            settings.analysis.registry.registry_path,
            Some(PathBuf::from("rings.toml"))
        );
        assert_eq!(
            settings.analysis.registry.inline["cProPro"],
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(settings.output_directory, PathBuf::from("results"));
        assert_eq!(settings.formats, vec![ReportFormat::Csv]);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let partial = PartialAnalysisConfig::from_toml_str(FULL_CONFIG).unwrap();
        let args = analyze_args(&[
            "--chirality",
            "SS",
            "-o",
            "elsewhere",
            "-f",
            "json,csv",
            "-r",
            "other.toml",
        ]);
        let settings = partial.merge_with_cli(&args).unwrap();
        assert_eq!(settings.analysis.chiralities, vec!["SS".to_string()]);
        assert_eq!(settings.output_directory, PathBuf::from("elsewhere"));
        assert_eq!(settings.formats, vec![ReportFormat::Json, ReportFormat::Csv]);
        assert_eq!(
            settings.analysis.registry.registry_path,
            Some(PathBuf::from("other.toml"))
        );
    }

    #[test]
    fn set_values_override_flags_and_file() {
        let partial = PartialAnalysisConfig::from_toml_str(FULL_CONFIG).unwrap();
        let args = analyze_args(&[
            "-o",
            "elsewhere",
            "-S",
            "output.directory=final",
            "-S",
            "input.chiralities=[SS, SR]",
            "-S",
            "output.formats=json",
            "-S",
            "input.include-builtin=true",
            "-S",
            "systems.cGlyGly=5,4,3,2,1,0",
        ]);
        let settings = partial.merge_with_cli(&args).unwrap();
        assert_eq!(settings.output_directory, PathBuf::from("final"));
        assert_eq!(
            settings.analysis.chiralities,
            vec!["SS".to_string(), "SR".to_string()]
        );
        assert_eq!(settings.formats, vec![ReportFormat::Json]);
        assert!(settings.analysis.registry.include_builtin);
        assert_eq!(
            settings.analysis.registry.inline["cGlyGly"],
            vec![5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        for set in [
            "output.directory",
            "unknown.key=1",
            "systems.=1,2",
            "input.include-builtin=maybe",
            "output.formats=xml",
            "systems.cGlyGly=0,1,x",
        ] {
            let args = analyze_args(&["-S", set]);
            let result = PartialAnalysisConfig::default().merge_with_cli(&args);
            assert!(matches!(result, Err(CliError::Config(_))), "accepted '{set}'");
        }
    }

    #[test]
    fn empty_chirality_list_is_a_config_error() {
        let args = analyze_args(&["-S", "input.chiralities=[]"]);
        let result = PartialAnalysisConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        assert!(PartialAnalysisConfig::from_toml_str("[input]\nchirality = [\"SS\"]\n").is_err());
        assert!(PartialAnalysisConfig::from_toml_str("[plotting]\nenabled = true\n").is_err());
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[output]\nformats = [\"xml\"]\n").unwrap();
        match PartialAnalysisConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }

        let good = dir.path().join("good.toml");
        fs::write(&good, FULL_CONFIG).unwrap();
        assert!(PartialAnalysisConfig::from_file(&good).is_ok());
    }

    #[test]
    fn split_list_accepts_brackets_and_spaces() {
        let items: Vec<&str> = split_list(" [a, b ,c] ").collect();
        assert_eq!(items, vec!["a", "b", "c"]);
        assert_eq!(split_list("").count(), 0);
    }
}

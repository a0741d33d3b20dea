use crate::core::analysis::{RingAnalysis, analyze_ring};
use crate::core::error::PuckerError;
use crate::core::io::traits::CoordinateFile;
use crate::core::io::xyz::{XyzError, XyzFile};
use crate::core::systems::registry::{RegistryError, RingIndexRegistry};
use crate::engine::config::{AnalysisConfig, RegistrySource};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Why a single structure could not be analyzed.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error(transparent)]
    Xyz(#[from] XyzError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Pucker(#[from] PuckerError),
    #[error("File is not inside a system folder")]
    MissingSystem,
}

/// Where a structure came from in the dataset tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StructureSource {
    pub chirality: String,
    pub system: String,
    pub path: PathBuf,
}

impl StructureSource {
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct StructureRecord {
    pub source: StructureSource,
    pub analysis: RingAnalysis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedStructure {
    pub source: StructureSource,
    pub reason: String,
}

/// Outcome of a batch run, sorted by chirality, system and path.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub records: Vec<StructureRecord>,
    pub skipped: Vec<SkippedStructure>,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

/// Builds the ring-index registry: built-in table, then the registry file, then
/// inline entries, each overriding the previous one.
pub fn resolve_registry(source: &RegistrySource) -> Result<RingIndexRegistry, RegistryError> {
    let mut registry = if source.include_builtin {
        RingIndexRegistry::builtin()
    } else {
        RingIndexRegistry::empty()
    };
    if let Some(path) = &source.registry_path {
        registry.extend_from_file(path)?;
    }
    for (name, indices) in &source.inline {
        registry.insert(name.clone(), indices)?;
    }
    Ok(registry)
}

/// Reads one coordinate file, selects the ring atoms of `system` and analyzes the ring.
pub fn analyze_structure_file(
    path: &Path,
    system: &str,
    registry: &RingIndexRegistry,
) -> Result<RingAnalysis, StructureError> {
    let structure = XyzFile::read_from_path(path)?;
    let ring = registry.select_ring(system, &structure)?;
    Ok(analyze_ring(&ring)?)
}

#[instrument(skip_all, name = "batch_analysis")]
pub fn run(config: &AnalysisConfig, reporter: &ProgressReporter) -> Result<BatchResult, EngineError> {
    // === Phase 1: Discovery ===
    reporter.report(Progress::PhaseStart { name: "Discovery" });
    info!(
        "Scanning '{}' for chiralities {:?}.",
        config.data_dir.display(),
        config.chiralities
    );

    if !config.data_dir.is_dir() {
        return Err(EngineError::DataDirectory {
            path: config.data_dir.clone(),
        });
    }
    let registry = resolve_registry(&config.registry)?;
    debug!("Ring-index registry holds {} systems.", registry.len());

    let mut sources = Vec::new();
    for chirality in &config.chiralities {
        let root = config.data_dir.join(chirality);
        if !root.is_dir() {
            warn!(
                "Chirality folder '{}' does not exist; skipping.",
                root.display()
            );
            continue;
        }
        discover_structures(&root, chirality, &config.extension, &mut sources)?;
    }
    info!("Found {} structure files.", sources.len());
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Analysis ===
    reporter.report(Progress::PhaseStart { name: "Analysis" });
    reporter.report(Progress::TaskStart {
        total_steps: sources.len() as u64,
    });

    let outcomes: Vec<(StructureSource, Result<RingAnalysis, StructureError>)> = sources
        .into_par_iter()
        .map(|source| {
            let outcome = if source.system.is_empty() {
                Err(StructureError::MissingSystem)
            } else {
                analyze_structure_file(&source.path, &source.system, &registry)
            };
            if let Err(e) = &outcome {
                reporter.message(|| format!("Skipped {}: {}", source.path.display(), e));
            }
            reporter.report(Progress::TaskIncrement);
            (source, outcome)
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut result = BatchResult::default();
    for (source, outcome) in outcomes {
        match outcome {
            Ok(analysis) => result.records.push(StructureRecord { source, analysis }),
            Err(e) => {
                warn!("Skipping '{}': {}", source.path.display(), e);
                result.skipped.push(SkippedStructure {
                    source,
                    reason: e.to_string(),
                });
            }
        }
    }
    result.records.sort_by(|a, b| a.source.cmp(&b.source));
    result.skipped.sort_by(|a, b| a.source.cmp(&b.source));

    info!(
        "Analyzed {} structures ({} skipped).",
        result.records.len(),
        result.skipped.len()
    );
    reporter.report(Progress::PhaseFinish);

    Ok(result)
}

/// Collects every file with `extension` below `root`. The first folder level names the
/// system; files directly inside `root` get an empty system name.
/// A file at `root/cGlyGly/run1/a.xyz` belongs to `cGlyGly`, not `run1`.
fn discover_structures(
    root: &Path,
    chirality: &str,
    extension: &str,
    sources: &mut Vec<StructureSource>,
) -> Result<(), EngineError> {
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| EngineError::Scan {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let path = entry
                .map_err(|source| EngineError::Scan {
                    path: dir.clone(),
                    source,
                })?
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if has_extension(&path, extension) {
                let system = path
                    .strip_prefix(root)
                    .ok()
                    .and_then(|relative| {
                        let mut components = relative.components();
                        let first = components.next()?;
                        components.next()?;
                        Some(first.as_os_str().to_string_lossy().into_owned())
                    })
                    .unwrap_or_default();
                sources.push(StructureSource {
                    chirality: chirality.to_string(),
                    system,
                    path,
                });
            }
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conformation::Conformation;
    use crate::engine::config::AnalysisConfigBuilder;
    use std::f64::consts::PI;
    use std::sync::Mutex;

    fn chair_xyz(amplitude: f64) -> String {
        let h = amplitude / 6f64.sqrt();
        let mut text = String::from("7\nchair\n");
        for j in 0..6 {
            let angle = PI * j as f64 / 3.0;
            let z = if j % 2 == 0 { h } else { -h };
            text.push_str(&format!(
                "C {:.8} {:.8} {:.8}\n",
                1.45 * angle.cos(),
                1.45 * angle.sin(),
                z
            ));
        }
        text.push_str("H 0.0 0.0 3.0\n");
        text
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config_for(dir: &Path) -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .data_dir(dir.to_path_buf())
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_registry_applies_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("rings.toml");
        fs::write(&file, "cGlyGly = [5, 4, 3, 2, 1, 0]\ncProPro = [0, 1, 2, 3, 4, 5]\n").unwrap();

        let mut source = RegistrySource {
            include_builtin: true,
            registry_path: Some(file),
            ..Default::default()
        };
        source
            .inline
            .insert("cProPro".to_string(), vec![1, 2, 3, 4, 5, 0]);

        let registry = resolve_registry(&source).unwrap();
        assert_eq!(registry.get("cGlyGly"), Some(&[5, 4, 3, 2, 1, 0]));
        assert_eq!(registry.get("cProPro"), Some(&[1, 2, 3, 4, 5, 0]));
        assert!(registry.contains("cAlaAla"));

        let empty = resolve_registry(&RegistrySource::default()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn analyze_structure_file_runs_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.xyz");
        write(&path, &chair_xyz(0.5));

        let analysis =
            analyze_structure_file(&path, "cGlyGly", &RingIndexRegistry::builtin()).unwrap();
        assert!((analysis.amplitude() - 0.5).abs() < 1e-6);
        assert_eq!(analysis.conformation(), Conformation::Chair);
    }

    #[test]
    fn analyze_structure_file_reports_unknown_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chair.xyz");
        write(&path, &chair_xyz(0.5));

        let err = analyze_structure_file(&path, "cProPro", &RingIndexRegistry::builtin())
            .unwrap_err();
        assert!(matches!(
            err,
            StructureError::Registry(RegistryError::UnknownSystem { .. })
        ));
    }

    #[test]
    fn batch_run_collects_records_and_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path();
        write(&data.join("SS/cGlyGly/conf1.xyz"), &chair_xyz(0.5));
        write(&data.join("SS/cGlyGly/nested/conf2.xyz"), &chair_xyz(0.6));
        write(&data.join("SR/cAlaAla/conf.xyz"), &chair_xyz(0.4));
        write(&data.join("SR/cProPro/conf.xyz"), &chair_xyz(0.4));
        write(&data.join("SR/cGlyGly/broken.xyz"), "3\ncomment\nC 0 0 0\n");
        write(&data.join("SR/loose.xyz"), &chair_xyz(0.4));
        write(&data.join("SR/cGlyGly/notes.txt"), "not a structure");

        let result = run(&config_for(data), &ProgressReporter::new()).unwrap();

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.skipped.len(), 3);
        assert_eq!(result.total(), 6);

        let keys: Vec<(&str, &str)> = result
            .records
            .iter()
            .map(|r| (r.source.chirality.as_str(), r.source.system.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("SR", "cAlaAla"), ("SS", "cGlyGly"), ("SS", "cGlyGly")]
        );
        assert!(result.records[1].source.path < result.records[2].source.path);

        let reasons: Vec<&str> = result.skipped.iter().map(|s| s.reason.as_str()).collect();
        assert!(reasons.iter().any(|r| r.contains("cProPro")));
        assert!(reasons.iter().any(|r| r.contains("Expected 3 atom lines")));
        assert!(reasons.iter().any(|r| r.contains("system folder")));
    }

    #[test]
    fn missing_chirality_folder_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("SS/cGlyGly/a.xyz"), &chair_xyz(0.5));

        let result = run(&config_for(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn missing_data_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("absent"));
        assert!(matches!(
            run(&config, &ProgressReporter::new()),
            Err(EngineError::DataDirectory { .. })
        ));
    }

    #[test]
    fn batch_run_reports_progress() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("SS/cGlyGly/a.xyz"), &chair_xyz(0.5));
        write(&dir.path().join("SS/cGlyGly/b.xyz"), &chair_xyz(0.5));

        let increments = Mutex::new(0u64);
        let total = Mutex::new(None);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskStart { total_steps } => *total.lock().unwrap() = Some(total_steps),
            Progress::TaskIncrement => *increments.lock().unwrap() += 1,
            _ => {}
        }));

        run(&config_for(dir.path()), &reporter).unwrap();
        drop(reporter);
        assert_eq!(total.into_inner().unwrap(), Some(2));
        assert_eq!(increments.into_inner().unwrap(), 2);
    }

    #[test]
    fn corrupt_atom_count_is_skipped_without_aborting_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("SS/cGlyGly/good.xyz"), &chair_xyz(0.5));
        write(
            &dir.path().join("SS/cGlyGly/bad.xyz"),
            "18446744073709551615\ncomment\nC 0 0 0\n",
        );

        let result = run(&config_for(dir.path()), &ProgressReporter::new()).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].source.path.ends_with("bad.xyz"));
    }

    #[test]
    fn skipped_structures_are_reported_as_messages() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("SS/cGlyGly/good.xyz"), &chair_xyz(0.5));
        write(&dir.path().join("SS/cProPro/unknown.xyz"), &chair_xyz(0.5));

        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Message(text) = event {
                messages.lock().unwrap().push(text);
            }
        }));

        run(&config_for(dir.path()), &reporter).unwrap();
        drop(reporter);
        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("unknown.xyz"));
        assert!(messages[0].contains("cProPro"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(has_extension(Path::new("a/b.XYZ"), "xyz"));
        assert!(has_extension(Path::new("b.xyz"), "xyz"));
        assert!(!has_extension(Path::new("b.pdb"), "xyz"));
        assert!(!has_extension(Path::new("xyz"), "xyz"));
    }
}

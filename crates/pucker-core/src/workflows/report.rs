use super::analyze::{StructureRecord, StructureSource};
use crate::core::analysis::PuckeringRecord;
use crate::core::conformation::Conformation;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub source: StructureSource,
    pub record: PuckeringRecord,
}

/// Per-structure puckering results keyed by `{system}_{chirality}`.
///
/// A `(system, chirality)` group with more than one structure gets the file stem
/// appended to each key instead, so no record is overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PuckeringReport {
    entries: BTreeMap<String, ReportEntry>,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    key: &'a str,
    system: &'a str,
    chirality: &'a str,
    file: String,
    #[serde(rename = "Amplitude")]
    amplitude: f64,
    theta: f64,
    phi: f64,
    conformation: Conformation,
}

impl PuckeringReport {
    pub fn from_records(records: &[StructureRecord]) -> Self {
        let mut group_sizes: HashMap<(&str, &str), usize> = HashMap::new();
        for record in records {
            *group_sizes
                .entry((record.source.system.as_str(), record.source.chirality.as_str()))
                .or_default() += 1;
        }

        let mut entries = BTreeMap::new();
        for record in records {
            let source = &record.source;
            let base = format!("{}_{}", source.system, source.chirality);
            let group = (source.system.as_str(), source.chirality.as_str());
            let mut key = if group_sizes[&group] > 1 {
                format!("{}_{}", base, source.stem())
            } else {
                base
            };
            // Same stem in two sub-folders of one group.
            if entries.contains_key(&key) {
                let stem_key = key;
                let mut n = 2;
                key = loop {
                    let candidate = format!("{stem_key}_{n}");
                    if !entries.contains_key(&candidate) {
                        break candidate;
                    }
                    n += 1;
                };
            }
            entries.insert(
                key,
                ReportEntry {
                    source: source.clone(),
                    record: record.analysis.to_record(),
                },
            );
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ReportEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReportEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of structures per conformation; every conformation is listed.
    pub fn conformation_counts(&self) -> BTreeMap<Conformation, usize> {
        let mut counts: BTreeMap<Conformation, usize> =
            Conformation::ALL.iter().map(|&c| (c, 0)).collect();
        for entry in self.entries.values() {
            *counts.entry(entry.record.conformation).or_default() += 1;
        }
        counts
    }

    /// Writes `{ key: {Amplitude, theta, phi, conformation} }` with 4-space indentation.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let records: BTreeMap<&str, &PuckeringRecord> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.as_str(), &entry.record))
            .collect();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        records.serialize(&mut serializer)?;
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        self.write_json(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (key, entry) in &self.entries {
            csv_writer.serialize(CsvRow {
                key,
                system: &entry.source.system,
                chirality: &entry.source.chirality,
                file: entry.source.path.to_string_lossy().into_owned(),
                amplitude: entry.record.amplitude,
                theta: entry.record.theta,
                phi: entry.record.phi,
                conformation: entry.record.conformation,
            })?;
        }
        csv_writer.flush().map_err(|e| ReportError::Io {
            path: "<csv writer>".to_string(),
            source: e,
        })?;
        Ok(())
    }

    pub fn write_json_to_path(&self, path: &Path) -> Result<(), ReportError> {
        self.write_to_path(path, |report, writer| {
            report.write_json(&mut *writer)?;
            writeln!(writer).map_err(|e| io_error(path, e))
        })
    }

    pub fn write_csv_to_path(&self, path: &Path) -> Result<(), ReportError> {
        self.write_to_path(path, |report, writer| report.write_csv(writer))
    }

    fn write_to_path<F>(&self, path: &Path, write: F) -> Result<(), ReportError>
    where
        F: FnOnce(&Self, &mut BufWriter<File>) -> Result<(), ReportError>,
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        let mut writer = BufWriter::new(file);
        write(self, &mut writer)?;
        writer.flush().map_err(|e| io_error(path, e))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    }
}

use crate::core::error::PuckerError;
use crate::core::io::xyz::XyzStructure;
use crate::core::models::ring::{RING_SIZE, RingCoordinates};
use phf::phf_map;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Ring atoms of the 2,5-diketopiperazine series, as indices into each system's XYZ files.
static BUILTIN_RING_INDICES: phf::Map<&'static str, [usize; RING_SIZE]> = phf_map! {
    "cGlyGly" => [0, 1, 2, 3, 4, 5],
    "cAlaAla" => [4, 3, 2, 1, 0, 5],
    "cHisHis" => [0, 1, 2, 3, 4, 5],
    "cHisHis2+" => [0, 1, 2, 3, 4, 5],
    "cPhgPhg" => [2, 1, 0, 5, 4, 3],
    "cLeuLeu" => [0, 4, 5, 3, 2, 1],
    "cValVal" => [4, 3, 2, 1, 0, 5],
    "cTrpTrp" => [0, 1, 2, 3, 4, 5],
    "cPhePhe" => [0, 5, 4, 3, 2, 1],
};

#[derive(Debug, Error)]
pub enum RegistryError {
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
    #[error("System '{system}' must list exactly 6 ring atoms, found {found}")]
    InvalidIndexCount { system: String, found: usize },
    #[error("System '{system}' lists atom {index} more than once")]
    DuplicateIndex { system: String, index: usize },
    #[error("Unknown system '{name}': no ring indices registered")]
    UnknownSystem { name: String },
    #[error("Ring atom {index} of system '{system}' is out of range ({atom_count} atoms in structure)")]
    IndexOutOfRange {
        system: String,
        index: usize,
        atom_count: usize,
    },
    #[error(transparent)]
    Ring(#[from] PuckerError),
}

/// Lookup table from system name to the ordered indices of its six ring atoms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingIndexRegistry {
    entries: BTreeMap<String, [usize; RING_SIZE]>,
}

impl RingIndexRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry pre-populated with the diketopiperazine series.
    pub fn builtin() -> Self {
        let entries = BUILTIN_RING_INDICES
            .entries()
            .map(|(name, indices)| (name.to_string(), *indices))
            .collect();
        Self { entries }
    }

    /// Loads a registry from a TOML file of `name = [i0, i1, i2, i3, i4, i5]` entries.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        registry.extend_from_file(path)?;
        Ok(registry)
    }

    /// Adds or overrides entries from a TOML file.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<(), RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let table: BTreeMap<String, Vec<usize>> =
            toml::from_str(&content).map_err(|e| RegistryError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        let validated = table
            .into_iter()
            .map(|(name, indices)| {
                let indices = validate_indices(&name, &indices)?;
                Ok((name, indices))
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;
        self.entries.extend(validated);
        Ok(())
    }

    /// Registers `name`, replacing any previous entry.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        indices: &[usize],
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let indices = validate_indices(&name, indices)?;
        self.entries.insert(name, indices);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[usize; RING_SIZE]> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by system name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize; RING_SIZE])> {
        self.entries.iter().map(|(name, indices)| (name.as_str(), indices))
    }

    /// Picks the ring atoms of `system` out of `structure`, in registered order.
    pub fn select_ring(
        &self,
        system: &str,
        structure: &XyzStructure,
    ) -> Result<RingCoordinates, RegistryError> {
        let indices = self.get(system).ok_or_else(|| RegistryError::UnknownSystem {
            name: system.to_string(),
        })?;
        select_ring_atoms(system, indices, structure)
    }
}

/// Checks that `indices` names six distinct atoms.
fn validate_indices(system: &str, indices: &[usize]) -> Result<[usize; RING_SIZE], RegistryError> {
    let indices: [usize; RING_SIZE] =
        indices
            .try_into()
            .map_err(|_| RegistryError::InvalidIndexCount {
                system: system.to_string(),
                found: indices.len(),
            })?;

    let mut seen = HashSet::with_capacity(RING_SIZE);
    if let Some(&index) = indices.iter().find(|&&i| !seen.insert(i)) {
        return Err(RegistryError::DuplicateIndex {
            system: system.to_string(),
            index,
        });
    }
    Ok(indices)
}

/// Picks the atoms at `indices` out of `structure` as ring coordinates.
pub fn select_ring_atoms(
    system: &str,
    indices: &[usize; RING_SIZE],
    structure: &XyzStructure,
) -> Result<RingCoordinates, RegistryError> {
    let mut points = [nalgebra::Point3::origin(); RING_SIZE];
    for (slot, &index) in points.iter_mut().zip(indices) {
        *slot = structure
            .position(index)
            .ok_or_else(|| RegistryError::IndexOutOfRange {
                system: system.to_string(),
                index,
                atom_count: structure.atom_count(),
            })?;
    }
    Ok(RingCoordinates::new(points)?)
}

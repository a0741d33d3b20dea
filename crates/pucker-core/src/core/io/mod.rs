//! Provides input/output functionality for coordinate file formats.
//!
//! Structures are read into a flat, ordered list of atoms ([`xyz::XyzStructure`]); ring
//! atoms are then picked out by index through the [`systems`](crate::core::systems)
//! registry. All readers and writers share the [`traits::CoordinateFile`] interface.

pub mod traits;
pub mod xyz;

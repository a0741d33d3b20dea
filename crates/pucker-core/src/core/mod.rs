//! # Core Module
//!
//! The stateless foundation of RingPucker: data models, the three-stage numeric
//! pipeline, file I/O and the ring-index registry.
//!
//! ## Architecture
//!
//! - **Ring Representation** ([`models`]) - Ordered ring coordinates and displacements
//! - **Mean Plane** ([`geometry`]) - Cremer-Pople mean plane and out-of-plane displacements
//! - **Puckering Coordinates** ([`puckering`]) - Fourier decomposition into (Q, θ, φ)
//! - **Shape Classification** ([`conformation`]) - Nearest canonical conformation on the sphere
//! - **Composition** ([`analysis`]) - The full pipeline for one ring
//! - **File I/O** ([`io`]) - XYZ coordinate files
//! - **Ring Selection** ([`systems`]) - Named system to ring-atom index tables
//!
//! ## Scientific Foundation
//!
//! - Cremer, D.; Pople, J. A. *A General Definition of Ring Puckering Coordinates*.
//!   J. Am. Chem. Soc. 1975, 97, 1354–1358.
//! - The polar set (Q, θ, φ) for N = 6 maps every ring shape onto a sphere whose poles are
//!   the two chairs and whose equator holds the boat/twist-boat pseudorotation cycle.

pub mod analysis;
pub mod conformation;
pub mod error;
pub mod geometry;
pub mod io;
pub mod models;
pub mod puckering;
pub mod systems;

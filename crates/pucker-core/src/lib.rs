//! # RingPucker Core Library
//!
//! Cremer-Pople ring-puckering analysis for six-membered rings: mean-plane construction,
//! Fourier-derived puckering coordinates (Q, θ, φ), and classification of the ring shape
//! into its nearest canonical conformation.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`RingCoordinates`, `Displacement`),
//!   the pure numeric pipeline (`geometry`, `puckering`, `conformation`), the XYZ reader,
//!   and the registry that maps named systems onto ring-atom indices.
//!
//! - **[`engine`]: Shared Plumbing.** Configuration for batch analyses, the aggregated
//!   error type, and progress reporting hooks used by front ends.
//!
//! - **[`workflows`]: The Public API.** Directory-level batch analysis and the report
//!   aggregation that turns per-structure results into JSON or CSV output.
//!
//! ## Quick Start
//!
//! ```
//! use nalgebra::Point3;
//! use ringpucker::core::analysis::analyze_ring;
//! use ringpucker::core::models::ring::RingCoordinates;
//!
//! let h = 0.5 / 6f64.sqrt();
//! let points: Vec<Point3<f64>> = (0..6)
//!     .map(|j| {
//!         let angle = std::f64::consts::PI * j as f64 / 3.0;
//!         let z = if j % 2 == 0 { h } else { -h };
//!         Point3::new(1.45 * angle.cos(), 1.45 * angle.sin(), z)
//!     })
//!     .collect();
//!
//! let ring = RingCoordinates::from_slice(&points).unwrap();
//! let analysis = analyze_ring(&ring).unwrap();
//! assert_eq!(analysis.classification.label.name(), "Chair");
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

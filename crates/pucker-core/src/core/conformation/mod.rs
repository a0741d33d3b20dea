//! Classification of puckering shapes into canonical ring conformations.
//!
//! The shape angles `(θ, φ)` of a six-membered ring are a point on a sphere. Every
//! canonical conformation is one or more fixed points on that same sphere, listed in a
//! static [`reference::CONFORMATION_REFERENCE`] table, and a ring is assigned the label of
//! the reference point with the smallest great-circle distance.

pub mod classifier;
pub mod haversine;
pub mod reference;

pub use classifier::{ClassificationResult, TIE_TOLERANCE, classify, classify_against, classify_angles};
pub use haversine::angular_distance;
pub use reference::{CONFORMATION_REFERENCE, Conformation, ReferencePoint};

//! Mean-plane geometry for puckered rings.
//!
//! Implements the Cremer-Pople mean plane: the ring is centered on its centroid and two
//! auxiliary vectors weighted by `sin(2πj/N)` and `cos(2πj/N)` span the plane. Their cross
//! product is the plane normal, and the signed projections of the centered positions on
//! that normal are the out-of-plane displacements `z_j`.

mod mean_plane;

pub use mean_plane::{DEGENERATE_CROSS_NORM, MeanPlane, mean_plane_normal};

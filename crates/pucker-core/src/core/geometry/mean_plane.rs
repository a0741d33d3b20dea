use crate::core::error::PuckerError;
use crate::core::models::ring::{Displacement, RING_SIZE, RingCoordinates};
use nalgebra::{Point3, Unit, Vector3};
use std::f64::consts::TAU;

/// Below this value of `|R1 x R2|` (in Å²) the ring has no well-defined mean plane.
pub const DEGENERATE_CROSS_NORM: f64 = 1e-8;

/// Computes the unit normal of the Cremer-Pople mean plane for centered ring vectors.
///
/// The vectors must already be centered on the ring centroid and listed in traversal
/// order. Works for any ring size; the six-membered pipeline calls it through
/// [`MeanPlane::from_ring`].
///
/// The orientation is the right-hand rule of `R1 x R2`, so a ring traversed
/// counter-clockwise when viewed from `+z` gets a normal pointing along `-z`.
///
/// # Errors
///
/// Returns [`PuckerError::DegenerateRing`] when `|R1 x R2|` falls below
/// [`DEGENERATE_CROSS_NORM`].
pub fn mean_plane_normal(centered: &[Vector3<f64>]) -> Result<Unit<Vector3<f64>>, PuckerError> {
    let n = centered.len() as f64;
    let (r1, r2) = centered.iter().enumerate().fold(
        (Vector3::zeros(), Vector3::zeros()),
        |(r1, r2), (j, r)| {
            let angle = TAU * j as f64 / n;
            (r1 + r * angle.sin(), r2 + r * angle.cos())
        },
    );

    let cross = r1.cross(&r2);
    let cross_norm = cross.norm();
    if !cross_norm.is_finite() || cross_norm < DEGENERATE_CROSS_NORM {
        return Err(PuckerError::DegenerateRing { cross_norm });
    }
    Ok(Unit::new_unchecked(cross / cross_norm))
}

/// The mean plane of a six-membered ring together with the atoms' displacements from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanPlane {
    centroid: Point3<f64>,
    normal: Unit<Vector3<f64>>,
    displacements: Displacement,
}

impl MeanPlane {
    /// Builds the mean plane of `ring` and projects every atom onto its normal.
    ///
    /// # Errors
    ///
    /// Returns [`PuckerError::DegenerateRing`] if the ring geometry is collinear or
    /// otherwise too degenerate to define a normal.
    pub fn from_ring(ring: &RingCoordinates) -> Result<Self, PuckerError> {
        let centroid = ring.centroid();
        let centered: [Vector3<f64>; RING_SIZE] = ring.points().map(|p| p - centroid);
        let normal = mean_plane_normal(&centered)?;
        let axis = normal.into_inner();
        let displacements = Displacement::new(centered.map(|r| r.dot(&axis)))?;

        Ok(Self {
            centroid,
            normal,
            displacements,
        })
    }

    pub fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    pub fn normal(&self) -> Unit<Vector3<f64>> {
        self.normal
    }

    pub fn displacements(&self) -> &Displacement {
        &self.displacements
    }

    /// Flips the normal (and negates every displacement) when it points away from
    /// `reference`; returns the plane unchanged otherwise.
    ///
    /// Use this to hold the normal fixed across traversal orders or across a set of
    /// conformers. The default pipeline never reorients.
    pub fn oriented_towards(&self, reference: &Vector3<f64>) -> Self {
        if self.normal.dot(reference) >= 0.0 {
            return *self;
        }
        Self {
            centroid: self.centroid,
            normal: Unit::new_unchecked(-self.normal.into_inner()),
            displacements: self.displacements.negated(),
        }
    }
}

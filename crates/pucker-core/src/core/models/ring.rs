use crate::core::error::PuckerError;
use nalgebra::Point3;
use std::ops::Index;

/// Number of atoms in the rings handled by the public pipeline.
pub const RING_SIZE: usize = 6;

/// The ordered positions of the six ring atoms.
///
/// Index order is the traversal order around the ring and is load-bearing: the
/// mean-plane vectors and every Fourier sum weight atom `j` by `2πj/6`. Reversing the
/// order flips the sign convention of the normal and the direction of φ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingCoordinates {
    points: [Point3<f64>; RING_SIZE],
}

impl RingCoordinates {
    /// Creates ring coordinates from exactly six positions.
    ///
    /// # Errors
    ///
    /// Returns [`PuckerError::NonFiniteCoordinate`] if any component is NaN or infinite.
    pub fn new(points: [Point3<f64>; RING_SIZE]) -> Result<Self, PuckerError> {
        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(PuckerError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// Creates ring coordinates from a slice, checking its length.
    ///
    /// # Errors
    ///
    /// Returns [`PuckerError::InvalidRingSize`] if the slice does not hold six points,
    /// or [`PuckerError::NonFiniteCoordinate`] for NaN/infinite components.
    pub fn from_slice(points: &[Point3<f64>]) -> Result<Self, PuckerError> {
        let points: [Point3<f64>; RING_SIZE] =
            points
                .try_into()
                .map_err(|_| PuckerError::InvalidRingSize {
                    expected: RING_SIZE,
                    found: points.len(),
                })?;
        Self::new(points)
    }

    pub fn points(&self) -> &[Point3<f64>; RING_SIZE] {
        &self.points
    }

    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / RING_SIZE as f64)
    }

    /// Returns the same ring traversed in the opposite direction, keeping atom 0 first
    /// (order `0, 5, 4, 3, 2, 1`).
    pub fn reversed(&self) -> Self {
        let mut points = self.points;
        points[1..].reverse();
        Self { points }
    }
}

/// Signed out-of-plane displacements `z_j` of the ring atoms, in ring order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    values: [f64; RING_SIZE],
}

impl Displacement {
    /// Wraps six displacements directly.
    ///
    /// Displacements are normally produced by
    /// [`MeanPlane::displacements`](crate::core::geometry::MeanPlane::displacements);
    /// this constructor exists for callers that already hold `z_j` values.
    ///
    /// # Errors
    ///
    /// Returns [`PuckerError::NonFiniteDisplacement`] for the first NaN or infinite value.
    pub fn new(values: [f64; RING_SIZE]) -> Result<Self, PuckerError> {
        match values.iter().position(|z| !z.is_finite()) {
            Some(index) => Err(PuckerError::NonFiniteDisplacement { index }),
            None => Ok(Self { values }),
        }
    }

    pub fn values(&self) -> &[f64; RING_SIZE] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn negated(&self) -> Self {
        Self {
            values: self.values.map(|z| -z),
        }
    }
}

impl Index<usize> for Displacement {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

use super::fourier::{nyquist_amplitude, pseudorotation_components};
use super::wrap_degrees;
use crate::core::error::PuckerError;
use crate::core::models::ring::Displacement;

/// Below this total amplitude (Å) a ring is treated as planar and its shape angles are
/// left undefined.
pub const AMPLITUDE_EPSILON: f64 = 1e-6;

/// A direction on the puckering sphere, in degrees.
///
/// `theta` is the polar angle in `[0, 180]` measured from the `q3 > 0` chair pole;
/// `phi` is the azimuth in `[0, 360)` along the pseudorotation cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarAngles {
    pub theta: f64,
    pub phi: f64,
}

impl PolarAngles {
    pub const fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }
}

/// Spherical puckering coordinates `(Q, θ, φ)` of a six-membered ring.
///
/// The raw Fourier components `q2`, `q3` and `φ2` are kept alongside. When `Q` is below
/// [`AMPLITUDE_EPSILON`] the descriptor is degenerate: `Q` is still reported, but `θ` and
/// `φ` are `None` rather than the output of `arccos(0/0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuckeringDescriptor {
    amplitude: f64,
    q2: f64,
    q3: f64,
    phi2: f64,
    angles: Option<PolarAngles>,
}

impl PuckeringDescriptor {
    pub fn from_displacement(displacement: &Displacement) -> Self {
        let z = displacement.as_slice();
        let (q2_cos, q2_sin) = pseudorotation_components(z, 2);
        let q2 = q2_cos.hypot(q2_sin);
        let phi2 = wrap_degrees(q2_sin.atan2(q2_cos).to_degrees());
        let q3 = nyquist_amplitude(z);
        let amplitude = q2.hypot(q3);

        // atan2(q2, q3) equals arccos(q3 / Q) because q2 >= 0, and stays accurate near the poles.
        let angles = (amplitude >= AMPLITUDE_EPSILON).then(|| PolarAngles {
            theta: q2.atan2(q3).to_degrees(),
            phi: phi2,
        });

        Self {
            amplitude,
            q2,
            q3,
            phi2,
            angles,
        }
    }

    /// Total puckering amplitude `Q` in Å.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn q2(&self) -> f64 {
        self.q2
    }

    /// Signed chair-mode amplitude; positive towards `θ = 0`.
    pub fn q3(&self) -> f64 {
        self.q3
    }

    /// Raw pseudorotation phase of mode 2, in degrees.
    pub fn phi2(&self) -> f64 {
        self.phi2
    }

    pub fn theta(&self) -> Option<f64> {
        self.angles.map(|a| a.theta)
    }

    pub fn phi(&self) -> Option<f64> {
        self.angles.map(|a| a.phi)
    }

    pub fn is_degenerate(&self) -> bool {
        self.angles.is_none()
    }

    /// The shape angles, or [`PuckerError::DegenerateAmplitude`] for a planar ring.
    pub fn angles(&self) -> Result<PolarAngles, PuckerError> {
        self.angles.ok_or(PuckerError::DegenerateAmplitude {
            amplitude: self.amplitude,
        })
    }
}

/// Computes the puckering descriptor for a six-membered ring's displacements.
pub fn compute_puckering(displacement: &Displacement) -> PuckeringDescriptor {
    PuckeringDescriptor::from_displacement(displacement)
}

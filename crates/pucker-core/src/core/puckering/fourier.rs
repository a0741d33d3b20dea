use super::wrap_degrees;
use crate::core::error::PuckerError;
use std::f64::consts::TAU;

pub const MIN_RING_SIZE: usize = 5;
pub const MAX_RING_SIZE: usize = 20;

/// One pseudorotation mode `m` with its amplitude `q_m` (Å) and phase `φ_m` (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudorotationMode {
    pub m: usize,
    pub amplitude: f64,
    pub phase: f64,
}

/// The full Fourier decomposition of an N-membered ring's displacements.
#[derive(Debug, Clone, PartialEq)]
pub struct PuckeringModes {
    ring_size: usize,
    pseudorotation: Vec<PseudorotationMode>,
    nyquist: Option<f64>,
}

impl PuckeringModes {
    /// Decomposes the displacements of a ring with 5 to 20 atoms.
    ///
    /// # Errors
    ///
    /// Returns [`PuckerError::UnsupportedRingSize`] outside that range.
    pub fn decompose(z: &[f64]) -> Result<Self, PuckerError> {
        let n = z.len();
        if !(MIN_RING_SIZE..=MAX_RING_SIZE).contains(&n) {
            return Err(PuckerError::UnsupportedRingSize { found: n });
        }

        let highest_paired = if n % 2 == 0 { n / 2 - 1 } else { (n - 1) / 2 };
        let pseudorotation = (2..=highest_paired)
            .map(|m| {
                let (q_cos, q_sin) = pseudorotation_components(z, m);
                PseudorotationMode {
                    m,
                    amplitude: q_cos.hypot(q_sin),
                    phase: wrap_degrees(q_sin.atan2(q_cos).to_degrees()),
                }
            })
            .collect();
        let nyquist = (n % 2 == 0).then(|| nyquist_amplitude(z));

        Ok(Self {
            ring_size: n,
            pseudorotation,
            nyquist,
        })
    }

    pub fn ring_size(&self) -> usize {
        self.ring_size
    }

    pub fn pseudorotation(&self) -> &[PseudorotationMode] {
        &self.pseudorotation
    }

    /// The signed cosine-only amplitude of mode `m = N/2`; `None` for odd rings.
    pub fn nyquist(&self) -> Option<f64> {
        self.nyquist
    }

    /// Total puckering amplitude `Q = sqrt(Σ q_m²)` over every mode.
    pub fn total_amplitude(&self) -> f64 {
        let paired: f64 = self
            .pseudorotation
            .iter()
            .map(|mode| mode.amplitude * mode.amplitude)
            .sum();
        let nyquist = self.nyquist.map_or(0.0, |q| q * q);
        (paired + nyquist).sqrt()
    }
}

/// Returns `(q_m cos φ_m, q_m sin φ_m)` for pseudorotation mode `m`.
pub(super) fn pseudorotation_components(z: &[f64], m: usize) -> (f64, f64) {
    let n = z.len() as f64;
    let scale = (2.0 / n).sqrt();
    let (cos_sum, sin_sum) = z.iter().enumerate().fold((0.0, 0.0), |(c, s), (j, &zj)| {
        let angle = TAU * (m * j) as f64 / n;
        (c + zj * angle.cos(), s + zj * angle.sin())
    });
    (scale * cos_sum, -scale * sin_sum)
}

/// The `m = N/2` term for even rings: `sqrt(1/N) Σ z_j (-1)^j`.
pub(super) fn nyquist_amplitude(z: &[f64]) -> f64 {
    let n = z.len() as f64;
    let alternating: f64 = z
        .iter()
        .enumerate()
        .map(|(j, &zj)| if j % 2 == 0 { zj } else { -zj })
        .sum();
    alternating / n.sqrt()
}

//! Cremer-Pople puckering coordinates.
//!
//! The out-of-plane displacements of an N-membered ring decompose into discrete Fourier
//! modes. Modes `m = 2 … ⌈N/2⌉-1` each carry an amplitude and a pseudorotation phase;
//! for even N the highest mode `m = N/2` is a single cosine term without phase.
//!
//! For six-membered rings this leaves exactly two modes, `(q2, φ2)` and `q3`, which are
//! recast as the spherical polar set `(Q, θ, φ)` by [`PuckeringDescriptor`].

mod descriptor;
mod fourier;

pub use descriptor::{AMPLITUDE_EPSILON, PolarAngles, PuckeringDescriptor, compute_puckering};
pub use fourier::{MAX_RING_SIZE, MIN_RING_SIZE, PseudorotationMode, PuckeringModes};

/// Wraps an angle in degrees onto `[0, 360)`.
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

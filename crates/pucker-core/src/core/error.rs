use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PuckerError {
    #[error("Ring must contain exactly {expected} atoms, found {found}")]
    InvalidRingSize { expected: usize, found: usize },

    #[error("Ring atom {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Displacement of ring atom {index} is not finite")]
    NonFiniteDisplacement { index: usize },

    #[error(
        "Cannot define a mean plane: |R1 x R2| = {cross_norm:.3e} (collinear or degenerate ring geometry)"
    )]
    DegenerateRing { cross_norm: f64 },

    #[error(
        "Puckering amplitude Q = {amplitude:.3e} is effectively zero; theta and phi are undefined for a planar ring"
    )]
    DegenerateAmplitude { amplitude: f64 },

    #[error("Fourier decomposition supports rings of 5 to 20 atoms, found {found}")]
    UnsupportedRingSize { found: usize },
}

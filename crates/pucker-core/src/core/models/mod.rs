//! Data models for a single ring under analysis.
//!
//! - [`ring::RingCoordinates`] - the six ordered atom positions supplied by the caller
//! - [`ring::Displacement`] - signed distances of those atoms from the mean plane

pub mod ring;

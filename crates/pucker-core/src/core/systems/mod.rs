//! Named chemical systems and the ring atoms to analyze in each.
//!
//! Every system maps to six atom indices into its coordinate files, listed in ring
//! traversal order. The order matters: it fixes the direction of the mean-plane normal
//! and of the pseudorotation phase φ.

pub mod registry;

//! # Hopfield Memory
//!
//! A Rust library implementing a classical Hopfield associative memory on
//! top of a minimal N-dimensional array core. Binary patterns are stored
//! as low-energy configurations of a recurrent network via Hebbian
//! learning; a noisy or partial probe is recovered by relaxing the state
//! toward a local energy minimum with asynchronous updates.
//!
//! ## Features
//!
//! - Flat-buffer N-dimensional array with strided indexing, elementwise
//!   ops, comparisons and a generalized last-axis/first-axis contraction
//! - Hebbian weight learning with symmetric, zero-diagonal weights
//! - Energy diagnostic plus synchronous and asynchronous (random or
//!   indexed) update rules with caller-injected randomness
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_memory::{HopfieldNetwork, NdArray};
//! use rand::SeedableRng;
//!
//! fn main() -> hopfield_memory::hopfield::Result<()> {
//!     let pattern = NdArray::vector(&[1.0, -1.0, 1.0, -1.0]);
//!
//!     let mut network = HopfieldNetwork::new(4);
//!     network.learn_hebbian(&[pattern.clone()])?;
//!
//!     // probe with a corrupted copy and relax
//!     let probe = NdArray::vector(&[-1.0, -1.0, 1.0, -1.0]);
//!     network.set_state(&probe)?;
//!     let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(42);
//!     network.settle(64, &mut rng)?;
//!
//!     assert_eq!(network.state(), &pattern);
//!     Ok(())
//! }
//! ```

pub mod hopfield;
pub mod tensor;

// Re-export main types for convenience
pub use hopfield::{bipolar, HopfieldError, HopfieldNetwork};
pub use tensor::ops::{dot, outer};
pub use tensor::{Mask, NdArray, Operand, TensorError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::hopfield::{bipolar, HopfieldError, HopfieldNetwork};
    pub use crate::tensor::ops::{dot, outer};
    pub use crate::tensor::{Mask, NdArray, Operand, TensorError};
}

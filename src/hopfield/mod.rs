//! Hopfield associative-memory network
//!
//! A classical (1982) Hopfield network: a symmetric weight matrix `W`
//! stores bipolar patterns as local minima of an energy function, and the
//! update rules relax a probe state toward the nearest stored pattern.
//! Weights are learned with the Hebbian rule, held fixed, and the state
//! vector is the only thing the dynamics mutate.
//!
//! Pattern encoding and decoding (mapping images, prices or bit strings to
//! bipolar vectors) is the caller's job; [`bipolar`] covers the common case
//! of thresholding a real vector.

mod dynamics;
mod learning;

use thiserror::Error;

use crate::tensor::{NdArray, TensorError};

/// Errors raised by network construction, learning and dynamics
#[derive(Error, Debug)]
pub enum HopfieldError {
    /// Hebbian learning was given an empty pattern set; the `1/M`
    /// normalization is undefined for `M = 0`
    #[error("Hebbian learning needs at least one pattern")]
    NoPatterns,
    /// A pattern's length does not match the network size
    #[error("pattern length {got} does not match network size {expected}")]
    PatternLength { expected: usize, got: usize },
    /// A tensor operation failed underneath
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

pub type Result<T> = std::result::Result<T, HopfieldError>;

/// A Hopfield network of `N` bipolar neurons
///
/// Holds the `N x N` weight matrix `W` (symmetric, zero diagonal after
/// learning), the state vector `V` of `N` entries in `{-1, +1}`, and the
/// per-neuron threshold vector `theta` (fixed at construction, zero by
/// default). One instance may be reused across many relaxation runs by
/// resetting the state between them.
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    w: NdArray,
    v: NdArray,
    theta: NdArray,
    size: usize,
}

impl HopfieldNetwork {
    /// Create a network of `n` neurons with zero weights, zero thresholds
    /// and the state at all `+1`
    pub fn new(n: usize) -> Self {
        Self {
            w: NdArray::zeros(&[n, n]),
            v: NdArray::fill(&[n], 1.0),
            theta: NdArray::zeros(&[n]),
            size: n,
        }
    }

    /// Create a network with caller-supplied per-neuron thresholds
    pub fn with_thresholds(n: usize, theta: NdArray) -> Result<Self> {
        if theta.rank() != 1 || theta.size() != n {
            return Err(HopfieldError::PatternLength {
                expected: n,
                got: theta.size(),
            });
        }
        Ok(Self {
            w: NdArray::zeros(&[n, n]),
            v: NdArray::fill(&[n], 1.0),
            theta,
            size: n,
        })
    }

    /// Install a probe state, e.g. a noisy or partial copy of a stored
    /// pattern, before a relaxation run
    pub fn set_state(&mut self, pattern: &NdArray) -> Result<()> {
        if pattern.rank() != 1 || pattern.size() != self.size {
            return Err(HopfieldError::PatternLength {
                expected: self.size,
                got: pattern.size(),
            });
        }
        self.v = pattern.clone();
        Ok(())
    }

    /// Current state vector `V`
    pub fn state(&self) -> &NdArray {
        &self.v
    }

    /// Weight matrix `W`
    pub fn weights(&self) -> &NdArray {
        &self.w
    }

    /// Threshold vector `theta`
    pub fn thresholds(&self) -> &NdArray {
        &self.theta
    }

    /// Number of neurons
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Threshold a real-valued vector at zero into a bipolar rank-1 array
/// (`x >= 0` maps to `+1`, everything else to `-1`)
pub fn bipolar(values: &[f64]) -> NdArray {
    NdArray::vector(
        &values
            .iter()
            .map(|&x| if x >= 0.0 { 1.0 } else { -1.0 })
            .collect::<Vec<f64>>(),
    )
}

//! Hebbian weight learning
//!
//! The standard storage prescription for classical Hopfield networks:
//! `W = (1/M) * sum_i outer(p_i, p_i)` with the diagonal forced to zero.
//! Each stored pattern becomes (up to the ~0.14N capacity limit for random
//! patterns) a local minimum of the energy function.

use tracing::debug;

use super::{HopfieldError, HopfieldNetwork, Result};
use crate::tensor::ops::outer;
use crate::tensor::NdArray;

impl HopfieldNetwork {
    /// Store a batch of bipolar patterns in the weight matrix
    ///
    /// Every pattern must be a rank-1 array of the network's size. The
    /// previous weights are replaced, not accumulated into; learning may be
    /// repeated with a different batch. Fails with
    /// [`HopfieldError::NoPatterns`] on an empty batch (the `1/M`
    /// normalization would divide by zero) and
    /// [`HopfieldError::PatternLength`] on a size mismatch, in both cases
    /// before touching the weights.
    pub fn learn_hebbian(&mut self, patterns: &[NdArray]) -> Result<()> {
        if patterns.is_empty() {
            return Err(HopfieldError::NoPatterns);
        }
        let n = self.size;
        for pattern in patterns {
            if pattern.rank() != 1 || pattern.size() != n {
                return Err(HopfieldError::PatternLength {
                    expected: n,
                    got: pattern.size(),
                });
            }
        }

        let m = patterns.len();
        debug!("storing {} patterns in a {}-neuron network", m, n);

        let mut w = NdArray::zeros(&[n, n]);
        for pattern in patterns {
            w = w.add(&outer(pattern, pattern)?)?;
        }
        let mut w = w.div(m as f64)?;
        // no self-connections
        for i in 0..n {
            w.set(&[i, i], 0.0)?;
        }
        self.w = w;
        Ok(())
    }
}

//! Energy function and relaxation dynamics
//!
//! The energy `E = -1/2 * sum_ij W_ij V_i V_j - sum_i theta_i V_i` is a
//! read-only diagnostic; the update rules are local and never compute it.
//! Asynchronous single-neuron updates provably never increase the energy,
//! which is what drives the state into a stored pattern's basin. The
//! synchronous all-neuron sweep does not share that guarantee and may
//! cycle.

use rand::Rng;
use tracing::trace;

use super::{HopfieldNetwork, Result};
use crate::tensor::ops::{dot, outer};

impl HopfieldNetwork {
    /// Energy of the current state
    ///
    /// Pure: reads `W`, `V` and `theta`, mutates nothing.
    pub fn energy(&self) -> Result<f64> {
        let correlation = self.w.mul(&outer(&self.v, &self.v)?)?;
        Ok(correlation.div(-2.0)?.sum() - self.v.mul(&self.theta)?.sum())
    }

    /// Synchronous update: recompute every neuron at once
    ///
    /// `V_i <- +1 if (W.V)_i >= theta_i else -1`, with all local fields
    /// taken against the pre-update state. Parallel sweeps can cycle
    /// between states instead of converging; use the asynchronous rules
    /// when energy descent matters.
    pub fn update(&mut self) -> Result<()> {
        let field = dot(&self.w, &self.v)?;
        self.v = field.greater_equal(&self.theta)?.select(1.0, -1.0)?;
        Ok(())
    }

    /// Asynchronous update of one uniformly chosen neuron
    ///
    /// The RNG is caller-supplied so stochastic trajectories are
    /// reproducible under a seeded generator.
    pub fn update_stochastic<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let neuron = rng.gen_range(0..self.size);
        self.update_stochastic_at(neuron)
    }

    /// Asynchronous update of the neuron at a caller-chosen index
    ///
    /// Applies the threshold rule to neuron `i` only, against the current
    /// state. Used for deterministic sweep schedules; an out-of-range index
    /// is an error and leaves the state untouched.
    pub fn update_stochastic_at(&mut self, i: usize) -> Result<()> {
        let field = dot(&self.w, &self.v)?;
        let updated = field.greater_equal(&self.theta)?.select(1.0, -1.0)?;
        let value = updated.get(&[i])?;
        self.v.set(&[i], value)?;
        Ok(())
    }

    /// Relax the network by `iterations` random asynchronous updates
    ///
    /// Open-loop: no convergence check is performed, `settle(0, ..)` is the
    /// identity, and the caller chooses a step count large enough for the
    /// network size (or polls [`energy`](Self::energy) between calls).
    pub fn settle<R: Rng>(&mut self, iterations: usize, rng: &mut R) -> Result<()> {
        trace!("settling {}-neuron network for {} steps", self.size, iterations);
        for _ in 0..iterations {
            self.update_stochastic(rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::tensor::NdArray;

    fn stored_net() -> (HopfieldNetwork, NdArray) {
        let mut net = HopfieldNetwork::new(4);
        let p = NdArray::vector(&[1.0, -1.0, 1.0, -1.0]);
        net.learn_hebbian(&[p.clone()]).unwrap();
        (net, p)
    }

    #[test]
    fn test_stored_pattern_is_a_fixed_point() {
        let (mut net, p) = stored_net();
        net.set_state(&p).unwrap();
        net.update().unwrap();
        assert_eq!(net.state(), &p);
    }

    #[test]
    fn test_energy_of_stored_pattern() {
        let (mut net, p) = stored_net();
        net.set_state(&p).unwrap();
        // -1/2 * sum of W_ij p_i p_j: twelve off-diagonal entries of +1
        assert_eq!(net.energy().unwrap(), -6.0);
    }

    #[test]
    fn test_energy_lower_at_stored_pattern_than_nearby() {
        let (mut net, p) = stored_net();
        net.set_state(&p).unwrap();
        let at_pattern = net.energy().unwrap();

        let noisy = NdArray::vector(&[-1.0, -1.0, 1.0, -1.0]);
        net.set_state(&noisy).unwrap();
        assert!(net.energy().unwrap() > at_pattern);
    }

    #[test]
    fn test_thresholds_enter_energy() {
        let theta = NdArray::vector(&[1.0, 0.0]);
        let mut net = HopfieldNetwork::with_thresholds(2, theta).unwrap();
        net.set_state(&NdArray::vector(&[1.0, 1.0])).unwrap();
        // W is zero, so E = -sum(V * theta) = -1
        assert_eq!(net.energy().unwrap(), -1.0);
    }

    #[test]
    fn test_indexed_update_flips_noisy_neuron() {
        let (mut net, p) = stored_net();
        let noisy = NdArray::vector(&[-1.0, -1.0, 1.0, -1.0]);
        net.set_state(&noisy).unwrap();
        net.update_stochastic_at(0).unwrap();
        assert_eq!(net.state(), &p);
    }

    #[test]
    fn test_indexed_update_only_touches_its_neuron() {
        let (mut net, _) = stored_net();
        let noisy = NdArray::vector(&[-1.0, -1.0, 1.0, -1.0]);
        net.set_state(&noisy).unwrap();
        net.update_stochastic_at(2).unwrap();
        // neuron 2 already agrees with its field; nothing changes
        assert_eq!(net.state(), &noisy);
    }

    #[test]
    fn test_indexed_update_out_of_range() {
        let (mut net, p) = stored_net();
        net.set_state(&p).unwrap();
        assert!(net.update_stochastic_at(4).is_err());
        assert_eq!(net.state(), &p);
    }

    #[test]
    fn test_settle_zero_iterations_is_identity() {
        let (mut net, _) = stored_net();
        let start = NdArray::vector(&[-1.0, 1.0, -1.0, 1.0]);
        net.set_state(&start).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        net.settle(0, &mut rng).unwrap();
        assert_eq!(net.state(), &start);
    }

    #[test]
    fn test_state_stays_bipolar_under_updates() {
        let (mut net, _) = stored_net();
        net.set_state(&NdArray::vector(&[-1.0, 1.0, 1.0, 1.0])).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        net.settle(25, &mut rng).unwrap();
        assert!(net.state().data().iter().all(|&v| v == 1.0 || v == -1.0));
        net.update().unwrap();
        assert!(net.state().data().iter().all(|&v| v == 1.0 || v == -1.0));
    }
}

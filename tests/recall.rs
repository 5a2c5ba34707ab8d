//! End-to-end recall and energy-descent tests
//!
//! All stochastic dynamics run under seeded ChaCha8 generators so every
//! trajectory here is reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hopfield_memory::{bipolar, HopfieldNetwork, NdArray};

fn random_bipolar<R: Rng>(n: usize, rng: &mut R) -> NdArray {
    let values: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() - 0.5).collect();
    bipolar(&values)
}

/// Flip `flips` distinct entries of a bipolar pattern.
fn corrupt<R: Rng>(pattern: &NdArray, flips: usize, rng: &mut R) -> NdArray {
    let mut noisy = pattern.clone();
    let mut flipped = Vec::new();
    while flipped.len() < flips {
        let i = rng.gen_range(0..pattern.size());
        if !flipped.contains(&i) {
            let v = noisy.get(&[i]).unwrap();
            noisy.set(&[i], -v).unwrap();
            flipped.push(i);
        }
    }
    noisy
}

#[test]
fn recovers_stored_pattern_from_noisy_probe() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let n = 16;
    let pattern = random_bipolar(n, &mut rng);

    let mut net = HopfieldNetwork::new(n);
    net.learn_hebbian(&[pattern.clone()]).unwrap();

    // two of sixteen neurons corrupted
    let probe = corrupt(&pattern, 2, &mut rng);
    net.set_state(&probe).unwrap();
    net.settle(400, &mut rng).unwrap();

    assert_eq!(net.state(), &pattern);
}

#[test]
fn recalls_the_nearest_of_several_patterns() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let n = 32;

    // orthogonal-ish block patterns, well under capacity
    let a = NdArray::from_fn(&[n], |i| if i < n / 2 { 1.0 } else { -1.0 });
    let b = NdArray::from_fn(&[n], |i| if i % 2 == 0 { 1.0 } else { -1.0 });

    let mut net = HopfieldNetwork::new(n);
    net.learn_hebbian(&[a.clone(), b.clone()]).unwrap();

    let probe = corrupt(&a, 3, &mut rng);
    net.set_state(&probe).unwrap();
    net.settle(800, &mut rng).unwrap();

    assert_eq!(net.state(), &a);
}

#[test]
fn asynchronous_updates_never_increase_energy() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let n = 12;

    for _ in 0..100 {
        let patterns = vec![
            random_bipolar(n, &mut rng),
            random_bipolar(n, &mut rng),
        ];
        let mut net = HopfieldNetwork::new(n);
        net.learn_hebbian(&patterns).unwrap();
        net.set_state(&random_bipolar(n, &mut rng)).unwrap();

        let mut energy = net.energy().unwrap();
        for _ in 0..50 {
            net.update_stochastic(&mut rng).unwrap();
            let next = net.energy().unwrap();
            assert!(
                next <= energy + 1e-9,
                "energy rose from {energy} to {next}"
            );
            energy = next;
        }
    }
}

#[test]
fn settle_is_deterministic_under_equal_seeds() {
    let n = 16;
    let mut seed_rng = ChaCha8Rng::seed_from_u64(5);
    let pattern = random_bipolar(n, &mut seed_rng);
    let probe = corrupt(&pattern, 4, &mut seed_rng);

    let run = |seed: u64| {
        let mut net = HopfieldNetwork::new(n);
        net.learn_hebbian(&[pattern.clone()]).unwrap();
        net.set_state(&probe).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        net.settle(100, &mut rng).unwrap();
        net.state().clone()
    };

    assert_eq!(run(7), run(7));
}

#[test]
fn network_is_reusable_across_settle_runs() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let n = 16;
    let pattern = random_bipolar(n, &mut rng);

    let mut net = HopfieldNetwork::new(n);
    net.learn_hebbian(&[pattern.clone()]).unwrap();

    for _ in 0..5 {
        let probe = corrupt(&pattern, 2, &mut rng);
        net.set_state(&probe).unwrap();
        net.settle(400, &mut rng).unwrap();
        assert_eq!(net.state(), &pattern);
    }
}

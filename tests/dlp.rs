//! Pollard lambda solver tests on the small curve.

use ecdlp::dev::{ToyCurveOrder, ToyPoint, ToyScalar};
use ecdlp::dlp::{pollard_lambda, pollard_lambda_parallel};
use ecdlp::{Modulus, Uint};
use rand::{rngs::StdRng, SeedableRng};

/// Steps per walk; comfortably above the square root of the range width.
const WALK_BOUND: u64 = 2048;

/// Width of the exponent range handed to the solver.
const RANGE: u32 = 0xffff;

/// Picks a random range `[a, b]` of width [`RANGE`] below the group
/// order, and a secret `k` inside it.
fn random_instance(rng: &mut StdRng) -> (ToyScalar, ToyScalar, ToyScalar) {
    let n = <ToyCurveOrder as Modulus<u32, 1>>::MODULUS;
    let max_lo = ToyScalar::new(n.wrapping_sub(&Uint::from_word(RANGE + 2))).unwrap();

    let a = ToyScalar::random_range(rng, &ToyScalar::ZERO, &max_lo);
    let b = a + ToyScalar::new(Uint::from_word(RANGE)).unwrap();
    let k = ToyScalar::random_range_inclusive(rng, &a, &b);
    (a, b, k)
}

#[test]
fn single_threaded_recovers_k() {
    let mut rng = StdRng::seed_from_u64(301);
    let g = ToyPoint::generator();

    for _ in 0..3 {
        let (a, b, k) = random_instance(&mut rng);
        let h = g.mul(k.as_uint());
        let found = pollard_lambda(WALK_BOUND, &a, &b, &g, &h, &mut rng);
        assert_eq!(found, k);
    }
}

#[test]
fn parallel_recovers_k() {
    let mut rng = StdRng::seed_from_u64(302);
    let g = ToyPoint::generator();

    for _ in 0..2 {
        let (a, b, k) = random_instance(&mut rng);
        let h = g.mul(k.as_uint());
        let found = pollard_lambda_parallel(4, WALK_BOUND, &a, &b, &g, &h, &mut rng);
        assert_eq!(found, k);
    }
}

#[test]
fn parallel_with_single_worker() {
    let mut rng = StdRng::seed_from_u64(303);
    let g = ToyPoint::generator();

    let (a, b, k) = random_instance(&mut rng);
    let h = g.mul(k.as_uint());
    let found = pollard_lambda_parallel(1, WALK_BOUND, &a, &b, &g, &h, &mut rng);
    assert_eq!(found, k);
}

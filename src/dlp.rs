//! Pollard's lambda ("kangaroo") algorithm for the elliptic curve
//! discrete logarithm problem.
//!
//! Given a generator `g`, a target `h = k·g`, and bounds `a <= k <= b`,
//! the solver releases a *tame* kangaroo from a known multiple of `g` and
//! a *wild* kangaroo from `x₀·g + h`, both stepping through the same
//! jump table indexed by the canonical x-coordinate of the current point.
//! When the wild walk lands in a trap left by a tame walk, the logarithm
//! falls out as the difference of the accumulated exponents.
//!
//! Walk points are normalized to affine form after every jump so that the
//! step function depends only on the group element, not on its projective
//! representation; this is what lets two walks that meet once coalesce.
//!
//! Epochs without a collision are retried indefinitely; callers needing a
//! bound on total work must impose their own watchdog.

use crate::affine::AffinePoint;
use crate::modular::Modulus;
use crate::projective::ProjectivePoint;
use crate::scalar::Scalar;
use crate::{limb::Limb, uint::Uint, CurveParams};
use alloc::vec::Vec;
use rand_core::RngCore;

#[cfg(feature = "std")]
use rand_core::SeedableRng;
#[cfg(feature = "std")]
use std::collections::HashMap;
#[cfg(feature = "std")]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(feature = "std")]
use std::sync::{Barrier, Mutex, RwLock};
#[cfg(feature = "std")]
use std::thread;

#[cfg(feature = "log")]
use log::debug;
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

/// Jump table: pairs `(2^e, 2^e·g)` for a permutation of the exponents
/// `0..m`, where `m = bits(b - a) - 1`.
type Jumps<MOD, C, L, const N: usize, const SN: usize> =
    Vec<(Scalar<MOD, L, SN>, ProjectivePoint<C, L, N>)>;

/// Builds the jump table for the range `[a, b]`, permuting the exponents
/// with a Fisher–Yates shuffle.
fn jump_table<MOD, C, L, const N: usize, const SN: usize>(
    a: &Scalar<MOD, L, SN>,
    b: &Scalar<MOD, L, SN>,
    g: &ProjectivePoint<C, L, N>,
    rng: &mut (impl RngCore + ?Sized),
) -> Jumps<MOD, C, L, N, SN>
where
    MOD: Modulus<L, SN>,
    C: CurveParams<L, N>,
    L: Limb,
{
    let range = b.as_uint().wrapping_sub(a.as_uint());
    let m = range.bits().saturating_sub(1);
    debug_assert!(m >= 1, "exponent range must be wider than one bit");

    let mut exps: Vec<u32> = (0..m).collect();
    for i in (1..m as usize).rev() {
        let j = (rng.next_u32() as usize) % (i + 1);
        exps.swap(i, j);
    }

    exps.into_iter()
        .map(|e| (Scalar::pow2(e), g.mul(&Uint::<L, SN>::pow2(e))))
        .collect()
}

/// Index of the next jump for the walk standing at `u`.
fn step_index<C, L, const N: usize>(u: &AffinePoint<C, L, N>, m: usize) -> usize
where
    C: CurveParams<L, N>,
    L: Limb,
{
    u.x.to_canonical().as_words()[0].as_usize() % m
}

/// Canonical coordinates of a walk point, used as its trap identity.
#[cfg(feature = "std")]
fn trap_key<C, L, const N: usize>(p: &AffinePoint<C, L, N>) -> (Uint<L, N>, Uint<L, N>)
where
    C: CurveParams<L, N>,
    L: Limb,
{
    (p.x.to_canonical(), p.y.to_canonical())
}

/// Solves `h = k·g` for `k` in `[a, b]` with a single thread.
///
/// `bound` is the number of steps per walk. Requires `a < b`; the wider
/// the range, the larger `bound` should be (on the order of the square
/// root of the range width).
pub fn pollard_lambda<R, MOD, C, L, const N: usize, const SN: usize>(
    bound: u64,
    a: &Scalar<MOD, L, SN>,
    b: &Scalar<MOD, L, SN>,
    g: &ProjectivePoint<C, L, N>,
    h: &ProjectivePoint<C, L, N>,
    rng: &mut R,
) -> Scalar<MOD, L, SN>
where
    R: RngCore + ?Sized,
    MOD: Modulus<L, SN>,
    C: CurveParams<L, N>,
    L: Limb,
{
    debug_assert!(a.as_uint() < b.as_uint());

    loop {
        let jumps = jump_table(a, b, g, rng);
        let m = jumps.len();

        // tame walk from a known multiple of g; its endpoint is the trap
        let mut x = Scalar::random_range_inclusive(rng, a, b);
        let mut u = g.mul(x.as_uint()).to_affine();
        for _ in 0..bound {
            let i = step_index(&u, m);
            x += &jumps[i].0;
            u = (ProjectivePoint::from(u) + &jumps[i].1).to_affine();
        }

        // wild walk from x₀·g + h, checked against the trap at every step
        let mut w = Scalar::random_range_inclusive(rng, a, b);
        let mut v = (g.mul(w.as_uint()) + h).to_affine();
        for _ in 0..bound {
            if v == u {
                return x - &w;
            }
            let i = step_index(&v, m);
            w += &jumps[i].0;
            v = (ProjectivePoint::from(v) + &jumps[i].1).to_affine();
        }

        debug!("pollard lambda: no collision within {} steps, retrying", bound);
    }
}

/// State shared between the workers of [`pollard_lambda_parallel`].
#[cfg(feature = "std")]
struct SharedState<MOD, C, L: Limb, const N: usize, const SN: usize> {
    jumps: RwLock<Jumps<MOD, C, L, N, SN>>,
    traps: Mutex<HashMap<(Uint<L, N>, Uint<L, N>), Scalar<MOD, L, SN>>>,
    result: Mutex<Option<Scalar<MOD, L, SN>>>,
    shutdown: AtomicBool,
    barrier: Barrier,
}

/// Solves `h = k·g` for `k` in `[a, b]` with `workers` OS threads.
///
/// Workers proceed in lockstep epochs separated by barriers: worker 0
/// rebuilds the jump table, every worker then walks a tame kangaroo and
/// traps its endpoint in the shared map, and finally every worker walks a
/// wild kangaroo probing the traps. The first wild hit stores the
/// logarithm and raises the shutdown flag, which the others observe at
/// the next step or barrier.
///
/// Each worker derives its own generator of type `R` from `rng`, so a
/// deterministic `R` gives a reproducible (though schedule-dependent)
/// search. Requires `a < b` and `workers > 0`.
#[cfg(feature = "std")]
pub fn pollard_lambda_parallel<R, MOD, C, L, const N: usize, const SN: usize>(
    workers: usize,
    bound: u64,
    a: &Scalar<MOD, L, SN>,
    b: &Scalar<MOD, L, SN>,
    g: &ProjectivePoint<C, L, N>,
    h: &ProjectivePoint<C, L, N>,
    rng: &mut R,
) -> Scalar<MOD, L, SN>
where
    R: RngCore + SeedableRng,
    MOD: Modulus<L, SN> + Send + Sync,
    C: CurveParams<L, N> + Send + Sync,
    L: Limb,
{
    assert!(workers > 0, "at least one worker is required");
    debug_assert!(a.as_uint() < b.as_uint());

    let shared = SharedState {
        jumps: RwLock::new(Vec::new()),
        traps: Mutex::new(HashMap::new()),
        result: Mutex::new(None),
        shutdown: AtomicBool::new(false),
        barrier: Barrier::new(workers),
    };

    let seeds: Vec<u64> = (0..workers).map(|_| rng.next_u64()).collect();

    thread::scope(|s| {
        for (id, seed) in seeds.into_iter().enumerate() {
            let shared = &shared;
            s.spawn(move || worker::<R, MOD, C, L, N, SN>(id, seed, bound, a, b, g, h, shared));
        }
    });

    let result = shared.result.into_inner().unwrap_or_else(|e| e.into_inner());
    result.expect("all workers exited without a result")
}

#[cfg(feature = "std")]
#[allow(clippy::too_many_arguments)]
fn worker<R, MOD, C, L, const N: usize, const SN: usize>(
    id: usize,
    seed: u64,
    bound: u64,
    a: &Scalar<MOD, L, SN>,
    b: &Scalar<MOD, L, SN>,
    g: &ProjectivePoint<C, L, N>,
    h: &ProjectivePoint<C, L, N>,
    shared: &SharedState<MOD, C, L, N, SN>,
) where
    R: RngCore + SeedableRng,
    MOD: Modulus<L, SN>,
    C: CurveParams<L, N>,
    L: Limb,
{
    let mut rng = R::seed_from_u64(seed);

    loop {
        // worker 0 rebuilds the jump table for this epoch
        if id == 0 {
            let table = jump_table(a, b, g, &mut rng);
            *shared.jumps.write().unwrap_or_else(|e| e.into_inner()) = table;
            debug!("worker {:03}: jump table generated", id);
        }

        shared.barrier.wait();

        let jumps = shared
            .jumps
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let m = jumps.len();

        // tame phase: walk from x·g and trap the endpoint
        let mut x = Scalar::random_range_inclusive(&mut rng, a, b);
        let mut u = g.mul(x.as_uint()).to_affine();
        for _ in 0..bound {
            let i = step_index(&u, m);
            x += &jumps[i].0;
            u = (ProjectivePoint::from(u) + &jumps[i].1).to_affine();
        }
        shared
            .traps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(trap_key(&u))
            .or_insert(x);
        debug!("worker {:03}: trap set", id);

        shared.barrier.wait();

        // the map's content is fixed for the whole wild phase; snapshot
        // it so probes run without the lock
        let traps = shared
            .traps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        // wild phase: walk from x·g + h, probing the traps at every step
        let mut w = Scalar::random_range_inclusive(&mut rng, a, b);
        let mut v = (g.mul(w.as_uint()) + h).to_affine();
        for _ in 0..bound {
            if shared.shutdown.load(Ordering::Acquire) {
                break;
            }
            if let Some(trap) = traps.get(&trap_key(&v)) {
                if *trap != w {
                    let mut result = shared.result.lock().unwrap_or_else(|e| e.into_inner());
                    if result.is_none() {
                        *result = Some(*trap - &w);
                        shared.shutdown.store(true, Ordering::Release);
                    }
                    break;
                }
            }
            let i = step_index(&v, m);
            w += &jumps[i].0;
            v = (ProjectivePoint::from(v) + &jumps[i].1).to_affine();
        }

        shared.barrier.wait();

        if shared.shutdown.load(Ordering::Acquire) {
            debug!("worker {:03}: shutting down", id);
            return;
        }
        debug!("worker {:03}: no collision this epoch, retrying", id);
    }
}

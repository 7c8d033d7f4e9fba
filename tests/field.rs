//! Randomized field and modular group properties over the 160-bit test
//! prime, in both limb layouts.

use ecdlp::dev::{Fe160, Fe160W64, P160, ToyCurve, ToyCurveOrder};
use ecdlp::{FieldElement, Limb, Modulus, Scalar, Uint};
use rand::{rngs::StdRng, SeedableRng};

type S160 = Scalar<P160, u32, 5>;

#[test]
fn add_sub_group_invariants() {
    let modulus = &<P160 as Modulus<u32, 5>>::MODULUS;
    let mut rng = StdRng::seed_from_u64(101);

    assert!((-S160::ZERO).is_zero());

    for _ in 0..1000 {
        let a = S160::random(&mut rng);
        let b = S160::random(&mut rng);

        assert!((a + b).as_uint() < modulus);
        assert!((a - b).as_uint() < modulus);
        assert!((-a).as_uint() < modulus);
        assert!((a + (-a)).is_zero());
        assert_eq!((a + b) - b, a);
    }
}

#[test]
fn montgomery_round_trip() {
    let mut rng = StdRng::seed_from_u64(102);

    for _ in 0..500 {
        let a = Uint::random_below(&mut rng, &<P160 as Modulus<u32, 5>>::MODULUS);
        assert_eq!(Fe160::from_uint(&a).unwrap().to_canonical(), a);

        let a = Uint::random_below(&mut rng, &<P160 as Modulus<u64, 3>>::MODULUS);
        assert_eq!(Fe160W64::from_uint(&a).unwrap().to_canonical(), a);
    }
}

#[test]
fn montgomery_mul_matches_plain_product() {
    let mut rng = StdRng::seed_from_u64(103);

    // Products of limb-sized operands fit in two limbs, so the plain
    // double-width product is an exact reference.
    for _ in 0..500 {
        let x = u32::random(&mut rng);
        let y = u32::random(&mut rng);
        let (lo, hi) = x.mul_wide(y);

        let mx = Fe160::from_uint(&Uint::from_word(x)).unwrap();
        let my = Fe160::from_uint(&Uint::from_word(y)).unwrap();
        let xy = (mx * my).to_canonical();
        assert_eq!(xy.as_words(), &[lo, hi, 0, 0, 0]);

        let mx = Fe160W64::from_uint(&Uint::from_word(x as u64)).unwrap();
        let my = Fe160W64::from_uint(&Uint::from_word(y as u64)).unwrap();
        let xy = (mx * my).to_canonical();
        assert_eq!(xy.as_words(), &[(x as u64) * (y as u64), 0, 0]);
    }
}

#[test]
fn inversion_round_trip() {
    let mut rng = StdRng::seed_from_u64(104);

    for _ in 0..200 {
        let a = Fe160::random(&mut rng);
        if bool::from(a.is_zero()) {
            continue;
        }
        assert_eq!(a * a.invert().unwrap(), Fe160::ONE);

        let a = Fe160W64::random(&mut rng);
        if bool::from(a.is_zero()) {
            continue;
        }
        assert_eq!(a * a.invert().unwrap(), Fe160W64::ONE);
    }
}

#[test]
fn fermat_exponentiation() {
    let modulus = <P160 as Modulus<u32, 5>>::MODULUS;
    let mod_m1 = modulus.wrapping_sub(&Uint::ONE);
    let mut rng = StdRng::seed_from_u64(105);

    for _ in 0..50 {
        let a = Fe160::random(&mut rng);
        if bool::from(a.is_zero()) {
            continue;
        }
        assert_eq!(a.pow_vartime(&modulus), a);
        assert_eq!(a.pow_vartime(&mod_m1), Fe160::ONE);
    }
}

#[test]
fn sqrt_of_squares() {
    let mut rng = StdRng::seed_from_u64(106);

    for _ in 0..100 {
        let a = Fe160::random(&mut rng);
        let aa = a.square();
        let root = aa.sqrt(&mut rng).expect("squares have roots");
        assert_eq!(root.square(), aa);
    }
}

#[test]
fn carry_free_variant_agrees() {
    // The small-curve modulus leaves the top bit clear, which is the
    // precondition for the carry-free reduction.
    type ToyFe = FieldElement<ToyCurve, u32, 1>;
    type ToyS = Scalar<ToyCurveOrder, u32, 1>;

    let mut rng = StdRng::seed_from_u64(107);
    for _ in 0..1000 {
        let a = ToyFe::random(&mut rng);
        assert_eq!(a.double_carry_free(), a.double());
        assert_eq!(a.mul_pow2_carry_free(3), a.mul_pow2(3));
        assert_eq!(a.mul_pow2_carry_free(7), a.mul_pow2(7));

        let s = ToyS::random(&mut rng);
        assert_eq!(s.double_carry_free(), s.double());
        assert_eq!(s.mul_pow2_carry_free(5), s.mul_pow2(5));
    }
}

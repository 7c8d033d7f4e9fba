//! Development and test parameters.
//!
//! These moduli and curves back the crate's test suite and are handy for
//! downstream experiments. None of them are hardened choices for
//! protecting anything.

use crate::field::{FieldElement, FieldParams};
use crate::modular::Modulus;
use crate::projective::ProjectivePoint;
use crate::scalar::Scalar;
use crate::uint::Uint;
use crate::CurveParams;

/// 160-bit test prime
/// `p = 0xb77902ab_d8db9627_f5d7ceca_5c17ef6c_5e3b0969`, with `p ≡ 1
/// (mod 4)` so square roots go through the full Tonelli–Shanks descent.
///
/// Implemented for both the 5×32-bit and 3×64-bit limb layouts of the
/// same modulus.
#[derive(Clone, Copy, Debug)]
pub struct P160;

impl Modulus<u32, 5> for P160 {
    const MODULUS: Uint<u32, 5> =
        Uint::from_be_words([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0969]);
}

impl FieldParams<u32, 5> for P160 {
    const R: Uint<u32, 5> =
        Uint::from_be_words([0x4886fd54, 0x272469d8, 0x0a283135, 0xa3e81093, 0xa1c4f697]);
    const R2: Uint<u32, 5> =
        Uint::from_be_words([0x7cd393b3, 0x8aec7519, 0x46c1c15a, 0x399ce6a5, 0x61260cf2]);
    const MOD_NEG_INV: u32 = 0x96c9e927;
}

impl Modulus<u64, 3> for P160 {
    const MODULUS: Uint<u64, 3> = Uint::from_be_words([
        0x00000000b77902ab,
        0xd8db9627f5d7ceca,
        0x5c17ef6c5e3b0969,
    ]);
}

impl FieldParams<u64, 3> for P160 {
    const R: Uint<u64, 3> = Uint::from_be_words([
        0x000000003e45aeb8,
        0x73a542628a520aee,
        0xad68a50f4a90f52a,
    ]);
    const R2: Uint<u64, 3> = Uint::from_be_words([
        0x00000000158d01ed,
        0xcf41f1cd75ad34a8,
        0x87ada0ed26f392f0,
    ]);
    const MOD_NEG_INV: u64 = 0x1c23727c96c9e927;
}

/// Element of the 160-bit test field, 32-bit limbs.
pub type Fe160 = FieldElement<P160, u32, 5>;

/// Element of the 160-bit test field, 64-bit limbs.
pub type Fe160W64 = FieldElement<P160, u64, 3>;

/// brainpoolP160r1 (RFC 5639): `y² = x³ + ax + b` over a 160-bit prime
/// with `p ≡ 3 (mod 4)`.
#[derive(Clone, Copy, Debug)]
pub struct BrainpoolP160r1;

impl Modulus<u32, 5> for BrainpoolP160r1 {
    const MODULUS: Uint<u32, 5> =
        Uint::from_be_words([0xe95e4a5f, 0x737059dc, 0x60dfc7ad, 0x95b3d813, 0x9515620f]);
}

impl FieldParams<u32, 5> for BrainpoolP160r1 {
    const R: Uint<u32, 5> =
        Uint::from_be_words([0x16a1b5a0, 0x8c8fa623, 0x9f203852, 0x6a4c27ec, 0x6aea9df1]);
    const R2: Uint<u32, 5> =
        Uint::from_be_words([0x6cf12f81, 0xc0ca7ef8, 0xfed717e0, 0xb333f8d6, 0x25bc14ff]);
    const MOD_NEG_INV: u32 = 0xadbcb311;
}

impl CurveParams<u32, 5> for BrainpoolP160r1 {
    // a = 0x340e7be2_a280eb74_e2be61ba_da745d97_e8f7c300
    const EQUATION_A: FieldElement<Self, u32, 5> = FieldElement::from_montgomery(
        Uint::from_be_words([0xdc8ef247, 0x9cea8680, 0x940365ed, 0x3504b484, 0xccb4d16c]),
    );
    // b = 0x1e589a85_95423412_134faa2d_bdec95c8_d8675e58
    const EQUATION_B: FieldElement<Self, u32, 5> = FieldElement::from_montgomery(
        Uint::from_be_words([0xda4fa2f9, 0xc7adef54, 0x1fdb753c, 0x86d57356, 0x36df5eea]),
    );
    // G = (0xbed5af16_ea3f6a4f_62938c46_31eb5af7_bdbcdbc3,
    //      0x1667cb47_7a1a8ec3_38f94741_669c9763_16da6321)
    const GENERATOR: (FieldElement<Self, u32, 5>, FieldElement<Self, u32, 5>) = (
        FieldElement::from_montgomery(Uint::from_be_words([
            0x3843b02e, 0x8fbb61e4, 0x4d75df4c, 0x403e3618, 0xc37f197f,
        ])),
        FieldElement::from_montgomery(Uint::from_be_words([
            0x42d95cee, 0x82b74641, 0xea876c07, 0xad1b8516, 0xd95a2698,
        ])),
    );
}

/// The prime order of the brainpoolP160r1 group.
#[derive(Clone, Copy, Debug)]
pub struct BrainpoolP160r1Order;

impl Modulus<u32, 5> for BrainpoolP160r1Order {
    const MODULUS: Uint<u32, 5> =
        Uint::from_be_words([0xe95e4a5f, 0x737059dc, 0x60df5991, 0xd4502940, 0x9e60fc09]);
}

/// brainpoolP160r1 point.
pub type Bp160Point = ProjectivePoint<BrainpoolP160r1, u32, 5>;

/// brainpoolP160r1 scalar (mod the group order).
pub type Bp160Scalar = Scalar<BrainpoolP160r1Order, u32, 5>;

/// A deliberately small curve for discrete logarithm tests:
/// `y² = x³ + 3x + 20` over `p = 0xffffb`, a single 32-bit limb.
///
/// The group has prime order `n = 0xffc89 < 2²⁰` and is generated by
/// `G = (2, 0x30c9d)`.
#[derive(Clone, Copy, Debug)]
pub struct ToyCurve;

impl Modulus<u32, 1> for ToyCurve {
    const MODULUS: Uint<u32, 1> = Uint::from_word(0x000ffffb);
}

impl FieldParams<u32, 1> for ToyCurve {
    const R: Uint<u32, 1> = Uint::from_word(0x00005000);
    const R2: Uint<u32, 1> = Uint::from_word(0x000007d0);
    const MOD_NEG_INV: u32 = 0x8f5ccccd;
}

impl CurveParams<u32, 1> for ToyCurve {
    const EQUATION_A: FieldElement<Self, u32, 1> =
        FieldElement::from_montgomery(Uint::from_word(0x0000f000));
    const EQUATION_B: FieldElement<Self, u32, 1> =
        FieldElement::from_montgomery(Uint::from_word(0x00064000));
    const GENERATOR: (FieldElement<Self, u32, 1>, FieldElement<Self, u32, 1>) = (
        FieldElement::from_montgomery(Uint::from_word(0x0000a000)),
        FieldElement::from_montgomery(Uint::from_word(0x00015c3b)),
    );
}

/// The prime order of the [`ToyCurve`] group.
#[derive(Clone, Copy, Debug)]
pub struct ToyCurveOrder;

impl Modulus<u32, 1> for ToyCurveOrder {
    const MODULUS: Uint<u32, 1> = Uint::from_word(0x000ffc89);
}

/// Point on the small test curve.
pub type ToyPoint = ProjectivePoint<ToyCurve, u32, 1>;

/// Scalar modulo the small test curve's order.
pub type ToyScalar = Scalar<ToyCurveOrder, u32, 1>;

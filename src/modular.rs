//! Modular addition and subtraction by reduction-by-comparison.
//!
//! These helpers implement the add/sub group for an arbitrary modulus `m`
//! over same-width operands: results are brought back into `[0, m)` with a
//! single conditional correction. They back both [`Scalar`] and
//! [`FieldElement`] arithmetic.
//!
//! [`Scalar`]: crate::Scalar
//! [`FieldElement`]: crate::FieldElement

use crate::{limb::Limb, uint::Uint};

/// A fixed modulus for the reduction-by-comparison add/sub group.
///
/// Implementations are zero-sized marker types carrying the modulus as an
/// associated constant, so a modulus choice is part of the value's type.
pub trait Modulus<L: Limb, const N: usize>: Sized {
    /// The modulus. The most significant bit of the top limb may be set;
    /// the checked operations account for carry out of the top limb.
    const MODULUS: Uint<L, N>;
}

/// Computes `a + b mod m`. Requires `a, b < m`.
pub(crate) fn add_mod<L: Limb, const N: usize>(
    a: &Uint<L, N>,
    b: &Uint<L, N>,
    m: &Uint<L, N>,
) -> Uint<L, N> {
    let (sum, carry) = a.adc(b, L::ZERO);
    if carry != L::ZERO || sum >= *m {
        sum.wrapping_sub(m)
    } else {
        sum
    }
}

/// Computes `a - b mod m`. Requires `a, b < m`.
pub(crate) fn sub_mod<L: Limb, const N: usize>(
    a: &Uint<L, N>,
    b: &Uint<L, N>,
    m: &Uint<L, N>,
) -> Uint<L, N> {
    let (diff, borrow) = a.sbb(b, L::ZERO);
    if borrow != L::ZERO {
        diff.wrapping_add(m)
    } else {
        diff
    }
}

/// Computes `-a mod m`. Requires `a < m`. The negation of zero is zero,
/// not `m`.
pub(crate) fn neg_mod<L: Limb, const N: usize>(a: &Uint<L, N>, m: &Uint<L, N>) -> Uint<L, N> {
    if a.is_zero() {
        Uint::ZERO
    } else {
        m.wrapping_sub(a)
    }
}

/// Computes `2a mod m`, checking for overflow into the bit above the top
/// limb. Requires `a < m`.
pub(crate) fn double_mod<L: Limb, const N: usize>(a: &Uint<L, N>, m: &Uint<L, N>) -> Uint<L, N> {
    let carry = a.bit(Uint::<L, N>::BITS - 1);
    let sh = a.shl(1);
    if carry || sh >= *m {
        sh.wrapping_sub(m)
    } else {
        sh
    }
}

/// Computes `a · 2^k mod m` as `k` rounds of shift-and-reduce. Requires
/// `a < m`.
pub(crate) fn mul_pow2_mod<L: Limb, const N: usize>(
    a: &Uint<L, N>,
    k: u32,
    m: &Uint<L, N>,
) -> Uint<L, N> {
    let mut r = *a;
    for _ in 0..k {
        r = double_mod(&r, m);
    }
    r
}

/// Computes `2a mod m` without probing the carry out of the top limb.
/// Requires `m < 2^(W·N - 1)`; with a larger modulus the doubled value can
/// silently wrap and the result is wrong.
pub(crate) fn double_mod_carry_free<L: Limb, const N: usize>(
    a: &Uint<L, N>,
    m: &Uint<L, N>,
) -> Uint<L, N> {
    let sh = a.shl(1);
    if sh >= *m {
        sh.wrapping_sub(m)
    } else {
        sh
    }
}

/// Carry-free variant of [`mul_pow2_mod`]; same precondition as
/// [`double_mod_carry_free`].
pub(crate) fn mul_pow2_mod_carry_free<L: Limb, const N: usize>(
    a: &Uint<L, N>,
    k: u32,
    m: &Uint<L, N>,
) -> Uint<L, N> {
    let mut r = *a;
    for _ in 0..k {
        r = double_mod_carry_free(&r, m);
    }
    r
}

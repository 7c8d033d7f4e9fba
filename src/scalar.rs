//! Integers modulo a fixed (not necessarily prime) modulus.
//!
//! [`Scalar`] is the add/sub group over `[0, MODULUS)` with reduction by
//! comparison. It carries exponents for scalar multiplication and the
//! accumulated walk offsets in the discrete logarithm solvers, where the
//! modulus is the order of the curve's group.

use crate::modular::{
    add_mod, double_mod, double_mod_carry_free, mul_pow2_mod, mul_pow2_mod_carry_free, neg_mod,
    sub_mod, Modulus,
};
use crate::{limb::Limb, uint::Uint};
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use rand_core::RngCore;
use subtle::{Choice, CtOption};

/// An integer in `[0, MOD::MODULUS)` supporting modular addition,
/// subtraction, negation, and doubling.
pub struct Scalar<MOD, L: Limb, const N: usize> {
    uint: Uint<L, N>,
    _params: PhantomData<MOD>,
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Scalar<MOD, L, N> {
    /// The scalar zero.
    pub const ZERO: Self = Self::from_uint_unchecked(Uint::ZERO);

    /// The scalar one.
    pub const ONE: Self = Self::from_uint_unchecked(Uint::ONE);

    /// Creates a scalar from an integer without checking the range.
    ///
    /// The caller must guarantee `uint < MOD::MODULUS`; every operation
    /// assumes its operands are reduced.
    pub const fn from_uint_unchecked(uint: Uint<L, N>) -> Self {
        Self {
            uint,
            _params: PhantomData,
        }
    }

    /// Creates a scalar from an integer, checking that it is reduced.
    pub fn new(uint: Uint<L, N>) -> CtOption<Self> {
        let (_, borrow) = uint.sbb(&MOD::MODULUS, L::ZERO);
        let is_some = Choice::from((borrow != L::ZERO) as u8);
        CtOption::new(Self::from_uint_unchecked(uint), is_some)
    }

    /// Returns `2^e`. Requires `2^e < MOD::MODULUS`.
    pub fn pow2(e: u32) -> Self {
        let uint = Uint::pow2(e);
        debug_assert!(uint < MOD::MODULUS);
        Self::from_uint_unchecked(uint)
    }

    /// Borrows the underlying integer.
    pub const fn as_uint(&self) -> &Uint<L, N> {
        &self.uint
    }

    /// Whether the scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.uint.is_zero()
    }

    /// One-based position of the most significant set bit.
    pub fn bits(&self) -> u32 {
        self.uint.bits()
    }

    /// Computes `self + rhs mod MODULUS`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self::from_uint_unchecked(add_mod(&self.uint, &rhs.uint, &MOD::MODULUS))
    }

    /// Computes `self - rhs mod MODULUS`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self::from_uint_unchecked(sub_mod(&self.uint, &rhs.uint, &MOD::MODULUS))
    }

    /// Computes `-self mod MODULUS`. The negation of zero is zero.
    pub fn neg(&self) -> Self {
        Self::from_uint_unchecked(neg_mod(&self.uint, &MOD::MODULUS))
    }

    /// Computes `2·self mod MODULUS`.
    #[must_use]
    pub fn double(&self) -> Self {
        Self::from_uint_unchecked(double_mod(&self.uint, &MOD::MODULUS))
    }

    /// Computes `self · 2^k mod MODULUS`.
    #[must_use]
    pub fn mul_pow2(&self, k: u32) -> Self {
        Self::from_uint_unchecked(mul_pow2_mod(&self.uint, k, &MOD::MODULUS))
    }

    /// Computes `self · 2^k mod MODULUS` without carry probing.
    ///
    /// Requires `MODULUS < 2^(W·N - 1)`; see
    /// [`Modulus`](crate::Modulus) and the checked [`Self::mul_pow2`] for
    /// moduli occupying the top bit.
    #[must_use]
    pub fn mul_pow2_carry_free(&self, k: u32) -> Self {
        Self::from_uint_unchecked(mul_pow2_mod_carry_free(&self.uint, k, &MOD::MODULUS))
    }

    /// Carry-free doubling; same precondition as
    /// [`Self::mul_pow2_carry_free`].
    #[must_use]
    pub fn double_carry_free(&self) -> Self {
        Self::from_uint_unchecked(double_mod_carry_free(&self.uint, &MOD::MODULUS))
    }

    /// Draws a uniformly random scalar in `[0, MODULUS)`.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::from_uint_unchecked(Uint::random_below(rng, &MOD::MODULUS))
    }

    /// Draws a uniformly random non-zero scalar.
    pub fn random_nonzero<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let s = Self::random(rng);
            if !s.is_zero() {
                return s;
            }
        }
    }

    /// Draws a uniformly random scalar in `[lo, hi)`. Requires `lo < hi`.
    pub fn random_range<R: RngCore + ?Sized>(rng: &mut R, lo: &Self, hi: &Self) -> Self {
        Self::from_uint_unchecked(Uint::random_range(rng, &lo.uint, &hi.uint))
    }

    /// Draws a uniformly random scalar in `[lo, hi]`. Requires `lo <= hi`.
    pub fn random_range_inclusive<R: RngCore + ?Sized>(rng: &mut R, lo: &Self, hi: &Self) -> Self {
        Self::from_uint_unchecked(Uint::random_range_inclusive(rng, &lo.uint, &hi.uint))
    }
}

impl<MOD, L: Limb, const N: usize> Clone for Scalar<MOD, L, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<MOD, L: Limb, const N: usize> Copy for Scalar<MOD, L, N> {}

impl<MOD, L: Limb, const N: usize> PartialEq for Scalar<MOD, L, N> {
    fn eq(&self, other: &Self) -> bool {
        self.uint == other.uint
    }
}

impl<MOD, L: Limb, const N: usize> Eq for Scalar<MOD, L, N> {}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Default for Scalar<MOD, L, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<MOD, L: Limb, const N: usize> fmt::Debug for Scalar<MOD, L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{:x})", self.uint)
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Add for Scalar<MOD, L, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Scalar::add(&self, &rhs)
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Add<&Self> for Scalar<MOD, L, N> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self {
        Scalar::add(&self, rhs)
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> AddAssign for Scalar<MOD, L, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = Scalar::add(self, &rhs);
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> AddAssign<&Self> for Scalar<MOD, L, N> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = Scalar::add(self, rhs);
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Sub for Scalar<MOD, L, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Scalar::sub(&self, &rhs)
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Sub<&Self> for Scalar<MOD, L, N> {
    type Output = Self;

    fn sub(self, rhs: &Self) -> Self {
        Scalar::sub(&self, rhs)
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> SubAssign for Scalar<MOD, L, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = Scalar::sub(self, &rhs);
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> SubAssign<&Self> for Scalar<MOD, L, N> {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = Scalar::sub(self, rhs);
    }
}

impl<MOD: Modulus<L, N>, L: Limb, const N: usize> Neg for Scalar<MOD, L, N> {
    type Output = Self;

    fn neg(self) -> Self {
        Scalar::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use crate::dev::P160;
    use crate::uint::Uint;

    type S = Scalar<P160, u32, 5>;

    fn s(words: [u32; 5]) -> S {
        S::from_uint_unchecked(Uint::from_be_words(words))
    }

    fn w(word: u32) -> S {
        S::from_uint_unchecked(Uint::from_word(word))
    }

    #[test]
    fn neg() {
        assert!(S::ZERO.neg().is_zero());

        assert_eq!(
            -w(0x1),
            s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
        );
        assert_eq!(
            -s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968]),
            w(0x1)
        );
        assert_eq!(
            -s([0x5bbc8155, 0xec6dcb13, 0xfaebe765, 0x2e0bf7b6, 0x2f1d84b4]),
            s([0x5bbc8155, 0xec6dcb13, 0xfaebe765, 0x2e0bf7b6, 0x2f1d84b5])
        );
    }

    #[test]
    fn add() {
        assert!((S::ZERO + S::ZERO).is_zero());
        assert_eq!(w(1) + w(2), w(3));

        // wraps past the modulus
        assert_eq!(
            w(0x2) + s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0966]),
            s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
        );
        assert_eq!(
            w(0x2) + s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968]),
            w(0x1)
        );

        assert_eq!(
            s([0x0d1f4b5b, 0x8005d7aa, 0x4fed62ac, 0x03831479, 0x83ccd32d])
                + s([0x1cfaec75, 0x7faf7c19, 0xd3121b9e, 0xded3ca3b, 0x952e1b38]),
            s([0x2a1a37d0, 0xffb553c4, 0x22ff7e4a, 0xe256deb5, 0x18faee65])
        );
        assert_eq!(
            s([0x8f566078, 0xb1d6a8df, 0xd5af7fad, 0xaa89f612, 0x240a6b52])
                + s([0x4a617461, 0x4c8165c6, 0xf378a372, 0x8d6cccb6, 0xd07f7850]),
            s([0x223ed22e, 0x257c787e, 0xd3505455, 0xdbded35c, 0x964eda39])
        );
    }

    #[test]
    fn sub() {
        assert!((S::ZERO - S::ZERO).is_zero());
        assert_eq!(w(0xf0) - w(0x2), w(0xee));

        assert_eq!(
            s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
                - s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0966]),
            w(0x2)
        );

        // borrows and adds the modulus back
        assert_eq!(
            w(0x1) - w(0x2),
            s([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
        );

        assert_eq!(
            s([0x2a1a37d0, 0xffb553c4, 0x22ff7e4a, 0xe256deb5, 0x18faee65])
                - s([0x1cfaec75, 0x7faf7c19, 0xd3121b9e, 0xded3ca3b, 0x952e1b38]),
            s([0x0d1f4b5b, 0x8005d7aa, 0x4fed62ac, 0x03831479, 0x83ccd32d])
        );
        assert_eq!(
            s([0x223ed22e, 0x257c787e, 0xd3505455, 0xdbded35c, 0x964eda39])
                - s([0x4a617461, 0x4c8165c6, 0xf378a372, 0x8d6cccb6, 0xd07f7850]),
            s([0x8f566078, 0xb1d6a8df, 0xd5af7fad, 0xaa89f612, 0x240a6b52])
        );
    }

    #[test]
    fn doubling_matches_addition() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let a = S::random(&mut rng);
            let a2 = a + a;
            let a4 = a2 + a2;
            let a8 = a4 + a4;

            assert_eq!(a.double(), a2);
            assert_eq!(a.mul_pow2(1), a2);
            assert_eq!(a.mul_pow2(2), a4);
            assert_eq!(a.mul_pow2(3), a8);
        }
    }

    #[test]
    fn sampling_bounds() {
        use rand::{rngs::StdRng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..1000 {
            let x = S::random_nonzero(&mut rng);
            assert!(!x.is_zero());
            assert!(x.as_uint() < &<P160 as crate::Modulus<u32, 5>>::MODULUS);

            let y = S::random_range(&mut rng, &S::ZERO, &x);
            assert!(y.as_uint() < x.as_uint());

            let z = S::random_range_inclusive(&mut rng, &y, &x);
            assert!(y.as_uint() <= z.as_uint() && z.as_uint() <= x.as_uint());
        }
    }
}

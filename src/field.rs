//! Prime field arithmetic in Montgomery form.
//!
//! A [`FieldElement`] stores `a·R mod p` where `R = 2^(W·N)` is the
//! Montgomery radix. Products are reduced with the coarsely integrated
//! operand scanning (CIOS) schedule, which interleaves one limb of
//! multiplication with one limb of reduction per round, so no double-width
//! buffer is needed.

mod sqrt;

use crate::modular::{
    add_mod, double_mod, double_mod_carry_free, mul_pow2_mod, mul_pow2_mod_carry_free, neg_mod,
    sub_mod, Modulus,
};
use crate::{limb::Limb, uint::Uint};
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Montgomery parameters of an odd prime modulus.
///
/// `R = 2^(W·N)` is fixed by the limb layout; implementations supply the
/// precomputed residues.
pub trait FieldParams<L: Limb, const N: usize>: Modulus<L, N> {
    /// `R mod p`: one in Montgomery form.
    const R: Uint<L, N>;

    /// `R² mod p`: carries values into Montgomery form.
    const R2: Uint<L, N>;

    /// `p'` satisfying `p·p' ≡ -1 (mod 2^W)`.
    const MOD_NEG_INV: L;
}

/// An element of the prime field `F_p`, stored in Montgomery form.
///
/// Every public operation takes reduced operands and returns a reduced
/// result; no value `>= p` escapes.
pub struct FieldElement<P, L: Limb, const N: usize> {
    words: Uint<L, N>,
    _params: PhantomData<P>,
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> FieldElement<P, L, N> {
    /// The additive identity.
    pub const ZERO: Self = Self::from_montgomery(Uint::ZERO);

    /// The multiplicative identity, `R mod p`.
    pub const ONE: Self = Self::from_montgomery(P::R);

    /// Creates a field element from a value already in Montgomery form.
    ///
    /// The caller must guarantee the value is reduced and in the
    /// Montgomery domain; this is primarily for curve constants.
    pub const fn from_montgomery(words: Uint<L, N>) -> Self {
        Self {
            words,
            _params: PhantomData,
        }
    }

    /// Borrows the Montgomery-form representation.
    pub const fn as_montgomery(&self) -> &Uint<L, N> {
        &self.words
    }

    /// Converts a canonical integer into Montgomery form:
    /// `a · R² · R⁻¹ = a·R (mod p)`.
    ///
    /// Returns the `CtOption` equivalent of `None` if `uint >= p`.
    pub fn from_uint(uint: &Uint<L, N>) -> CtOption<Self> {
        let (_, borrow) = uint.sbb(&P::MODULUS, L::ZERO);
        let is_some = Choice::from((borrow != L::ZERO) as u8);
        CtOption::new(
            Self::from_montgomery(Self::mont_mul(uint, &P::R2)),
            is_some,
        )
    }

    /// Translates out of the Montgomery domain: `a · 1 · R⁻¹ (mod p)`.
    pub fn to_canonical(&self) -> Uint<L, N> {
        Self::mont_mul(&self.words, &Uint::ONE)
    }

    /// Whether the element is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Computes `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self::from_montgomery(add_mod(&self.words, &rhs.words, &P::MODULUS))
    }

    /// Computes `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self::from_montgomery(sub_mod(&self.words, &rhs.words, &P::MODULUS))
    }

    /// Computes `-self`. The negation of zero is zero.
    pub fn neg(&self) -> Self {
        Self::from_montgomery(neg_mod(&self.words, &P::MODULUS))
    }

    /// Computes `2·self`.
    #[must_use]
    pub fn double(&self) -> Self {
        Self::from_montgomery(double_mod(&self.words, &P::MODULUS))
    }

    /// Computes `self · 2^k`.
    #[must_use]
    pub fn mul_pow2(&self, k: u32) -> Self {
        Self::from_montgomery(mul_pow2_mod(&self.words, k, &P::MODULUS))
    }

    /// Computes `self · 2^k` without carry probing. Requires
    /// `p < 2^(W·N - 1)`.
    #[must_use]
    pub fn mul_pow2_carry_free(&self, k: u32) -> Self {
        Self::from_montgomery(mul_pow2_mod_carry_free(&self.words, k, &P::MODULUS))
    }

    /// Computes `2·self` without carry probing. Requires
    /// `p < 2^(W·N - 1)`.
    #[must_use]
    pub fn double_carry_free(&self) -> Self {
        Self::from_montgomery(double_mod_carry_free(&self.words, &P::MODULUS))
    }

    /// Computes `self · rhs` in the Montgomery domain.
    pub fn multiply(&self, rhs: &Self) -> Self {
        Self::from_montgomery(Self::mont_mul(&self.words, &rhs.words))
    }

    /// Computes `self²`.
    #[must_use]
    pub fn square(&self) -> Self {
        self.multiply(self)
    }

    /// CIOS Montgomery multiplication: returns `a · b · R⁻¹ mod p`.
    ///
    /// Each round accumulates `a·b[i]`, cancels the low limb with
    /// `q = t[0]·p' mod 2^W`, and shifts right by one limb. The running
    /// value stays below `2p`, so the word above the top limb never
    /// exceeds one and a single conditional subtraction finishes the
    /// reduction.
    fn mont_mul(a: &Uint<L, N>, b: &Uint<L, N>) -> Uint<L, N> {
        let modulus = P::MODULUS;
        let m = modulus.as_words();
        let a = a.as_words();
        let b = b.as_words();

        let mut t = [L::ZERO; N];
        let mut t_n = L::ZERO;
        let mut t_n1 = L::ZERO;

        for i in 0..N {
            let mut carry = L::ZERO;
            for j in 0..N {
                let (r, c) = t[j].mac(a[j], b[i], carry);
                t[j] = r;
                carry = c;
            }
            let (r, c) = t_n.adc(carry, L::ZERO);
            t_n = r;
            t_n1 = c;

            let q = t[0].wrapping_mul(P::MOD_NEG_INV);
            let (_, mut carry) = t[0].mac(q, m[0], L::ZERO);
            for j in 1..N {
                let (r, c) = t[j].mac(q, m[j], carry);
                t[j - 1] = r;
                carry = c;
            }
            let (r, c) = t_n.adc(carry, L::ZERO);
            t[N - 1] = r;
            t_n = t_n1.adc(c, L::ZERO).0;
            t_n1 = L::ZERO;
        }

        let r = Uint::from_words(t);
        if t_n != L::ZERO || r >= modulus {
            r.wrapping_sub(&modulus)
        } else {
            r
        }
    }

    /// Computes `self^exp` by left-to-right binary exponentiation.
    ///
    /// The exponent is a canonical (non-Montgomery) integer and may be
    /// wider or narrower than the field. `self^0` is [`Self::ONE`].
    ///
    /// Runs in time variable in the exponent.
    pub fn pow_vartime<const RHS: usize>(&self, exp: &Uint<L, RHS>) -> Self {
        let mut res = Self::ONE;
        for i in (0..exp.bits()).rev() {
            res = res.square();
            if exp.bit(i) {
                res = res.multiply(self);
            }
        }
        res
    }

    /// Computes the multiplicative inverse, `self⁻¹`, if `self` is
    /// non-zero.
    ///
    /// Binary extended gcd in the Montgomery domain: the Bézout
    /// accumulator is seeded with `R²`, which keeps the invariants
    /// `a·x1 ≡ u·R²` and `a·x2 ≡ v·R² (mod p)` and makes the final value
    /// the Montgomery form of the inverse with no correction step.
    pub fn invert(&self) -> CtOption<Self> {
        if bool::from(self.is_zero()) {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }

        let modulus = P::MODULUS;
        let mut u = self.words;
        let mut v = modulus;
        let mut x1 = P::R2;
        let mut x2 = Uint::ZERO;

        while !u.is_one() && !v.is_one() {
            while u.is_even() {
                u = u.shr(1);
                x1 = Self::half_mod(&x1, &modulus);
            }
            while v.is_even() {
                v = v.shr(1);
                x2 = Self::half_mod(&x2, &modulus);
            }
            if u >= v {
                u = u.wrapping_sub(&v);
                x1 = sub_mod(&x1, &x2, &modulus);
            } else {
                v = v.wrapping_sub(&u);
                x2 = sub_mod(&x2, &x1, &modulus);
            }
        }

        let inv = if u.is_one() { x1 } else { x2 };
        CtOption::new(Self::from_montgomery(inv), Choice::from(1))
    }

    /// Halves `x` modulo an odd `m`: even values shift, odd values get
    /// `m` added first. The add can carry past the top limb, so the carry
    /// bit is fed back into the shift.
    fn half_mod(x: &Uint<L, N>, m: &Uint<L, N>) -> Uint<L, N> {
        if x.is_even() {
            x.shr(1)
        } else {
            let (t, carry) = x.adc(m, L::ZERO);
            t.shr1_with_hi(carry)
        }
    }

    /// Draws a uniformly random field element.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::from_montgomery(Uint::random_below(rng, &P::MODULUS))
    }
}

impl<P, L: Limb, const N: usize> Clone for FieldElement<P, L, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, L: Limb, const N: usize> Copy for FieldElement<P, L, N> {}

impl<P, L: Limb, const N: usize> PartialEq for FieldElement<P, L, N> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<P, L: Limb, const N: usize> Eq for FieldElement<P, L, N> {}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> Default for FieldElement<P, L, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<P, L: Limb, const N: usize> ConditionallySelectable for FieldElement<P, L, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            words: Uint::conditional_select(&a.words, &b.words, choice),
            _params: PhantomData,
        }
    }
}

impl<P, L: Limb, const N: usize> ConstantTimeEq for FieldElement<P, L, N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.words.ct_eq(&other.words)
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> fmt::Debug for FieldElement<P, L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self.to_canonical())
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> fmt::UpperHex for FieldElement<P, L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.to_canonical(), f)
    }
}

/// Emit `core::ops` wrappers for an inherent method over the usual
/// owned/borrowed operand combinations.
macro_rules! field_op {
    ($op:ident, $func:ident, $inner:ident) => {
        impl<P: FieldParams<L, N>, L: Limb, const N: usize> $op for FieldElement<P, L, N> {
            type Output = Self;

            #[inline]
            fn $func(self, rhs: Self) -> Self {
                FieldElement::$inner(&self, &rhs)
            }
        }

        impl<P: FieldParams<L, N>, L: Limb, const N: usize> $op<&Self> for FieldElement<P, L, N> {
            type Output = Self;

            #[inline]
            fn $func(self, rhs: &Self) -> Self {
                FieldElement::$inner(&self, rhs)
            }
        }

        impl<P: FieldParams<L, N>, L: Limb, const N: usize> $op<&FieldElement<P, L, N>>
            for &FieldElement<P, L, N>
        {
            type Output = FieldElement<P, L, N>;

            #[inline]
            fn $func(self, rhs: &FieldElement<P, L, N>) -> FieldElement<P, L, N> {
                FieldElement::$inner(self, rhs)
            }
        }
    };
}

field_op!(Add, add, add);
field_op!(Sub, sub, sub);
field_op!(Mul, mul, multiply);

impl<P: FieldParams<L, N>, L: Limb, const N: usize> AddAssign for FieldElement<P, L, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = FieldElement::add(self, &rhs);
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> SubAssign for FieldElement<P, L, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = FieldElement::sub(self, &rhs);
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> MulAssign for FieldElement<P, L, N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = FieldElement::multiply(self, &rhs);
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> Neg for FieldElement<P, L, N> {
    type Output = Self;

    fn neg(self) -> Self {
        FieldElement::neg(&self)
    }
}

impl<P: FieldParams<L, N>, L: Limb, const N: usize> Neg for &FieldElement<P, L, N> {
    type Output = FieldElement<P, L, N>;

    fn neg(self) -> FieldElement<P, L, N> {
        FieldElement::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use crate::dev::P160;
    use crate::limb::Limb;
    use crate::uint::Uint;
    use rand::{rngs::StdRng, SeedableRng};

    type F = FieldElement<P160, u32, 5>;
    type F64 = FieldElement<P160, u64, 3>;

    fn fe(words: [u32; 5]) -> F {
        F::from_uint(&Uint::from_be_words(words)).unwrap()
    }

    #[test]
    fn montgomery_round_trip() {
        let zero = F::from_uint(&Uint::ZERO).unwrap();
        assert!(bool::from(zero.is_zero()));
        assert!(zero.to_canonical().is_zero());

        let a = F::from_uint(&Uint::from_word(0xffffffff)).unwrap();
        assert_eq!(
            *a.as_montgomery(),
            Uint::from_be_words([0xad37b410, 0x255c6eb2, 0x7601a883, 0x659883e8, 0x070707fc])
        );
        assert_eq!(a.to_canonical(), Uint::from_word(0xffffffff));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let c = Uint::random_below(&mut rng, &<P160 as crate::Modulus<u32, 5>>::MODULUS);
            assert_eq!(F::from_uint(&c).unwrap().to_canonical(), c);
        }
    }

    #[test]
    fn montgomery_round_trip_wide_limbs() {
        let a = F64::from_uint(&Uint::from_word(0xffffffff)).unwrap();
        assert_eq!(a.to_canonical(), Uint::from_word(0xffffffff));

        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let c = Uint::random_below(&mut rng, &<P160 as crate::Modulus<u64, 3>>::MODULUS);
            assert_eq!(F64::from_uint(&c).unwrap().to_canonical(), c);
        }
    }

    #[test]
    fn single_limb_products() {
        let mut rng = StdRng::seed_from_u64(3);
        let check = |x: u32, y: u32| {
            let (lo, hi) = x.mul_wide(y);
            let xy = (F::from_uint(&Uint::from_word(x)).unwrap()
                * F::from_uint(&Uint::from_word(y)).unwrap())
            .to_canonical();
            assert_eq!(xy.as_words(), &[lo, hi, 0, 0, 0]);
        };

        check(0xd8b2f21e, 0xabf7c642);
        for _ in 0..100 {
            check(u32::random(&mut rng), u32::random(&mut rng));
        }
    }

    #[test]
    fn montgomery_product_vector() {
        let x = F::from_montgomery(Uint::from_be_words([
            0xa5481e14, 0x293b3c7d, 0xb85ecae1, 0x83d79492, 0xcd652763,
        ]));
        let y = F::from_montgomery(Uint::from_be_words([
            0x93d20f51, 0x898541bb, 0x74aa1184, 0xbccb10b2, 0x47f79c2c,
        ]));
        assert_eq!(
            *(x * y).as_montgomery(),
            Uint::from_be_words([0x4886fd54, 0x272469d8, 0x0a283135, 0xa3e81093, 0xa1c4f697])
        );
    }

    #[test]
    fn invert() {
        assert!(bool::from(F::ZERO.invert().is_none()));
        assert_eq!(F::ONE.invert().unwrap(), F::ONE);

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let a = F::random(&mut rng);
            if bool::from(a.is_zero()) {
                continue;
            }
            assert_eq!(a * a.invert().unwrap(), F::ONE);
        }
        for _ in 0..100 {
            let a = F64::random(&mut rng);
            if bool::from(a.is_zero()) {
                continue;
            }
            assert_eq!(a * a.invert().unwrap(), F64::ONE);
        }
    }

    #[test]
    fn pow_edge_exponents() {
        let mut rng = StdRng::seed_from_u64(5);
        let modulus = <P160 as crate::Modulus<u32, 5>>::MODULUS;
        let mod_m1 = modulus.wrapping_sub(&Uint::ONE);

        for _ in 0..20 {
            let a = F::random(&mut rng);
            if bool::from(a.is_zero()) {
                continue;
            }

            assert_eq!(a.pow_vartime(&Uint::<u32, 5>::from_word(1)), a);
            assert_eq!(a.pow_vartime(&Uint::<u32, 5>::ZERO), F::ONE);

            // Fermat's little theorem
            assert_eq!(a.pow_vartime(&modulus), a);
            assert_eq!(a.pow_vartime(&mod_m1), F::ONE);
        }
    }

    #[test]
    fn distributivity() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..100 {
            let a = F::random(&mut rng);
            let b = F::random(&mut rng);
            let c = F::random(&mut rng);

            assert_eq!(a * b, b * a);
            assert_eq!((a * b) * c, a * (b * c));
            assert_eq!((a + b) * c, a * c + b * c);
            assert_eq!(a * F::ONE, a);
        }
    }

    #[test]
    fn doubling_vectors() {
        let a = fe([0x0d1f4b5b, 0x8005d7aa, 0x4fed62ac, 0x03831479, 0x83ccd32d]);
        let a2 = a + a;
        let a4 = a2 + a2;
        let a8 = a4 + a4;

        assert_eq!(a.double(), a2);
        assert_eq!(a.mul_pow2(1), a2);
        assert_eq!(a.mul_pow2(2), a4);
        assert_eq!(a.mul_pow2(3), a8);
    }
}

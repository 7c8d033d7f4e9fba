//! Fixed-width unsigned big integers.
//!
//! [`Uint`] is an `N`-limb little-endian integer with value
//! `Σ limbs[i] · 2^(W·i)` where `W` is the limb width. The width is fixed
//! at compile time and no operation allocates.

use crate::limb::Limb;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Fixed-width unsigned integer stored as `N` limbs of type `L` in
/// little-endian order: `limbs[0]` is the least significant word.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uint<L: Limb, const N: usize> {
    limbs: [L; N],
}

impl<L: Limb, const N: usize> Uint<L, N> {
    /// Total bit width of the integer.
    pub const BITS: u32 = L::BITS * N as u32;

    /// The value zero.
    pub const ZERO: Self = Self {
        limbs: [L::ZERO; N],
    };

    /// The value one.
    pub const ONE: Self = {
        let mut limbs = [L::ZERO; N];
        limbs[0] = L::ONE;
        Self { limbs }
    };

    /// The all-one value `2^(W·N) - 1`.
    pub const MAX: Self = Self { limbs: [L::MAX; N] };

    /// Creates an integer from little-endian limbs.
    pub const fn from_words(limbs: [L; N]) -> Self {
        Self { limbs }
    }

    /// Creates an integer from big-endian limbs, the order constants are
    /// usually written in.
    pub const fn from_be_words(words: [L; N]) -> Self {
        let mut limbs = words;
        let mut i = 0;
        while i < N / 2 {
            let t = limbs[i];
            limbs[i] = limbs[N - 1 - i];
            limbs[N - 1 - i] = t;
            i += 1;
        }
        Self { limbs }
    }

    /// Creates an integer from a single least-significant limb.
    pub const fn from_word(w: L) -> Self {
        let mut limbs = [L::ZERO; N];
        limbs[0] = w;
        Self { limbs }
    }

    /// Borrows the little-endian limb array.
    pub const fn as_words(&self) -> &[L; N] {
        &self.limbs
    }

    /// Returns `2^e`. Requires `e < Self::BITS`.
    pub fn pow2(e: u32) -> Self {
        debug_assert!(e < Self::BITS);
        let mut r = Self::ZERO;
        r.limbs[(e / L::BITS) as usize] = L::ONE.shl(e % L::BITS);
        r
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|w| *w == L::ZERO)
    }

    /// Whether the value is one.
    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    /// Whether the value is odd.
    pub fn is_odd(&self) -> bool {
        self.limbs[0] & L::ONE == L::ONE
    }

    /// Whether the value is even.
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Returns bit `i` (little-endian numbering). Requires `i < Self::BITS`.
    pub fn bit(&self, i: u32) -> bool {
        debug_assert!(i < Self::BITS);
        self.limbs[(i / L::BITS) as usize].shr(i % L::BITS) & L::ONE == L::ONE
    }

    /// One-based position of the most significant set bit, or zero if the
    /// value is zero.
    pub fn bits(&self) -> u32 {
        for i in (0..N).rev() {
            if self.limbs[i] != L::ZERO {
                return i as u32 * L::BITS + (L::BITS - self.limbs[i].leading_zeros());
            }
        }
        0
    }

    /// Number of trailing zero bits; `Self::BITS` if the value is zero.
    pub fn trailing_zeros(&self) -> u32 {
        for i in 0..N {
            if self.limbs[i] != L::ZERO {
                return i as u32 * L::BITS + self.limbs[i].trailing_zeros();
            }
        }
        Self::BITS
    }

    /// Computes `self + rhs + carry`, returning the truncated sum along
    /// with the carry out of the top limb (`0` or `1`).
    pub fn adc(&self, rhs: &Self, mut carry: L) -> (Self, L) {
        let mut limbs = [L::ZERO; N];
        for i in 0..N {
            let (w, c) = self.limbs[i].adc(rhs.limbs[i], carry);
            limbs[i] = w;
            carry = c;
        }
        (Self { limbs }, carry)
    }

    /// Computes `self - (rhs + borrow)`, returning the wrapped difference
    /// along with the borrow out of the top limb (zero or the all-one
    /// mask).
    pub fn sbb(&self, rhs: &Self, mut borrow: L) -> (Self, L) {
        let mut limbs = [L::ZERO; N];
        for i in 0..N {
            let (w, b) = self.limbs[i].sbb(rhs.limbs[i], borrow);
            limbs[i] = w;
            borrow = b;
        }
        (Self { limbs }, borrow)
    }

    /// Computes `self + rhs mod 2^(W·N)`.
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        self.adc(rhs, L::ZERO).0
    }

    /// Computes `self - rhs mod 2^(W·N)`.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.sbb(rhs, L::ZERO).0
    }

    /// Logical shift left by `n` bits. Requires `n <= Self::BITS`; a full
    /// shift yields zero.
    pub fn shl(&self, n: u32) -> Self {
        debug_assert!(n <= Self::BITS);
        let mut r = Self::ZERO;
        if n >= Self::BITS {
            return r;
        }
        let off = (n / L::BITS) as usize;
        let rem = n % L::BITS;
        if rem == 0 {
            for i in off..N {
                r.limbs[i] = self.limbs[i - off];
            }
        } else {
            for i in off..N {
                let lo = self.limbs[i - off].shl(rem);
                let hi = if i > off {
                    self.limbs[i - off - 1].shr(L::BITS - rem)
                } else {
                    L::ZERO
                };
                r.limbs[i] = lo | hi;
            }
        }
        r
    }

    /// Logical shift right by `n` bits. Requires `n <= Self::BITS`; a full
    /// shift yields zero.
    pub fn shr(&self, n: u32) -> Self {
        debug_assert!(n <= Self::BITS);
        let mut r = Self::ZERO;
        if n >= Self::BITS {
            return r;
        }
        let off = (n / L::BITS) as usize;
        let rem = n % L::BITS;
        if rem == 0 {
            for i in 0..N - off {
                r.limbs[i] = self.limbs[i + off];
            }
        } else {
            for i in 0..N - off {
                let lo = self.limbs[i + off].shr(rem);
                let hi = if i + off + 1 < N {
                    self.limbs[i + off + 1].shl(L::BITS - rem)
                } else {
                    L::ZERO
                };
                r.limbs[i] = lo | hi;
            }
        }
        r
    }

    /// Shift right by one bit, injecting `hi` (zero or one) as the new top
    /// bit. Used when halving an `N+1`-bit intermediate.
    pub(crate) fn shr1_with_hi(&self, hi: L) -> Self {
        let mut r = self.shr(1);
        r.limbs[N - 1] = r.limbs[N - 1] | hi.shl(L::BITS - 1);
        r
    }

    /// Draws a uniformly random integer over the full width.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut limbs = [L::ZERO; N];
        for w in limbs.iter_mut() {
            *w = L::random(rng);
        }
        Self { limbs }
    }

    /// Draws a uniformly random integer in `[0, bound)` by rejection
    /// sampling. Requires a non-zero bound.
    pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &Self) -> Self {
        debug_assert!(!bound.is_zero());
        let bits = bound.bits();
        loop {
            let r = Self::random(rng).truncate(bits);
            if r < *bound {
                return r;
            }
        }
    }

    /// Draws a uniformly random integer in `[0, bound]` by rejection
    /// sampling.
    pub fn random_below_inclusive<R: RngCore + ?Sized>(rng: &mut R, bound: &Self) -> Self {
        let bits = bound.bits();
        loop {
            let r = Self::random(rng).truncate(bits);
            if r <= *bound {
                return r;
            }
        }
    }

    /// Draws a uniformly random integer in `[lo, hi)`. Requires `lo < hi`.
    pub fn random_range<R: RngCore + ?Sized>(rng: &mut R, lo: &Self, hi: &Self) -> Self {
        debug_assert!(lo < hi);
        let span = hi.wrapping_sub(lo);
        lo.wrapping_add(&Self::random_below(rng, &span))
    }

    /// Draws a uniformly random integer in `[lo, hi]`. Requires `lo <= hi`.
    pub fn random_range_inclusive<R: RngCore + ?Sized>(rng: &mut R, lo: &Self, hi: &Self) -> Self {
        debug_assert!(lo <= hi);
        let span = hi.wrapping_sub(lo);
        lo.wrapping_add(&Self::random_below_inclusive(rng, &span))
    }

    /// Zeroes all bits at positions `>= bits`.
    fn truncate(mut self, bits: u32) -> Self {
        if bits >= Self::BITS {
            return self;
        }
        let limb = (bits / L::BITS) as usize;
        let rem = bits % L::BITS;
        if rem > 0 {
            self.limbs[limb] = self.limbs[limb] & L::MAX.shr(L::BITS - rem);
            for i in limb + 1..N {
                self.limbs[i] = L::ZERO;
            }
        } else {
            for i in limb..N {
                self.limbs[i] = L::ZERO;
            }
        }
        self
    }
}

impl<L: Limb, const N: usize> Default for Uint<L, N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<L: Limb, const N: usize> Ord for Uint<L, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..N).rev() {
            match self.limbs[i].cmp(&other.limbs[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl<L: Limb, const N: usize> PartialOrd for Uint<L, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<L: Limb, const N: usize> BitAnd for Uint<L, N> {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        for i in 0..N {
            self.limbs[i] = self.limbs[i] & rhs.limbs[i];
        }
        self
    }
}

impl<L: Limb, const N: usize> BitOr for Uint<L, N> {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        for i in 0..N {
            self.limbs[i] = self.limbs[i] | rhs.limbs[i];
        }
        self
    }
}

impl<L: Limb, const N: usize> BitXor for Uint<L, N> {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self {
        for i in 0..N {
            self.limbs[i] = self.limbs[i] ^ rhs.limbs[i];
        }
        self
    }
}

impl<L: Limb, const N: usize> Not for Uint<L, N> {
    type Output = Self;

    fn not(mut self) -> Self {
        for i in 0..N {
            self.limbs[i] = !self.limbs[i];
        }
        self
    }
}

impl<L: Limb, const N: usize> ConditionallySelectable for Uint<L, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [L::ZERO; N];
        for i in 0..N {
            limbs[i] = L::conditional_select(&a.limbs[i], &b.limbs[i], choice);
        }
        Self { limbs }
    }
}

impl<L: Limb, const N: usize> ConstantTimeEq for Uint<L, N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut eq = Choice::from(1);
        for i in 0..N {
            eq &= self.limbs[i].ct_eq(&other.limbs[i]);
        }
        eq
    }
}

impl<L: Limb, const N: usize> fmt::Debug for Uint<L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint(0x")?;
        fmt::LowerHex::fmt(self, f)?;
        write!(f, ")")
    }
}

impl<L: Limb, const N: usize> fmt::LowerHex for Uint<L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in self.limbs.iter().rev() {
            write!(f, "{:0width$x}", w, width = (L::BITS / 4) as usize)?;
        }
        Ok(())
    }
}

impl<L: Limb, const N: usize> fmt::UpperHex for Uint<L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in self.limbs.iter().rev() {
            write!(f, "{:0width$X}", w, width = (L::BITS / 4) as usize)?;
        }
        Ok(())
    }
}

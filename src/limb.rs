//! Single-limb arithmetic primitives.
//!
//! Multi-precision values are stored as sequences of machine words. This
//! module defines the word abstraction: carry-propagating addition,
//! borrow-propagating subtraction, and double-width multiplication, with
//! implementations for 32- and 64-bit limbs.

use core::fmt::{Debug, LowerHex, UpperHex};
use core::hash::Hash;
use core::ops::{BitAnd, BitOr, BitXor, Not};
use rand_core::RngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};

/// An unsigned machine word used as a big integer limb.
///
/// All operations are expressed through a double-width intermediate type,
/// so the carry and borrow words returned here are exact.
pub trait Limb:
    Copy
    + Debug
    + Default
    + Eq
    + Ord
    + Hash
    + LowerHex
    + UpperHex
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + ConditionallySelectable
    + ConstantTimeEq
    + Send
    + Sync
    + 'static
{
    /// The all-zero limb.
    const ZERO: Self;

    /// The limb with value one.
    const ONE: Self;

    /// The all-one limb.
    const MAX: Self;

    /// Width of the limb in bits.
    const BITS: u32;

    /// Computes `self + rhs + carry`, returning the result along with the
    /// new carry (`0` or `1`).
    fn adc(self, rhs: Self, carry: Self) -> (Self, Self);

    /// Computes `self - (rhs + borrow)`, returning the result along with
    /// the new borrow.
    ///
    /// Only the most significant bit of `borrow` is consumed; the returned
    /// borrow is either zero or the all-one mask.
    fn sbb(self, rhs: Self, borrow: Self) -> (Self, Self);

    /// Computes `self + (b * c) + carry`, returning the result along with
    /// the new carry.
    fn mac(self, b: Self, c: Self, carry: Self) -> (Self, Self);

    /// Computes the full double-width product `self * rhs`, returned as
    /// `(lo, hi)`.
    fn mul_wide(self, rhs: Self) -> (Self, Self);

    /// Computes `self * rhs`, discarding the high half of the product.
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Logical shift left by `n < Self::BITS` bits.
    fn shl(self, n: u32) -> Self;

    /// Logical shift right by `n < Self::BITS` bits.
    fn shr(self, n: u32) -> Self;

    /// Number of leading zero bits.
    fn leading_zeros(self) -> u32;

    /// Number of trailing zero bits.
    fn trailing_zeros(self) -> u32;

    /// Truncates the limb to a `usize` (low bits on narrow targets).
    fn as_usize(self) -> usize;

    /// Draws a uniformly random limb from `rng`.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;
}

macro_rules! impl_limb {
    ($limb:ty, $wide:ty, $draw:ident) => {
        impl Limb for $limb {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$limb>::MAX;
            const BITS: u32 = <$limb>::BITS;

            #[inline(always)]
            fn adc(self, rhs: Self, carry: Self) -> (Self, Self) {
                let ret = (self as $wide) + (rhs as $wide) + (carry as $wide);
                (ret as Self, (ret >> Self::BITS) as Self)
            }

            #[inline(always)]
            fn sbb(self, rhs: Self, borrow: Self) -> (Self, Self) {
                let (a, b) = (self as $wide, rhs as $wide);
                let t = (borrow >> (Self::BITS - 1)) as $wide;
                let ret = a.wrapping_sub(b + t);
                (ret as Self, (ret >> Self::BITS) as Self)
            }

            #[inline(always)]
            fn mac(self, b: Self, c: Self, carry: Self) -> (Self, Self) {
                let ret = (self as $wide) + (b as $wide) * (c as $wide) + (carry as $wide);
                (ret as Self, (ret >> Self::BITS) as Self)
            }

            #[inline(always)]
            fn mul_wide(self, rhs: Self) -> (Self, Self) {
                let ret = (self as $wide) * (rhs as $wide);
                (ret as Self, (ret >> Self::BITS) as Self)
            }

            #[inline(always)]
            fn wrapping_mul(self, rhs: Self) -> Self {
                <$limb>::wrapping_mul(self, rhs)
            }

            #[inline(always)]
            fn shl(self, n: u32) -> Self {
                self << n
            }

            #[inline(always)]
            fn shr(self, n: u32) -> Self {
                self >> n
            }

            #[inline(always)]
            fn leading_zeros(self) -> u32 {
                <$limb>::leading_zeros(self)
            }

            #[inline(always)]
            fn trailing_zeros(self) -> u32 {
                <$limb>::trailing_zeros(self)
            }

            #[inline(always)]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
                rng.$draw() as Self
            }
        }
    };
}

impl_limb!(u32, u64, next_u32);
impl_limb!(u64, u128, next_u64);

//! Jacobian projective curve points and the group law.
//!
//! A triple `(X, Y, Z)` with `Z ≠ 0` represents the affine point
//! `(X/Z², Y/Z³)`; any triple with `Z = 0` represents the point at
//! infinity, with the all-zero triple as the canonical form. A single
//! affine point has many projective representations, so equality is
//! defined through cross-multiplied coordinates rather than limbs.

use crate::affine::AffinePoint;
use crate::field::FieldElement;
use crate::modular::Modulus;
use crate::scalar::Scalar;
use crate::{limb::Limb, uint::Uint, CurveParams};
use core::fmt;
use core::ops::{Add, AddAssign, Mul, Neg};
use subtle::Choice;

/// A point on a short Weierstrass curve in Jacobian projective
/// coordinates.
pub struct ProjectivePoint<C, L: Limb, const N: usize> {
    /// Projective X coordinate.
    pub x: FieldElement<C, L, N>,
    /// Projective Y coordinate.
    pub y: FieldElement<C, L, N>,
    /// Projective Z coordinate; zero marks the point at infinity.
    pub z: FieldElement<C, L, N>,
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> ProjectivePoint<C, L, N> {
    /// The additive identity (point at infinity), as the all-zero triple.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        z: FieldElement::ZERO,
    };

    /// Returns the base point of the curve.
    pub fn generator() -> Self {
        AffinePoint::generator().into()
    }

    /// Whether this point is the identity.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Whether the point satisfies the curve equation
    /// `Y² = X³ + A·X·Z⁴ + B·Z⁶`.
    pub fn on_curve(&self) -> bool {
        let zz = self.z.square();
        let z4 = zz.square();
        let z6 = z4 * zz;
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + C::EQUATION_A * self.x * z4 + C::EQUATION_B * z6;
        lhs == rhs
    }

    /// Returns the affine form of this point, or the affine identity if
    /// `Z = 0`.
    pub fn to_affine(&self) -> AffinePoint<C, L, N> {
        self.z
            .invert()
            .map(|zinv| {
                let zinv2 = zinv.square();
                let zinv3 = zinv2 * zinv;
                AffinePoint {
                    x: self.x * zinv2,
                    y: self.y * zinv3,
                    infinity: Choice::from(0),
                }
            })
            .unwrap_or_else(AffinePoint::identity)
    }

    /// Returns `-self`: the y-coordinate negated, x and z unchanged.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Doubles this point.
    pub fn double(&self) -> Self {
        let xx = self.x.square(); // X²
        let zz = self.z.square(); // Z²
        let t = xx.double() + xx + C::EQUATION_A * zz.square(); // 3X² + AZ⁴
        let yy = self.y.square(); // Y²
        let a = (self.x * yy).mul_pow2(2); // 4XY²
        let x3 = t.square() - a.double(); // t² - 2a
        let y3 = t * (a - x3) - yy.square().mul_pow2(3); // t(a - x3) - 8Y⁴
        let z3 = (self.y * self.z).double(); // 2YZ
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Adds two points, handling every case: either operand the identity,
    /// doubling, and inverse points (which yield the identity).
    pub fn add(&self, other: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *other;
        }
        if bool::from(other.is_identity()) {
            return *self;
        }

        let zz2 = other.z.square();
        let zzz2 = zz2 * other.z;
        let u1 = self.x * zz2; // X₁Z₂²
        let s1 = self.y * zzz2; // Y₁Z₂³

        let zz1 = self.z.square();
        let zzz1 = zz1 * self.z;
        let u2 = other.x * zz1; // X₂Z₁²
        let s2 = other.y * zzz1; // Y₂Z₁³

        if u1 == u2 {
            if s1 == s2 {
                return self.double();
            }
            // P + (-P)
            return Self::IDENTITY;
        }

        self.add_distinct_inner(other, u1, u2, s1, s2)
    }

    /// Addition of distinct non-identity points given the shared
    /// premultiplied coordinates.
    fn add_distinct_inner(
        &self,
        other: &Self,
        u1: FieldElement<C, L, N>,
        u2: FieldElement<C, L, N>,
        s1: FieldElement<C, L, N>,
        s2: FieldElement<C, L, N>,
    ) -> Self {
        let e = u2 - u1;
        let f = s2 - s1;
        let ee = e.square();
        let eee = ee * e;
        let u1ee = u1 * ee;
        let x3 = f.square() - u1ee.double() - eee; // f² - 2u₁e² - e³
        let y3 = f * (u1ee - x3) - s1 * eee; // f(u₁e² - x3) - s₁e³
        let z3 = self.z * other.z * e; // Z₁Z₂e
        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Computes `k·self` by left-to-right binary double-and-add.
    ///
    /// The ladder starts from the identity and uses the general
    /// [`Self::add`] so mid-ladder identity and doubling transitions are
    /// handled. The exponent may be a different width than the field.
    ///
    /// Runs in time variable in the exponent.
    pub fn mul<const RHS: usize>(&self, k: &Uint<L, RHS>) -> Self {
        let mut ret = Self::IDENTITY;
        for i in (0..k.bits()).rev() {
            ret = ret.double();
            if k.bit(i) {
                ret = ret.add(self);
            }
        }
        ret
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> From<AffinePoint<C, L, N>>
    for ProjectivePoint<C, L, N>
{
    fn from(p: AffinePoint<C, L, N>) -> Self {
        if bool::from(p.infinity) {
            Self::IDENTITY
        } else {
            Self {
                x: p.x,
                y: p.y,
                z: FieldElement::ONE,
            }
        }
    }
}

impl<C, L: Limb, const N: usize> Clone for ProjectivePoint<C, L, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, L: Limb, const N: usize> Copy for ProjectivePoint<C, L, N> {}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> Default for ProjectivePoint<C, L, N> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> PartialEq for ProjectivePoint<C, L, N> {
    /// Equality of the represented affine points: both identity, or
    /// `X₁Z₂² = X₂Z₁²` and `Y₁Z₂³ = Y₂Z₁³`, with a fast path for equal
    /// Z coordinates.
    fn eq(&self, other: &Self) -> bool {
        let self_inf = bool::from(self.is_identity());
        let other_inf = bool::from(other.is_identity());
        if self_inf || other_inf {
            return self_inf == other_inf;
        }

        if self.z == other.z {
            return self.x == other.x && self.y == other.y;
        }

        let zz1 = self.z.square();
        let zz2 = other.z.square();
        if self.x * zz2 != other.x * zz1 {
            return false;
        }
        let zzz1 = zz1 * self.z;
        let zzz2 = zz2 * other.z;
        self.y * zzz2 == other.y * zzz1
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> Eq for ProjectivePoint<C, L, N> {}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> fmt::Debug for ProjectivePoint<C, L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectivePoint")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("z", &self.z)
            .finish()
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> Add for ProjectivePoint<C, L, N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ProjectivePoint::add(&self, &other)
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> Add<&Self> for ProjectivePoint<C, L, N> {
    type Output = Self;

    fn add(self, other: &Self) -> Self {
        ProjectivePoint::add(&self, other)
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> AddAssign for ProjectivePoint<C, L, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> AddAssign<&Self> for ProjectivePoint<C, L, N> {
    fn add_assign(&mut self, rhs: &Self) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> Neg for ProjectivePoint<C, L, N> {
    type Output = Self;

    fn neg(self) -> Self {
        ProjectivePoint::neg(&self)
    }
}

impl<C, MOD, L, const N: usize, const SN: usize> Mul<&Scalar<MOD, L, SN>>
    for ProjectivePoint<C, L, N>
where
    C: CurveParams<L, N>,
    MOD: Modulus<L, SN>,
    L: Limb,
{
    type Output = Self;

    fn mul(self, k: &Scalar<MOD, L, SN>) -> Self {
        ProjectivePoint::mul(&self, k.as_uint())
    }
}

impl<C, MOD, L, const N: usize, const SN: usize> Mul<Scalar<MOD, L, SN>>
    for ProjectivePoint<C, L, N>
where
    C: CurveParams<L, N>,
    MOD: Modulus<L, SN>,
    L: Limb,
{
    type Output = Self;

    fn mul(self, k: Scalar<MOD, L, SN>) -> Self {
        ProjectivePoint::mul(&self, k.as_uint())
    }
}

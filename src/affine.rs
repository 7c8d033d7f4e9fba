//! Affine curve points.

use crate::field::FieldElement;
use crate::{limb::Limb, CurveParams};
use core::fmt;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point on a short Weierstrass curve in affine coordinates, with an
/// explicit flag for the point at infinity.
pub struct AffinePoint<C, L: Limb, const N: usize> {
    /// x-coordinate.
    pub x: FieldElement<C, L, N>,
    /// y-coordinate.
    pub y: FieldElement<C, L, N>,
    /// Whether this is the point at infinity, in which case the
    /// coordinates are zero and carry no meaning.
    pub infinity: Choice,
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> AffinePoint<C, L, N> {
    /// Returns the base point of the curve.
    pub fn generator() -> Self {
        Self {
            x: C::GENERATOR.0,
            y: C::GENERATOR.1,
            infinity: Choice::from(0),
        }
    }

    /// Returns the additive identity: the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: FieldElement::ZERO,
            y: FieldElement::ZERO,
            infinity: Choice::from(1),
        }
    }

    /// Whether this point is the identity.
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }
}

impl<C, L: Limb, const N: usize> Clone for AffinePoint<C, L, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, L: Limb, const N: usize> Copy for AffinePoint<C, L, N> {}

impl<C, L: Limb, const N: usize> ConstantTimeEq for AffinePoint<C, L, N> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl<C, L: Limb, const N: usize> PartialEq for AffinePoint<C, L, N> {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C, L: Limb, const N: usize> Eq for AffinePoint<C, L, N> {}

impl<C, L: Limb, const N: usize> ConditionallySelectable for AffinePoint<C, L, N> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C: CurveParams<L, N>, L: Limb, const N: usize> fmt::Debug for AffinePoint<C, L, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if bool::from(self.infinity) {
            write!(f, "AffinePoint(infinity)")
        } else {
            f.debug_struct("AffinePoint")
                .field("x", &self.x)
                .field("y", &self.y)
                .finish()
        }
    }
}

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod affine;
mod field;
mod limb;
mod modular;
mod projective;
mod scalar;
mod uint;

pub mod dev;
#[cfg(feature = "alloc")]
pub mod dlp;

pub use crate::{
    affine::AffinePoint,
    field::{FieldElement, FieldParams},
    limb::Limb,
    modular::Modulus,
    projective::ProjectivePoint,
    scalar::Scalar,
    uint::Uint,
};
pub use rand_core;
pub use subtle;

/// Short Weierstrass curve parameters: `y² = x³ + ax + b` over the prime
/// field described by the [`FieldParams`] supertrait.
///
/// All constants are field elements in Montgomery form.
pub trait CurveParams<L: Limb, const N: usize>: FieldParams<L, N> {
    /// Coefficient `a` in the curve equation.
    const EQUATION_A: FieldElement<Self, L, N>;

    /// Coefficient `b` in the curve equation.
    const EQUATION_B: FieldElement<Self, L, N>;

    /// Affine coordinates `(x, y)` of the base point.
    const GENERATOR: (FieldElement<Self, L, N>, FieldElement<Self, L, N>);
}

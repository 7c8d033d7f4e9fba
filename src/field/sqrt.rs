//! Modular square roots.

use super::{FieldElement, FieldParams};
use crate::{limb::Limb, uint::Uint};
use rand_core::RngCore;

impl<P: FieldParams<L, N>, L: Limb, const N: usize> FieldElement<P, L, N> {
    /// Computes a square root of `self` modulo `p`, or `None` if `self`
    /// is a quadratic non-residue.
    ///
    /// For `p ≡ 3 (mod 4)` a single exponentiation by `(p + 1)/4`
    /// suffices; other odd primes go through Tonelli–Shanks, which needs
    /// `rng` to find a quadratic non-residue by Euler's criterion. Either
    /// way the candidate is verified by squaring before it is returned.
    ///
    /// Runs in time variable in the operands.
    pub fn sqrt<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<Self> {
        if bool::from(self.is_zero()) {
            return Some(Self::ZERO);
        }

        let candidate = if P::MODULUS.as_words()[0].as_usize() & 3 == 3 {
            self.sqrt_shanks()
        } else {
            self.sqrt_tonelli_shanks(rng)?
        };

        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    /// Shanks: for `p ≡ 3 (mod 4)`, `a^((p + 1)/4)` is a root of every
    /// quadratic residue `a`.
    fn sqrt_shanks(&self) -> Self {
        // (p + 1)/4 = (p >> 2) + 1 when p ≡ 3 (mod 4)
        let exp = P::MODULUS.shr(2).wrapping_add(&Uint::ONE);
        self.pow_vartime(&exp)
    }

    /// Tonelli–Shanks for arbitrary odd primes, writing
    /// `p - 1 = 2^s · q` with `q` odd.
    ///
    /// Returns `None` early when the descent proves `self` is a
    /// non-residue.
    fn sqrt_tonelli_shanks<R: RngCore + ?Sized>(&self, rng: &mut R) -> Option<Self> {
        let p_m1 = P::MODULUS.wrapping_sub(&Uint::ONE);
        let s = p_m1.trailing_zeros();
        let q = p_m1.shr(s);

        // Random non-residue: z with z^((p-1)/2) = -1.
        let legendre_exp = p_m1.shr(1);
        let minus_one = Self::ONE.neg();
        let z = loop {
            let cand = Self::random(rng);
            if bool::from(cand.is_zero()) {
                continue;
            }
            if cand.pow_vartime(&legendre_exp) == minus_one {
                break cand;
            }
        };

        let mut m = s;
        let mut c = z.pow_vartime(&q);
        let mut t = self.pow_vartime(&q);
        // (q + 1)/2 with q odd
        let mut r = self.pow_vartime(&q.shr(1).wrapping_add(&Uint::ONE));

        while t != Self::ONE {
            // least i with t^(2^i) = 1
            let mut i = 0;
            let mut t2 = t;
            while t2 != Self::ONE {
                t2 = t2.square();
                i += 1;
                if i == m {
                    return None;
                }
            }

            let mut b = c;
            for _ in 0..m - i - 1 {
                b = b.square();
            }

            m = i;
            c = b.square();
            t = t.multiply(&c);
            r = r.multiply(&b);
        }

        Some(r)
    }
}

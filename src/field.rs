// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Arithmetic in the prime field GF(2²⁵⁵ − 19), in radix 2⁵¹ with
//! 64-bit limbs and 128-bit products.
//!
//! Additions and subtractions are carry-free limbwise operations; the
//! cost of a carry pass is paid only where a later step needs narrow
//! limbs.  Two element types make that discipline explicit:
//!
//! * A [`FieldElement`] is *carried*: every limb is comfortably below
//!   2⁵², so it is a valid input to any operation.
//! * A [`LooseFieldElement`] is the uncarried result of a single
//!   limbwise addition or subtraction of carried elements; its limbs
//!   may approach 2⁵³.
//!
//! The operator impls encode the legal transitions.  Adding or
//! subtracting two `FieldElement`s is carry-free and widens to a
//! `LooseFieldElement`; combining two loose elements runs a carry pass
//! and returns to `FieldElement`; multiplication accepts both forms
//! (any input below 2⁵⁴ is safe) and always produces a carried result.
//! Loose elements cannot be negated or lazily combined again, which is
//! exactly the set of operations whose limb bounds would not be safe.
//!
//! Subtraction of limbs is kept nonnegative by first adding a multiple
//! of p: 2p for carried inputs, 4p for loose ones.

use core::fmt::Debug;
use core::ops::{Add, Mul, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

use crate::constants;

/// An element of GF(2²⁵⁵ − 19), with every limb carried below 2⁵².
///
/// The limb representation of an element is not unique until
/// [`FieldElement::to_bytes`] canonicalizes it, so equality is defined
/// on the canonical byte string (in constant time) rather than on limbs.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 5]);

/// The uncarried sum or difference of two carried field elements.
///
/// Limbs may be up to two bits wider than a [`FieldElement`]'s.  A
/// loose element can be multiplied, squared, folded back into a carried
/// element with [`LooseFieldElement::reduce`], or combined with another
/// loose element (which carries as it combines).
#[derive(Copy, Clone)]
pub struct LooseFieldElement(pub(crate) [u64; 5]);

pub(crate) const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// 2p, limbwise: added before subtracting a carried element.
const TWO_P: [u64; 5] = [
    0x000f_ffff_ffff_ffda,
    0x000f_ffff_ffff_fffe,
    0x000f_ffff_ffff_fffe,
    0x000f_ffff_ffff_fffe,
    0x000f_ffff_ffff_fffe,
];

/// 4p, limbwise: added before subtracting a loose element.
const FOUR_P: [u64; 5] = [
    0x001f_ffff_ffff_ffb4,
    0x001f_ffff_ffff_fffc,
    0x001f_ffff_ffff_fffc,
    0x001f_ffff_ffff_fffc,
    0x001f_ffff_ffff_fffc,
];

/// Multiply two 64-bit limbs, widening to a 128-bit product.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// One parallel carry pass.  Sound for limbs below 2⁵⁵; the result is
/// carried.
#[inline(always)]
fn reduce_limbs(mut limbs: [u64; 5]) -> [u64; 5] {
    // For input limbs below 2^55 the carries are below 2^4, and the
    // top carry is multiplied by 19 before being folded into the
    // bottom limb, so every output limb lands below 2^51 + 2^9.
    let c0 = limbs[0] >> 51;
    let c1 = limbs[1] >> 51;
    let c2 = limbs[2] >> 51;
    let c3 = limbs[3] >> 51;
    let c4 = limbs[4] >> 51;

    limbs[0] &= LOW_51_BIT_MASK;
    limbs[1] &= LOW_51_BIT_MASK;
    limbs[2] &= LOW_51_BIT_MASK;
    limbs[3] &= LOW_51_BIT_MASK;
    limbs[4] &= LOW_51_BIT_MASK;

    limbs[0] += c4 * 19;
    limbs[1] += c0;
    limbs[2] += c1;
    limbs[3] += c2;
    limbs[4] += c3;

    limbs
}

/// Schoolbook 5×5 limb multiplication with the 2²⁵⁵ ≡ 19 fold, followed
/// by a carry chain.  Inputs must have limbs below 2⁵⁴.
#[inline(always)]
#[rustfmt::skip]
fn mul_limbs(a: &[u64; 5], b: &[u64; 5]) -> [u64; 5] {
    debug_assert!(a.iter().all(|&x| x < (1 << 54)));
    debug_assert!(b.iter().all(|&x| x < (1 << 54)));

    // Limbs of the product landing at 2^255 and above are folded back
    // down with a factor of 19.  Precomputing b_i * 19 keeps each
    // coefficient to five widening multiplies.
    let b1_19 = b[1] * 19;
    let b2_19 = b[2] * 19;
    let b3_19 = b[3] * 19;
    let b4_19 = b[4] * 19;

    let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
    let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
    let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
    let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
    let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

    // Casting the carries to u64 and back tells the compiler they fit,
    // so each addition is u128 + u64 rather than u128 + u128.
    let mut out = [0u64; 5];
    c1 += ((c0 >> 51) as u64) as u128;
    out[0] = (c0 as u64) & LOW_51_BIT_MASK;
    c2 += ((c1 >> 51) as u64) as u128;
    out[1] = (c1 as u64) & LOW_51_BIT_MASK;
    c3 += ((c2 >> 51) as u64) as u128;
    out[2] = (c2 as u64) & LOW_51_BIT_MASK;
    c4 += ((c3 >> 51) as u64) as u128;
    out[3] = (c3 as u64) & LOW_51_BIT_MASK;
    let carry: u64 = (c4 >> 51) as u64;
    out[4] = (c4 as u64) & LOW_51_BIT_MASK;

    // The remaining carry is at most 13 bits wide, so out[0] + 19*carry
    // stays below 2^52, and one more partial carry step leaves every
    // limb carried.
    out[0] += carry * 19;
    out[1] += out[0] >> 51;
    out[0] &= LOW_51_BIT_MASK;

    out
}

/// Square a set of limbs, with the same bounds and output guarantees as
/// [`mul_limbs`].  The symmetric coefficients save multiplies.
#[inline(always)]
fn square_limbs(a: &[u64; 5]) -> [u64; 5] {
    debug_assert!(a.iter().all(|&x| x < (1 << 54)));

    let a3_19 = 19 * a[3];
    let a4_19 = 19 * a[4];

    let     c0: u128 = m(a[0], a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
    let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0], a[1]) + m(a[2], a4_19));
    let mut c2: u128 = m(a[1], a[1]) + 2 * (m(a[0], a[2]) + m(a[4], a3_19));
    let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0], a[3]) + m(a[1], a[2]));
    let mut c4: u128 = m(a[2], a[2]) + 2 * (m(a[0], a[4]) + m(a[1], a[3]));

    let mut out = [0u64; 5];
    c1 += ((c0 >> 51) as u64) as u128;
    out[0] = (c0 as u64) & LOW_51_BIT_MASK;
    c2 += ((c1 >> 51) as u64) as u128;
    out[1] = (c1 as u64) & LOW_51_BIT_MASK;
    c3 += ((c2 >> 51) as u64) as u128;
    out[2] = (c2 as u64) & LOW_51_BIT_MASK;
    c4 += ((c3 >> 51) as u64) as u128;
    out[3] = (c3 as u64) & LOW_51_BIT_MASK;
    let carry: u64 = (c4 >> 51) as u64;
    out[4] = (c4 as u64) & LOW_51_BIT_MASK;

    out[0] += carry * 19;
    out[1] += out[0] >> 51;
    out[0] &= LOW_51_BIT_MASK;

    out
}

// ------------------------------------------------------------------------
// Additions and subtractions
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = LooseFieldElement;
    /// Carry-free limbwise addition.
    fn add(self, rhs: &'b FieldElement) -> LooseFieldElement {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = self.0[i] + rhs.0[i];
        }
        LooseFieldElement(out)
    }
}

define_add_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = LooseFieldElement
);

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = LooseFieldElement;
    /// Carry-free limbwise subtraction, kept nonnegative by adding 2p.
    fn sub(self, rhs: &'b FieldElement) -> LooseFieldElement {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = (self.0[i] + TWO_P[i]) - rhs.0[i];
        }
        LooseFieldElement(out)
    }
}

define_sub_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = LooseFieldElement
);

impl<'a, 'b> Add<&'b LooseFieldElement> for &'a LooseFieldElement {
    type Output = FieldElement;
    /// Add two loose elements, carrying the result.
    fn add(self, rhs: &'b LooseFieldElement) -> FieldElement {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = self.0[i] + rhs.0[i];
        }
        FieldElement(reduce_limbs(out))
    }
}

define_add_variants!(
    LHS = LooseFieldElement,
    RHS = LooseFieldElement,
    Output = FieldElement
);

impl<'a, 'b> Sub<&'b LooseFieldElement> for &'a LooseFieldElement {
    type Output = FieldElement;
    /// Subtract two loose elements, adding 4p to stay nonnegative, and
    /// carry the result.
    fn sub(self, rhs: &'b LooseFieldElement) -> FieldElement {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = (self.0[i] + FOUR_P[i]) - rhs.0[i];
        }
        FieldElement(reduce_limbs(out))
    }
}

define_sub_variants!(
    LHS = LooseFieldElement,
    RHS = LooseFieldElement,
    Output = FieldElement
);

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        let mut out = [0u64; 5];
        for i in 0..5 {
            out[i] = TWO_P[i] - self.0[i];
        }
        FieldElement(reduce_limbs(out))
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        -&self
    }
}

// ------------------------------------------------------------------------
// Multiplications: every combination of carry states is a legal input,
// and the product is always carried.
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement(mul_limbs(&self.0, &rhs.0))
    }
}

define_mul_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl<'a, 'b> Mul<&'b LooseFieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b LooseFieldElement) -> FieldElement {
        FieldElement(mul_limbs(&self.0, &rhs.0))
    }
}

define_mul_variants!(
    LHS = FieldElement,
    RHS = LooseFieldElement,
    Output = FieldElement
);

impl<'a, 'b> Mul<&'b FieldElement> for &'a LooseFieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        FieldElement(mul_limbs(&self.0, &rhs.0))
    }
}

define_mul_variants!(
    LHS = LooseFieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl<'a, 'b> Mul<&'b LooseFieldElement> for &'a LooseFieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b LooseFieldElement) -> FieldElement {
        FieldElement(mul_limbs(&self.0, &rhs.0))
    }
}

define_mul_variants!(
    LHS = LooseFieldElement,
    RHS = LooseFieldElement,
    Output = FieldElement
);

// ------------------------------------------------------------------------

impl LooseFieldElement {
    /// Run a carry pass, narrowing back to a [`FieldElement`].
    pub fn reduce(&self) -> FieldElement {
        FieldElement(reduce_limbs(self.0))
    }

    /// Square this element.  The result is carried.
    pub fn square(&self) -> FieldElement {
        FieldElement(square_limbs(&self.0))
    }
}

impl FieldElement {
    /// The zero element.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);
    /// −1 mod p, fully reduced.
    pub const MINUS_ONE: FieldElement = FieldElement([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// Widen to a [`LooseFieldElement`].  Free: a carried element
    /// already satisfies the loose bounds.
    pub fn relax(&self) -> LooseFieldElement {
        LooseFieldElement(self.0)
    }

    /// Square this element.
    pub fn square(&self) -> FieldElement {
        self.pow2k(1)
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    ///
    /// `k` must be nonzero.
    pub fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut a = self.0;
        for _ in 0..k {
            a = square_limbs(&a);
        }
        FieldElement(a)
    }

    /// Load a field element from 32 bytes, little-endian, ignoring the
    /// top bit.
    ///
    /// Values in [p, 2²⁵⁵) are accepted and silently represent their
    /// reduced residue.
    pub fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let load8 = |input: &[u8]| -> u64 {
            (input[0] as u64)
                | ((input[1] as u64) << 8)
                | ((input[2] as u64) << 16)
                | ((input[3] as u64) << 24)
                | ((input[4] as u64) << 32)
                | ((input[5] as u64) << 40)
                | ((input[6] as u64) << 48)
                | ((input[7] as u64) << 56)
        };

        // The bit ranges 0..51, 51..102, 102..153, 153..204, and
        // 204..255 are each extracted from the 64-bit load covering
        // them.
        FieldElement([
            load8(&bytes[0..]) & LOW_51_BIT_MASK,
            (load8(&bytes[6..]) >> 3) & LOW_51_BIT_MASK,
            (load8(&bytes[12..]) >> 6) & LOW_51_BIT_MASK,
            (load8(&bytes[19..]) >> 1) & LOW_51_BIT_MASK,
            (load8(&bytes[24..]) >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Encode as 32 bytes, little-endian, fully reduced mod p.
    ///
    /// The top bit of the last byte is always zero.
    #[rustfmt::skip]
    pub fn to_bytes(&self) -> [u8; 32] {
        // Carry first, so the value is below 2^255 + small.
        let mut limbs = reduce_limbs(self.0);

        // Compute q = 1 iff the value lies in [p, 2^255), else 0, by
        // rippling the carry of (value + 19) to the top: value + 19
        // reaches 2^255 exactly when value >= p.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // Adding 19*q maps [p, 2^255) onto [2^255, 2^255 + 19), and
        // masking the top limb then subtracts 2^255, leaving the
        // canonical representative.
        limbs[0] += 19 * q;

        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        let mut s = [0u8; 32];
        s[ 0] =   limbs[0]                           as u8;
        s[ 1] =  (limbs[0] >>  8)                    as u8;
        s[ 2] =  (limbs[0] >> 16)                    as u8;
        s[ 3] =  (limbs[0] >> 24)                    as u8;
        s[ 4] =  (limbs[0] >> 32)                    as u8;
        s[ 5] =  (limbs[0] >> 40)                    as u8;
        s[ 6] = ((limbs[0] >> 48) | (limbs[1] << 3)) as u8;
        s[ 7] =  (limbs[1] >>  5)                    as u8;
        s[ 8] =  (limbs[1] >> 13)                    as u8;
        s[ 9] =  (limbs[1] >> 21)                    as u8;
        s[10] =  (limbs[1] >> 29)                    as u8;
        s[11] =  (limbs[1] >> 37)                    as u8;
        s[12] = ((limbs[1] >> 45) | (limbs[2] << 6)) as u8;
        s[13] =  (limbs[2] >>  2)                    as u8;
        s[14] =  (limbs[2] >> 10)                    as u8;
        s[15] =  (limbs[2] >> 18)                    as u8;
        s[16] =  (limbs[2] >> 26)                    as u8;
        s[17] =  (limbs[2] >> 34)                    as u8;
        s[18] =  (limbs[2] >> 42)                    as u8;
        s[19] = ((limbs[2] >> 50) | (limbs[3] << 1)) as u8;
        s[20] =  (limbs[3] >>  7)                    as u8;
        s[21] =  (limbs[3] >> 15)                    as u8;
        s[22] =  (limbs[3] >> 23)                    as u8;
        s[23] =  (limbs[3] >> 31)                    as u8;
        s[24] =  (limbs[3] >> 39)                    as u8;
        s[25] = ((limbs[3] >> 47) | (limbs[4] << 4)) as u8;
        s[26] =  (limbs[4] >>  4)                    as u8;
        s[27] =  (limbs[4] >> 12)                    as u8;
        s[28] =  (limbs[4] >> 20)                    as u8;
        s[29] =  (limbs[4] >> 28)                    as u8;
        s[30] =  (limbs[4] >> 36)                    as u8;
        s[31] =  (limbs[4] >> 44)                    as u8;

        debug_assert!(s[31] & 0b1000_0000 == 0);

        s
    }

    /// Whether this element's canonical encoding is odd.
    ///
    /// The odd one of the residues ±x is taken to be the "negative"
    /// root when compressing and decompressing points.
    pub fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Whether this element is zero, in constant time.
    pub fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();
        bytes.ct_eq(&zero)
    }

    /// Raise to the power 2²⁵⁰ − 1, returning also `self¹¹`.
    ///
    /// This addition chain is shared between inversion and
    /// [`FieldElement::pow_p58`].
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each t_i is self raised to the exponent whose binary
        // expansion is noted alongside: "n..m" is a run of ones from
        // bit n down to bit m.
        let t0 = self.square();            // 1
        let t1 = t0.square().square();     // 3
        let t2 = self * &t1;               // 3,0
        let t3 = &t0 * &t2;                // 3,1,0
        let t4 = t3.square();              // 4,2,1
        let t5 = &t2 * &t4;                // 4,3,2,1,0
        let t6 = t5.pow2k(5);              // 9,8,7,6,5
        let t7 = &t6 * &t5;                // 9..0
        let t8 = t7.pow2k(10);             // 19..10
        let t9 = &t8 * &t7;                // 19..0
        let t10 = t9.pow2k(20);            // 39..20
        let t11 = &t10 * &t9;              // 39..0
        let t12 = t11.pow2k(10);           // 49..10
        let t13 = &t12 * &t7;              // 49..0
        let t14 = t13.pow2k(50);           // 99..50
        let t15 = &t14 * &t13;             // 99..0
        let t16 = t15.pow2k(100);          // 199..100
        let t17 = &t16 * &t15;             // 199..0
        let t18 = t17.pow2k(50);           // 249..50
        let t19 = &t18 * &t13;             // 249..0

        (t19, t3)
    }

    /// Invert this element.  Zero, which has no inverse, maps to zero.
    ///
    /// Computes `self^(p-2)`; by Fermat's little theorem this is the
    /// inverse for nonzero input.
    pub fn invert(&self) -> FieldElement {
        // p - 2 = (2^250 - 1) * 2^5 + 11.
        let (t19, t3) = self.pow22501(); // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5);          // 254..5
        &t20 * &t3                       // 254..5,3,1,0
    }

    /// Raise to the power (p − 5)/8 = 2²⁵² − 3.
    fn pow_p58(&self) -> FieldElement {
        // (p - 5) / 8 = (2^250 - 1) * 2^2 + 1.
        let (t19, _) = self.pow22501(); // 249..0
        let t20 = t19.pow2k(2);         // 251..2
        self * &t20                     // 251..2,0
    }

    /// Compute a square root of `u/v` when one exists.
    ///
    /// Returns
    /// - `(Choice(1), +sqrt(u/v))` if `v` is nonzero and `u/v` is square;
    /// - `(Choice(1), zero)` if `u` is zero;
    /// - `(Choice(0), zero)` if `v` is zero and `u` is nonzero;
    /// - `(Choice(0), +sqrt(i*u/v))` if `u/v` is nonsquare (so `i*u/v` is square).
    ///
    /// The returned root is always the nonnegative one.
    pub fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // With r = (u v^3) (u v^7)^((p-5)/8), the value v r^2 is one of
        // u, -u, iu, -iu, and at most one multiplication by sqrt(-1)
        // corrects the root.
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let i = &constants::SQRT_M1;

        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&(-u));
        let flipped_sign_sqrt_i = check.ct_eq(&(&(-u) * i));

        let r_prime = &constants::SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative square root.
        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        let was_nonzero_square = correct_sign_sqrt | flipped_sign_sqrt;

        (was_nonzero_square, r)
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality in constant time, on canonical encodings.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        u64::conditional_swap(&mut a.0[0], &mut b.0[0], choice);
        u64::conditional_swap(&mut a.0[1], &mut b.0[1], choice);
        u64::conditional_swap(&mut a.0[2], &mut b.0[2], choice);
        u64::conditional_swap(&mut a.0[3], &mut b.0[3], choice);
        u64::conditional_swap(&mut a.0[4], &mut b.0[4], choice);
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        self.0[0].conditional_assign(&other.0[0], choice);
        self.0[1].conditional_assign(&other.0[1], choice);
        self.0[2].conditional_assign(&other.0[2], choice);
        self.0[3].conditional_assign(&other.0[3], choice);
        self.0[4].conditional_assign(&other.0[4], choice);
    }
}

impl ConditionallySelectable for LooseFieldElement {
    fn conditional_select(
        a: &LooseFieldElement,
        b: &LooseFieldElement,
        choice: Choice,
    ) -> LooseFieldElement {
        LooseFieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl Debug for LooseFieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "LooseFieldElement({:?})", &self.0[..])
    }
}

impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

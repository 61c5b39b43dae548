// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Group operations for Curve25519, in Edwards form.
//!
//! ## Encoding and Decoding
//!
//! Encoding is done by converting to and from a `CompressedEdwardsY`
//! struct, which is a typed wrapper around `[u8; 32]` holding the
//! little-endian encoding of the \\(y\\) coordinate with the sign of
//! the \\(x\\) coordinate in the high bit.
//!
//! ## Equality Testing
//!
//! The `EdwardsPoint` struct implements the [`subtle::ConstantTimeEq`]
//! trait for constant-time equality checking, and also uses this to
//! define `PartialEq`.
//!
//! ## Curve Arithmetic
//!
//! Points are kept internally in the extended twisted Edwards model
//! \\((X:Y:Z:T)\\) with \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\),
//! and every addition or doubling routes through the completed
//! \\(\mathbb P\^1 \times \mathbb P\^1\\) model of the
//! [`curve_models`](crate::curve_models) module.
//!
//! Scalar multiplication is provided in three flavours:
//!
//! * constant-time variable-base multiplication via the `Mul` impls,
//!   using a signed radix-16 window;
//! * constant-time fixed-base multiplication by the Ed25519 basepoint
//!   via [`EdwardsPoint::mul_base`], using the precomputed
//!   [`EdwardsBasepointTable`];
//! * variable-time \\(aA + bB\\) for signature verification via
//!   [`EdwardsPoint::vartime_double_scalar_mul_basepoint`], using
//!   width-5 and width-7 non-adjacent forms.

#![allow(non_snake_case)]

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint};
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::traits::{Identity, IsIdentity, ValidityCheck};
use crate::window::{LookupTable, NafLookupTable5};

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" / "Ed25519" format, the curve point \\((x,y)\\) is
/// determined by the \\(y\\)-coordinate and the sign of \\(x\\).
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// \\(y\\)-coordinate.  The high bit of the 32nd byte gives the sign of
/// \\(x\\).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as a byte array.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to a byte array.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// Returns `None` if the input is not the \\(y\\)-coordinate of a
    /// curve point, or if the sign bit asks for \\(-0\\): the points
    /// with \\(x = 0\\) are named only by encodings with a clear sign
    /// bit.
    pub fn decompress(&self) -> Option<EdwardsPoint> {
        let (is_valid_y_coord, X, Y) = decompress::step_1(self);

        if (!is_valid_y_coord).into() {
            return None;
        }

        let sign_bit = Choice::from(self.as_bytes()[31] >> 7);
        if (X.is_zero() & sign_bit).into() {
            return None;
        }

        Some(decompress::step_2(self, X, Y))
    }
}

mod decompress {
    use super::*;

    pub(super) fn step_1(repr: &CompressedEdwardsY) -> (Choice, FieldElement, FieldElement) {
        let Y = FieldElement::from_bytes(repr.as_bytes());
        let Z = FieldElement::ONE;
        let YY = Y.square();
        // u = y² - 1 and v = dy² + 1; x = √(u/v) recovers an
        // x-coordinate with x² = u/v, if one exists.
        let u = (&YY - &Z).reduce();
        let v = (&(&YY * &constants::EDWARDS_D) + &Z).reduce();
        let (is_valid_y_coord, X) = FieldElement::sqrt_ratio_i(&u, &v);

        (is_valid_y_coord, X, Y)
    }

    pub(super) fn step_2(
        repr: &CompressedEdwardsY,
        mut X: FieldElement,
        Y: FieldElement,
    ) -> EdwardsPoint {
        // `sqrt_ratio_i` always returns the nonnegative square root,
        // so we negate according to the supplied sign bit.
        let compressed_sign_bit = Choice::from(repr.as_bytes()[31] >> 7);
        X.conditional_negate(compressed_sign_bit);

        EdwardsPoint {
            X,
            Y,
            Z: FieldElement::ONE,
            T: &X * &Y,
        }
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

impl Zeroize for CompressedEdwardsY {
    /// Reset this `CompressedEdwardsY` to the compressed form of the
    /// identity element.
    fn zeroize(&mut self) {
        self.0.zeroize();
        self.0[0] = 1;
    }
}

// ------------------------------------------------------------------------
// Serde support
// ------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl Serialize for EdwardsPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.compress().as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl Serialize for CompressedEdwardsY {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(32)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EdwardsPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EdwardsPointVisitor;

        impl<'de> Visitor<'de> for EdwardsPointVisitor {
            type Value = EdwardsPoint;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("a valid point in Edwards y + sign format")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<EdwardsPoint, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                CompressedEdwardsY(bytes)
                    .decompress()
                    .ok_or_else(|| serde::de::Error::custom("decompression failed"))
            }
        }

        deserializer.deserialize_tuple(32, EdwardsPointVisitor)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CompressedEdwardsY {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CompressedEdwardsYVisitor;

        impl<'de> Visitor<'de> for CompressedEdwardsYVisitor {
            type Value = CompressedEdwardsY;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("32 bytes of data")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<CompressedEdwardsY, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; 32];
                #[allow(clippy::needless_range_loop)]
                for i in 0..32 {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                Ok(CompressedEdwardsY(bytes))
            }
        }

        deserializer.deserialize_tuple(32, CompressedEdwardsYVisitor)
    }
}

// ------------------------------------------------------------------------
// Internal point representation
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended twisted Edwards coordinates \\((X:Y:Z:T)\\)
/// with \\(x = X/Z\\), \\(y = Y/Z\\), \\(xy = T/Z\\).
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

// ------------------------------------------------------------------------
// Constructors
// ------------------------------------------------------------------------

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

// ------------------------------------------------------------------------
// Zeroize implementations for wiping points from memory
// ------------------------------------------------------------------------

impl Zeroize for EdwardsPoint {
    /// Reset this `EdwardsPoint` to the identity element.
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
        self.T.zeroize();
    }
}

// ------------------------------------------------------------------------
// Validity checks (for debugging, not CT)
// ------------------------------------------------------------------------

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        // Curve equation is    -x² + y² = 1 + d·x²·y²,
        // homogenized as (-X² + Y²)·Z² = Z⁴ + d·X²·Y².
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let ZZZZ = ZZ.square();
        let lhs = &(&YY - &XX) * &ZZ;
        let rhs = (&ZZZZ + &(&constants::EDWARDS_D * &(&XX * &YY))).reduce();
        let on_curve = lhs == rhs;

        // All four coordinates are consistent exactly when T = XY/Z.
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Constant-time equality
// ------------------------------------------------------------------------

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        // We would like to check that the point (X/Z, Y/Z) is equal to
        // the point (X'/Z', Y'/Z') without converting into affine
        // coordinates (x, y) and (x', y'), which requires two inversions.
        // We have that X = xZ and X' = x'Z'. Thus, x = x' is equivalent to
        // (xZ')Z = (x'Z)Z', and similarly for the y-coordinate.
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Dehomogenize to an `AffineNielsPoint`.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: (&y + &x).reduce(),
            y_minus_x: (&y - &x).reduce(),
            xy2d,
        }
    }

    /// Convert to a cached `ProjectiveNielsPoint` for repeated addition.
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: (&self.Y + &self.X).reduce(),
            Y_minus_X: (&self.Y - &self.X).reduce(),
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Compress this point to `CompressedEdwardsY` format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s = y.to_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Compute \\(2P\\), leaving the result in the completed model.
    pub(crate) fn double_completed(&self) -> CompletedPoint {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let X_plus_Y_sq = (&self.X + &self.Y).square();
        let YY_plus_XX = &YY.relax() + &XX.relax();
        let YY_minus_XX = &YY.relax() - &XX.relax();

        CompletedPoint {
            X: &X_plus_Y_sq.relax() - &YY_plus_XX.relax(),
            Y: YY_plus_XX,
            Z: YY_minus_XX,
            T: &(&ZZ + &ZZ) - &YY_minus_XX.relax(),
        }
    }

    /// Compute \\(2P\\).
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.double_completed().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}

define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, _rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) + _rhs;
    }
}

define_add_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}

define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, _rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) - _rhs;
    }
}

define_sub_assign_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint);

impl<T> Sum<T> for EdwardsPoint
where
    T: Borrow<EdwardsPoint>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(EdwardsPoint::identity(), |acc, item| acc + item.borrow())
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'b> MulAssign<&'b Scalar> for EdwardsPoint {
    fn mul_assign(&mut self, scalar: &'b Scalar) {
        let result = (self as &EdwardsPoint) * scalar;
        *self = result;
    }
}

define_mul_assign_variants!(LHS = EdwardsPoint, RHS = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `scalar * self`, in constant
    /// time.
    ///
    /// For scalar multiplication of the basepoint,
    /// [`EdwardsPoint::mul_base`] is approximately 4x faster.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        // Construct a lookup table of [P, 2P, 3P, 4P, 5P, 6P, 7P, 8P].
        let lookup_table = LookupTable::<ProjectiveNielsPoint>::from(self);

        // Setting s = scalar, compute
        //    s = s_0 + s_1*16^1 + ... + s_63*16^63,
        // with -8 ≤ s_i < 8 for 0 ≤ i < 63 and -8 ≤ s_63 ≤ 8.
        let scalar_digits = scalar.as_radix_16();

        // Compute s*P as
        //    s*P = P*(s_0 + 16*(s_1 + 16*(s_2 + ... + 16*s_63))),
        // alternating four doublings with one table lookup, most
        // significant digit first.  The lookup is in constant time, so
        // the whole multiplication is too.
        let mut Q = EdwardsPoint::identity();
        for i in (0..64).rev() {
            Q = Q.mul_by_pow_2(4);
            Q = (&Q + &lookup_table.select(scalar_digits[i])).as_extended();
        }
        Q
    }
}

define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;

    /// Scalar multiplication: compute `self * point`, in constant
    /// time.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}

define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl EdwardsPoint {
    /// Fixed-base scalar multiplication by the Ed25519 basepoint.
    ///
    /// Uses the shared precomputed [`EdwardsBasepointTable`]; the first
    /// call pays its one-time construction cost.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        constants::ED25519_BASEPOINT_TABLE.mul_base(scalar)
    }

    /// Compute \\(aA + bB\\) in variable time, where \\(B\\) is the
    /// Ed25519 basepoint.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        let a_naf = a.non_adjacent_form(5);
        let b_naf = b.non_adjacent_form(7);

        // Find the starting index: the most significant nonzero digit.
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if a_naf[i] != 0 || b_naf[i] != 0 {
                break;
            }
        }

        let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
        let table_B = &*constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

        let mut r = EdwardsPoint::identity();
        loop {
            let mut t = r.double_completed();

            match a_naf[i].cmp(&0) {
                Ordering::Greater => t = &t.as_extended() + &table_A.select(a_naf[i] as usize),
                Ordering::Less => t = &t.as_extended() - &table_A.select(-a_naf[i] as usize),
                Ordering::Equal => {}
            }

            match b_naf[i].cmp(&0) {
                Ordering::Greater => t = &t.as_extended() + &table_B.select(b_naf[i] as usize),
                Ordering::Less => t = &t.as_extended() - &table_B.select(-b_naf[i] as usize),
                Ordering::Equal => {}
            }

            r = t.as_extended();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r
    }

    /// Multiply by the cofactor: return \\(\[8\]P\\).
    pub fn mul_by_cofactor(&self) -> EdwardsPoint {
        self.mul_by_pow_2(3)
    }

    /// Compute \\([2\^k] P \\) by successive doublings.  Requires \\( k > 0 \\).
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut s = *self;
        for _ in 0..k {
            s = s.double();
        }
        s
    }

    /// Determine if this point is of small order.
    ///
    /// The order of the group of points on the curve \\(\mathcal E\\)
    /// is \\(|\mathcal E| = 8\ell \\), so its structure is \\( \mathcal
    /// E = \mathcal E\[8\] \times \mathcal E[\ell]\\).  A point is of
    /// small order exactly when it lies in \\( \mathcal E\[8\] \\),
    /// which happens exactly when multiplying by the cofactor kills it.
    ///
    /// Such points cannot occur as honestly generated public keys, but
    /// signature verification accepts them; callers that want to refuse
    /// them must check explicitly.
    pub fn is_small_order(&self) -> bool {
        self.mul_by_cofactor().is_identity()
    }
}

// ------------------------------------------------------------------------
// Fixed-base scalar multiplication tables
// ------------------------------------------------------------------------

/// A precomputed table of multiples of a basepoint, used to accelerate
/// fixed-base scalar multiplication.
///
/// The table for the Ed25519 basepoint is built lazily on first use and
/// shared through [`constants::ED25519_BASEPOINT_TABLE`].
#[derive(Clone)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

impl EdwardsBasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    pub fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table = EdwardsBasepointTable([LookupTable::default(); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = (16^2)^i * B
            table.0[i] = LookupTable::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// Compute \\( aB \\) in constant time, where \\(B\\) is this
    /// table's basepoint.
    ///
    /// Write \\(a\\) in radix 16 with signed coefficients,
    /// $$
    ///     a = a\_0 + a\_1 16\^1 + \cdots + a\_{63} 16\^{63},
    /// $$
    /// and split the sum into even and odd powers:
    /// $$
    ///    a B = (a\_0 16\^0 B + a\_2 16\^2 B + \cdots + a\_{62} 16\^{62} B)
    ///        + 16 (a\_1 16\^0 B + a\_3 16\^2 B + \cdots + a\_{63} 16\^{62} B).
    /// $$
    /// The table holds the multiples \\( x \cdot (16\^2)\^i \cdot B \\)
    /// for constant-time lookup, so each half of the sum costs 32 table
    /// additions, plus four doublings between the halves.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.as_radix_16();

        let tables = &self.0;
        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P
    }

    /// Return the basepoint of this table.
    pub fn basepoint(&self) -> EdwardsPoint {
        // self.0[0].select(1) = 1*(16^2)^0*B
        // but as an `AffineNielsPoint`, so add identity to convert to extended.
        (&EdwardsPoint::identity() + &self.0[0].select(1)).as_extended()
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` \\(a\\) by computing
    /// the multiple \\(aB\\) of this basepoint \\(B\\).
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    fn mul(self, basepoint_table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        basepoint_table.mul_base(self)
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use subtle::ConditionallySelectable;

    /// X coordinate of the basepoint.
    /// = 15112221349535400772501151409588531511454012693041857206046113283949847762202
    static BASE_X_COORD_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    /// Compressed Edwards Y form of 2*basepoint.
    static BASE2_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);

    /// Compressed Edwards Y form of 16*basepoint.
    static BASE16_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    /// 4493907448824000747700850167940867464579944529806937181821189941592931634714
    pub(crate) static A_SCALAR: [u8; 32] = [
        0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8, 0x26,
        0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f, 0x23, 0x76,
        0xef, 0x09,
    ];

    /// 2506056684125797857694181776241676200180934651973138769173342316833279714961
    static B_SCALAR: [u8; 32] = [
        0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66, 0xf0, 0xb3,
        0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7, 0xd4, 0xaa, 0xb8, 0x60,
        0x8a, 0x05,
    ];

    /// A_SCALAR * basepoint, computed with ed25519.py
    pub(crate) static A_TIMES_BASEPOINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);

    /// A_SCALAR * (A_TIMES_BASEPOINT) + B_SCALAR * BASEPOINT
    /// computed with ed25519.py
    static DOUBLE_SCALAR_MULT_RESULT: CompressedEdwardsY = CompressedEdwardsY([
        0x7d, 0xfd, 0x6c, 0x45, 0xaf, 0x6d, 0x6e, 0x0e, 0xba, 0x20, 0x37, 0x1a, 0x23, 0x64, 0x59,
        0xc4, 0xc0, 0x46, 0x83, 0x43, 0xde, 0x70, 0x4b, 0x85, 0x09, 0x6f, 0xfe, 0x35, 0x4f, 0x13,
        0x2b, 0x42,
    ]);

    fn a_scalar() -> Scalar {
        Scalar::from_canonical_bytes(A_SCALAR).unwrap()
    }

    fn b_scalar() -> Scalar {
        Scalar::from_canonical_bytes(B_SCALAR).unwrap()
    }

    /// Test round-trip decompression for the basepoint.
    #[test]
    fn basepoint_decompression_compression() {
        let base_X = FieldElement::from_bytes(&BASE_X_COORD_BYTES);
        let bp = constants::ED25519_BASEPOINT_COMPRESSED
            .decompress()
            .unwrap();
        assert!(bp.is_valid());
        // Check that decompression actually gives the correct X coordinate
        assert_eq!(base_X, bp.X);
        assert_eq!(bp.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }

    /// Test sign handling in decompression
    #[test]
    fn decompression_sign_handling() {
        // Manually set the high bit of the last byte to flip the sign
        let mut minus_basepoint_bytes = *constants::ED25519_BASEPOINT_COMPRESSED.as_bytes();
        minus_basepoint_bytes[31] |= 1 << 7;
        let minus_basepoint = CompressedEdwardsY(minus_basepoint_bytes)
            .decompress()
            .unwrap();
        // Test projective coordinates exactly since we know they should
        // only differ by a flipped sign.
        assert_eq!(minus_basepoint.X, -(&constants::ED25519_BASEPOINT_POINT.X));
        assert_eq!(minus_basepoint.Y, constants::ED25519_BASEPOINT_POINT.Y);
        assert_eq!(minus_basepoint.Z, constants::ED25519_BASEPOINT_POINT.Z);
        assert_eq!(minus_basepoint.T, -(&constants::ED25519_BASEPOINT_POINT.T));
    }

    /// Test that computing 1*basepoint gives the correct basepoint.
    #[test]
    fn basepoint_mul_one_vs_basepoint() {
        let bp = EdwardsPoint::mul_base(&Scalar::ONE);
        let compressed = bp.compress();
        assert_eq!(compressed, constants::ED25519_BASEPOINT_COMPRESSED);
    }

    /// Test that `EdwardsBasepointTable::basepoint()` gives the correct basepoint.
    #[test]
    fn basepoint_table_basepoint_function_correct() {
        let bp = constants::ED25519_BASEPOINT_TABLE.basepoint();
        assert_eq!(bp.compress(), constants::ED25519_BASEPOINT_COMPRESSED);
    }

    /// Test `impl Add<EdwardsPoint> for EdwardsPoint`
    /// using basepoint + basepoint versus the 2*basepoint constant.
    #[test]
    fn basepoint_plus_basepoint_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = &bp + &bp;
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Test `impl Add<ProjectiveNielsPoint> for EdwardsPoint`
    /// using the basepoint, basepoint2 constants
    #[test]
    fn basepoint_plus_basepoint_projective_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = (&bp + &bp.as_projective_niels()).as_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Test `impl Add<AffineNielsPoint> for EdwardsPoint`
    /// using the basepoint, basepoint2 constants
    #[test]
    fn basepoint_plus_basepoint_affine_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_affine_niels = bp.as_affine_niels();
        let bp_added = (&bp + &bp_affine_niels).as_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    /// Check that equality of `EdwardsPoint`s handles projective
    /// coordinates correctly.
    #[test]
    fn extended_point_equality_handles_scaling() {
        let mut two_bytes = [0u8; 32];
        two_bytes[0] = 2;
        let id1 = EdwardsPoint::identity();
        let id2 = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::from_bytes(&two_bytes),
            Z: FieldElement::from_bytes(&two_bytes),
            T: FieldElement::ZERO,
        };
        assert!(bool::from(id1.ct_eq(&id2)));
    }

    /// Sanity check for conversion to precomputed points
    #[test]
    fn as_affine_niels_clears_denominators() {
        // construct a point as aB so it has denominators (ie. Z != 1)
        let aB = EdwardsPoint::mul_base(&a_scalar());
        let aB_affine_niels = aB.as_affine_niels();
        let also_aB = (&EdwardsPoint::identity() + &aB_affine_niels).as_extended();
        assert_eq!(aB.compress(), also_aB.compress());
    }

    /// Test mul_base versus a known scalar multiple from ed25519.py
    #[test]
    fn basepoint_mul_vs_ed25519py() {
        let aB = EdwardsPoint::mul_base(&a_scalar());
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// Test that multiplication by the group order kills the basepoint.
    #[test]
    fn basepoint_mul_by_group_order() {
        // ℓ - 1 in little-endian bytes
        let ell_minus_one = Scalar::from_canonical_bytes([
            0xec, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ])
        .unwrap();
        let p = EdwardsPoint::mul_base(&ell_minus_one);
        // (ℓ-1)B = -B, so adding B once more gives the identity.
        assert_eq!(p, -constants::ED25519_BASEPOINT_POINT);
        let should_be_id = &p + &constants::ED25519_BASEPOINT_POINT;
        assert!(should_be_id.is_identity());
    }

    /// Test precomputed basepoint mult
    #[test]
    fn test_precomputed_basepoint_mult() {
        let table = EdwardsBasepointTable::create(&constants::ED25519_BASEPOINT_POINT);
        let aB_1 = EdwardsPoint::mul_base(&a_scalar());
        let aB_2 = &table * &a_scalar();
        assert_eq!(aB_1.compress(), aB_2.compress());
    }

    /// Test scalar multiplication versus a known scalar multiple from ed25519.py
    #[test]
    fn scalar_mul_vs_ed25519py() {
        let aB = &constants::ED25519_BASEPOINT_POINT * &a_scalar();
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    /// Test basepoint.double() versus the 2*basepoint constant.
    #[test]
    fn basepoint_double_vs_basepoint2() {
        assert_eq!(
            constants::ED25519_BASEPOINT_POINT.double().compress(),
            BASE2_CMPRSSD
        );
    }

    /// Test that computing 2*basepoint is the same as basepoint.double()
    #[test]
    fn basepoint_mul_two_vs_basepoint2() {
        let two = Scalar::from(2u128);
        let bp2 = EdwardsPoint::mul_base(&two);
        assert_eq!(bp2.compress(), BASE2_CMPRSSD);
    }

    /// Test computing 16*basepoint vs mul_by_pow_2(4)
    #[test]
    fn basepoint16_vs_mul_by_pow_2_4() {
        let bp16 = constants::ED25519_BASEPOINT_POINT.mul_by_pow_2(4);
        assert_eq!(bp16.compress(), BASE16_CMPRSSD);
    }

    /// Test that the conditional assignment trait works for AffineNielsPoints.
    #[test]
    fn conditional_assign_for_affine_niels_point() {
        fn extended(p: &AffineNielsPoint) -> EdwardsPoint {
            (&EdwardsPoint::identity() + p).as_extended()
        }

        let id = AffineNielsPoint::identity();
        let mut p1 = AffineNielsPoint::identity();
        let bp = constants::ED25519_BASEPOINT_POINT.as_affine_niels();

        p1.conditional_assign(&bp, Choice::from(0));
        assert_eq!(extended(&p1).compress(), extended(&id).compress());
        p1.conditional_assign(&bp, Choice::from(1));
        assert_eq!(extended(&p1).compress(), extended(&bp).compress());
    }

    #[test]
    fn is_small_order() {
        // The basepoint has large prime order
        assert!(!constants::ED25519_BASEPOINT_POINT.is_small_order());
        // constants::EIGHT_TORSION has all points of small order.
        for torsion_point in &constants::EIGHT_TORSION {
            assert!(torsion_point.is_small_order());
        }
    }

    #[test]
    fn compressed_identity() {
        assert_eq!(
            EdwardsPoint::identity().compress(),
            CompressedEdwardsY::identity()
        );
    }

    #[test]
    fn is_identity() {
        assert!(EdwardsPoint::identity().is_identity());
        assert!(!constants::ED25519_BASEPOINT_POINT.is_identity());
    }

    /// Rust's debug builds have overflow and underflow trapping,
    /// and enable `debug_assert!()`.  This performs many scalar
    /// multiplications to attempt to trigger possible overflows etc.
    #[test]
    fn monte_carlo_overflow_underflow_debug_assert_test() {
        let mut P = constants::ED25519_BASEPOINT_POINT;
        // N.B. each scalar mul does 1407 field mults, 1024 field squarings,
        // so this does ~ 1M of each operation.
        for _ in 0..1_000 {
            P *= &a_scalar();
        }
    }

    #[test]
    fn scalar_mul_works_both_ways() {
        let G: EdwardsPoint = constants::ED25519_BASEPOINT_POINT;
        let s: Scalar = a_scalar();

        let P1 = &G * &s;
        let P2 = &s * &G;

        assert!(P1.compress().to_bytes() == P2.compress().to_bytes());
    }

    /// Test vartime_double_scalar_mul_basepoint vs ed25519.py
    #[test]
    fn double_scalar_mul_basepoint_vs_ed25519py() {
        let A = A_TIMES_BASEPOINT.decompress().unwrap();
        let result =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&a_scalar(), &A, &b_scalar());
        assert_eq!(result.compress(), DOUBLE_SCALAR_MULT_RESULT);
    }

    #[test]
    fn impl_sum() {
        // Test that sum works for non-empty iterators
        let BASE = constants::ED25519_BASEPOINT_POINT;

        let s1 = Scalar::from(999u128);
        let P1 = &BASE * &s1;

        let s2 = Scalar::from(333u128);
        let P2 = &BASE * &s2;

        let vec = vec![P1, P2];
        let sum: EdwardsPoint = vec.iter().sum();

        assert_eq!(sum, P1 + P2);

        // Test that sum works for the empty iterator
        let empty_vector: Vec<EdwardsPoint> = vec![];
        let sum: EdwardsPoint = empty_vector.iter().sum();

        assert_eq!(sum, EdwardsPoint::identity());

        // Test that sum works on owning iterators
        let sum: EdwardsPoint = vec.into_iter().sum();
        assert_eq!(sum, P1 + P2);
    }

    /// Ten valid point encodings; decoding then re-encoding must
    /// reproduce them byte for byte.
    static ENCODED_POINTS: [&str; 10] = [
        "6a62a6205507fcafe9ee43d6f8332a37144085f9ae454611263232ec771107c6",
        "f1bed61e1ecbce3f5c4f562a66d6d679749d3e1cd4ef9e36a909ff8e8b39858e",
        "01633d1be2a99e5a04b1e47c44f90336e15cb5dac62ced2f68f52b1e0911f454",
        "c9f7ec3ef931bd89f78e63b734e9d0bf3468a58e6fda16ca991645337d569e57",
        "f36b246bb8b88c397775ac1ad34606295cae333150ce2fc568e99a620f9d2b73",
        "d28d272dbfb761925541c14117cc3454b5f610df732518a1cab644c9277fe538",
        "6d0f36e2e942450340bbfcb96849fbe0fa97ad8e0b99bbee19e1a4caa6906e50",
        "4991cdf5856f465ca76735a2c341274bdb4b0a2b867dc25ed02f5c699cbcf872",
        "ad743c5f9f9d9e12bf31f3120580cc45cbec5edf5aba6457ed9433af279baccf",
        "c38f873d8b07fc976dd7d6611397d635b5879c90b271e649f14d2328435bc51e",
    ];

    /// Encodings of the pairwise sums of the `ENCODED_POINTS`:
    /// `ENCODED_SUMS[i]` encodes the sum of points `2i` and `2i+1`.
    static ENCODED_SUMS: [&str; 5] = [
        "36a1e8bcaba7d31818d953e5e3e4ac67e46537d7fafbb7a48205dac9e6a85933",
        "5c7b9402d615532cf60cb6aa2c2f1914b18aab56d739fa52d7df10a068cf6f77",
        "0af69aedf904813ad481e8770fb3d75c31814c3dec254b8d7d019656aad09979",
        "ba3a429d16a75037e59c0af7f7d456f12dd7782331783ebe44505ecbedfd208c",
        "4cfff383bf92fe6dcb070753b9a242eb36f9344b6e4abd3bd6e0539efd6fbe3d",
    ];

    fn decompress_hex(encoding: &str) -> EdwardsPoint {
        let bytes: [u8; 32] = hex::decode(encoding).unwrap().try_into().unwrap();
        CompressedEdwardsY(bytes).decompress().unwrap()
    }

    #[test]
    fn point_encodings_round_trip() {
        for encoding in ENCODED_POINTS.iter().chain(ENCODED_SUMS.iter()) {
            let bytes: [u8; 32] = hex::decode(encoding).unwrap().try_into().unwrap();
            let point = CompressedEdwardsY(bytes).decompress().unwrap();
            assert!(point.is_valid());
            assert_eq!(point.compress().as_bytes(), &bytes);
        }
    }

    #[test]
    fn addition_matches_known_sums() {
        for i in 0..5 {
            let p = decompress_hex(ENCODED_POINTS[2 * i]);
            let q = decompress_hex(ENCODED_POINTS[2 * i + 1]);
            let sum: [u8; 32] = hex::decode(ENCODED_SUMS[i]).unwrap().try_into().unwrap();
            assert_eq!((&p + &q).compress().as_bytes(), &sum);
        }
    }

    #[test]
    fn subtraction_inverts_addition() {
        for i in 0..5 {
            let p = decompress_hex(ENCODED_POINTS[2 * i]);
            let q = decompress_hex(ENCODED_POINTS[2 * i + 1]);
            let sum = decompress_hex(ENCODED_SUMS[i]);
            assert_eq!((&sum - &p).compress(), q.compress());
        }
    }

    #[test]
    fn subtraction_matches_negated_known_point() {
        for i in 0..5 {
            let p = decompress_hex(ENCODED_POINTS[2 * i]);
            let q = decompress_hex(ENCODED_POINTS[2 * i + 1]);
            let sum = decompress_hex(ENCODED_SUMS[i]);
            assert_eq!(&p - &sum, -&q);
            assert_eq!(&p - &p, EdwardsPoint::identity());
        }
    }

    #[test]
    fn negative_zero_encodings_are_rejected() {
        // y = 1 and y = p - 1 both have x = 0; setting the sign bit on
        // either encoding asks for -0, which names no point.
        let mut plus_one = [0u8; 32];
        plus_one[0] = 1;
        let mut minus_one = [0xffu8; 32];
        minus_one[0] = 0xec;
        minus_one[31] = 0x7f;

        for y in [plus_one, minus_one] {
            assert!(CompressedEdwardsY(y).decompress().is_some());
            let mut negated = y;
            negated[31] |= 0x80;
            assert!(CompressedEdwardsY(negated).decompress().is_none());
        }
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_basepoint_roundtrip() {
        let encoded = bincode::serialize(&constants::ED25519_BASEPOINT_POINT).unwrap();
        let enc_compressed = bincode::serialize(&constants::ED25519_BASEPOINT_COMPRESSED).unwrap();
        assert_eq!(encoded, enc_compressed);

        // Check that the encoding is 32 bytes exactly
        assert_eq!(encoded.len(), 32);

        let dec_uncompressed: EdwardsPoint = bincode::deserialize(&encoded).unwrap();
        let dec_compressed: CompressedEdwardsY = bincode::deserialize(&enc_compressed).unwrap();

        assert_eq!(dec_uncompressed, constants::ED25519_BASEPOINT_POINT);
        assert_eq!(dec_compressed, constants::ED25519_BASEPOINT_COMPRESSED);

        // Also check that the encoding itself matches the compressed point
        assert_eq!(
            &constants::ED25519_BASEPOINT_COMPRESSED.as_bytes()[..],
            &encoded[..]
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_decode_invalid_fails() {
        let mut encoded = bincode::serialize(&constants::ED25519_BASEPOINT_POINT).unwrap();
        // Set the low byte of the compressed point to 1 to make it invalid.
        encoded[0] = 1;
        let parsed: Result<EdwardsPoint, _> = bincode::deserialize(&encoded);
        assert!(parsed.is_err());
    }
}

// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Arithmetic on scalars, integers mod the group order
//!
//! l = 2²⁵² + 27742317777372353535851937790883648493.
//!
//! Scalars are held in five 56-bit limbs, little-endian, and every
//! constructed [`Scalar`] is fully reduced, so the limb representation
//! is unique.  Reduction after expansion and multiplication uses a
//! Barrett step with the precomputed constant µ = ⌊2⁵¹² / l⌋, which
//! handles any input below 2⁵¹² in two conditional subtractions.
//!
//! Batch verification additionally treats scalars as plain 256-bit
//! naturals: the Bos–Coster loop repeatedly compares and subtracts
//! leading limbs.  Those prefix operations are variable-time and remain
//! crate-internal.

use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::Sum;
use core::ops::{Add, Mul, Sub};

use sha2::digest::consts::U64;
use sha2::digest::Digest;

use subtle::Choice;
use subtle::ConstantTimeEq;

use zeroize::Zeroize;

/// An element of ℤ/lℤ, where l is the order of the Ed25519 basepoint.
///
/// Limbs are 56 bits wide and the value is always below l.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) [u64; 5]);

const MASK_56: u64 = (1u64 << 56) - 1;
const MASK_40: u64 = (1u64 << 40) - 1;

/// The group order l, in 56-bit limbs.
const L: [u64; 5] = [
    0x0012_631a_5cf5_d3ed,
    0x00f9_dea2_f79c_d658,
    0x0000_0000_0000_14de,
    0x0000_0000_0000_0000,
    0x0000_0000_1000_0000,
];

/// µ = ⌊2⁵¹² / l⌋, the Barrett reduction constant.
const MU: [u64; 5] = [
    0x009c_e5a3_0a2c_131b,
    0x0021_5d08_6329_a7ed,
    0x00ff_ffff_ffeb_2106,
    0x00ff_ffff_ffff_ffff,
    0x0000_000f_ffff_ffff,
];

/// The little-endian bytes of l, for the canonicity check.
const L_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
    0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x10,
];

/// Multiply two 64-bit limbs, widening to a 128-bit product.
#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

/// Load eight little-endian 64-bit words from 32 or 64 bytes of input,
/// zero-padding short input.
fn load_words(input: &[u8]) -> [u64; 8] {
    debug_assert!(input.len() == 32 || input.len() == 64);
    let mut words = [0u64; 8];
    for (i, chunk) in input.chunks(8).enumerate() {
        let mut word = 0u64;
        for (j, &byte) in chunk.iter().enumerate() {
            word |= (byte as u64) << (8 * j);
        }
        words[i] = word;
    }
    words
}

/// Full 5×5 limb product, as ten exact 56-bit limbs.
fn mul_wide(a: &[u64; 5], b: &[u64; 5]) -> [u64; 10] {
    let mut out = [0u64; 10];
    let mut acc: u128 = 0;
    for k in 0usize..9 {
        let lo = k.saturating_sub(4);
        let hi = if k < 5 { k } else { 4 };
        for i in lo..=hi {
            acc += m(a[i], b[k - i]);
        }
        out[k] = (acc as u64) & MASK_56;
        acc >>= 56;
    }
    out[9] = acc as u64;
    out
}

/// One conditional subtraction of l, keeping the smaller representative.
fn sub_order_once(r: &mut [u64; 5]) {
    let mut t = [0u64; 5];
    let mut borrow = 0u64;
    for i in 0..5 {
        let shift = if i == 4 { 32 } else { 56 };
        let d = r[i].wrapping_sub(L[i]).wrapping_sub(borrow);
        borrow = d >> 63;
        t[i] = d.wrapping_add(borrow << shift);
    }
    // A final borrow means r was already below l; keep it.
    let mask = borrow.wrapping_sub(1);
    for i in 0..5 {
        r[i] ^= mask & (r[i] ^ t[i]);
    }
}

/// Barrett reduction of a value x < 2⁵¹², presented as its low 264 bits
/// `r1` and its top bits `q1 = x >> 248`.
fn barrett_reduce(q1: &[u64; 5], r1: &[u64; 5]) -> Scalar {
    // q3 = (µ * q1) >> 264 estimates the quotient x / l to within 2.
    let q2 = mul_wide(&MU, q1);
    let mut q3 = [0u64; 5];
    for i in 0..5 {
        q3[i] = ((q2[4 + i] >> 40) | (q2[5 + i] << 16)) & MASK_56;
    }

    // r2 = (q3 * l) mod 2^264
    let r2_wide = mul_wide(&q3, &L);
    let r2 = [
        r2_wide[0],
        r2_wide[1],
        r2_wide[2],
        r2_wide[3],
        r2_wide[4] & MASK_40,
    ];

    // r = r1 - r2 mod 2^264, which is x - q3*l, a value in [0, 3l).
    let mut r = [0u64; 5];
    let mut borrow = 0u64;
    for i in 0..5 {
        let shift = if i == 4 { 40 } else { 56 };
        let t = r1[i].wrapping_sub(r2[i]).wrapping_sub(borrow);
        borrow = t >> 63;
        r[i] = t.wrapping_add(borrow << shift);
    }

    sub_order_once(&mut r);
    sub_order_once(&mut r);

    Scalar(r)
}

/// Reduce eight little-endian words (a value below 2⁵¹²) mod l.
fn expand_words_mod_order(x: &[u64; 8]) -> Scalar {
    let r1 = [
        x[0] & MASK_56,
        ((x[0] >> 56) | (x[1] << 8)) & MASK_56,
        ((x[1] >> 48) | (x[2] << 16)) & MASK_56,
        ((x[2] >> 40) | (x[3] << 24)) & MASK_56,
        ((x[3] >> 32) | (x[4] << 32)) & MASK_40,
    ];
    let q1 = [
        ((x[3] >> 56) | (x[4] << 8)) & MASK_56,
        ((x[4] >> 48) | (x[5] << 16)) & MASK_56,
        ((x[5] >> 40) | (x[6] << 24)) & MASK_56,
        ((x[6] >> 32) | (x[7] << 32)) & MASK_56,
        x[7] >> 24,
    ];
    barrett_reduce(&q1, &r1)
}

impl Scalar {
    /// The scalar zero.
    pub const ZERO: Scalar = Scalar([0, 0, 0, 0, 0]);
    /// The scalar one.
    pub const ONE: Scalar = Scalar([1, 0, 0, 0, 0]);

    /// Construct a scalar from 32 bytes, little-endian, reducing mod l.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        expand_words_mod_order(&load_words(&bytes))
    }

    /// Construct a scalar from a 512-bit little-endian value, reducing
    /// mod l.  This is how hash outputs become scalars.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        expand_words_mod_order(&load_words(input))
    }

    /// Construct a scalar from its canonical byte encoding, or return
    /// `None` if the bytes encode a value not less than l.
    ///
    /// The check is variable-time: encodings arrive in (public)
    /// signatures.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> Option<Scalar> {
        if !is_canonical(&bytes) {
            return None;
        }
        // Already below l, so the raw limb split is the value.
        let x = load_words(&bytes);
        Some(Scalar([
            x[0] & MASK_56,
            ((x[0] >> 56) | (x[1] << 8)) & MASK_56,
            ((x[1] >> 48) | (x[2] << 16)) & MASK_56,
            ((x[2] >> 40) | (x[3] << 24)) & MASK_56,
            x[3] >> 32,
        ]))
    }

    /// Hash a 512-bit digest into a scalar.
    pub fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// Encode as 32 bytes, little-endian.  The result is canonical.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        // Four full 7-byte limbs; the fifth limb of a reduced scalar
        // fits the final four bytes.
        for i in 0..4 {
            for j in 0..7 {
                s[7 * i + j] = (self.0[i] >> (8 * j)) as u8;
            }
        }
        for j in 0..4 {
            s[28 + j] = (self.0[4] >> (8 * j)) as u8;
        }
        s
    }

    /// Write this scalar in radix 16, with coefficients in [-8, 8),
    /// returning 64 signed digits.
    ///
    /// The top digit may equal 8, which the basepoint table tolerates.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        let bytes = self.to_bytes();
        debug_assert!(bytes[31] <= 127);

        let mut output = [0i8; 64];

        // Step 1: change radix: 64 signed nibbles in [0, 16).
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(bytes[i]) as i8;
            output[2 * i + 1] = top_half(bytes[i]) as i8;
        }

        // Step 2: recenter to [-8, 8) by pushing a carry upward.
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }

    /// Compute a width-w "non-adjacent form" of this scalar: 256 signed
    /// odd digits below 2^(w-1) in magnitude, any two nonzero digits at
    /// least w positions apart.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        let bytes = self.to_bytes();
        // A reduced scalar is below 2^253, so the top bits are clear
        // and the carry out of the final window is zero.
        debug_assert!(bytes[31] <= 127);
        debug_assert!((2..=8).contains(&w));

        let mut naf = [0i8; 256];

        let words = load_words(&bytes);
        let x_u64 = [words[0], words[1], words[2], words[3], 0u64];

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            // A window of bits of the scalar, starting at bit `pos`.
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                x_u64[u64_idx] >> bit_idx
            } else {
                // Spans two words.
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                // An even window keeps its carry: either both the carry
                // and the low bit are zero, or both are one.
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }

    /// Compare limb prefixes `0..=limbsize` as plain naturals, in
    /// variable time.
    pub(crate) fn prefix_lt(&self, other: &Scalar, limbsize: usize) -> bool {
        for i in (0..=limbsize).rev() {
            if self.0[i] < other.0[i] {
                return true;
            }
            if self.0[i] > other.0[i] {
                return false;
            }
        }
        false
    }

    /// Like [`Self::prefix_lt`], but true on equal prefixes as well.
    pub(crate) fn prefix_lte(&self, other: &Scalar, limbsize: usize) -> bool {
        for i in (0..=limbsize).rev() {
            if self.0[i] < other.0[i] {
                return true;
            }
            if self.0[i] > other.0[i] {
                return false;
            }
        }
        true
    }

    /// Subtract `other` from `self` on limbs `0..=limbsize`, in place.
    /// The caller guarantees `other` is not greater than `self`.
    pub(crate) fn prefix_sub_assign(&mut self, other: &Scalar, limbsize: usize) {
        let mut borrow = 0u64;
        for i in 0..=limbsize {
            let t = self.0[i].wrapping_sub(other.0[i]).wrapping_sub(borrow);
            borrow = t >> 63;
            self.0[i] = t & MASK_56;
        }
        debug_assert_eq!(borrow, 0);
    }

    /// Whether this scalar is zero, in variable time.
    pub(crate) fn is_zero_vartime(&self) -> bool {
        self.0 == [0u64; 5]
    }

    /// Whether this scalar is one, in variable time.
    pub(crate) fn is_one_vartime(&self) -> bool {
        self.0 == [1u64, 0, 0, 0, 0]
    }

    /// Bit `i` of the scalar, in variable time.
    pub(crate) fn bit_vartime(&self, i: usize) -> u64 {
        (self.0[i / 56] >> (i % 56)) & 1
    }

    /// Whether this scalar is below \\(2\^{128}\\), in variable time.
    ///
    /// Limbs 0 and 1 hold 112 bits, so a 128-bit value occupies at most
    /// the low 16 bits of limb 2.
    pub(crate) fn fits_in_128_bits_vartime(&self) -> bool {
        self.0[4] == 0 && self.0[3] == 0 && (self.0[2] & 0x00ff_ffff_ffff_0000) == 0
    }
}

/// Variable-time check that 32 bytes encode a value below l.
fn is_canonical(bytes: &[u8; 32]) -> bool {
    for i in (0..32).rev() {
        if bytes[i] < L_BYTES[i] {
            return true;
        }
        if bytes[i] > L_BYTES[i] {
            return false;
        }
    }
    // Equal to l.
    false
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn add(self, rhs: &'b Scalar) -> Scalar {
        let mut r = [0u64; 5];
        let mut carry = 0u64;
        for i in 0..4 {
            carry = self.0[i] + rhs.0[i] + carry;
            r[i] = carry & MASK_56;
            carry >>= 56;
        }
        // Both inputs are below l, so the top limb cannot overflow and
        // the sum is below 2l: one conditional subtraction reduces it.
        r[4] = self.0[4] + rhs.0[4] + carry;
        sub_order_once(&mut r);
        Scalar(r)
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        let mut r = [0u64; 5];
        let mut borrow = 0u64;
        for i in 0..5 {
            borrow = self.0[i].wrapping_sub(rhs.0[i] + (borrow >> 63));
            r[i] = borrow & MASK_56;
        }
        // Underflow means rhs was the larger value; add l back in.
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry = 0u64;
        for i in 0..5 {
            carry = (carry >> 56) + r[i] + (L[i] & underflow_mask);
            r[i] = carry & MASK_56;
        }
        Scalar(r)
    }
}

define_sub_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        let wide = mul_wide(&self.0, &rhs.0);
        let r1 = [wide[0], wide[1], wide[2], wide[3], wide[4] & MASK_40];
        let mut q1 = [0u64; 5];
        for i in 0..5 {
            q1[i] = ((wide[4 + i] >> 24) | (wide[5 + i] << 32)) & MASK_56;
        }
        barrett_reduce(&q1, &r1)
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<T> Sum<T> for Scalar
where
    T: Borrow<Scalar>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Scalar::ZERO, |acc, item| &acc + item.borrow())
    }
}

impl From<u128> for Scalar {
    fn from(x: u128) -> Scalar {
        Scalar([
            (x as u64) & MASK_56,
            ((x >> 56) as u64) & MASK_56,
            (x >> 112) as u64,
            0,
            0,
        ])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        // Reduced scalars have unique limbs, so limb equality is value
        // equality.
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar({:?})", &self.0[..])
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

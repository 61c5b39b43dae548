// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! An ed25519 signature.

use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::CompressedEdwardsY;
use crate::errors::SignatureError;
use crate::scalar::Scalar;

/// The length of an ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An ed25519 signature.
///
/// These signatures are "detached": they do **not** include a copy of
/// the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is the commitment half of the signature: a curve point
    /// produced by multiplying the basepoint by a nonce derived from
    /// the signer's hash prefix and the message.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is the response half: a scalar binding `R`, the public key,
    /// and the message.  Kept as raw bytes so that parsing never fails;
    /// canonicality is checked when the signature is verified.
    pub(crate) s_bytes: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s_bytes)
    }
}

impl Signature {
    /// Parse a signature from its 64-byte wire form `R ‖ s`.
    ///
    /// Parsing is infallible.  Whether `R` decompresses and whether `s`
    /// is a canonical scalar below the group order are checked during
    /// verification, where a failure can be reported meaningfully.
    #[inline]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        let mut R_bytes: [u8; 32] = [0u8; 32];
        let mut s_bytes: [u8; 32] = [0u8; 32];

        R_bytes.copy_from_slice(&bytes[..32]);
        s_bytes.copy_from_slice(&bytes[32..]);

        Signature {
            R: CompressedEdwardsY(R_bytes),
            s_bytes,
        }
    }

    /// Convert this `Signature` to its 64-byte wire form.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s_bytes[..]);
        signature_bytes
    }

    /// View the commitment half `R` of this signature.
    #[inline]
    pub fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// View the response half `s` of this signature.
    #[inline]
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.s_bytes
    }

    /// Decode `s` as a canonical scalar below the group order.
    ///
    /// The high-bits check rejects the bulk of malleable encodings
    /// cheaply; the full canonical decode catches the remainder in
    /// \\([\ell, 2\^{253})\\).
    pub(crate) fn s_scalar(&self) -> Result<Scalar, SignatureError> {
        if self.s_bytes[31] & 224 != 0 {
            return Err(SignatureError::InvalidEncoding);
        }
        Scalar::from_canonical_bytes(self.s_bytes).ok_or(SignatureError::InvalidEncoding)
    }
}

impl From<&[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        Signature::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(SIGNATURE_LENGTH)?;
        for byte in self.to_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SignatureVisitor;

        impl<'de> Visitor<'de> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("an ed25519 signature as 64 bytes, as specified in RFC8032")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Signature, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; SIGNATURE_LENGTH];
                #[allow(clippy::needless_range_loop)]
                for i in 0..SIGNATURE_LENGTH {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 64 bytes"))?;
                }
                Ok(Signature::from_bytes(&bytes))
            }
        }

        deserializer.deserialize_tuple(SIGNATURE_LENGTH, SignatureVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire_form_round_trip() {
        let mut bytes = [0u8; 64];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        // Clear the scalar high bits so the signature is well-formed.
        bytes[63] &= 0x1f;

        let sig = Signature::from_bytes(&bytes);
        assert_eq!(sig.to_bytes(), bytes);
        assert_eq!(sig.r_bytes(), &bytes[..32]);
        assert_eq!(sig.s_bytes(), &bytes[32..]);
    }

    #[test]
    fn s_scalar_rejects_excess_high_bits() {
        let mut bytes = [0u8; 64];
        bytes[63] = 0xe0;
        let sig = Signature::from_bytes(&bytes);
        assert_eq!(sig.s_scalar(), Err(SignatureError::InvalidEncoding));
    }

    #[test]
    fn s_scalar_rejects_noncanonical_s() {
        // s = ℓ, the group order: high bits clear but not canonical.
        let ell: [u8; 32] = [
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        let mut bytes = [0u8; 64];
        bytes[32..].copy_from_slice(&ell);
        let sig = Signature::from_bytes(&bytes);
        assert_eq!(sig.s_scalar(), Err(SignatureError::InvalidEncoding));
    }

    #[test]
    fn s_scalar_accepts_canonical_s() {
        // s = ℓ - 1 is the largest canonical scalar.
        let ell_minus_one: [u8; 32] = [
            0xec, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ];
        let mut bytes = [0u8; 64];
        bytes[32..].copy_from_slice(&ell_minus_one);
        let sig = Signature::from_bytes(&bytes);
        let s = sig.s_scalar().unwrap();
        assert_eq!(s.to_bytes(), ell_minus_one);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_round_trip() {
        let mut bytes = [7u8; 64];
        bytes[63] = 0x05;
        let sig = Signature::from_bytes(&bytes);

        let encoded = bincode::serialize(&sig).unwrap();
        assert_eq!(encoded.len(), 64);
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();
        assert_eq!(decoded, sig);
    }
}

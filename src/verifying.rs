// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! ed25519 public keys.

use core::fmt::Debug;
use core::hash::{Hash, Hasher};

use sha2::{Digest, Sha512};

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::SignatureError;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::signing::{ExpandedSecretKey, SigningKey};

/// The length of an ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An ed25519 public key.
///
/// # Note
///
/// The `Eq` and `Hash` impls here use the compressed Edwards y
/// encoding, _not_ the algebraic representation.  If this
/// `VerifyingKey` is non-canonically encoded, it will be considered
/// unequal to the other equivalent encoding, despite the two
/// representing the same point.
// Invariant: `point` is always the decompression of `compressed`.
#[derive(Copy, Clone, Default, Eq)]
pub struct VerifyingKey {
    /// Serialized compressed Edwards-y point.
    pub(crate) compressed: CompressedEdwardsY,

    /// Decompressed Edwards point used for curve arithmetic operations.
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "VerifyingKey({:?})", self.compressed)
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl PartialEq<VerifyingKey> for VerifyingKey {
    fn eq(&self, other: &VerifyingKey) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl From<&ExpandedSecretKey> for VerifyingKey {
    /// Derive this public key from its corresponding `ExpandedSecretKey`.
    fn from(expanded_secret_key: &ExpandedSecretKey) -> VerifyingKey {
        let point = EdwardsPoint::mul_base(&expanded_secret_key.scalar);
        // Invariant: `point` is always the decompression of `compressed`.
        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(signing_key: &SigningKey) -> VerifyingKey {
        signing_key.verifying_key()
    }
}

impl VerifyingKey {
    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &(self.compressed).0
    }

    /// Construct a `VerifyingKey` from the bytes of a compressed point.
    ///
    /// Fails with [`SignatureError::InvalidEncoding`] if the bytes are
    /// not the encoding of a curve point.
    #[inline]
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<VerifyingKey, SignatureError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = compressed
            .decompress()
            .ok_or(SignatureError::InvalidEncoding)?;

        // Invariant: `point` is always the decompression of `compressed`.
        Ok(VerifyingKey { compressed, point })
    }

    /// Returns whether this is a _weak_ public key, i.e., whether the
    /// point it encodes has small order.
    ///
    /// A weak public key can validate signatures over almost every
    /// message.  Verification does not refuse such keys; callers that
    /// care should check this property themselves.
    pub fn is_weak(&self) -> bool {
        self.point.is_small_order()
    }

    /// Compute the challenge scalar H(R ‖ A ‖ M) mod ℓ.
    #[allow(non_snake_case)]
    fn compute_challenge(R: &CompressedEdwardsY, A: &CompressedEdwardsY, M: &[u8]) -> Scalar {
        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(A.as_bytes());
        h.update(M);
        Scalar::from_hash(h)
    }

    // Compute the _expected_ R component of the signature; the caller
    // compares it to the claimed one.  Returning the compressed form
    // and byte-comparing means non-canonically encoded R values never
    // verify.
    #[allow(non_snake_case)]
    fn recompute_R(&self, signature: &Signature, s: &Scalar, M: &[u8]) -> CompressedEdwardsY {
        let k = Self::compute_challenge(&signature.R, &self.compressed, M);
        let minus_A: EdwardsPoint = -self.point;
        // The (non-batched) verification equation: [k](-A) + [s]B = R.
        EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, s).compress()
    }

    /// Verify a signature on a message with this public key.
    ///
    /// Returns `Ok(())` if the signature is valid, and `Err` otherwise.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        let s = signature.s_scalar()?;

        let expected_R = self.recompute_R(signature, &s, message);
        if expected_R == signature.R {
            Ok(())
        } else {
            Err(SignatureError::VerificationFailed)
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for VerifyingKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(PUBLIC_KEY_LENGTH)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VerifyingKeyVisitor;

        impl<'de> Visitor<'de> for VerifyingKeyVisitor {
            type Value = VerifyingKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("an ed25519 verifying (public) key as 32 bytes")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<VerifyingKey, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
                #[allow(clippy::needless_range_loop)]
                for i in 0..PUBLIC_KEY_LENGTH {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                VerifyingKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_tuple(PUBLIC_KEY_LENGTH, VerifyingKeyVisitor)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants;
    use crate::traits::Identity;

    #[test]
    fn from_bytes_round_trips() {
        // RFC 8032 test 1 public key.
        let bytes: [u8; 32] = [
            0xd7, 0x5a, 0x98, 0x01, 0x82, 0xb1, 0x0a, 0xb7, 0xd5, 0x4b, 0xfe, 0xd3, 0xc9, 0x64,
            0x07, 0x3a, 0x0e, 0xe1, 0x72, 0xf3, 0xda, 0xa6, 0x23, 0x25, 0xaf, 0x02, 0x1a, 0x68,
            0xf7, 0x07, 0x51, 0x1a,
        ];
        let key = VerifyingKey::from_bytes(&bytes).unwrap();
        assert_eq!(key.to_bytes(), bytes);
        assert_eq!(key.as_bytes(), &bytes);
        assert!(!key.is_weak());
    }

    #[test]
    fn from_bytes_rejects_invalid_encoding() {
        // The basepoint encoding with its low byte set to 1 does not
        // name a curve point.
        let mut bytes = constants::ED25519_BASEPOINT_COMPRESSED.to_bytes();
        bytes[0] = 1;
        assert_eq!(
            VerifyingKey::from_bytes(&bytes),
            Err(SignatureError::InvalidEncoding)
        );
    }

    #[test]
    fn identity_key_is_weak() {
        let identity_bytes = CompressedEdwardsY::identity().to_bytes();
        let key = VerifyingKey::from_bytes(&identity_bytes).unwrap();
        assert!(key.is_weak());
    }
}

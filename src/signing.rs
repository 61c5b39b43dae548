// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! ed25519 secret key types.

use core::fmt::Debug;

use rand_core::CryptoRngCore;

use sha2::{Digest, Sha512};

use subtle::{Choice, ConstantTimeEq};

use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::SignatureError;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::verifying::VerifyingKey;

/// The length of an ed25519 seed in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// The seed half of an ed25519 keypair: 32 bytes of entropy from which
/// the signing scalar and nonce prefix are derived by hashing.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];

/// An ed25519 signing key which can be used to produce signatures.
///
/// Instances of this secret are automatically overwritten with zeroes
/// when they fall out of scope.
// Invariant: `verifying_key` is always the public half of `secret_key`.
#[derive(Clone)]
pub struct SigningKey {
    /// The secret half of this signing key.
    pub(crate) secret_key: SecretKey,
    /// The public half of this signing key, cached at construction.
    pub(crate) verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Construct a `SigningKey` from a 32-byte seed.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_bosco::{SecretKey, SigningKey};
    ///
    /// let seed: SecretKey = [
    ///    157, 097, 177, 157, 239, 253, 090, 096,
    ///    186, 132, 074, 244, 146, 236, 044, 196,
    ///    068, 073, 197, 105, 123, 050, 105, 025,
    ///    112, 059, 172, 003, 028, 174, 127, 096, ];
    ///
    /// let signing_key = SigningKey::from_bytes(&seed);
    /// assert_eq!(signing_key.to_bytes(), seed);
    /// ```
    #[inline]
    pub fn from_bytes(secret_key: &SecretKey) -> Self {
        let verifying_key = VerifyingKey::from(&ExpandedSecretKey::from(secret_key));
        Self {
            secret_key: *secret_key,
            verifying_key,
        }
    }

    /// Convert this signing key to its seed bytes.
    #[inline]
    pub fn to_bytes(&self) -> SecretKey {
        self.secret_key
    }

    /// View this signing key as its seed bytes.
    #[inline]
    pub fn as_bytes(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Generate an ed25519 signing key from `csprng`.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_bosco::SigningKey;
    /// use rand::rngs::OsRng;
    ///
    /// let mut csprng = OsRng;
    /// let signing_key = SigningKey::generate(&mut csprng);
    /// ```
    pub fn generate<R: CryptoRngCore + ?Sized>(csprng: &mut R) -> SigningKey {
        let mut secret = SecretKey::default();
        csprng.fill_bytes(&mut secret);
        let signing_key = Self::from_bytes(&secret);
        secret.zeroize();
        signing_key
    }

    /// The public half of this keypair.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign `message` with this key, producing the deterministic
    /// signature of RFC 8032.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded: ExpandedSecretKey = (&self.secret_key).into();
        expanded.sign(message, &self.verifying_key)
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.verifying_key.verify(message, signature)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive() // avoids printing `secret_key`
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key.ct_eq(&other.secret_key)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SigningKey {}

impl Zeroize for SigningKey {
    fn zeroize(&mut self) {
        self.secret_key.zeroize()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.zeroize()
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl From<&SecretKey> for SigningKey {
    fn from(secret_key: &SecretKey) -> Self {
        Self::from_bytes(secret_key)
    }
}

impl From<SecretKey> for SigningKey {
    fn from(secret_key: SecretKey) -> Self {
        Self::from_bytes(&secret_key)
    }
}

#[cfg(feature = "serde")]
impl Serialize for SigningKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tup = serializer.serialize_tuple(SECRET_KEY_LENGTH)?;
        for byte in self.as_bytes().iter() {
            tup.serialize_element(byte)?;
        }
        tup.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SigningKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SigningKeyVisitor;

        impl<'de> Visitor<'de> for SigningKeyVisitor {
            type Value = SigningKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("an ed25519 signing (secret) key as 32 bytes")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<SigningKey, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut bytes = [0u8; SECRET_KEY_LENGTH];
                #[allow(clippy::needless_range_loop)]
                for i in 0..SECRET_KEY_LENGTH {
                    bytes[i] = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &"expected 32 bytes"))?;
                }
                Ok(SigningKey::from_bytes(&bytes))
            }
        }

        deserializer.deserialize_tuple(SECRET_KEY_LENGTH, SigningKeyVisitor)
    }
}

/// An "expanded" secret key: the output of hashing a seed with SHA-512,
/// split in half.  The lower half, clamped, is the actual scalar used
/// to sign; the upper half is the prefix hashed with the message to
/// derive the deterministic nonce.
///
/// Instances of this secret are automatically overwritten with zeroes
/// when they fall out of scope.
pub(crate) struct ExpandedSecretKey {
    /// The clamped signing scalar.
    pub(crate) scalar: Scalar,
    /// The nonce-derivation prefix.
    pub(crate) hash_prefix: [u8; 32],
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize()
    }
}

impl From<&SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &SecretKey) -> ExpandedSecretKey {
        let mut h = Sha512::new();
        let mut hash: [u8; 64] = [0u8; 64];
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        h.update(secret_key);
        hash.copy_from_slice(h.finalize().as_slice());

        lower.copy_from_slice(&hash[00..32]);
        upper.copy_from_slice(&hash[32..64]);

        // RFC 8032 clamping: clear the cofactor bits, set bit 254.
        lower[0] &= 248;
        lower[31] &= 127;
        lower[31] |= 64;

        let expanded = ExpandedSecretKey {
            // Only the class mod ℓ matters: the basepoint has order ℓ,
            // and s is computed mod ℓ.
            scalar: Scalar::from_bytes_mod_order(lower),
            hash_prefix: upper,
        };

        hash.zeroize();
        lower.zeroize();

        expanded
    }
}

impl ExpandedSecretKey {
    /// Sign a message with this `ExpandedSecretKey`.
    #[allow(non_snake_case)]
    pub(crate) fn sign(&self, message: &[u8], verifying_key: &VerifyingKey) -> Signature {
        let mut h = Sha512::new();
        h.update(self.hash_prefix);
        h.update(message);

        let r = Scalar::from_hash(h);
        let R: CompressedEdwardsY = EdwardsPoint::mul_base(&r).compress();

        h = Sha512::new();
        h.update(R.as_bytes());
        h.update(verifying_key.as_bytes());
        h.update(message);

        let k = Scalar::from_hash(h);
        let s: Scalar = &(&k * &self.scalar) + &r;

        Signature {
            R,
            s_bytes: s.to_bytes(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn seed_from_hex(h: &str) -> SecretKey {
        hex::decode(h).unwrap().try_into().unwrap()
    }

    /// RFC 8032 test vector 1: empty message.
    #[test]
    fn rfc8032_test_vector_1() {
        let seed =
            seed_from_hex("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
        let signing_key = SigningKey::from_bytes(&seed);

        assert_eq!(
            hex::encode(signing_key.verifying_key().as_bytes()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );

        let signature = signing_key.sign(b"");
        assert_eq!(
            hex::encode(signature.to_bytes()),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert!(signing_key.verify(b"", &signature).is_ok());
    }

    /// RFC 8032 test vector 2: one-byte message.
    #[test]
    fn rfc8032_test_vector_2() {
        let seed =
            seed_from_hex("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb");
        let signing_key = SigningKey::from_bytes(&seed);

        assert_eq!(
            hex::encode(signing_key.verifying_key().as_bytes()),
            "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"
        );

        let message = [0x72u8];
        let signature = signing_key.sign(&message);
        assert_eq!(
            hex::encode(signature.to_bytes()),
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
             085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        );
        assert!(signing_key.verify(&message, &signature).is_ok());
    }

    #[test]
    fn verifying_key_from_signing_key_and_expanded_agree() {
        let seed = [0x42u8; 32];
        let signing_key = SigningKey::from_bytes(&seed);
        let expanded = ExpandedSecretKey::from(&seed);

        assert_eq!(VerifyingKey::from(&signing_key), VerifyingKey::from(&expanded));
        assert_eq!(signing_key.verifying_key(), VerifyingKey::from(&expanded));
    }

    #[test]
    fn signing_key_zeroize_on_drop() {
        let secret_ptr: *const u8;

        // scope for the secret to ensure it's been dropped
        {
            let signing_key = SigningKey::from_bytes(&[0x15u8; 32]);
            secret_ptr = signing_key.secret_key.as_ptr();
        }

        let memory: &[u8] = unsafe { core::slice::from_raw_parts(secret_ptr, 32) };

        assert!(!memory.contains(&0x15));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_bincode_round_trip() {
        let signing_key = SigningKey::from_bytes(&[0x1fu8; 32]);

        let encoded = bincode::serialize(&signing_key).unwrap();
        assert_eq!(encoded.len(), 32);
        let decoded: SigningKey = bincode::deserialize(&encoded).unwrap();

        assert_eq!(decoded, signing_key);
        assert_eq!(decoded.verifying_key(), signing_key.verifying_key());
    }
}

// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Integration tests for ed25519-bosco.

use ed25519_bosco::*;

use rand::rngs::OsRng;
use rand::RngCore;

mod vectors {
    use super::*;

    /// Test vectors from RFC 8032 §7.1, as (seed, public key, message,
    /// signature) hex strings.
    static TESTVECTORS: [(&str, &str, &str, &str); 4] = [
        (
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            "",
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        ),
        (
            "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            "72",
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
             085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        ),
        (
            "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            "af82",
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
             18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        ),
        (
            "f5e5767cf153319517630f226876b86c8160cc583bc013744c6bf255f5cc0ee5",
            "278117fc144c72340f67d0f2316e8386ceffbf2b2428c9c51fef7c597f1d426e",
            "08b8b2b733424243760fe426a4b54908632110a66c2f6591eabd3345e3e4eb98\
             fa6e264bf09efe12ee50f8f54e9f77b1e355f6c50544e23fb1433ddf73be84d8\
             79de7c0046dc4996d9e773f4bc9efe5738829adb26c81b37c93a1b270b20329d\
             658675fc6ea534e0810a4432826bf58c941efb65d57a338bbd2e26640f89ffbc\
             1a858efcb8550ee3a5e1998bd177e93a7363c344fe6b199ee5d02e82d522c4fe\
             ba15452f80288a821a579116ec6dad2b3b310da903401aa62100ab5d1a36553e\
             06203b33890cc9b832f79ef80560ccb9a39ce767967ed628c6ad573cb116dbef\
             efd75499da96bd68a8a97b928a8bbc103b6621fcde2beca1231d206be6cd9ec7\
             aff6f6c94fcd7204ed3455c68c83f4a41da4af2b74ef5c53f1d8ac70bdcb7ed1\
             85ce81bd84359d44254d95629e9855a94a7c1958d1f8ada5d0532ed8a5aa3fb2\
             d17ba70eb6248e594e1a2297acbbb39d502f1a8c6eb6f1ce22b3de1a1f40cc24\
             554119a831a9aad6079cad88425de6bde1a9187ebb6092cf67bf2b13fd65f270\
             88d78b7e883c8759d2c4f5c65adb7553878ad575f9fad878e80a0c9ba63bcbcc\
             2732e69485bbc9c90bfbd62481d9089beccf80cfe2df16a2cf65bd92dd597b07\
             07e0917af48bbb75fed413d238f5555a7a569d80c3414a8d0859dc65a46128ba\
             b27af87a71314f318c782b23ebfe808b82b0ce26401d2e22f04d83d1255dc51a\
             ddd3b75a2b1ae0784504df543af8969be3ea7082ff7fc9888c144da2af58429e\
             c96031dbcad3dad9af0dcbaaaf268cb8fcffead94f3c7ca495e056a9b47acdb7\
             51fb73e666c6c655ade8297297d07ad1ba5e43f1bca32301651339e22904cc8c\
             42f58c30c04aafdb038dda0847dd988dcda6f3bfd15c4b4c4525004aa06eeff8\
             ca61783aacec57fb3d1f92b0fe2fd1a85f6724517b65e614ad6808d6f6ee34df\
             f7310fdc82aebfd904b01e1dc54b2927094b2db68d6f903b68401adebf5a7e08\
             d78ff4ef5d63653a65040cf9bfd4aca7984a74d37145986780fc0b16ac451649\
             de6188a7dbdf191f64b5fc5e2ab47b57f7f7276cd419c17a3ca8e1b939ae49e4\
             88acba6b965610b5480109c8b17b80e1b7b750dfc7598d5d5011fd2dcc5600a3\
             2ef5b52a1ecc820e308aa342721aac0943bf6686b64b2579376504ccc493d97e\
             6aed3fb0f9cd71a43dd497f01f17c0e2cb3797aa2a2f256656168e6c496afc5f\
             b93246f6b1116398a346f1a641f3b041e989f7914f90cc2c7fff357876e506b5\
             0d334ba77c225bc307ba537152f3f1610e4eafe595f6d9d90d11faa933a15ef1\
             369546868a7f3a45a96768d40fd9d03412c091c6315cf4fde7cb68606937380d\
             b2eaaa707b4c4185c32eddcdd306705e4dc1ffc872eeee475a64dfac86aba41c\
             0618983f8741c5ef68d3a101e8a3b8cac60c905c15fc910840b94c00a0b9d0",
            "0aab4c900501b3e24d7cdf4663326a3a87df5e4843b2cbdb67cbf6e460fec350\
             aa5371b1508f9f4528ecea23c436d94b5e8fcd4f681e30a6ac00a9704a188a03",
        ),
    ];

    #[test]
    fn against_reference_implementation() {
        for (i, (seed, public, message, signature)) in TESTVECTORS.iter().enumerate() {
            let seed: [u8; 32] = hex::decode(seed).unwrap().try_into().unwrap();
            let pub_bytes: [u8; 32] = hex::decode(public).unwrap().try_into().unwrap();
            let msg_bytes: Vec<u8> = hex::decode(message).unwrap();
            let sig_bytes: [u8; 64] = hex::decode(signature).unwrap().try_into().unwrap();

            let signing_key = SigningKey::from_bytes(&seed);
            let expected_verifying_key = VerifyingKey::from_bytes(&pub_bytes).unwrap();
            assert_eq!(
                expected_verifying_key,
                signing_key.verifying_key(),
                "public key mismatch on vector {}",
                i
            );

            let sig1 = Signature::from_bytes(&sig_bytes);
            let sig2 = signing_key.sign(&msg_bytes);
            assert_eq!(sig1, sig2, "signature bytes not equal on vector {}", i);
            assert!(
                expected_verifying_key.verify(&msg_bytes, &sig2).is_ok(),
                "signature verification failed on vector {}",
                i
            );
        }
    }
}

mod integrations {
    use super::*;

    #[test]
    fn sign_verify() {
        let good: &[u8] = "test message".as_bytes();
        let bad: &[u8] = "wrong message".as_bytes();

        let mut csprng = OsRng;

        let signing_key: SigningKey = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();
        let good_sig: Signature = signing_key.sign(good);
        let bad_sig: Signature = signing_key.sign(bad);

        // An honestly generated public key is not weak.
        assert!(!verifying_key.is_weak());

        assert!(
            verifying_key.verify(good, &good_sig).is_ok(),
            "Verification of a valid signature failed!"
        );
        assert!(
            verifying_key.verify(good, &bad_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            verifying_key.verify(bad, &good_sig).is_err(),
            "Verification of a signature on a different message passed!"
        );
    }

    /// Flipping any single byte of the message, the public key, or the
    /// signature must reject.
    #[test]
    fn single_byte_mutations_reject() {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        let verifying_key = signing_key.verifying_key();
        let message = b"attack at dawn".to_vec();
        let signature = signing_key.sign(&message);

        for i in 0..message.len() {
            let mut tampered = message.clone();
            tampered[i] ^= 0x40;
            assert!(
                verifying_key.verify(&tampered, &signature).is_err(),
                "mutation of message byte {} accepted",
                i
            );
        }

        for i in 0..32 {
            let mut key_bytes = verifying_key.to_bytes();
            key_bytes[i] ^= 0x40;
            // A flipped key byte either stops decoding or fails to
            // verify; both count as rejection.
            match VerifyingKey::from_bytes(&key_bytes) {
                Err(_) => {}
                Ok(tampered_key) => assert!(
                    tampered_key.verify(&message, &signature).is_err(),
                    "mutation of public key byte {} accepted",
                    i
                ),
            }
        }

        for i in 0..64 {
            let mut sig_bytes = signature.to_bytes();
            sig_bytes[i] ^= 0x40;
            let tampered_sig = Signature::from_bytes(&sig_bytes);
            assert!(
                verifying_key.verify(&message, &tampered_sig).is_err(),
                "mutation of signature byte {} accepted",
                i
            );
        }
    }

    #[test]
    fn verify_batch_of_max_size() {
        let mut csprng = OsRng;
        let messages: Vec<Vec<u8>> = (0..MAX_BATCH_SIZE)
            .map(|i| format!("message number {}", i).into_bytes())
            .collect();
        let message_slices: Vec<&[u8]> = messages.iter().map(|m| m.as_slice()).collect();

        let signing_keys: Vec<SigningKey> = (0..MAX_BATCH_SIZE)
            .map(|_| SigningKey::generate(&mut csprng))
            .collect();
        let signatures: Vec<Signature> = signing_keys
            .iter()
            .zip(message_slices.iter())
            .map(|(key, message)| key.sign(message))
            .collect();
        let verifying_keys: Vec<VerifyingKey> = signing_keys
            .iter()
            .map(|key| key.verifying_key())
            .collect();

        assert!(verify_batch(&message_slices, &signatures, &verifying_keys).is_ok());
    }

    /// One random scalar in an otherwise-valid full batch rejects the
    /// whole batch.
    #[test]
    fn one_random_scalar_rejects_full_batch() {
        let mut csprng = OsRng;
        let message: &[u8] = b"the same message, sixty-four times";
        let messages: Vec<&[u8]> = (0..MAX_BATCH_SIZE).map(|_| message).collect();

        let signing_keys: Vec<SigningKey> = (0..MAX_BATCH_SIZE)
            .map(|_| SigningKey::generate(&mut csprng))
            .collect();
        let mut signatures: Vec<Signature> =
            signing_keys.iter().map(|key| key.sign(message)).collect();
        let verifying_keys: Vec<VerifyingKey> = signing_keys
            .iter()
            .map(|key| key.verifying_key())
            .collect();

        let mut bytes = signatures[37].to_bytes();
        csprng.fill_bytes(&mut bytes[32..]);
        // Keep s canonical so the corruption is caught by the batch
        // equation, not the scalar decoder.
        bytes[63] &= 0x0f;
        signatures[37] = Signature::from_bytes(&bytes);

        assert!(verify_batch(&messages, &signatures, &verifying_keys).is_err());
    }

    #[test]
    fn verify_batch_empty() {
        assert!(verify_batch(&[], &[], &[]).is_ok());
    }

    #[test]
    fn verify_batch_too_large() {
        let n = MAX_BATCH_SIZE + 1;
        let mut csprng = OsRng;
        let message: &[u8] = b"one too many";
        let messages: Vec<&[u8]> = (0..n).map(|_| message).collect();
        let signing_key = SigningKey::generate(&mut csprng);
        let signatures = vec![signing_key.sign(message); n];
        let verifying_keys = vec![signing_key.verifying_key(); n];

        assert_eq!(
            verify_batch(&messages, &signatures, &verifying_keys),
            Err(SignatureError::InputTooLarge {
                capacity: MAX_BATCH_SIZE
            })
        );
    }

    /// The batch decision does not depend on the order the triples are
    /// supplied in.
    #[test]
    fn verify_batch_order_independent() {
        let mut csprng = OsRng;
        let messages: [&[u8]; 4] = [b"north", b"east", b"south", b"west"];
        let signing_keys: Vec<SigningKey> = (0..4)
            .map(|_| SigningKey::generate(&mut csprng))
            .collect();
        let signatures: Vec<Signature> = signing_keys
            .iter()
            .zip(messages.iter())
            .map(|(key, message)| key.sign(message))
            .collect();
        let verifying_keys: Vec<VerifyingKey> = signing_keys
            .iter()
            .map(|key| key.verifying_key())
            .collect();

        assert!(verify_batch(&messages, &signatures, &verifying_keys).is_ok());

        let perm = [2usize, 0, 3, 1];
        let permuted_messages: Vec<&[u8]> = perm.iter().map(|&i| messages[i]).collect();
        let permuted_signatures: Vec<Signature> = perm.iter().map(|&i| signatures[i]).collect();
        let permuted_keys: Vec<VerifyingKey> = perm.iter().map(|&i| verifying_keys[i]).collect();

        assert!(verify_batch(&permuted_messages, &permuted_signatures, &permuted_keys).is_ok());
    }

    /// A batch rejection does not say which signature failed; callers
    /// fall back to one-at-a-time verification to localize it.
    #[test]
    fn batch_failure_localized_by_fallback() {
        let mut csprng = OsRng;
        let messages: [&[u8]; 5] = [b"alpha", b"bravo", b"charlie", b"delta", b"echo"];
        let signing_keys: Vec<SigningKey> = (0..5)
            .map(|_| SigningKey::generate(&mut csprng))
            .collect();
        let mut signatures: Vec<Signature> = signing_keys
            .iter()
            .zip(messages.iter())
            .map(|(key, message)| key.sign(message))
            .collect();
        let verifying_keys: Vec<VerifyingKey> = signing_keys
            .iter()
            .map(|key| key.verifying_key())
            .collect();

        // Swap two signatures: the batch rejects, and individual
        // verification finds exactly the swapped entries.
        signatures.swap(1, 3);
        assert_eq!(
            verify_batch(&messages, &signatures, &verifying_keys),
            Err(SignatureError::VerificationFailed)
        );

        let bad: Vec<usize> = (0..5)
            .filter(|&i| verifying_keys[i].verify(messages[i], &signatures[i]).is_err())
            .collect();
        assert_eq!(bad, vec![1, 3]);
    }
}

#[cfg(feature = "serde")]
mod serialisation {
    use super::*;

    static SECRET_KEY_BYTES: [u8; SECRET_KEY_LENGTH] = [
        062, 070, 027, 163, 092, 182, 011, 003, 077, 234, 098, 004, 011, 127, 079, 228, 243, 187,
        150, 073, 201, 137, 076, 022, 085, 251, 152, 002, 241, 042, 072, 054,
    ];

    #[test]
    fn serialize_deserialize_signature_bincode() {
        let signing_key = SigningKey::from_bytes(&SECRET_KEY_BYTES);
        let signature: Signature = signing_key.sign(b"");

        let encoded: Vec<u8> = bincode::serialize(&signature).unwrap();
        assert_eq!(encoded.len(), SIGNATURE_LENGTH);
        let decoded: Signature = bincode::deserialize(&encoded).unwrap();

        assert_eq!(signature, decoded);
    }

    #[test]
    fn serialize_deserialize_verifying_key_bincode() {
        let signing_key = SigningKey::from_bytes(&SECRET_KEY_BYTES);
        let verifying_key = signing_key.verifying_key();

        let encoded: Vec<u8> = bincode::serialize(&verifying_key).unwrap();
        assert_eq!(encoded.len(), PUBLIC_KEY_LENGTH);
        let decoded: VerifyingKey = bincode::deserialize(&encoded).unwrap();

        assert_eq!(verifying_key, decoded);
    }

    #[test]
    fn serialize_deserialize_signing_key_bincode() {
        let signing_key = SigningKey::from_bytes(&SECRET_KEY_BYTES);

        let encoded: Vec<u8> = bincode::serialize(&signing_key).unwrap();
        assert_eq!(encoded.len(), SECRET_KEY_LENGTH);
        let decoded: SigningKey = bincode::deserialize(&encoded).unwrap();

        assert_eq!(signing_key.to_bytes(), decoded.to_bytes());
        assert_eq!(signing_key.verifying_key(), decoded.verifying_key());
    }
}

// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/ed25519-bosco/0.1.0")]

//! Ed25519 signing and verification, including batch verification by
//! Bos-Coster multiscalar reduction.
//!
//! The curve arithmetic is written from scratch on a 5-limb radix-51
//! field representation with deferred carries and a 5-limb radix-56
//! scalar representation with Barrett reduction, and is exposed in the
//! [`edwards`] and [`scalar`] modules for callers who need the group
//! rather than the signature scheme.
//!
//! # Signing and verifying
//!
//! ```
//! use ed25519_bosco::{Signature, SigningKey};
//! use rand::rngs::OsRng;
//!
//! let signing_key = SigningKey::generate(&mut OsRng);
//! let message: &[u8] = b"submitted for your approval";
//! let signature: Signature = signing_key.sign(message);
//!
//! let verifying_key = signing_key.verifying_key();
//! assert!(verifying_key.verify(message, &signature).is_ok());
//!
//! // Signatures and keys travel as fixed-size byte arrays.
//! let parsed = Signature::from_bytes(&signature.to_bytes());
//! assert_eq!(signature, parsed);
//! ```
//!
//! # Batch verification
//!
//! [`verify_batch`] checks up to 64 signatures in one multiscalar
//! equation, far more cheaply than checking them one at a time.  Its
//! randomizers are derived deterministically from a transcript of the
//! batch, so verification never consumes system randomness.
//!
//! # Timing
//!
//! Everything touching secret material runs in constant time: scalar
//! arithmetic is branchless, and fixed- and variable-base
//! multiplication read their lookup tables with masked selection
//! rather than secret-indexed loads.  Verification operates only on
//! public data and uses faster variable-time paths.
//!
//! # Features
//!
//! * `std` (default): implements `std::error::Error` for
//!   [`SignatureError`].  Disable for `no_std` builds; no allocator is
//!   required.
//! * `serde`: serialization for keys, points, scalars, and signatures.

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// Curve modules
//------------------------------------------------------------------------

// Useful constants, like the Ed25519 basepoint
pub mod constants;

// Point operations on the Edwards form of Curve25519
pub mod edwards;

// Scalar arithmetic mod l = 2^252 + ..., the order of the basepoint
pub mod scalar;

// External (and internal) traits.
pub mod traits;

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// Point representations used inside the group law
pub(crate) mod curve_models;

// Generic code for window lookups
pub(crate) mod window;

//------------------------------------------------------------------------
// Signature modules
//------------------------------------------------------------------------

mod batch;
mod errors;
mod signature;
mod signing;
mod verifying;

pub use crate::batch::{verify_batch, MAX_BATCH_SIZE};
pub use crate::errors::SignatureError;
pub use crate::signature::{Signature, SIGNATURE_LENGTH};
pub use crate::signing::{SecretKey, SigningKey, SECRET_KEY_LENGTH};
pub use crate::verifying::{VerifyingKey, PUBLIC_KEY_LENGTH};

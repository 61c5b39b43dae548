// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Errors which may occur when parsing keys and/or signatures to or
//! from wire formats, or when verification fails.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while processing signatures and keypairs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SignatureError {
    /// A compressed point failed to decompress, or a signature carried
    /// a non-canonical scalar.
    InvalidEncoding,
    /// The input was well-formed but the verification equation was not
    /// satisfied.
    ///
    /// For batch verification this is all-or-nothing: the batch
    /// contains at least one invalid signature, with no indication of
    /// which.  Fall back to verifying one at a time to find it.
    VerificationFailed,
    /// A batch exceeded the verifier's capacity.
    InputTooLarge {
        /// The largest batch size the verifier accepts.
        capacity: usize,
    },
}

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SignatureError::InvalidEncoding => {
                write!(f, "Cannot decode compressed point or scalar")
            }
            SignatureError::VerificationFailed => {
                write!(f, "Verification equation was not satisfied")
            }
            SignatureError::InputTooLarge { capacity } => {
                write!(f, "Batch exceeds maximum size of {} signatures", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignatureError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_names_the_capacity() {
        let e = SignatureError::InputTooLarge { capacity: 64 };
        assert_eq!(
            e.to_string(),
            "Batch exceeds maximum size of 64 signatures"
        );
    }
}

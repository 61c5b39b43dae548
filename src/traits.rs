// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Traits shared by the point representations.

use subtle::ConstantTimeEq;

/// A point type with an identity element.
pub trait Identity {
    /// Returns the identity element of the curve.
    /// Can be used as a constructor.
    fn identity() -> Self;
}

/// Testing whether a curve point is equivalent to the identity point.
pub trait IsIdentity {
    /// Return true if this element is the identity element of the curve.
    fn is_identity(&self) -> bool;
}

/// Implement generic identity equality testing for point
/// representations with constant-time equality and a defined identity
/// constructor.
impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        self.ct_eq(&T::identity()).into()
    }
}

/// Checking whether a point's coordinates satisfy the curve equation.
///
/// This trait is only for debugging and testing; the public API never
/// hands out invalid points, so release code has no reason to ask.
pub(crate) trait ValidityCheck {
    /// Checks whether the point is on the curve. Not constant-time.
    fn is_valid(&self) -> bool;
}

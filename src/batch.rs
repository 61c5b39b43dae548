// -*- mode: rust; -*-
//
// This file is part of ed25519-bosco.
// See LICENSE for licensing information.

//! Batch signature verification.
//!
//! Verifying a batch folds every signature equation into one
//! multiscalar sum.  Given signatures \\((R_i, s_i)\\) by keys
//! \\(A_i\\) over messages \\(M_i\\), with challenge scalars
//! \\(h_i = H(R_i \Vert A_i \Vert M_i)\\) and per-signature 128-bit
//! randomizers \\(z_i\\), the batch accepts iff
//!
//! $$
//!     \Big(\sum_i z_i s_i \mod \ell\Big) B
//!     + \sum_i (z_i h_i \mod \ell)(-A_i)
//!     + \sum_i z_i (-R_i) = 0.
//! $$
//!
//! The sum is evaluated by Bos-Coster reduction: the terms live in an
//! arena of (scalar, point) pairs under a bounded binary max-heap of
//! indices, and the two largest terms \\((s_1, P_1)\\), \\((s_2,
//! P_2)\\) are repeatedly replaced by \\((s_1 - s_2, P_1)\\) and
//! \\((s_2, P_1 + P_2)\\) until a single term survives.  The
//! randomizer terms enter the heap late: \\(z_i\\) is only 128 bits,
//! so the \\((z_i, -R_i)\\) entries join once the working scalars
//! have shrunk to that size.
//!
//! The randomizers are deterministic, derived from a merlin
//! transcript of the batch itself, so verification consumes no system
//! randomness and a given batch always verifies the same way.  An
//! invalid batch is rejected as a whole: the sum does not say which
//! signature failed, and callers who need to know must fall back to
//! verifying the signatures one by one.

use merlin::Transcript;
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

use crate::constants;
use crate::edwards::EdwardsPoint;
use crate::errors::SignatureError;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::traits::{Identity, IsIdentity};
use crate::verifying::VerifyingKey;

/// The largest number of signatures a single batch call accepts.
///
/// Longer runs must be split by the caller; [`verify_batch`] refuses
/// them with [`SignatureError::InputTooLarge`] rather than silently
/// verifying a prefix.
pub const MAX_BATCH_SIZE: usize = 64;

/// Arena capacity: two terms per signature, plus one for the basepoint.
const HEAP_BATCH_SIZE: usize = 2 * MAX_BATCH_SIZE + 1;

/// Index of the highest scalar limb; comparisons start there.
const TOP_LIMB: usize = 4;

trait BatchTranscript {
    fn append_hrams(&mut self, hrams: &[Scalar]);
    fn append_message_lengths(&mut self, messages: &[&[u8]]);
}

impl BatchTranscript for Transcript {
    /// Absorb the computed `H(R||A||M)`s, each prefixed with its index
    /// in the batch.
    fn append_hrams(&mut self, hrams: &[Scalar]) {
        for (i, hram) in hrams.iter().enumerate() {
            self.append_u64(b"", i as u64);
            self.append_message(b"hram", &hram.to_bytes());
        }
    }

    fn append_message_lengths(&mut self, messages: &[&[u8]]) {
        for (i, message) in messages.iter().enumerate() {
            self.append_u64(b"", i as u64);
            self.append_u64(b"mlen", message.len() as u64);
        }
    }
}

/// An implementation of `rand_core::RngCore` which supplies no
/// randomness at all, so that the transcript RNG is a pure function of
/// the absorbed batch.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    /// A no-op which leaves the destination bytes unchanged.
    ///
    /// merlin zero-initialises the buffer it rekeys with, so
    /// finalising against this keys the STROBE state with a block of
    /// zeroes, the same operation as a STROBE MAC of the transcript
    /// state.
    fn fill_bytes(&mut self, _dest: &mut [u8]) {}

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for ZeroRng {}

/// The Bos-Coster working set: parallel arenas of scalars and points,
/// with a binary max-heap of arena indices keyed on scalar magnitude.
///
/// The heap is an index array rather than a pointer structure, and the
/// capacity is fixed, so a reduction allocates nothing.
struct BatchHeap {
    size: usize,
    heap: [usize; HEAP_BATCH_SIZE],
    scalars: [Scalar; HEAP_BATCH_SIZE],
    points: [EdwardsPoint; HEAP_BATCH_SIZE],
}

impl BatchHeap {
    fn new() -> BatchHeap {
        BatchHeap {
            size: 0,
            heap: [0; HEAP_BATCH_SIZE],
            scalars: [Scalar::ZERO; HEAP_BATCH_SIZE],
            points: [EdwardsPoint::identity(); HEAP_BATCH_SIZE],
        }
    }

    /// Append the next arena entry to the heap and sift it up.
    fn insert_next(&mut self) {
        let mut node = self.size;
        self.heap[node] = node;
        while node > 0 {
            let parent = (node - 1) / 2;
            if !self.scalars[self.heap[parent]].prefix_lt(&self.scalars[self.heap[node]], TOP_LIMB)
            {
                break;
            }
            self.heap.swap(parent, node);
            node = parent;
        }
        self.size += 1;
    }

    /// Start the heap over with the first `count` arena entries.
    ///
    /// `count` must be odd and at least 3, so that the root always has
    /// two children to compare.
    fn rebuild(&mut self, count: usize) {
        self.size = 0;
        while self.size < count {
            self.insert_next();
        }
    }

    /// Grow the heap to cover the first `count` arena entries.
    fn extend_to(&mut self, count: usize) {
        while self.size < count {
            self.insert_next();
        }
    }

    /// Arena indices of the largest and second-largest scalars.
    fn top_two(&self, limbsize: usize) -> (usize, usize) {
        let first = self.heap[0];
        let mut second = self.heap[1];
        if self.scalars[second].prefix_lt(&self.scalars[self.heap[2]], limbsize) {
            second = self.heap[2];
        }
        (first, second)
    }

    /// Restore the heap property after the root's scalar shrank.
    ///
    /// Sifts the root to the bottom along the larger-child path
    /// without comparing against it, then sifts it back up to its
    /// place; the odd-size invariant guarantees every interior node
    /// has both children.
    fn resift_root(&mut self, limbsize: usize) {
        let mut parent = 0;
        let mut node = 1;
        let mut childl = 1;
        let mut childr = 2;
        while childr < self.size {
            let l = self.heap[childl];
            let r = self.heap[childr];
            node = if self.scalars[l].prefix_lt(&self.scalars[r], limbsize) {
                childr
            } else {
                childl
            };
            self.heap.swap(parent, node);
            parent = node;
            childl = 2 * parent + 1;
            childr = childl + 1;
        }

        while node > 0 {
            let parent = (node - 1) / 2;
            if !self.scalars[self.heap[parent]].prefix_lte(&self.scalars[self.heap[node]], limbsize)
            {
                break;
            }
            self.heap.swap(parent, node);
            node = parent;
        }
    }

    /// Evaluate `sum(scalars[i] * points[i])` over the first `count`
    /// arena entries, in variable time.
    ///
    /// `count` must be odd, at least 3, and at most the arena
    /// capacity.  Entries past the first `((count + 1) / 2) | 1` are
    /// deferred until the working scalars shrink to 128 bits, so their
    /// scalars must fit in 128 bits.  The arenas are consumed.
    fn vartime_multiscalar_sum(&mut self, count: usize) -> EdwardsPoint {
        let mut limbsize = TOP_LIMB;
        self.rebuild(((count + 1) / 2) | 1);

        let (point, scalar) = loop {
            let (mut max1, mut max2) = self.top_two(limbsize);

            // Everything else has collapsed into the largest term.
            if self.scalars[max2].is_zero_vartime() {
                break (self.points[max1], self.scalars[max1]);
            }

            // The top limb emptied; shrink the compared prefix.
            if limbsize > 0 && self.scalars[max1].0[limbsize] == 0 {
                limbsize -= 1;
            }

            // Once the largest term fits in 128 bits the deferred
            // entries are no smaller than the rest; bring them in.
            if self.size < count && self.scalars[max1].fits_in_128_bits_vartime() {
                self.extend_to(count);
                let top = self.top_two(limbsize);
                max1 = top.0;
                max2 = top.1;
            }

            // (s1, P1), (s2, P2) -> (s1 - s2, P1), (s2, P1 + P2)
            let s2 = self.scalars[max2];
            self.scalars[max1].prefix_sub_assign(&s2, limbsize);
            let p2 = &self.points[max2] + &self.points[max1];
            self.points[max2] = p2;
            self.resift_root(limbsize);
        };

        vartime_scalar_mul(&point, &scalar)
    }
}

/// Plain double-and-add, for the single term surviving the reduction.
///
/// The surviving scalar is almost always zero or one, so both get
/// fast paths.
fn vartime_scalar_mul(point: &EdwardsPoint, scalar: &Scalar) -> EdwardsPoint {
    if scalar.is_one_vartime() {
        return *point;
    }
    if scalar.is_zero_vartime() {
        return EdwardsPoint::identity();
    }

    // Highest set bit, scanning from the top of limb 4.
    let mut i = 279;
    while scalar.bit_vartime(i) == 0 {
        i -= 1;
    }

    let mut r = *point;
    while i > 0 {
        i -= 1;
        r = r.double();
        if scalar.bit_vartime(i) == 1 {
            r = &r + point;
        }
    }
    r
}

/// Verify a batch of `signatures` on `messages` with their respective
/// `verifying_keys`.
///
/// The three slices must be of equal length, and no longer than
/// [`MAX_BATCH_SIZE`].  An empty batch verifies trivially.
///
/// # Errors
///
/// * [`SignatureError::InputTooLarge`] if more than [`MAX_BATCH_SIZE`]
///   triples are supplied.
/// * [`SignatureError::InvalidEncoding`] if any signature's commitment
///   does not decode to a curve point, or any signature's scalar bytes
///   are non-canonical.
/// * [`SignatureError::VerificationFailed`] if the batch equation does
///   not hold.  The failure is not localised: one bad signature
///   rejects the whole batch, and this function does not say which it
///   was.
///
/// # Examples
///
/// ```
/// use ed25519_bosco::{verify_batch, Signature, SigningKey, VerifyingKey};
/// use rand::rngs::OsRng;
///
/// let mut csprng = OsRng;
/// let signing_keys: Vec<SigningKey> =
///     (0..64).map(|_| SigningKey::generate(&mut csprng)).collect();
/// let msg: &[u8] = b"all these signatures at once";
/// let messages: Vec<&[u8]> = (0..64).map(|_| msg).collect();
/// let signatures: Vec<Signature> =
///     signing_keys.iter().map(|key| key.sign(msg)).collect();
/// let verifying_keys: Vec<VerifyingKey> =
///     signing_keys.iter().map(|key| key.verifying_key()).collect();
///
/// assert!(verify_batch(&messages, &signatures, &verifying_keys).is_ok());
/// ```
pub fn verify_batch(
    messages: &[&[u8]],
    signatures: &[Signature],
    verifying_keys: &[VerifyingKey],
) -> Result<(), SignatureError> {
    // Verification cannot be claimed for triples that were never
    // supplied, so mismatched slices refuse to verify.
    debug_assert_eq!(signatures.len(), messages.len());
    debug_assert_eq!(signatures.len(), verifying_keys.len());
    if signatures.len() != messages.len() || signatures.len() != verifying_keys.len() {
        return Err(SignatureError::VerificationFailed);
    }

    let n = signatures.len();
    if n == 0 {
        return Ok(());
    }
    if n > MAX_BATCH_SIZE {
        return Err(SignatureError::InputTooLarge {
            capacity: MAX_BATCH_SIZE,
        });
    }

    let mut heap = BatchHeap::new();

    // h_i = H(R_i || A_i || M_i) mod l, staged where the heap wants
    // them.
    for i in 0..n {
        let mut h = Sha512::new();
        h.update(signatures[i].R.as_bytes());
        h.update(verifying_keys[i].as_bytes());
        h.update(messages[i]);
        heap.scalars[1 + i] = Scalar::from_hash(h);
    }

    // Deterministic 128-bit randomizers from a transcript of the
    // batch.
    let mut transcript = Transcript::new(b"ed25519 batch verification");
    transcript.append_hrams(&heap.scalars[1..=n]);
    transcript.append_message_lengths(messages);
    let mut prng = transcript.build_rng().finalize(&mut ZeroRng);
    for i in 0..n {
        let mut z = [0u8; 16];
        prng.fill_bytes(&mut z);
        heap.scalars[n + 1 + i] = Scalar::from(u128::from_le_bytes(z));
    }

    // scalars[0] = sum of z_i s_i; scalars[1..=n] become z_i h_i.
    let mut b_coefficient = Scalar::ZERO;
    for i in 0..n {
        let s = signatures[i].s_scalar()?;
        let z = heap.scalars[n + 1 + i];
        b_coefficient = &b_coefficient + &(&z * &s);
        let zh = &z * &heap.scalars[1 + i];
        heap.scalars[1 + i] = zh;
    }
    heap.scalars[0] = b_coefficient;

    heap.points[0] = constants::ED25519_BASEPOINT_POINT;
    for i in 0..n {
        heap.points[1 + i] = -&verifying_keys[i].point;
        let r = signatures[i]
            .R
            .decompress()
            .ok_or(SignatureError::InvalidEncoding)?;
        heap.points[n + 1 + i] = -&r;
    }

    let sum = heap.vartime_multiscalar_sum(2 * n + 1);

    if sum.is_identity() {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed)
    }
}

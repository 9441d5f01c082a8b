//! Scalars mod the order of SECP256R1.

use std::ops::{Add, Mul};

use elliptic_curve::bigint::U256;
use elliptic_curve::ops::Reduce;
use elliptic_curve::PrimeField;
use p256::Scalar as InnerScalar;

use crate::error::MathError;

/// An integer in `[0, n)`, where `n` is the order of SECP256R1.
///
/// Wraps the curve crate's field representation so the rest of the
/// crate never has to reason about canonical byte order directly; all
/// binary I/O here is little-endian, matching the wire format.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Scalar(InnerScalar);

impl Scalar {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(InnerScalar::ZERO)
    }

    /// Decode a little-endian byte buffer as a scalar, reducing mod `n`.
    ///
    /// Accepts any length up to 32 bytes (the protocol uses 4- and
    /// 6-byte buffers derived from `lo32` and PUF responses as well as
    /// full 32-byte scalars); reduction mod `n` means this never fails
    /// for well-formed inputs of at most 32 bytes.
    pub fn from_le_bytes(buf: &[u8]) -> Result<Self, MathError> {
        if buf.len() > 32 {
            return Err(MathError::InvalidScalar { len: buf.len() });
        }
        let mut be = [0_u8; 32];
        for (i, b) in buf.iter().enumerate() {
            be[31 - i] = *b;
        }
        let wide = U256::from_be_slice(&be);
        Ok(Self(InnerScalar::reduce(wide)))
    }

    /// Encode as a canonical 32-byte little-endian buffer.
    pub fn to_le_bytes(self) -> [u8; 32] {
        let be = self.0.to_repr();
        let mut le = [0_u8; 32];
        for (i, b) in be.iter().enumerate() {
            le[31 - i] = *b;
        }
        le
    }

    /// The least-significant 4 bytes of the little-endian encoding.
    ///
    /// Mirrors the reference implementation's `binary32()`: it is *not*
    /// a modular reduction to a 32-bit scalar, just a truncated view of
    /// the low-order bytes.
    pub fn lo32(self) -> [u8; 4] {
        let le = self.to_le_bytes();
        [le[0], le[1], le[2], le[3]]
    }

    pub(crate) fn inner(self) -> InnerScalar {
        self.0
    }

    pub(crate) fn from_inner(inner: InnerScalar) -> Self {
        Self(inner)
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl std::fmt::Debug for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scalar({:x?})", self.to_le_bytes())
    }
}

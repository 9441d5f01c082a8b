//! Error type for elliptic-curve and scalar arithmetic failures.

use thiserror::Error;

/// Failures from scalar or point arithmetic.
///
/// All crypto primitives return this instead of panicking; invalid
/// encodings, curve-membership failures, and overflow are ordinary
/// control flow, not bugs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A byte buffer did not decode to a canonical scalar in `[0, n)`.
    #[error("invalid scalar encoding ({len} bytes)")]
    InvalidScalar {
        /// Length of the offending buffer.
        len: usize,
    },

    /// A byte buffer did not decode to a point on the curve.
    #[error("invalid point encoding")]
    InvalidPoint,

    /// The point at infinity cannot be serialized or have an affine x-coordinate.
    #[error("point is the identity element")]
    Identity,

    /// Base64 decoding failed before curve validation was even attempted.
    #[error("invalid base64 point encoding: {0}")]
    InvalidBase64(String),
}

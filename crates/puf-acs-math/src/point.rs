//! Affine points on SECP256R1, with the protocol's fixed 65-byte
//! uncompressed wire encoding and its base64 form.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use elliptic_curve::bigint::U256;
use elliptic_curve::group::Group;
use elliptic_curve::ops::Reduce;
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::{AffinePoint, EncodedPoint, ProjectivePoint, Scalar as InnerScalar};

use crate::error::MathError;
use crate::scalar::Scalar;

/// A point on SECP256R1, or the identity.
///
/// Internally projective so repeated scalar-mul/add chains (as in the
/// handshake's `G*(t + a*d)` and `A*d + T`) avoid an affine conversion
/// per step; the 65-byte wire format is only materialized on demand.
#[derive(Clone, Copy)]
pub struct Point(ProjectivePoint);

impl Point {
    /// The fixed generator of SECP256R1.
    pub fn generator() -> Self {
        Self(ProjectivePoint::GENERATOR)
    }

    /// Scalar multiplication `P * s`.
    pub fn mul(&self, s: Scalar) -> Self {
        Self(self.0 * s.inner())
    }

    /// Point addition `P + Q`.
    pub fn add(&self, other: &Self) -> Self {
        Self(self.0 + other.0)
    }

    /// The affine x-coordinate, reduced mod the scalar order `n`.
    ///
    /// Single accessor hiding whatever internal affine/projective or
    /// field/scalar representation the underlying curve library uses;
    /// callers never touch coordinate fields directly.
    pub fn affine_x(&self) -> Result<Scalar, MathError> {
        let affine = AffinePoint::from(self.0);
        let encoded = affine.to_encoded_point(false);
        let x = encoded.x().ok_or(MathError::Identity)?;
        let wide = U256::from_be_slice(&x[..]);
        Ok(Scalar::from_inner(InnerScalar::reduce(wide)))
    }

    /// Uncompressed SEC1 encoding: `0x04 || X(32) || Y(32)`.
    pub fn to_uncompressed_bytes(&self) -> Result<[u8; 65], MathError> {
        let affine = AffinePoint::from(self.0);
        let encoded = affine.to_encoded_point(false);
        let bytes = encoded.as_bytes();
        if bytes.len() != 65 {
            // Only the identity point fails to produce a 65-byte uncompressed encoding.
            return Err(MathError::Identity);
        }
        let mut out = [0_u8; 65];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Decode the protocol's fixed 65-byte uncompressed point format.
    pub fn from_uncompressed_bytes(buf: &[u8]) -> Result<Self, MathError> {
        if buf.len() != 65 {
            return Err(MathError::InvalidPoint);
        }
        let encoded = EncodedPoint::from_bytes(buf).map_err(|_| MathError::InvalidPoint)?;
        let affine = AffinePoint::from_encoded_point(&encoded);
        let affine: AffinePoint = Option::from(affine).ok_or(MathError::InvalidPoint)?;
        Ok(Self(ProjectivePoint::from(affine)))
    }

    /// Base64 encoding of the uncompressed wire format.
    pub fn to_base64(&self) -> Result<String, MathError> {
        Ok(BASE64.encode(self.to_uncompressed_bytes()?))
    }

    /// Decode a base64-encoded uncompressed point.
    pub fn from_base64(s: &str) -> Result<Self, MathError> {
        let raw = BASE64.decode(s.trim()).map_err(|e| MathError::InvalidBase64(e.to_string()))?;
        Self::from_uncompressed_bytes(&raw)
    }

    /// True if this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        bool::from(self.0.is_identity())
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_affine() == other.0.to_affine()
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_base64() {
            Ok(b64) => write!(f, "Point({b64})"),
            Err(_) => write!(f, "Point(identity)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_roundtrips_through_uncompressed_bytes() {
        let g = Point::generator();
        let bytes = g.to_uncompressed_bytes().expect("generator is not identity");
        assert_eq!(bytes.len(), 65);
        assert_eq!(bytes[0], 0x04);
        let decoded = Point::from_uncompressed_bytes(&bytes).expect("valid encoding");
        assert_eq!(g, decoded);
    }

    #[test]
    fn generator_roundtrips_through_base64() {
        let g = Point::generator();
        let b64 = g.to_base64().expect("encodable");
        let decoded = Point::from_base64(&b64).expect("valid base64");
        assert_eq!(g, decoded);
    }

    #[test]
    fn scalar_mul_distributes_over_addition() {
        let g = Point::generator();
        let a = Scalar::from_le_bytes(&[3]).expect("valid");
        let t = Scalar::from_le_bytes(&[7]).expect("valid");
        let d = Scalar::from_le_bytes(&[11]).expect("valid");

        let lhs = g.mul(t + a * d);
        let rhs = g.mul(a).mul(d).add(&g.mul(t));
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn rejects_short_buffer() {
        assert_eq!(Point::from_uncompressed_bytes(&[0x04; 10]), Err(MathError::InvalidPoint));
    }
}

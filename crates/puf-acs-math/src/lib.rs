//! SECP256R1 scalar and point arithmetic, SHA-256, and the process
//! CSPRNG underpinning the PUF-ACS handshake's algebraic contract.
//!
//! Everything here is infallible-by-construction or returns
//! [`MathError`]; nothing panics on attacker-controlled input.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod context;
mod error;
mod point;
mod scalar;

pub use context::{CryptoContext, PERSONALIZATION};
pub use error::MathError;
pub use point::Point;
pub use scalar::Scalar;

//! Wire-format errors.

use puf_acs_math::MathError;
use thiserror::Error;

/// Failures decoding or validating an Ethernet frame against one of
/// the four fixed PUF-ACS layouts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// Buffer length did not match the frame type's fixed size.
    #[error("wrong buffer size for {frame}: expected {expected}, got {got}")]
    WrongLength {
        /// Name of the frame type being decoded.
        frame: &'static str,
        /// Size the codec required.
        expected: usize,
        /// Size actually supplied.
        got: usize,
    },

    /// `PUF_Performance` length fell outside `[64, 1522]`.
    #[error("performance frame length {got} outside [{min}, {max}]")]
    PerformanceLengthOutOfRange {
        /// Bytes supplied.
        got: usize,
        /// Minimum allowed Ethernet frame length.
        min: usize,
        /// Maximum allowed Ethernet frame length.
        max: usize,
    },

    /// One of the double-VLAN TPIDs did not match the expected constant.
    #[error("faulty double-VLAN header types")]
    BadTpid,

    /// `classify` could not recognize the frame's discriminator byte.
    #[error("unrecognized frame type")]
    UnknownType,

    /// An embedded scalar or point failed curve validation.
    #[error("embedded math value invalid: {0}")]
    Math(#[from] MathError),
}

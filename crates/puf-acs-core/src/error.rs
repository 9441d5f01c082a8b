//! Error types for the protocol engines, network transport, PUF
//! hardware, and credential-store persistence.

use puf_acs_math::MathError;
use puf_acs_proto::PacketError;
use thiserror::Error;

/// Transport failures, including the normative receive timeout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// No frame arrived before the deadline.
    #[error("receive timed out")]
    Timeout,
    /// The underlying transport failed to initialize.
    #[error("network init failed: {0}")]
    InitFailed(String),
    /// The underlying transport failed to send or receive.
    #[error("transport failure: {0}")]
    Io(String),
}

/// PUF hardware failures (the reference platform models exactly one:
/// a failed challenge/response read).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PufError {
    /// The PUF failed to produce a deterministic reading.
    #[error("PUF read failed: {0}")]
    ReadFailed(String),
}

/// Credential-store persistence failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialStoreError {
    /// `fetch`/`sync` failed for an I/O reason other than "file absent".
    #[error("credential store I/O failure: {0}")]
    Io(String),
    /// A row in the persisted resource did not parse.
    #[error("malformed credential store row: {0}")]
    MalformedRow(String),
}

/// A single protocol phase's failure, folded into one outcome at the
/// engine boundary per the failure policy: lower-level causes are never
/// allowed to propagate as exceptions, only as this one type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A programmer-contract violation, e.g. calling `connect` before `init`.
    #[error("invalid state: cannot {operation} while {state}")]
    InvalidState {
        /// Human-readable current state.
        state: &'static str,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// The network layer failed or timed out.
    #[error("network failure: {0}")]
    Network(#[from] NetworkError),

    /// A received frame failed to decode or classify.
    #[error("packet failure: {0}")]
    Packet(#[from] PacketError),

    /// A scalar or point derived during the handshake failed curve
    /// validation, e.g. an ephemeral point reducing to the identity.
    #[error("math failure: {0}")]
    Math(#[from] MathError),

    /// The PUF hardware failed to respond.
    #[error("PUF failure: {0}")]
    Puf(#[from] PufError),

    /// The credential store rejected or could not resolve an identity.
    #[error("credential store failure: {0}")]
    CredentialStore(#[from] CredentialStoreError),

    /// The peer's MAC was unknown or its access counter was exhausted.
    ///
    /// Indistinguishable from an unknown MAC by design (see the
    /// credential store's `query` contract).
    #[error("access denied: unknown or exhausted identity")]
    AccessDenied,

    /// Decoded frame was not of the expected kind for this phase.
    #[error("unexpected frame kind in phase {phase}")]
    UnexpectedFrame {
        /// Name of the phase that rejected the frame.
        phase: &'static str,
    },

    /// The Supplicant's proof did not match the Authenticator's expectation.
    #[error("authentication rejected: proof mismatch")]
    ProofMismatch,
}

impl EngineError {
    /// Transient failures are retryable within the same `connect` attempt budget;
    /// protocol violations and proof failures are not inherently retryable but
    /// still only rewind state rather than aborting the process.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(NetworkError::Timeout))
    }
}

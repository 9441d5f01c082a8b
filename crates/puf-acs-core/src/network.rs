//! The `Network` capability: whole-frame Ethernet send/receive.

use std::time::Duration;

use crate::error::NetworkError;

/// Normative default receive timeout.
pub const NETWORK_TIMEOUT: Duration = Duration::from_millis(3000);

/// A raw Ethernet transport, realized as a capability interface rather
/// than a concrete socket or embedded MAC driver — those are
/// collaborators supplied by whoever wires an engine together.
pub trait Network {
    /// Initialize the transport. Called once before any send/receive.
    fn init(&mut self) -> Result<(), NetworkError>;

    /// Send one whole Ethernet frame.
    fn send(&mut self, frame: &[u8]) -> Result<(), NetworkError>;

    /// Receive one whole Ethernet frame into `buf`, returning the
    /// number of bytes written, or [`NetworkError::Timeout`] if none
    /// arrives within `timeout`.
    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, NetworkError>;
}

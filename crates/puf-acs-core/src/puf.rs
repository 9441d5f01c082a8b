//! The `Puf` capability: the Supplicant's physically unclonable function.

use puf_acs_proto::Mac;

/// A Physically Unclonable Function, realized as a capability interface
/// over whatever the concrete device exposes (SRAM start-up values,
/// ring-oscillator readout, …).
///
/// Both methods must be deterministic for a given physical device:
/// repeated calls with the same challenge (or no challenge, for
/// `puf_to_mac`) must return the same response.
pub trait Puf {
    /// Derive this device's 6-byte base identity from PUF state.
    fn puf_to_mac(&self) -> Mac;

    /// Challenge the PUF and return its 6-byte response.
    fn get_puf_response(&self, challenge: Mac) -> Mac;
}

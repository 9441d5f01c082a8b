//! Normative constants governing engine and credential-store behavior.

use puf_acs_proto::Mac;

/// The switch's fixed MAC address.
pub const SWITCH_MAC: Mac = Mac::new([0x04, 0x92, 0x26, 0x87, 0x84, 0x11]);

/// Default access-count grant on a fresh `sign_up`.
pub const DEFAULT_COUNTER: u32 = 100;

/// Default credential-store resource path.
pub const DEFAULT_RESOURCE: &str = "Supplicant.csv";

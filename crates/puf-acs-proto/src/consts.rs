//! Normative wire constants shared by every frame layout.

/// `ether_type` carried by the three handshake frames.
pub const ETHER_TYPE_PUF_ACS: u16 = 0xbeef;
/// `ether_type` carried by `PUF_Performance` frames, after the double VLAN tag.
pub const ETHER_TYPE_EXPERIMENTAL: u16 = 0x88b5;
/// Inner (802.1Q) TPID of the double-VLAN header.
pub const ETHER_TYPE_Q: u16 = 0x9100;
/// Outer (802.1ad) TPID of the double-VLAN header; also the `classify` discriminator.
pub const ETHER_TYPE_AD: u16 = 0x88a8;

/// `type` byte identifying `REGISTER` / `PUF_CON` frames.
pub const TYPE_PUF_CON: u8 = 0x01;
/// `type` byte identifying `PUF_SYN` frames.
pub const TYPE_PUF_SYN: u8 = 0x02;
/// `type` byte identifying `PUF_SYN_ACK` frames.
pub const TYPE_PUF_SYN_ACK: u8 = 0x03;

/// Fixed length of `REGISTER` / `PUF_CON` frames.
pub const PUF_CON_LEN: usize = 80;
/// Fixed length of `PUF_SYN` frames.
pub const PUF_SYN_LEN: usize = 90;
/// Fixed length of `PUF_SYN_ACK` frames.
pub const PUF_SYN_ACK_LEN: usize = 80;
/// Minimum legal Ethernet frame length, inclusive.
pub const ETHER_FRAME_MIN: usize = 64;
/// Maximum legal Ethernet frame length, inclusive.
pub const ETHER_FRAME_MAX: usize = 1522;

/// Byte offset of the Ethernet header's `ether_type`/outer-TPID word.
pub const ETHER_TYPE_OFFSET: usize = 12;
/// Byte offset of the handshake frames' `type` discriminator byte.
pub const TYPE_OFFSET: usize = 14;

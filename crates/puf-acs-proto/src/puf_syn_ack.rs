//! `PUF_SYN_ACK` frame: `dst_mac(6) || src_mac(6) || ether_type(2) || type(1)=0x03 || S(65)`.

use puf_acs_math::Point;

use crate::consts::{ETHER_TYPE_PUF_ACS, PUF_SYN_ACK_LEN, TYPE_PUF_SYN_ACK};
use crate::error::PacketError;
use crate::mac::Mac;

/// The decoded fields of a `PUF_SYN_ACK` frame.
#[derive(Clone, Copy)]
pub struct PufSynAck {
    /// Ethernet destination address.
    pub dst_mac: Mac,
    /// Ethernet source address.
    pub src_mac: Mac,
    /// The Supplicant's proof point `S = G*(t + a*d)`.
    pub s: Point,
}

impl PufSynAck {
    /// Fixed wire length of this frame type.
    pub const LEN: usize = PUF_SYN_ACK_LEN;

    /// Encode to the fixed 80-byte wire format.
    pub fn encode(&self) -> Result<[u8; PUF_SYN_ACK_LEN], PacketError> {
        let mut buf = [0_u8; PUF_SYN_ACK_LEN];
        buf[0..6].copy_from_slice(&self.dst_mac.bytes());
        buf[6..12].copy_from_slice(&self.src_mac.bytes());
        buf[12..14].copy_from_slice(&ETHER_TYPE_PUF_ACS.to_be_bytes());
        buf[14] = TYPE_PUF_SYN_ACK;
        buf[15..80].copy_from_slice(&self.s.to_uncompressed_bytes()?);
        Ok(buf)
    }

    /// Decode from the fixed 80-byte wire format.
    pub fn decode(buf: &[u8]) -> Result<Self, PacketError> {
        if buf.len() != PUF_SYN_ACK_LEN {
            return Err(PacketError::WrongLength {
                frame: "PUF_SYN_ACK",
                expected: PUF_SYN_ACK_LEN,
                got: buf.len(),
            });
        }
        let mut dst = [0_u8; 6];
        dst.copy_from_slice(&buf[0..6]);
        let mut src = [0_u8; 6];
        src.copy_from_slice(&buf[6..12]);
        let s = Point::from_uncompressed_bytes(&buf[15..80])?;
        Ok(Self { dst_mac: Mac::new(dst), src_mac: Mac::new(src), s })
    }
}

//! `REGISTER` / `PUF_CON` frame: `dst_mac(6) || src_mac(6) || ether_type(2) || type(1)=0x01 || T(65)`.
//!
//! `REGISTER` (sign-up) and `PUF_CON` (handshake phase 1) share this
//! exact layout; the field is named `t` either way since both roles
//! interpret it as "the sender's ephemeral or long-term public point".

use puf_acs_math::Point;

use crate::consts::{ETHER_TYPE_PUF_ACS, PUF_CON_LEN, TYPE_PUF_CON};
use crate::error::PacketError;
use crate::mac::Mac;

/// The decoded fields of a `REGISTER` / `PUF_CON` frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PufCon {
    /// Ethernet destination address.
    pub dst_mac: Mac,
    /// Ethernet source address.
    pub src_mac: Mac,
    /// The sender's point: `A` for `REGISTER`, `G*t` for `PUF_CON`.
    pub t: Point,
}

impl PufCon {
    /// Fixed wire length of this frame type.
    pub const LEN: usize = PUF_CON_LEN;

    /// Encode to the fixed 80-byte wire format.
    pub fn encode(&self) -> Result<[u8; PUF_CON_LEN], PacketError> {
        let mut buf = [0_u8; PUF_CON_LEN];
        buf[0..6].copy_from_slice(&self.dst_mac.bytes());
        buf[6..12].copy_from_slice(&self.src_mac.bytes());
        buf[12..14].copy_from_slice(&ETHER_TYPE_PUF_ACS.to_be_bytes());
        buf[14] = TYPE_PUF_CON;
        buf[15..80].copy_from_slice(&self.t.to_uncompressed_bytes()?);
        Ok(buf)
    }

    /// Decode from the fixed 80-byte wire format.
    pub fn decode(buf: &[u8]) -> Result<Self, PacketError> {
        if buf.len() != PUF_CON_LEN {
            return Err(PacketError::WrongLength {
                frame: "PUF_CON",
                expected: PUF_CON_LEN,
                got: buf.len(),
            });
        }
        let mut dst = [0_u8; 6];
        dst.copy_from_slice(&buf[0..6]);
        let mut src = [0_u8; 6];
        src.copy_from_slice(&buf[6..12]);
        let t = Point::from_uncompressed_bytes(&buf[15..80])?;
        Ok(Self { dst_mac: Mac::new(dst), src_mac: Mac::new(src), t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips() {
        let frame = PufCon {
            dst_mac: Mac::new([4, 0x92, 0x26, 0x87, 0x84, 0x11]),
            src_mac: Mac::new([1, 2, 3, 4, 5, 6]),
            t: Point::generator(),
        };
        let bytes = frame.encode().expect("encodable");
        assert_eq!(bytes.len(), PUF_CON_LEN);
        let decoded = PufCon::decode(&bytes).expect("decodable");
        assert_eq!(decoded.dst_mac, frame.dst_mac);
        assert_eq!(decoded.src_mac, frame.src_mac);
        assert_eq!(decoded.t, frame.t);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            PufCon::decode(&[0; 79]),
            Err(PacketError::WrongLength { frame: "PUF_CON", expected: 80, got: 79 })
        );
    }
}

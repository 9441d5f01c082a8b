//! `PUF_SYN` frame: `dst_mac(6) || src_mac(6) || ether_type(2) || type(1)=0x02 || d(4 LE) || pc(6) || C(65)`.

use puf_acs_math::{Point, Scalar};

use crate::consts::{ETHER_TYPE_PUF_ACS, PUF_SYN_LEN, TYPE_PUF_SYN};
use crate::error::PacketError;
use crate::mac::Mac;

/// The decoded fields of a `PUF_SYN` frame.
#[derive(Clone, Copy)]
pub struct PufSyn {
    /// Ethernet destination address.
    pub dst_mac: Mac,
    /// Ethernet source address.
    pub src_mac: Mac,
    /// Authenticator's ephemeral scalar `d`, little-endian on the wire.
    pub d: Scalar,
    /// The XOR-folded PUF challenge.
    pub pc: Mac,
    /// Authenticator's ephemeral point `C = G*c`.
    pub c_point: Point,
}

impl PufSyn {
    /// Fixed wire length of this frame type.
    pub const LEN: usize = PUF_SYN_LEN;

    /// Encode to the fixed 90-byte wire format.
    pub fn encode(&self) -> Result<[u8; PUF_SYN_LEN], PacketError> {
        let mut buf = [0_u8; PUF_SYN_LEN];
        buf[0..6].copy_from_slice(&self.dst_mac.bytes());
        buf[6..12].copy_from_slice(&self.src_mac.bytes());
        buf[12..14].copy_from_slice(&ETHER_TYPE_PUF_ACS.to_be_bytes());
        buf[14] = TYPE_PUF_SYN;
        buf[15..19].copy_from_slice(&self.d.lo32());
        buf[19..25].copy_from_slice(&self.pc.bytes());
        buf[25..90].copy_from_slice(&self.c_point.to_uncompressed_bytes()?);
        Ok(buf)
    }

    /// Decode from the fixed 90-byte wire format.
    ///
    /// Reads `dst_mac` from the wire's own `dst_mac` field; the
    /// reference implementation reads `src_mac` twice here, which is a
    /// bug this codec does not reproduce.
    pub fn decode(buf: &[u8]) -> Result<Self, PacketError> {
        if buf.len() != PUF_SYN_LEN {
            return Err(PacketError::WrongLength {
                frame: "PUF_SYN",
                expected: PUF_SYN_LEN,
                got: buf.len(),
            });
        }
        let mut dst = [0_u8; 6];
        dst.copy_from_slice(&buf[0..6]);
        let mut src = [0_u8; 6];
        src.copy_from_slice(&buf[6..12]);
        let d = Scalar::from_le_bytes(&buf[15..19])?;
        let mut pc = [0_u8; 6];
        pc.copy_from_slice(&buf[19..25]);
        let c_point = Point::from_uncompressed_bytes(&buf[25..90])?;
        Ok(Self { dst_mac: Mac::new(dst), src_mac: Mac::new(src), d, pc: Mac::new(pc), c_point })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_including_endianness() {
        let d = Scalar::from_le_bytes(&[0xde, 0xad, 0xbe, 0xef]).expect("valid");
        let frame = PufSyn {
            dst_mac: Mac::new([1, 1, 1, 1, 1, 1]),
            src_mac: Mac::new([2, 2, 2, 2, 2, 2]),
            d,
            pc: Mac::new([9, 8, 7, 6, 5, 4]),
            c_point: Point::generator(),
        };
        let bytes = frame.encode().expect("encodable");
        assert_eq!(bytes.len(), PUF_SYN_LEN);
        assert_eq!(&bytes[15..19], [0xde, 0xad, 0xbe, 0xef]);

        let decoded = PufSyn::decode(&bytes).expect("decodable");
        assert_eq!(decoded.dst_mac, frame.dst_mac);
        assert_eq!(decoded.src_mac, frame.src_mac);
        assert_eq!(decoded.d.lo32(), frame.d.lo32());
        assert_eq!(decoded.pc, frame.pc);
        assert_eq!(decoded.c_point, frame.c_point);
    }

    #[test]
    fn does_not_confuse_dst_and_src() {
        let frame = PufSyn {
            dst_mac: Mac::new([0xaa; 6]),
            src_mac: Mac::new([0xbb; 6]),
            d: Scalar::from_le_bytes(&[1]).expect("valid"),
            pc: Mac::new([0; 6]),
            c_point: Point::generator(),
        };
        let decoded = PufSyn::decode(&frame.encode().expect("encodable")).expect("decodable");
        assert_eq!(decoded.dst_mac, Mac::new([0xaa; 6]));
        assert_eq!(decoded.src_mac, Mac::new([0xbb; 6]));
    }
}

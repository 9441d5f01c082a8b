//! `PUF_Performance` frame: a double 802.1ad/802.1Q-tagged Ethernet
//! frame whose two VLAN ID fields carry a rolling 4-byte authentication
//! tag, followed by the user payload.
//!
//! Layout: `dst_mac(6) || src_mac(6) || ad_tpid(2)=0x88a8 ||
//! vlan_buf_1(2) || q_tpid(2)=0x9100 || vlan_buf_2(2) ||
//! ether_type(2)=0x88b5 || payload(..)`, bounded to `[64, 1522]` bytes
//! total.

use crate::consts::{
    ETHER_FRAME_MAX, ETHER_FRAME_MIN, ETHER_TYPE_AD, ETHER_TYPE_EXPERIMENTAL, ETHER_TYPE_Q,
};
use crate::error::PacketError;
use crate::mac::Mac;

/// Fixed-size header prefix before the variable-length payload.
pub const HEADER_LEN: usize = 22;

/// The decoded fields of a `PUF_Performance` frame.
#[derive(Clone)]
pub struct Performance {
    /// Ethernet destination address.
    pub dst_mac: Mac,
    /// Ethernet source address.
    pub src_mac: Mac,
    /// First half of the rolling authentication tag.
    pub vlan_buf_1: [u8; 2],
    /// Second half of the rolling authentication tag.
    pub vlan_buf_2: [u8; 2],
    /// User payload carried after the double-VLAN header.
    pub payload: Vec<u8>,
}

impl Performance {
    /// Encode to the wire format, validating the total length stays in `[64, 1522]`.
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        let total = HEADER_LEN + self.payload.len();
        if !(ETHER_FRAME_MIN..=ETHER_FRAME_MAX).contains(&total) {
            return Err(PacketError::PerformanceLengthOutOfRange {
                got: total,
                min: ETHER_FRAME_MIN,
                max: ETHER_FRAME_MAX,
            });
        }
        let mut buf = vec![0_u8; total];
        buf[0..6].copy_from_slice(&self.dst_mac.bytes());
        buf[6..12].copy_from_slice(&self.src_mac.bytes());
        buf[12..14].copy_from_slice(&ETHER_TYPE_AD.to_be_bytes());
        buf[14..16].copy_from_slice(&self.vlan_buf_1);
        buf[16..18].copy_from_slice(&ETHER_TYPE_Q.to_be_bytes());
        buf[18..20].copy_from_slice(&self.vlan_buf_2);
        buf[20..22].copy_from_slice(&ETHER_TYPE_EXPERIMENTAL.to_be_bytes());
        buf[22..].copy_from_slice(&self.payload);
        Ok(buf)
    }

    /// Decode from the wire format, validating length bounds and both TPIDs.
    pub fn decode(buf: &[u8]) -> Result<Self, PacketError> {
        if buf.len() < ETHER_FRAME_MIN || buf.len() > ETHER_FRAME_MAX {
            return Err(PacketError::PerformanceLengthOutOfRange {
                got: buf.len(),
                min: ETHER_FRAME_MIN,
                max: ETHER_FRAME_MAX,
            });
        }
        if buf.len() < HEADER_LEN {
            return Err(PacketError::WrongLength {
                frame: "PUF_Performance",
                expected: HEADER_LEN,
                got: buf.len(),
            });
        }
        let ad_tpid = u16::from_be_bytes([buf[12], buf[13]]);
        let q_tpid = u16::from_be_bytes([buf[16], buf[17]]);
        if ad_tpid != ETHER_TYPE_AD || q_tpid != ETHER_TYPE_Q {
            return Err(PacketError::BadTpid);
        }

        let mut dst = [0_u8; 6];
        dst.copy_from_slice(&buf[0..6]);
        let mut src = [0_u8; 6];
        src.copy_from_slice(&buf[6..12]);
        let vlan_buf_1 = [buf[14], buf[15]];
        let vlan_buf_2 = [buf[18], buf[19]];

        Ok(Self {
            dst_mac: Mac::new(dst),
            src_mac: Mac::new(src),
            vlan_buf_1,
            vlan_buf_2,
            payload: buf[22..].to_vec(),
        })
    }
}

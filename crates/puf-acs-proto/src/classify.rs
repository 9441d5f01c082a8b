//! Frame-type dispatch: inspect the Ethernet header without decoding
//! the rest of the frame.

use crate::consts::{
    ETHER_TYPE_AD, ETHER_TYPE_OFFSET, TYPE_OFFSET, TYPE_PUF_CON, TYPE_PUF_SYN, TYPE_PUF_SYN_ACK,
};

/// Which of the four frame layouts a buffer appears to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// `REGISTER` / `PUF_CON`.
    PufCon,
    /// `PUF_SYN`.
    PufSyn,
    /// `PUF_SYN_ACK`.
    PufSynAck,
    /// `PUF_Performance`.
    Performance,
    /// Neither of the above.
    Unknown,
}

/// Classify a buffer by inspecting the ether_type/outer-TPID word at
/// byte offset 12 and, for handshake frames, the type discriminator at
/// byte offset 14.
///
/// Returns [`FrameKind::Unknown`] rather than an error on a too-short
/// or unrecognized buffer; callers decode afterward and handle the
/// length/content error from the specific codec.
pub fn classify(buf: &[u8]) -> FrameKind {
    if buf.len() < TYPE_OFFSET + 1 {
        return FrameKind::Unknown;
    }
    let ether_word = u16::from_be_bytes([buf[ETHER_TYPE_OFFSET], buf[ETHER_TYPE_OFFSET + 1]]);
    if ether_word == ETHER_TYPE_AD {
        return FrameKind::Performance;
    }
    match buf[TYPE_OFFSET] {
        t if t == TYPE_PUF_CON => FrameKind::PufCon,
        t if t == TYPE_PUF_SYN => FrameKind::PufSyn,
        t if t == TYPE_PUF_SYN_ACK => FrameKind::PufSynAck,
        _ => FrameKind::Unknown,
    }
}

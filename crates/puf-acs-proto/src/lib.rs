//! Wire codec for the four PUF-ACS Ethernet frame layouts and the
//! 6-byte MAC identifier they carry.
//!
//! Each frame type owns explicit `encode`/`decode` functions that
//! enumerate byte offsets directly; there is no packed-struct
//! reinterpretation of the wire bytes, so endianness lives entirely in
//! the serializer.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod consts;
mod error;
mod mac;
mod performance;
mod puf_con;
mod puf_syn;
mod puf_syn_ack;

pub use classify::{classify, FrameKind};
pub use consts::{
    ETHER_FRAME_MAX, ETHER_FRAME_MIN, ETHER_TYPE_AD, ETHER_TYPE_EXPERIMENTAL,
    ETHER_TYPE_PUF_ACS, ETHER_TYPE_Q, PUF_CON_LEN, PUF_SYN_ACK_LEN, PUF_SYN_LEN,
};
pub use error::PacketError;
pub use mac::Mac;
pub use performance::{Performance, HEADER_LEN as PERFORMANCE_HEADER_LEN};
pub use puf_con::PufCon;
pub use puf_syn::PufSyn;
pub use puf_syn_ack::PufSynAck;

//! The 6-byte MAC identifier and its two evolution operations.

use puf_acs_math::{CryptoContext, Scalar};

/// A 6-byte Ethernet MAC address, doubling as the protocol's evolving
/// identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mac([u8; 6]);

impl Mac {
    /// Wrap six raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// The raw bytes.
    pub const fn bytes(&self) -> [u8; 6] {
        self.0
    }

    /// Replace this MAC with `SHA-256(self)[0..6]`, applied `iterations` times.
    ///
    /// `iterations` is normally 1; the sole caller that advances the
    /// credential-store hash chain applies it exactly once per
    /// successful session (see [`Mac::hash`] invariant in the crate docs).
    pub fn hash(&mut self, iterations: u32) {
        for _ in 0..iterations.max(1) {
            let digest = CryptoContext::sha256(&self.0);
            self.0.copy_from_slice(&digest[0..6]);
        }
    }

    /// Fold the low 4 bytes of `s` into bytes `0..4` of this MAC,
    /// in place. Bytes `4..6` are left untouched.
    ///
    /// This asymmetry is load-bearing: it is what lets the untouched
    /// tail bytes carry PUF-challenge entropy through the fold
    /// unscathed, and makes the operation its own inverse.
    pub fn xor_tail(&mut self, s: Scalar) {
        let lo = s.lo32();
        for i in 0..4 {
            self.0[i] ^= lo[i];
        }
    }

    /// Lowercase colon-separated hex, e.g. `04:92:26:87:84:11`.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(":")
    }

    /// Parse the colon-separated hex form produced by [`Mac::to_hex`].
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0_u8; 6];
        let mut parts = s.split(':');
        for byte in &mut bytes {
            *byte = u8::from_str_radix(parts.next()?, 16).ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(Self(bytes))
    }
}

impl std::fmt::Debug for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mac({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_tail_is_an_involution() {
        let original = Mac::new([0x11, 0x22, 0x33, 0x44, 0x55, 0x66]);
        let k = Scalar::from_le_bytes(&[0xaa, 0xbb, 0xcc, 0xdd]).expect("valid");

        let mut m = original;
        m.xor_tail(k);
        m.xor_tail(k);
        assert_eq!(m, original);
    }

    #[test]
    fn xor_tail_preserves_last_two_bytes() {
        let mut m = Mac::new([0, 0, 0, 0, 0xab, 0xcd]);
        let k = Scalar::from_le_bytes(&[1, 2, 3, 4]).expect("valid");
        m.xor_tail(k);
        assert_eq!(m.bytes()[4], 0xab);
        assert_eq!(m.bytes()[5], 0xcd);
    }

    #[test]
    fn hash_is_deterministic() {
        let mut a = Mac::new([1, 2, 3, 4, 5, 6]);
        let mut b = Mac::new([1, 2, 3, 4, 5, 6]);
        a.hash(1);
        b.hash(1);
        assert_eq!(a, b);
    }

    #[test]
    fn hash_chain_advances_through_iterations() {
        let mut single = Mac::new([9, 9, 9, 9, 9, 9]);
        single.hash(1);
        single.hash(1);

        let mut double = Mac::new([9, 9, 9, 9, 9, 9]);
        double.hash(2);

        assert_eq!(single, double);
    }

    #[test]
    fn hex_roundtrip() {
        let m = Mac::new([0x04, 0x92, 0x26, 0x87, 0x84, 0x11]);
        assert_eq!(m.to_hex(), "04:92:26:87:84:11");
        assert_eq!(Mac::from_hex(&m.to_hex()), Some(m));
    }
}

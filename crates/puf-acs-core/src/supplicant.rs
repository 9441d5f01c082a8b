//! The Supplicant protocol engine: enrolment, the three-phase
//! handshake, and post-handshake performance-frame tagging.

use std::sync::Arc;

use puf_acs_math::{CryptoContext, Scalar};
use puf_acs_proto::{classify, FrameKind, Mac, PacketError, Performance, PufCon, PufSyn, PufSynAck};
use tracing::{debug, info, warn};

use crate::config::SWITCH_MAC;
use crate::env::Environment;
use crate::error::EngineError;
use crate::network::{Network, NETWORK_TIMEOUT};
use crate::puf::Puf;

/// Lifecycle states of a Supplicant engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplicantState {
    /// Constructed but `init` has not run.
    Uninitialised,
    /// `init` has run; ready to attempt a handshake.
    Initialised,
    /// `PUF_CON` sent, awaiting `PUF_SYN`.
    Hanging,
    /// `PUF_SYN` received, computing and sending the proof.
    Validating,
    /// Handshake accepted by the Authenticator.
    Connected,
}

/// The Supplicant side of the handshake: a resource-constrained device
/// holding a PUF, authenticating to a single Authenticator over an
/// injected [`Network`].
pub struct Supplicant<N, P, E> {
    network: N,
    puf: P,
    env: E,
    ctx: Arc<CryptoContext>,
    state: SupplicantState,
    mac: Mac,
    t: Scalar,
    k: Scalar,
    chain_tail: Option<[u8; 32]>,
}

impl<N: Network, P: Puf, E: Environment> Supplicant<N, P, E> {
    /// Build a new engine around its collaborators. Starts `Uninitialised`.
    pub fn new(network: N, puf: P, env: E, ctx: Arc<CryptoContext>) -> Self {
        Self {
            network,
            puf,
            env,
            ctx,
            state: SupplicantState::Uninitialised,
            mac: Mac::new([0; 6]),
            t: Scalar::zero(),
            k: Scalar::zero(),
            chain_tail: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SupplicantState {
        self.state
    }

    /// True once the most recent handshake attempt succeeded.
    pub fn connected(&self) -> bool {
        self.state == SupplicantState::Connected
    }

    /// Phase 0: bring the network up and derive the on-wire identity.
    ///
    /// The on-wire MAC is the PUF's raw identity after exactly one hash
    /// iteration — the raw PUF output is never transmitted.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.network.init()?;
        let mut mac = self.puf.puf_to_mac();
        mac.hash(1);
        self.mac = mac;
        self.state = SupplicantState::Initialised;
        info!(mac = %self.mac_hex(), "supplicant initialised");
        Ok(())
    }

    /// One-time, out-of-band enrolment: register this device's
    /// long-term public key with the Authenticator and await its
    /// counter grant.
    pub fn sign_up(&mut self) -> Result<u32, EngineError> {
        let base_mac = self.puf.puf_to_mac();
        let response = self.puf.get_puf_response(base_mac);
        let a = Scalar::from_le_bytes(&response.bytes())?;
        let public = self.ctx.generator().mul(a);

        let register =
            PufCon { dst_mac: SWITCH_MAC, src_mac: base_mac, t: public }.encode()?;
        self.network.send(&register)?;
        debug!(base_mac = %hex(&base_mac), "sent REGISTER");

        self.wait_for_au_ok()
    }

    /// Await the Authenticator's counter-grant frame following `sign_up`.
    ///
    /// Reuses the `PUF_Performance` envelope rather than a dedicated
    /// wire format: the payload is the granted counter as a
    /// little-endian `u32`.
    fn wait_for_au_ok(&mut self) -> Result<u32, EngineError> {
        let mut buf = [0_u8; 1522];
        let n = self.network.receive(&mut buf, NETWORK_TIMEOUT)?;
        let frame = Performance::decode(&buf[..n])?;
        if frame.payload.len() < 4 {
            return Err(PacketError::WrongLength {
                frame: "PUF_Performance counter grant",
                expected: 4,
                got: frame.payload.len(),
            }
            .into());
        }
        let mut counter_bytes = [0_u8; 4];
        counter_bytes.copy_from_slice(&frame.payload[0..4]);
        let counter = u32::from_le_bytes(counter_bytes);
        info!(counter, "received counter grant");
        Ok(counter)
    }

    /// Drive up to `attempts` full handshake attempts, rewinding to
    /// `Initialised` and consuming one attempt on any phase failure.
    pub fn connect(&mut self, mut attempts: u32) -> Result<(), EngineError> {
        if self.state == SupplicantState::Uninitialised {
            return Err(EngineError::InvalidState {
                state: "uninitialised",
                operation: "connect",
            });
        }

        loop {
            let start = self.env.now();
            match self.attempt() {
                Ok(()) => {
                    info!("handshake succeeded");
                    return Ok(());
                }
                Err(e) => {
                    let elapsed = self.env.now() - start;
                    self.state = SupplicantState::Initialised;
                    attempts = attempts.saturating_sub(1);
                    warn!(
                        error = %e,
                        elapsed_ms = elapsed.as_millis() as u64,
                        attempts_remaining = attempts,
                        "handshake attempt failed"
                    );
                    if attempts == 0 {
                        return Err(e);
                    }
                }
            }
        }
    }

    fn attempt(&mut self) -> Result<(), EngineError> {
        self.puf_con_phase()?;
        let syn = self.puf_syn_phase()?;
        self.puf_ack_phase(syn)
    }

    fn puf_con_phase(&mut self) -> Result<(), EngineError> {
        self.t = self.ctx.rand_scalar();
        let frame = PufCon { dst_mac: SWITCH_MAC, src_mac: self.mac, t: self.ctx.generator().mul(self.t) }
            .encode()?;
        self.network.send(&frame)?;
        self.state = SupplicantState::Hanging;
        debug!("sent PUF_CON");
        Ok(())
    }

    fn puf_syn_phase(&mut self) -> Result<PufSyn, EngineError> {
        let mut buf = [0_u8; PufSyn::LEN];
        let n = self.network.receive(&mut buf, NETWORK_TIMEOUT)?;
        if classify(&buf[..n]) != FrameKind::PufSyn {
            return Err(EngineError::UnexpectedFrame { phase: "PUF_SYN" });
        }
        let syn = PufSyn::decode(&buf[..n])?;
        self.state = SupplicantState::Validating;
        debug!("received PUF_SYN");
        Ok(syn)
    }

    fn puf_ack_phase(&mut self, syn: PufSyn) -> Result<(), EngineError> {
        let shared = syn.c_point.mul(self.t);
        let k = shared.affine_x()?;
        self.k = k;

        let mut challenge = syn.pc;
        challenge.xor_tail(k);

        let response = self.puf.get_puf_response(challenge);
        let a = Scalar::from_le_bytes(&response.bytes())?;

        let s = self.ctx.generator().mul(self.t + a * syn.d);
        let frame = PufSynAck { dst_mac: SWITCH_MAC, src_mac: self.mac, s }.encode()?;
        self.network.send(&frame)?;

        self.state = SupplicantState::Connected;
        self.chain_tail = None;
        info!("connected");
        Ok(())
    }

    /// Send one `PUF_Performance` frame carrying `payload`, tagging it
    /// with the next link of the authentication hash chain.
    ///
    /// `initial_frame` must be `true` for the first frame of a
    /// connected session and `false` for every frame after; the chain
    /// seeds from `mac || lo32(k)` and then folds forward from its own
    /// previous output.
    pub fn transmit(&mut self, payload: &[u8], initial_frame: bool) -> Result<(), EngineError> {
        if self.state != SupplicantState::Connected {
            return Err(EngineError::InvalidState {
                state: "not connected",
                operation: "transmit",
            });
        }

        let tail = if initial_frame {
            let mut seed = self.mac.bytes().to_vec();
            seed.extend_from_slice(&self.k.lo32());
            CryptoContext::sha256(&seed)
        } else {
            let prev = self.chain_tail.ok_or(EngineError::InvalidState {
                state: "no prior performance frame",
                operation: "transmit",
            })?;
            let mut seed = prev.to_vec();
            seed.extend_from_slice(&self.k.lo32());
            CryptoContext::sha256(&seed)
        };

        let frame = Performance {
            dst_mac: SWITCH_MAC,
            src_mac: self.mac,
            vlan_buf_1: [tail[0], tail[1]],
            vlan_buf_2: [tail[30], tail[31]],
            payload: payload.to_vec(),
        };
        let bytes = frame.encode()?;
        self.network.send(&bytes)?;
        self.chain_tail = Some(tail);
        Ok(())
    }

    fn mac_hex(&self) -> String {
        hex(&self.mac)
    }
}

fn hex(mac: &Mac) -> String {
    mac.to_hex()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use puf_acs_math::CryptoContext;

    use super::*;
    use crate::env::SimEnvironment;
    use crate::error::NetworkError;

    #[derive(Default)]
    struct ChannelNetwork {
        outbox: VecDeque<Vec<u8>>,
        inbox: VecDeque<Vec<u8>>,
    }

    impl Network for ChannelNetwork {
        fn init(&mut self) -> Result<(), NetworkError> {
            Ok(())
        }

        fn send(&mut self, frame: &[u8]) -> Result<(), NetworkError> {
            self.outbox.push_back(frame.to_vec());
            Ok(())
        }

        fn receive(&mut self, buf: &mut [u8], _timeout: Duration) -> Result<usize, NetworkError> {
            let frame = self.inbox.pop_front().ok_or(NetworkError::Timeout)?;
            buf[..frame.len()].copy_from_slice(&frame);
            Ok(frame.len())
        }
    }

    struct SeededPuf {
        base: Mac,
    }

    impl Puf for SeededPuf {
        fn puf_to_mac(&self) -> Mac {
            self.base
        }

        fn get_puf_response(&self, challenge: Mac) -> Mac {
            let digest = CryptoContext::sha256(&challenge.bytes());
            let mut out = [0_u8; 6];
            out.copy_from_slice(&digest[0..6]);
            Mac::new(out)
        }
    }

    #[test]
    fn connect_requires_init_first() {
        let mut s = Supplicant::new(
            ChannelNetwork::default(),
            SeededPuf { base: Mac::new([1; 6]) },
            SimEnvironment::new(1),
            Arc::new(CryptoContext::from_seed(1)),
        );
        assert!(matches!(s.connect(1), Err(EngineError::InvalidState { .. })));
    }

    #[test]
    fn transmit_before_connected_is_rejected() {
        let mut s = Supplicant::new(
            ChannelNetwork::default(),
            SeededPuf { base: Mac::new([1; 6]) },
            SimEnvironment::new(1),
            Arc::new(CryptoContext::from_seed(1)),
        );
        s.init().expect("init");
        assert!(matches!(
            s.transmit(b"hi", true),
            Err(EngineError::InvalidState { .. })
        ));
    }
}

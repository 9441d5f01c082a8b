//! The Authenticator protocol engine: identity resolution against the
//! credential store, the three-phase handshake, and performance-frame
//! validation.

use std::sync::Arc;

use puf_acs_math::{CryptoContext, Scalar};
use puf_acs_proto::{classify, FrameKind, Mac, Performance, PufCon, PufSynAck};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_COUNTER, SWITCH_MAC};
use crate::env::Environment;
use crate::error::EngineError;
use crate::network::{Network, NETWORK_TIMEOUT};
use crate::store::CredentialStore;

/// Per-session state retained between `accept`'s internal phases and a
/// later run of `validate` against performance frames.
#[derive(Clone, Copy)]
struct Session {
    remote_mac: Mac,
    k: Scalar,
    chain_tail: Option<[u8; 32]>,
}

/// The Authenticator side of the handshake: an edge switch backed by a
/// [`CredentialStore`], reacting to inbound frames over an injected
/// [`Network`].
pub struct Authenticator<N, E> {
    network: N,
    env: E,
    ctx: Arc<CryptoContext>,
    store: CredentialStore,
    session: Option<Session>,
    connected: bool,
}

impl<N: Network, E: Environment> Authenticator<N, E> {
    /// Build a new engine around its collaborators and credential store.
    pub fn new(network: N, env: E, ctx: Arc<CryptoContext>, store: CredentialStore) -> Self {
        Self { network, env, ctx, store, session: None, connected: false }
    }

    /// Bring the network up.
    pub fn init(&mut self) -> Result<(), EngineError> {
        self.network.init()?;
        info!("authenticator initialised");
        Ok(())
    }

    /// Block until one whole frame arrives, honoring the normative
    /// network timeout. Driving code uses this to pull the next raw
    /// frame off the wire before handing it to [`Authenticator::sign_up`],
    /// [`Authenticator::accept`], or decoding it as a performance frame
    /// for [`Authenticator::validate`].
    pub fn receive_frame(&mut self, buf: &mut [u8]) -> Result<usize, EngineError> {
        Ok(self.network.receive(buf, NETWORK_TIMEOUT)?)
    }

    /// True iff the most recently accepted session is still valid.
    pub fn connected(&self) -> bool {
        self.connected
    }

    /// Handle a `REGISTER`-shaped frame: bind the new device's public
    /// key and store its first hashed identity, then grant it a
    /// starting counter.
    pub fn sign_up(&mut self, register_frame: &[u8]) -> Result<(), EngineError> {
        let register = PufCon::decode(register_frame)?;
        let base_mac = register.src_mac;
        let mut current_mac = base_mac;
        current_mac.hash(1);

        self.store.store(base_mac, register.t, current_mac, DEFAULT_COUNTER);
        debug!(base_mac = %base_mac.to_hex(), "enrolled new credential");

        // Minimum performance-frame payload is 42 bytes (64-byte frame
        // floor minus the 22-byte header); the counter occupies the
        // first 4, the rest is padding.
        let mut payload = DEFAULT_COUNTER.to_le_bytes().to_vec();
        payload.resize(42, 0);
        let grant = Performance {
            dst_mac: base_mac,
            src_mac: SWITCH_MAC,
            vlan_buf_1: [0, 0],
            vlan_buf_2: [0, 0],
            payload,
        }
        .encode()?;
        self.network.send(&grant)?;
        info!(counter = DEFAULT_COUNTER, "sent counter grant");
        Ok(())
    }

    /// React to one inbound frame, which must be `PUF_CON`. Drives the
    /// remainder of the handshake synchronously, returning once the
    /// session is accepted or rejected.
    pub fn accept(&mut self, frame: &[u8]) -> Result<(), EngineError> {
        self.connected = false;
        let start = self.env.now();

        let result = self.run_handshake(frame);
        let elapsed = self.env.now() - start;

        match &result {
            Ok(()) => info!(elapsed_ms = elapsed.as_millis() as u64, "session accepted"),
            Err(e) => warn!(error = %e, elapsed_ms = elapsed.as_millis() as u64, "session rejected"),
        }
        result
    }

    fn run_handshake(&mut self, frame: &[u8]) -> Result<(), EngineError> {
        if classify(frame) != FrameKind::PufCon {
            return Err(EngineError::UnexpectedFrame { phase: "PUF_CON" });
        }
        let puf_con = PufCon::decode(frame)?;

        let identity = self
            .store
            .query(puf_con.src_mac, true)
            .ok_or(EngineError::AccessDenied)?;
        debug!(remote_mac = %puf_con.src_mac.to_hex(), "identity resolved");

        let c = self.ctx.rand_scalar();
        let d = self.ctx.rand_scalar();
        let shared = puf_con.t.mul(c);
        let k = shared.affine_x()?;

        let mut pc = identity.base_mac;
        pc.xor_tail(k);

        let syn_frame = puf_acs_proto::PufSyn {
            dst_mac: puf_con.src_mac,
            src_mac: SWITCH_MAC,
            d,
            pc,
            c_point: self.ctx.generator().mul(c),
        }
        .encode()?;
        self.network.send(&syn_frame)?;
        debug!("sent PUF_SYN");

        let mut buf = [0_u8; 1522];
        let n = self.network.receive(&mut buf, NETWORK_TIMEOUT)?;
        if classify(&buf[..n]) != FrameKind::PufSynAck {
            return Err(EngineError::UnexpectedFrame { phase: "PUF_SYN_ACK" });
        }
        let ack = PufSynAck::decode(&buf[..n])?;

        let expected = identity.a.mul(d).add(&puf_con.t);
        if ack.s != expected {
            return Err(EngineError::ProofMismatch);
        }

        self.connected = true;
        self.session =
            Some(Session { remote_mac: puf_con.src_mac, k, chain_tail: None });
        Ok(())
    }

    /// Validate one inbound `PUF_Performance` frame against the
    /// rolling authentication tag, advancing the local chain state on
    /// success.
    ///
    /// Requires a prior successful [`Authenticator::accept`] and that
    /// `frame.src_mac` matches the session's resolved identity.
    pub fn validate(&mut self, frame: &Performance, initial_frame: bool) -> bool {
        let Some(session) = self.session.as_mut().filter(|_| self.connected) else {
            return false;
        };
        if frame.src_mac != session.remote_mac {
            return false;
        }

        let tail = if initial_frame {
            let mut seed = session.remote_mac.bytes().to_vec();
            seed.extend_from_slice(&session.k.lo32());
            CryptoContext::sha256(&seed)
        } else {
            let Some(prev) = session.chain_tail else { return false };
            let mut seed = prev.to_vec();
            seed.extend_from_slice(&session.k.lo32());
            CryptoContext::sha256(&seed)
        };

        let matches = frame.vlan_buf_1 == [tail[0], tail[1]] && frame.vlan_buf_2 == [tail[30], tail[31]];
        if matches {
            session.chain_tail = Some(tail);
        }
        matches
    }
}

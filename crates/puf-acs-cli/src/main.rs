//! Simulated end-to-end harness for the PUF-ACS handshake.
//!
//! Wires a simulated `Network`/`Puf` pair per device, runs enrolment,
//! the three-phase handshake, and a couple of tagged performance
//! frames, then reports the outcome through structured logging.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use puf_acs_core::{
    Authenticator, CredentialStore, EngineError, Network, NetworkError, Puf, Supplicant,
    SystemEnvironment,
};
use puf_acs_math::CryptoContext;
use puf_acs_proto::{Mac, Performance};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Simulated PUF-ACS handshake harness.
#[derive(Parser, Debug)]
#[command(name = "puf-acs")]
#[command(about = "Simulated PUF-ACS handshake harness")]
#[command(version)]
struct Args {
    /// Number of simulated Supplicant devices to run end-to-end.
    #[arg(short, long, default_value_t = 1)]
    supplicants: u32,

    /// Path to the credential store's CSV resource.
    #[arg(long, default_value = "Supplicant.csv")]
    credential_store: String,

    /// Handshake attempt budget per device.
    #[arg(long, default_value_t = 1)]
    attempts: u32,

    /// Log level filter (trace, debug, info, warn, error), overridden by `RUST_LOG`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Packet(#[from] puf_acs_proto::PacketError),
    #[error("supplicant thread panicked")]
    ThreadPanicked,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let store = CredentialStore::new();
    if let Err(e) = store.fetch(&args.credential_store) {
        tracing::warn!(error = %e, "failed to load credential store, starting empty");
    }

    let ctx = Arc::new(CryptoContext::new());
    let mut failures = 0_u32;

    for index in 0..args.supplicants {
        match run_device(index, args.attempts, ctx.clone(), store.clone()) {
            Ok(()) => tracing::info!(device = index, "scenario completed"),
            Err(e) => {
                failures += 1;
                tracing::error!(device = index, error = %e, "scenario failed");
            }
        }
    }

    store.sync(&args.credential_store)?;

    if failures > 0 {
        return Err(format!("{failures} of {} scenarios failed", args.supplicants).into());
    }
    Ok(())
}

fn run_device(
    index: u32,
    attempts: u32,
    ctx: Arc<CryptoContext>,
    store: CredentialStore,
) -> Result<(), CliError> {
    let (sup_net, auth_net) = channel_pair();
    let puf = SimulatedPuf::for_device(index);
    let sup_ctx = ctx.clone();

    let handle = std::thread::spawn(move || -> Result<(), EngineError> {
        let mut supplicant = Supplicant::new(sup_net, puf, SystemEnvironment, sup_ctx);
        supplicant.init()?;
        supplicant.sign_up()?;
        supplicant.connect(attempts)?;
        supplicant.transmit(&padded_payload(format!("hello from device {index}").as_bytes()), true)?;
        supplicant.transmit(&padded_payload(b"second tagged frame"), false)?;
        Ok(())
    });

    let mut authenticator = Authenticator::new(auth_net, SystemEnvironment, ctx, store);
    authenticator.init()?;

    let mut buf = [0_u8; 1522];

    let n = authenticator.receive_frame(&mut buf)?;
    authenticator.sign_up(&buf[..n])?;

    let n = authenticator.receive_frame(&mut buf)?;
    authenticator.accept(&buf[..n])?;

    let n = authenticator.receive_frame(&mut buf)?;
    let first = Performance::decode(&buf[..n])?;
    if !authenticator.validate(&first, true) {
        return Err(CliError::Engine(EngineError::ProofMismatch));
    }

    let n = authenticator.receive_frame(&mut buf)?;
    let second = Performance::decode(&buf[..n])?;
    if !authenticator.validate(&second, false) {
        return Err(CliError::Engine(EngineError::ProofMismatch));
    }

    handle.join().map_err(|_| CliError::ThreadPanicked)??;
    Ok(())
}

struct ChannelNetwork {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
}

impl Network for ChannelNetwork {
    fn init(&mut self) -> Result<(), NetworkError> {
        Ok(())
    }

    fn send(&mut self, frame: &[u8]) -> Result<(), NetworkError> {
        self.tx.send(frame.to_vec()).map_err(|e| NetworkError::Io(e.to_string()))
    }

    fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize, NetworkError> {
        let frame = self.rx.recv_timeout(timeout).map_err(|_| NetworkError::Timeout)?;
        let n = frame.len().min(buf.len());
        buf[..n].copy_from_slice(&frame[..n]);
        Ok(n)
    }
}

fn channel_pair() -> (ChannelNetwork, ChannelNetwork) {
    let (tx_a, rx_b) = mpsc::channel();
    let (tx_b, rx_a) = mpsc::channel();
    (ChannelNetwork { tx: tx_a, rx: rx_a }, ChannelNetwork { tx: tx_b, rx: rx_b })
}

/// Deterministic simulated PUF: both operations are SHA-256 over a
/// fixed per-device seed, so the same simulated device always reports
/// the same base identity and the same challenge/response pairs.
struct SimulatedPuf {
    seed: [u8; 32],
}

impl SimulatedPuf {
    fn for_device(index: u32) -> Self {
        let mut material = b"puf-acs-cli-device".to_vec();
        material.extend_from_slice(&index.to_le_bytes());
        Self { seed: CryptoContext::sha256(&material) }
    }
}

impl Puf for SimulatedPuf {
    fn puf_to_mac(&self) -> Mac {
        mac_from_digest(&CryptoContext::sha256(&self.seed))
    }

    fn get_puf_response(&self, challenge: Mac) -> Mac {
        let mut material = self.seed.to_vec();
        material.extend_from_slice(&challenge.bytes());
        mac_from_digest(&CryptoContext::sha256(&material))
    }
}

fn mac_from_digest(digest: &[u8; 32]) -> Mac {
    let mut out = [0_u8; 6];
    out.copy_from_slice(&digest[0..6]);
    Mac::new(out)
}

/// Right-pad to the minimum performance-frame payload (64-byte frame
/// floor minus the 22-byte header) so short demo payloads still encode.
fn padded_payload(data: &[u8]) -> Vec<u8> {
    let mut padded = data.to_vec();
    if padded.len() < 42 {
        padded.resize(42, 0);
    }
    padded
}

//! Injected clock and randomness, replacing the reference
//! implementation's implicit `time()`/`rand()` calls with an explicit
//! capability the engines and test harness both hold.

use std::time::{Duration, Instant};

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Clock and randomness capability injected into the protocol engines.
///
/// Mirrors the `Network`/`Puf` capability traits: a single owner,
/// injected at engine construction, so tests can supply deterministic
/// time and randomness instead of the system clock and OS entropy.
pub trait Environment: Clone {
    /// An opaque timestamp usable only for ordering and subtraction.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// The current time.
    fn now(&self) -> Self::Instant;

    /// Fill `buf` with random bytes.
    fn random_bytes(&self, buf: &mut [u8]);
}

/// Real-clock, OS-entropy environment for production use.
#[derive(Clone, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn random_bytes(&self, buf: &mut [u8]) {
        rand_chacha::rand_core::OsRng.fill_bytes(buf);
    }
}

/// Deterministic logical-clock environment for tests.
///
/// Time is a manually-advanced tick counter rather than wall-clock
/// time, so scenario tests get reproducible orderings without sleeping.
#[derive(Clone)]
pub struct SimEnvironment {
    tick: std::sync::Arc<std::sync::atomic::AtomicU64>,
    rng: std::sync::Arc<std::sync::Mutex<ChaCha20Rng>>,
}

impl SimEnvironment {
    /// Build a new simulated environment seeded for reproducibility.
    pub fn new(seed: u64) -> Self {
        Self {
            tick: std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0)),
            rng: std::sync::Arc::new(std::sync::Mutex::new(ChaCha20Rng::seed_from_u64(seed))),
        }
    }

    /// Advance the logical clock by `n` ticks (1 tick = 1ms).
    pub fn advance(&self, n: u64) {
        self.tick.fetch_add(n, std::sync::atomic::Ordering::SeqCst);
    }
}

impl Environment for SimEnvironment {
    type Instant = Duration;

    fn now(&self) -> Self::Instant {
        Duration::from_millis(self.tick.load(std::sync::atomic::Ordering::SeqCst))
    }

    fn random_bytes(&self, buf: &mut [u8]) {
        let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.fill_bytes(buf);
    }
}

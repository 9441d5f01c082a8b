//! Explicit, shared crypto context replacing the reference
//! implementation's lazily-initialized global singleton.

use std::sync::Mutex;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

use crate::point::Point;
use crate::scalar::Scalar;

/// CSPRNG personalization string, folded into the seed at construction.
///
/// Matches the reference implementation's `mbedtls_ctr_drbg_seed`
/// personalization string exactly.
pub const PERSONALIZATION: &[u8] = b"puf-acs-esp";

/// Curve constants and CSPRNG, constructed once and shared by
/// reference (`Arc<CryptoContext>`) rather than reached for as a
/// process-wide global.
///
/// The RNG is behind a `Mutex` so the context can be handed out as a
/// shared immutable reference while still supporting sequential draws
/// from both protocol engines and tests.
pub struct CryptoContext {
    rng: Mutex<ChaCha20Rng>,
}

impl CryptoContext {
    /// Seed from OS entropy, folded with [`PERSONALIZATION`].
    pub fn new() -> Self {
        let mut seed_material = [0_u8; 32];
        rand_chacha::rand_core::OsRng.fill_bytes(&mut seed_material);
        Self::from_entropy(&seed_material)
    }

    /// Seed deterministically, for reproducible test vectors.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_entropy(&seed.to_le_bytes())
    }

    fn from_entropy(entropy: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(PERSONALIZATION);
        hasher.update(entropy);
        let digest = hasher.finalize();
        let mut seed = [0_u8; 32];
        seed.copy_from_slice(&digest);
        Self { rng: Mutex::new(ChaCha20Rng::from_seed(seed)) }
    }

    /// A uniformly random scalar, suitable for ephemeral `t`, `c`, `d`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned by a prior panic while
    /// holding the lock.
    pub fn rand_scalar(&self) -> Scalar {
        let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut buf = [0_u8; 32];
        rng.fill_bytes(&mut buf);
        Scalar::from_le_bytes(&buf).unwrap_or_else(|_| Scalar::zero())
    }

    /// The fixed curve generator, exposed here so callers don't need a
    /// separate import just to start a scalar-mul chain.
    pub fn generator(&self) -> Point {
        Point::generator()
    }

    /// SHA-256, infallible on any input length.
    pub fn sha256(bytes: &[u8]) -> [u8; 32] {
        let digest = Sha256::digest(bytes);
        let mut out = [0_u8; 32];
        out.copy_from_slice(&digest);
        out
    }
}

impl Default for CryptoContext {
    fn default() -> Self {
        Self::new()
    }
}

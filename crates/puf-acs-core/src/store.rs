//! The credential store (C4): a persistent map from the Supplicant's
//! current hashed MAC to its base identity, long-term public point, and
//! remaining access counter.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use puf_acs_math::Point;
use puf_acs_proto::Mac;

use crate::error::CredentialStoreError;

/// One credential-store row.
#[derive(Clone, Debug)]
struct Entry {
    base_mac: Mac,
    a: Point,
    counter: u32,
}

/// Result of a successful [`CredentialStore::query`]: enough to resume
/// the handshake as the Authenticator.
#[derive(Clone, Copy, Debug)]
pub struct QueryResult {
    /// The supplicant's original PUF-derived identity.
    pub base_mac: Mac,
    /// The supplicant's long-term public point.
    pub a: Point,
}

/// Synchronized, clonable map from `current_mac` to credential entries.
///
/// Thread-safe via `Arc<Mutex<_>>`, mirroring the reference in-memory
/// storage pattern: clones share the same underlying table, so the CLI
/// can hold a handle for inspection while the Authenticator engine owns
/// the handshake-mutating one.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<Mutex<HashMap<Mac, Entry>>>,
}

impl CredentialStore {
    /// An empty, unpersisted store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load entries from a CSV resource. A missing file yields an empty
    /// store, not an error.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn fetch(&self, path: impl AsRef<Path>) -> Result<(), CredentialStoreError> {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CredentialStoreError::Io(e.to_string())),
        };

        let mut table = HashMap::new();
        for (lineno, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let [base_hex, current_hex, a_b64, counter_str] = fields.as_slice() else {
                return Err(CredentialStoreError::MalformedRow(format!(
                    "line {}: expected 4 fields, got {}",
                    lineno + 1,
                    fields.len()
                )));
            };
            let base_mac = Mac::from_hex(base_hex).ok_or_else(|| {
                CredentialStoreError::MalformedRow(format!("line {}: bad base_mac", lineno + 1))
            })?;
            let current_mac = Mac::from_hex(current_hex).ok_or_else(|| {
                CredentialStoreError::MalformedRow(format!("line {}: bad current_mac", lineno + 1))
            })?;
            let a = Point::from_base64(a_b64).map_err(|e| {
                CredentialStoreError::MalformedRow(format!("line {}: bad point: {e}", lineno + 1))
            })?;
            let counter: u32 = counter_str.trim().parse().map_err(|_| {
                CredentialStoreError::MalformedRow(format!("line {}: bad counter", lineno + 1))
            })?;
            table.insert(current_mac, Entry { base_mac, a, counter });
        }

        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = table;
        Ok(())
    }

    /// Atomically persist all current entries as CSV.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sync(&self, path: impl AsRef<Path>) -> Result<(), CredentialStoreError> {
        let guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut out = String::new();
        for (current_mac, entry) in guard.iter() {
            let a_b64 = entry.a.to_base64().map_err(|e| {
                CredentialStoreError::Io(format!("failed to encode public point: {e}"))
            })?;
            out.push_str(&format!(
                "{},{},{},{}\n",
                entry.base_mac.to_hex(),
                current_mac.to_hex(),
                a_b64,
                entry.counter
            ));
        }
        drop(guard);

        let path = path.as_ref();
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, out).map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        std::fs::rename(&tmp, path).map_err(|e| CredentialStoreError::Io(e.to_string()))?;
        Ok(())
    }

    /// Insert or overwrite an entry, keyed by `hashed_mac`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn store(&self, base_mac: Mac, a: Point, hashed_mac: Mac, counter: u32) {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.insert(hashed_mac, Entry { base_mac, a, counter });
    }

    /// Look up `mac`. On hit with `decrement = true`, advances the
    /// chain (`current_mac ← hash(current_mac)`) and decrements the
    /// counter, removing the entry if it reaches zero.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn query(&self, mac: Mac, decrement: bool) -> Option<QueryResult> {
        let mut guard = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = guard.get(&mac)?.clone();
        let result = QueryResult { base_mac: entry.base_mac, a: entry.a };

        if decrement {
            guard.remove(&mac);
            if entry.counter > 1 {
                let mut advanced = mac;
                advanced.hash(1);
                guard.insert(advanced, Entry { counter: entry.counter - 1, ..entry });
            }
            // counter reaches zero: entry stays removed.
        }

        Some(result)
    }

    /// Number of live entries. Test/diagnostic use.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    /// True if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use puf_acs_math::Scalar;

    use super::*;

    fn sample_point() -> Point {
        Point::generator().mul(Scalar::from_le_bytes(&[7]).expect("valid"))
    }

    #[test]
    fn store_then_query_hits() {
        let cs = CredentialStore::new();
        let base = Mac::new([1; 6]);
        let mut hashed = base;
        hashed.hash(1);
        cs.store(base, sample_point(), hashed, 100);

        let result = cs.query(hashed, false).expect("hit");
        assert_eq!(result.base_mac, base);
        assert_eq!(result.a, sample_point());
    }

    #[test]
    fn query_with_decrement_advances_chain_and_removes_old_key() {
        let cs = CredentialStore::new();
        let base = Mac::new([2; 6]);
        let mut hashed = base;
        hashed.hash(1);
        cs.store(base, sample_point(), hashed, 2);

        let hit = cs.query(hashed, true);
        assert!(hit.is_some());
        assert!(cs.query(hashed, false).is_none(), "old key must be gone after advance");

        let mut next = hashed;
        next.hash(1);
        assert!(cs.query(next, false).is_some(), "advanced key must now be present");
    }

    #[test]
    fn counter_exhaustion_removes_entry() {
        let cs = CredentialStore::new();
        let base = Mac::new([3; 6]);
        let mut hashed = base;
        hashed.hash(1);
        cs.store(base, sample_point(), hashed, 1);

        assert!(cs.query(hashed, true).is_some());
        assert_eq!(cs.len(), 0);

        let mut next = hashed;
        next.hash(1);
        assert!(cs.query(next, false).is_none());
    }

    #[test]
    fn query_miss_returns_none() {
        let cs = CredentialStore::new();
        assert!(cs.query(Mac::new([9; 6]), true).is_none());
    }

    #[test]
    fn fetch_of_missing_file_is_empty_not_error() {
        let cs = CredentialStore::new();
        cs.fetch("/nonexistent/path/does-not-exist.csv").expect("missing file is not an error");
        assert!(cs.is_empty());
    }

    #[test]
    fn sync_then_fetch_roundtrips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.csv");

        let cs = CredentialStore::new();
        let base = Mac::new([4; 6]);
        let mut hashed = base;
        hashed.hash(1);
        cs.store(base, sample_point(), hashed, 42);
        cs.sync(&path).expect("sync");

        let restored = CredentialStore::new();
        restored.fetch(&path).expect("fetch");
        let result = restored.query(hashed, false).expect("hit after roundtrip");
        assert_eq!(result.base_mac, base);
        assert_eq!(result.a, sample_point());
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;

/// Header a client sets to key its feed requests; a newer request with the
/// same key supersedes the older one.
///
/// Keys share one namespace across all callers, so they only isolate clients
/// that pick unguessable keys (for example a per-tab random id). Anyone
/// reusing a key can supersede the request that holds it.
pub const FEED_KEY_HEADER: &str = "x-feed-key";

/// Longer keys are ignored and the request runs unkeyed.
pub const MAX_FEED_KEY_LEN: usize = 128;

type Registry = HashMap<String, (u64, CancellationToken)>;

/// In-flight feed requests keyed by client-chosen feed key.
#[derive(Clone, Default)]
pub struct InFlight {
    inner: Arc<Mutex<Registry>>,
    seq: Arc<AtomicU64>,
}

/// Registration for one request. Dropping it, whether the request completed
/// or its future was abandoned, releases the key.
pub struct Flight {
    key: String,
    id: u64,
    token: CancellationToken,
    registry: Arc<Mutex<Registry>>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // The map stays consistent even if a holder panicked.
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request under `key`, cancelling whichever request held it.
    pub fn begin(&self, key: &str) -> Flight {
        let id = self.seq.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();

        if let Some((old_id, old)) = lock(&self.inner).insert(key.to_string(), (id, token.clone()))
        {
            tracing::debug!(key, old_id, id, "superseding in-flight request");
            old.cancel();
        }

        Flight {
            key: key.to_string(),
            id,
            token,
            registry: self.inner.clone(),
        }
    }

    /// Number of keys with a live request.
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Flight {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        let mut registry = lock(&self.registry);
        if registry.get(&self.key).is_some_and(|(id, _)| *id == self.id) {
            registry.remove(&self.key);
        }
    }
}

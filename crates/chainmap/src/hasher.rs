//! Bucket routing with pooled hash state
//!
//! Hash states are stateful, so each index computation borrows one
//! instance from the pool, resets it, and hands it back when done.

use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;
use ahash::{AHasher, RandomState};
use parking_lot::Mutex;

/// Fixed seeds for the default hasher. Bucket placement must not depend on
/// which pooled instance computed it.
const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Resettable 64-bit hash state
pub trait HashState: Send {
    /// Return the state to its freshly constructed form
    fn reset(&mut self);

    /// Feed bytes into the state
    fn write(&mut self, bytes: &[u8]);

    /// Produce the 64-bit digest of everything written since the last reset
    fn finish(&self) -> u64;
}

/// Default hash state backed by AHash with fixed seeds
#[derive(Clone)]
pub struct AHashState {
    seeds: RandomState,
    inner: AHasher,
}

impl AHashState {
    /// Create a new state
    pub fn new() -> Self {
        let seeds = RandomState::with_seeds(SEEDS[0], SEEDS[1], SEEDS[2], SEEDS[3]);
        let inner = seeds.build_hasher();
        Self { seeds, inner }
    }
}

impl Default for AHashState {
    fn default() -> Self {
        Self::new()
    }
}

impl HashState for AHashState {
    fn reset(&mut self) {
        self.inner = self.seeds.build_hasher();
    }

    fn write(&mut self, bytes: &[u8]) {
        self.inner.write(bytes);
    }

    fn finish(&self) -> u64 {
        self.inner.finish()
    }
}

/// Adapter turning any `Hasher + Default` into a [`HashState`]
///
/// Reset rebuilds the hasher from `Default`.
#[derive(Default)]
pub struct StdHashState<H> {
    inner: H,
}

impl<H: Hasher + Default> StdHashState<H> {
    /// Create a new state
    pub fn new() -> Self {
        Self { inner: H::default() }
    }
}

impl<H: Hasher + Default + Send> HashState for StdHashState<H> {
    fn reset(&mut self) {
        self.inner = H::default();
    }

    fn write(&mut self, bytes: &[u8]) {
        self.inner.write(bytes);
    }

    fn finish(&self) -> u64 {
        self.inner.finish()
    }
}

type Factory = Arc<dyn Fn() -> Box<dyn HashState> + Send + Sync>;

/// Pool of idle hash states
///
/// An instance is owned by exactly one caller between `acquire` and
/// `release`. The pool lock only covers the pop and the push.
pub struct HasherPool {
    factory: Factory,
    idle: Mutex<Vec<Box<dyn HashState>>>,
}

impl HasherPool {
    /// Create an empty pool that builds states with `factory`
    pub fn new<F, H>(factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HashState + 'static,
    {
        Self {
            factory: Arc::new(move || Box::new(factory()) as Box<dyn HashState>),
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Compute the bucket index of `key` in a table of `size` buckets
    pub fn index(&self, key: &str, size: usize) -> usize {
        let mut state = self.acquire();
        state.reset();
        state.write(key.as_bytes());
        let digest = state.finish();
        self.release(state);

        (digest % size as u64) as usize
    }

    /// Number of idle states currently pooled
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn acquire(&self) -> Box<dyn HashState> {
        let pooled = self.idle.lock().pop();
        pooled.unwrap_or_else(|| (self.factory)())
    }

    fn release(&self, state: Box<dyn HashState>) {
        self.idle.lock().push(state);
    }
}

impl fmt::Debug for HasherPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasherPool")
            .field("idle", &self.idle())
            .finish()
    }
}

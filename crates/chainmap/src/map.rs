//! ChainMap: fixed-table string map guarded by one reader/writer lock

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::chain::Chains;
use crate::error::{Error, Result};
use crate::hasher::{AHashState, HashState, HasherPool};
use crate::stats::MapStats;

/// Bucket count used by [`Builder`] when none is given
pub const DEFAULT_BUCKETS: usize = 1024;

/// Thread-safe map from string keys to string values
///
/// The bucket table is sized once at construction and never grows. Bucket
/// indices are computed before the lock is taken; lookups share the lock,
/// puts and deletes hold it exclusively for the whole table.
pub struct ChainMap {
    /// Bucket chains behind the table-wide guard
    chains: RwLock<Chains>,

    /// Hash states used for routing keys to buckets
    hashers: HasherPool,

    /// Operation statistics
    stats: MapStats,

    /// Number of buckets
    buckets: usize,
}

impl ChainMap {
    /// Create a map with `buckets` buckets and the default hasher
    ///
    /// # Arguments
    /// * `buckets` - Size of the bucket table (at least 1)
    ///
    /// # Returns
    /// * `Result<ChainMap>` - `Error::ZeroBuckets` if `buckets` is 0
    pub fn new(buckets: usize) -> Result<Self> {
        Self::with_hasher(AHashState::new, buckets)
    }

    /// Create a map routing keys with hash states built by `factory`
    ///
    /// Every call of `factory` must return a fresh, independent state.
    ///
    /// # Arguments
    /// * `factory` - Constructor for 64-bit hash states
    /// * `buckets` - Size of the bucket table (at least 1)
    ///
    /// # Returns
    /// * `Result<ChainMap>` - `Error::ZeroBuckets` if `buckets` is 0
    pub fn with_hasher<F, H>(factory: F, buckets: usize) -> Result<Self>
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HashState + 'static,
    {
        Self::from_parts(HasherPool::new(factory), buckets)
    }

    /// Start configuring a map
    pub fn builder() -> Builder {
        Builder::new()
    }

    fn from_parts(hashers: HasherPool, buckets: usize) -> Result<Self> {
        if buckets == 0 {
            return Err(Error::ZeroBuckets);
        }

        debug!(buckets, "Creating chain map");

        Ok(Self {
            chains: RwLock::new(Chains::new(buckets)),
            hashers,
            stats: MapStats::new(),
            buckets,
        })
    }

    fn index(&self, key: &str) -> usize {
        self.hashers.index(key, self.buckets)
    }

    /// Insert `key` or overwrite its value
    pub fn put(&self, key: &str, value: &str) {
        let bucket = self.index(key);
        let mut chains = self.chains.write();

        match chains.find(bucket, key) {
            Some(found) => {
                let slot = chains.value_mut(found);
                slot.clear();
                slot.push_str(value);
                self.stats.record_update();
                trace!(bucket, "Updated existing key");
            }
            None => {
                chains.append(bucket, key.to_owned(), value.to_owned());
                self.stats.record_insert();
                trace!(bucket, "Inserted new key");
            }
        }
    }

    /// Get a copy of the value stored for `key`
    ///
    /// # Returns
    /// * `Option<String>` - `None` if the key is absent
    pub fn get(&self, key: &str) -> Option<String> {
        let bucket = self.index(key);
        let chains = self.chains.read();

        match chains.find(bucket, key) {
            Some(found) => {
                self.stats.record_hit();
                Some(chains.value(found).to_owned())
            }
            None => {
                self.stats.record_miss();
                trace!(bucket, "Lookup missed");
                None
            }
        }
    }

    /// Check whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        let bucket = self.index(key);
        self.chains.read().find(bucket, key).is_some()
    }

    /// Delete `key` if present; deleting an absent key is a no-op
    pub fn delete(&self, key: &str) {
        self.remove(key);
    }

    /// Delete `key` and return the value it held
    ///
    /// # Returns
    /// * `Option<String>` - `None` if the key was absent
    pub fn remove(&self, key: &str) -> Option<String> {
        let bucket = self.index(key);
        let mut chains = self.chains.write();

        let Some(found) = chains.find(bucket, key) else {
            self.stats.record_absent_delete();
            return None;
        };

        self.stats.record_removal();
        trace!(bucket, "Removed key");
        Some(chains.unlink(found))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.chains.read().len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.chains.read().is_empty()
    }

    /// Size of the bucket table
    pub fn bucket_count(&self) -> usize {
        self.buckets
    }

    /// Number of entries sharing the bucket `key` routes to
    pub fn chain_len(&self, key: &str) -> usize {
        let bucket = self.index(key);
        self.chains.read().chain_len(bucket)
    }

    /// Remove every entry; the bucket table is kept
    pub fn clear(&self) {
        let mut chains = self.chains.write();
        debug!(entries = chains.len(), "Clearing chain map");
        chains.clear();
    }

    /// Get operation statistics
    pub fn stats(&self) -> &MapStats {
        &self.stats
    }
}

impl std::fmt::Debug for ChainMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainMap")
            .field("buckets", &self.buckets)
            .field("len", &self.len())
            .finish()
    }
}

/// Configuration for a [`ChainMap`]
pub struct Builder {
    buckets: usize,
    hashers: Option<HasherPool>,
}

impl Builder {
    /// Create a builder with [`DEFAULT_BUCKETS`] and the default hasher
    pub fn new() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            hashers: None,
        }
    }

    /// Set the size of the bucket table
    pub fn buckets(mut self, buckets: usize) -> Self {
        self.buckets = buckets;
        self
    }

    /// Route keys with hash states built by `factory`
    pub fn hasher<F, H>(mut self, factory: F) -> Self
    where
        F: Fn() -> H + Send + Sync + 'static,
        H: HashState + 'static,
    {
        self.hashers = Some(HasherPool::new(factory));
        self
    }

    /// Build the map
    pub fn build(self) -> Result<ChainMap> {
        let hashers = self
            .hashers
            .unwrap_or_else(|| HasherPool::new(AHashState::new));
        ChainMap::from_parts(hashers, self.buckets)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

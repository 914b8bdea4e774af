//! Larder - Store Module
//! Top-level module for the store: the in-memory entry map, its
//! locking discipline, and the persistence entry points.

pub mod metrics;
pub mod persist;
pub mod query;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::{LarderError, Result};
use crate::types::{Key, Payload};

use self::metrics::StoreMetrics;
use self::query::KeyPattern;

/// The core Larder store: a string-keyed map of JSON payloads,
/// persisted on demand to a single (optionally gzipped) file.
///
/// ## Concurrency Model
/// - **Read operations** (`get`, `keys`, `query`, the snapshot phase of
///   `save_to`) acquire a **read lock** (shared)
/// - **Write operations** (`set`, `delete`, the swap phase of `load`)
///   acquire a **write lock** (exclusive)
/// - Multiple concurrent readers allowed, writers block all
/// - No lock is held across independent operations: `set` followed by
///   `save` is two acquisitions, and the pair is not atomic with
///   respect to other writers
///
/// Cloning the store is cheap and every clone shares the same entries,
/// so a handle can be handed to each thread of a worker pool.
///
/// ## Example
/// ```no_run
/// use larder::store::Larder;
/// use std::thread;
///
/// let store = Larder::new();
///
/// let writer = store.clone();
/// thread::spawn(move || {
///     writer.set("key", &"value").unwrap();
/// });
///
/// let value: Result<String, _> = store.get("key");
/// ```
#[derive(Clone)]
pub struct Larder {
    inner: Arc<Shared>,
}

struct Shared {
    /// All entries, keyed by string. A `BTreeMap` keeps iteration in
    /// key order, which makes save output deterministic.
    entries: RwLock<BTreeMap<Key, Payload>>,
    /// Store configuration, immutable after construction.
    config: Config,
    /// Operation counters, shared by all clones.
    metrics: StoreMetrics,
}

impl Larder {
    /// Create an empty store with no backing file.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            inner: Arc::new(Shared {
                entries: RwLock::new(BTreeMap::new()),
                config,
                metrics: StoreMetrics::new(),
            }),
        }
    }

    /// Open a store backed by the file at `path` and load its contents.
    /// Whether the file is gunzipped is inferred from a `.gz` suffix.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = Self::with_config(Config::new(&path));
        store.load(&path)?;
        Ok(store)
    }

    /// Encode `value` as JSON and store it under `key` (write lock).
    /// An existing entry is fully replaced; on an encoding failure the
    /// store is left unchanged.
    pub fn set<T: Serialize>(&self, key: impl Into<Key>, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value).map_err(LarderError::Encode)?;
        let key = key.into();
        self.inner.metrics.record_set(key.len(), payload.len());
        self.inner.entries.write().unwrap().insert(key, payload);
        Ok(())
    }

    /// `set` followed by a full save to the configured location.
    /// The write lock is released before the save takes its read
    /// snapshot; the pair is not atomic with respect to other writers.
    pub fn set_and_save<T: Serialize>(&self, key: impl Into<Key>, value: &T) -> Result<()> {
        self.set(key, value)?;
        self.save()
    }

    /// Decode the payload stored at `key` into `T` (read lock).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let payload = self.get_raw(key)?;
        serde_json::from_str(&payload).map_err(LarderError::Decode)
    }

    /// The stored JSON text for `key`, undecoded (read lock).
    pub fn get_raw(&self, key: &str) -> Result<Payload> {
        let entries = self.inner.entries.read().unwrap();
        match entries.get(key) {
            Some(payload) => {
                self.inner.metrics.record_get(Some(payload.len()));
                Ok(payload.clone())
            }
            None => {
                self.inner.metrics.record_get(None);
                Err(LarderError::KeyNotFound(key.to_string()))
            }
        }
    }

    /// Remove `key` if present (write lock).
    /// Deleting an absent key is a no-op, not an error.
    pub fn delete(&self, key: &str) {
        self.inner.metrics.record_delete();
        self.inner.entries.write().unwrap().remove(key);
    }

    /// Point-in-time snapshot of all keys, in sorted order (read lock).
    /// The snapshot is not kept in sync with later mutations.
    pub fn keys(&self) -> Vec<Key> {
        self.inner.entries.read().unwrap().keys().cloned().collect()
    }

    /// Number of entries (read lock).
    pub fn len(&self) -> usize {
        self.inner.entries.read().unwrap().len()
    }

    /// True if the store holds no entries (read lock).
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().unwrap().is_empty()
    }

    /// Query entries by pattern (read lock).
    ///
    /// Without a `*` the pattern names exactly one key and the result
    /// holds at most that entry. With a `*` the pattern is split into
    /// its non-empty literal fragments and a key matches when ANY
    /// fragment occurs in it as a substring, an OR-of-substrings match
    /// rather than a glob (see [`query::KeyPattern`]). Errors with
    /// `NoMatch` when nothing matched.
    pub fn query(&self, pattern: &str) -> Result<BTreeMap<Key, Payload>> {
        self.inner.metrics.record_query();
        let parsed = KeyPattern::parse(pattern);
        let entries = self.inner.entries.read().unwrap();
        let matches: BTreeMap<Key, Payload> = entries
            .iter()
            .filter(|(key, _)| parsed.matches(key))
            .map(|(key, payload)| (key.clone(), payload.clone()))
            .collect();
        if matches.is_empty() {
            return Err(LarderError::NoMatch(pattern.to_string()));
        }
        Ok(matches)
    }

    /// All entries whose key matches `re` (read lock).
    /// Zero matches yield an empty map, never an error.
    pub fn query_regex(&self, re: &Regex) -> BTreeMap<Key, Payload> {
        self.inner.metrics.record_query();
        let entries = self.inner.entries.read().unwrap();
        entries
            .iter()
            .filter(|(key, _)| re.is_match(key))
            .map(|(key, payload)| (key.clone(), payload.clone()))
            .collect()
    }

    /// Replace the store's contents with the file at `path`.
    ///
    /// The file is read and decoded completely before the write lock is
    /// taken; on any failure the in-memory entries are left untouched.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let compressed = self.inner.config.compress_for(path);
        let loaded = persist::read_file(path, compressed)?;

        log::info!("loaded {} entries from {:?}", loaded.len(), path);
        self.inner.metrics.record_load();

        *self.inner.entries.write().unwrap() = loaded;
        Ok(())
    }

    /// Persist to the configured location (full rewrite).
    /// The target path is computed from the configured location and
    /// compression mode; the configuration itself is never modified.
    pub fn save(&self) -> Result<()> {
        let path = self
            .inner
            .config
            .effective_location()
            .ok_or(LarderError::NoLocation)?;
        self.save_to(path)
    }

    /// Persist to `path`, truncating any existing file.
    ///
    /// The entry snapshot is taken under the read lock and the lock is
    /// released before encoding and I/O; writes that interleave after
    /// the snapshot are not reflected in this save.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = self.inner.entries.read().unwrap().clone();
        let compressed = self.inner.config.compress_for(path);
        persist::write_file(path, &snapshot, compressed)?;

        log::info!("saved {} entries to {:?}", snapshot.len(), path);
        self.inner.metrics.record_save();
        Ok(())
    }

    /// The store's configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Operation counters for this store (shared by all clones).
    pub fn metrics(&self) -> &StoreMetrics {
        &self.inner.metrics
    }
}

impl Default for Larder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompressMode;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Human {
        name: String,
        height: f64,
    }

    #[test]
    fn test_set_and_get() {
        let store = Larder::new();
        store.set("hello", &"world").unwrap();
        let value: String = store.get("hello").unwrap();
        assert_eq!(value, "world");
    }

    #[test]
    fn test_set_struct_and_get() {
        let store = Larder::new();
        let human = Human {
            name: "Dante".to_string(),
            height: 5.4,
        };
        store.set("human:1", &human).unwrap();
        assert_eq!(store.get::<Human>("human:1").unwrap(), human);
    }

    #[test]
    fn test_overwrite_replaces() {
        let store = Larder::new();
        store.set("key", &"old").unwrap();
        store.set("key", &"new").unwrap();
        assert_eq!(store.get::<String>("key").unwrap(), "new");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing() {
        let store = Larder::new();
        assert!(matches!(
            store.get::<String>("missing"),
            Err(LarderError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_get_wrong_shape_is_decode_error() {
        let store = Larder::new();
        store.set("text", &"not a number").unwrap();
        assert!(matches!(
            store.get::<u64>("text"),
            Err(LarderError::Decode(_))
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = Larder::new();
        store.set("key", &1).unwrap();
        store.delete("key");
        store.delete("key"); // absent: still fine
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys_sorted_snapshot() {
        let store = Larder::new();
        store.set("charlie", &3).unwrap();
        store.set("alpha", &1).unwrap();
        store.set("bravo", &2).unwrap();
        assert_eq!(store.keys(), vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_get_raw_is_json_text() {
        let store = Larder::new();
        store.set("greeting", &"hi").unwrap();
        assert_eq!(store.get_raw("greeting").unwrap(), "\"hi\"");
    }

    #[test]
    fn test_query_exact() {
        let store = Larder::new();
        store.set("name:1", &"a").unwrap();
        let hits = store.query("name:1").unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits.contains_key("name:1"));
    }

    #[test]
    fn test_query_exact_miss_is_no_match() {
        let store = Larder::new();
        store.set("name:1", &"a").unwrap();
        assert!(matches!(
            store.query("name:2"),
            Err(LarderError::NoMatch(_))
        ));
    }

    #[test]
    fn test_query_wildcard() {
        let store = Larder::new();
        store.set("name:1", &"a").unwrap();
        store.set("name:2", &"b").unwrap();
        store.set("country:1", &"c").unwrap();

        let hits = store.query("name*").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains_key("name:1"));
        assert!(hits.contains_key("name:2"));
    }

    #[test]
    fn test_query_regex_zero_matches() {
        let store = Larder::new();
        store.set("name:1", &"a").unwrap();
        let re = Regex::new("^country").unwrap();
        assert!(store.query_regex(&re).is_empty());
    }

    #[test]
    fn test_query_regex_matches() {
        let store = Larder::new();
        store.set("hello:1", &"world1").unwrap();
        store.set("hello:2", &"world2").unwrap();
        store.set("world:1", &"hello1").unwrap();

        let re = Regex::new("hello").unwrap();
        assert_eq!(store.query_regex(&re).len(), store.keys().len() - 1);
    }

    #[test]
    fn test_save_without_location() {
        let store = Larder::new();
        assert!(matches!(store.save(), Err(LarderError::NoLocation)));
    }

    #[test]
    fn test_clone_shares_entries() {
        let store = Larder::new();
        let clone = store.clone();
        clone.set("shared", &"data").unwrap();
        assert_eq!(store.get::<String>("shared").unwrap(), "data");
    }

    #[test]
    fn test_save_honors_compress_mode() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("store.json");
        let config = Config::new(&base).with_compress(CompressMode::On);

        let store = Larder::with_config(config);
        store.set("key", &1).unwrap();
        store.save().unwrap();

        // `On` appends .gz to the configured location.
        assert!(base.with_file_name("store.json.gz").exists());
        assert!(!base.exists());
    }

    #[test]
    fn test_metrics_wired() {
        let store = Larder::new();
        store.set("key", &1).unwrap();
        let _ = store.get::<u64>("key").unwrap();
        store.delete("key");
        assert_eq!(store.metrics().total_ops(), 3);
    }
}

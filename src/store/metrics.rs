//! Larder - Store Metrics & Observability
//! Provides atomic counters for tracking store operations
//! in a lock-free, thread-safe manner using `AtomicU64`.
//!
//! These counters enable runtime introspection into store
//! behavior without impacting performance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Atomic operation counters for a Larder store.
///
/// All counters use `Ordering::Relaxed` since we only need
/// eventual consistency for observability — not synchronization.
#[derive(Debug)]
pub struct StoreMetrics {
    /// Total number of `set` operations.
    pub sets: AtomicU64,
    /// Total number of `get` operations.
    pub gets: AtomicU64,
    /// Total number of `delete` operations.
    pub deletes: AtomicU64,
    /// Total number of wildcard and regex queries.
    pub queries: AtomicU64,
    /// Total number of saves to disk.
    pub saves: AtomicU64,
    /// Total number of loads from disk.
    pub loads: AtomicU64,
    /// Total payload bytes written into the store (keys + payloads).
    pub bytes_written: AtomicU64,
    /// Total payload bytes returned by get.
    pub bytes_read: AtomicU64,
    /// Timestamp when the store was created.
    store_started: Instant,
}

impl StoreMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self {
            sets: AtomicU64::new(0),
            gets: AtomicU64::new(0),
            deletes: AtomicU64::new(0),
            queries: AtomicU64::new(0),
            saves: AtomicU64::new(0),
            loads: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            bytes_read: AtomicU64::new(0),
            store_started: Instant::now(),
        }
    }

    /// Record a set operation.
    pub fn record_set(&self, key_size: usize, payload_size: usize) {
        self.sets.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add((key_size + payload_size) as u64, Ordering::Relaxed);
    }

    /// Record a get operation.
    pub fn record_get(&self, payload_size: Option<usize>) {
        self.gets.fetch_add(1, Ordering::Relaxed);
        if let Some(size) = payload_size {
            self.bytes_read.fetch_add(size as u64, Ordering::Relaxed);
        }
    }

    /// Record a delete operation.
    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a query operation (wildcard or regex).
    pub fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a save to disk.
    pub fn record_save(&self) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a load from disk.
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Get store uptime in seconds.
    pub fn uptime_secs(&self) -> f64 {
        self.store_started.elapsed().as_secs_f64()
    }

    /// Get total number of operations (sets + gets + deletes + queries).
    pub fn total_ops(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
            + self.gets.load(Ordering::Relaxed)
            + self.deletes.load(Ordering::Relaxed)
            + self.queries.load(Ordering::Relaxed)
    }

    /// Get operations per second since store creation.
    pub fn ops_per_sec(&self) -> f64 {
        let uptime = self.uptime_secs();
        if uptime < 0.001 {
            return 0.0;
        }
        self.total_ops() as f64 / uptime
    }

    /// Format metrics as a human-readable report.
    pub fn report(&self) -> String {
        format!(
            "\n═══ Larder Store Metrics ═══\n\
             Operations:\n\
               sets:      {}\n\
               gets:      {}\n\
               deletes:   {}\n\
               queries:   {}\n\
             Throughput:\n\
               total ops: {}\n\
               ops/sec:   {:.2}\n\
             I/O:\n\
               written:   {} bytes\n\
               read:      {} bytes\n\
             Persistence:\n\
               saves:     {}\n\
               loads:     {}\n\
             Uptime: {:.2}s",
            self.sets.load(Ordering::Relaxed),
            self.gets.load(Ordering::Relaxed),
            self.deletes.load(Ordering::Relaxed),
            self.queries.load(Ordering::Relaxed),
            self.total_ops(),
            self.ops_per_sec(),
            self.bytes_written.load(Ordering::Relaxed),
            self.bytes_read.load(Ordering::Relaxed),
            self.saves.load(Ordering::Relaxed),
            self.loads.load(Ordering::Relaxed),
            self.uptime_secs(),
        )
    }
}

impl Default for StoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

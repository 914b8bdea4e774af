//! Larder - Embedded JSON-File Key-Value Store
//!
//! A process-local key-value store that keeps every entry in memory,
//! serializes values as JSON, and persists the whole map to a single
//! file, optionally gzip-compressed.
//!
//! ## Features
//! - **In-memory map**: string keys to JSON payloads behind a single RwLock
//! - **Single-file persistence**: pretty-printed JSON, full rewrite on save
//! - **Gzip**: transparent compression, inferred from a `.gz` suffix
//! - **Wildcard queries**: `*`-patterns matched by OR-of-substrings
//! - **Regex queries**: match keys against a compiled `regex::Regex`
//! - **Concurrency**: clone the store handle across threads; readers run
//!   in parallel, writers are exclusive
//! - **Metrics**: lock-free atomic counters for observability
//!
//! ## Example
//! ```no_run
//! use larder::store::Larder;
//!
//! let store = Larder::new();
//! store.set("greeting", &"hello").unwrap();
//!
//! let word: String = store.get("greeting").unwrap();
//! assert_eq!(word, "hello");
//!
//! store.save_to("store.json.gz").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod types;

//! A bounded, thread-safe key/value cache with first-in-first-out eviction.
//!
//! The cache holds at most `capacity` entries. When it is full, writing a new key evicts the key
//! that was written the longest time ago. Overwriting a key counts as a fresh write and moves it
//! to the back of the line, while reading a key never changes the eviction order. This is FIFO,
//! not LRU.
//!
//! # Features
//!
//! - Thread-safe by default, no need for explicit synchronization
//! - Many concurrent readers, one writer at a time, behind a single reader/writer lock
//! - Exactly one eviction per write that overflows the capacity, never more
//! - No unsafe code
//!
//! # Examples
//!
//! Basic usage with string keys and values:
//!
//! ```rust
//! use bounded_fifo_cache::Cache;
//!
//! let cache = Cache::with_capacity(2).unwrap();
//!
//! cache.add_or_update("key1", "value1");
//! assert_eq!(cache.try_get("key1"), Some("value1"));
//! assert_eq!(cache.try_get("missing"), None);
//! ```
//!
//! Updating a key protects it from the next eviction, reading it does not:
//!
//! ```rust
//! use bounded_fifo_cache::Cache;
//!
//! let cache = Cache::with_capacity(2).unwrap();
//! cache.add_or_update("a", 1);
//! cache.add_or_update("b", 2);
//! cache.add_or_update("a", 10);
//! cache.add_or_update("c", 3);
//! assert_eq!(cache.try_get("b"), None);
//! assert_eq!(cache.try_get("a"), Some(10));
//!
//! cache.try_get("a");
//! cache.add_or_update("d", 4);
//! assert_eq!(cache.try_get("a"), None);
//! ```
//!
//! A zero capacity is rejected:
//!
//! ```rust
//! use bounded_fifo_cache::{Cache, ConfigurationError};
//!
//! let result = Cache::<String, String>::with_capacity(0);
//! assert_eq!(result.unwrap_err(), ConfigurationError::ZeroCapacity);
//! ```
//!
//! Thread-safe usage across multiple threads:
//!
//! ```rust
//! use bounded_fifo_cache::Cache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(Cache::with_capacity(100).unwrap());
//! cache.add_or_update("key1", "value1");
//!
//! let cache_in_arc = Arc::clone(&cache);
//! let handle = thread::spawn(move || {
//!     cache_in_arc.add_or_update("key2", "value2");
//! });
//!
//! handle.join().unwrap();
//!
//! assert_eq!(cache.try_get("key1"), Some("value1"));
//! assert_eq!(cache.try_get("key2"), Some("value2"));
//! ```

#![forbid(unsafe_code)]
pub mod cache;
mod error;

pub use cache::Cache;
pub use cache::stats::Stats;
pub use error::ConfigurationError;

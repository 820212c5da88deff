//! # chainmap
//!
//! Thread-safe string-to-string hash map for embedding in larger programs.
//!
//! ## Architecture
//! - **Routing**: pooled, resettable 64-bit hash states pick a bucket (`hash % buckets`)
//! - **Chains**: each bucket is a singly-linked chain behind a sentinel head,
//!   stored in one arena with a free list
//! - **Guard**: a single `RwLock` over the whole table; lookups share it,
//!   puts and deletes take it exclusively
//!
//! The bucket table is fixed at construction and never resized.
//!
//! ```
//! use chainmap::ChainMap;
//!
//! let map = ChainMap::new(16).unwrap();
//! map.put("alice", "30");
//! assert_eq!(map.get("alice").as_deref(), Some("30"));
//! map.delete("alice");
//! assert_eq!(map.get("alice"), None);
//! ```

#![warn(missing_docs)]

mod chain;
mod error;
mod hasher;
mod map;
mod stats;

pub use error::{Error, Result};
pub use hasher::{AHashState, HashState, StdHashState};
pub use map::{Builder, ChainMap, DEFAULT_BUCKETS};
pub use stats::MapStats;

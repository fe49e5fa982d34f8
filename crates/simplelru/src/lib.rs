//! # simplelru
//!
//! Fixed-capacity key/value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **KeyIndex**: AHash map from key to arena slot (O(1))
//! - **OrderIndex**: sparse map from recency position to arena slot
//! - **head/tail**: counters bracketing the live positions; eviction takes
//!   the entry at `tail`
//!
//! Every entry lives once in a slot arena and both indices refer to it by
//! slot number.
//!
//! ## Example
//!
//! ```rust
//! use simplelru::SimpleLru;
//!
//! let mut cache = SimpleLru::new(2)?;
//! cache.set("a", 1);
//! cache.set("b", 2);
//! cache.get("a");
//! cache.set("c", 3); // evicts "b"
//!
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
//! assert!(!cache.has("b"));
//! # Ok::<(), simplelru::Error>(())
//! ```
//!
//! `SimpleLru` is not synchronized. Wrap it in [`SharedLru`] to share one
//! cache between owners.

#![warn(missing_docs)]

mod config;
mod entry;
mod error;
mod index;
mod lru;
mod shared;
mod stats;

pub use config::Config;
pub use error::{Error, Result};
pub use lru::{Iter, Keys, SimpleLru};
pub use shared::SharedLru;
pub use stats::CacheStats;

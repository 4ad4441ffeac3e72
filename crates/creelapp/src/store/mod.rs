//! # Storage Layer
//!
//! The catch log is a single table file plus a directory of photo attachments.
//! [`catch_store::CatchStore`] owns the table semantics (decoding, ids, caching);
//! the [`backend::StorageBackend`] trait owns raw I/O.
//!
//! ## Cache Contract
//!
//! - Reads go through an explicit in-memory cache, filled lazily on first access.
//! - Every successful save drops the cache before returning, so the next read
//!   sees the file as written.
//! - `invalidate()` drops the cache on demand; `reload()` drops and re-reads.
//! - A save that fails with `StoreLocked` keeps the mutated table cached and
//!   marks the store dirty. `flush()` retries the write.
//!
//! ## Identity
//!
//! Each row carries a stable id in the leading `id` column. Positions (0-based,
//! table order) are still accepted from users, and are resolved to an id against
//! a fresh read right before the operation runs.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store over a data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── catches.csv                         # Catch table (`;` delimited)
//! ├── creel.toml                          # Optional configuration
//! └── photos/
//!     └── 20240601_063000_big_bass.jpg    # Attachments
//! ```

pub mod backend;
pub mod catch_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use catch_store::CatchStore;

//! # creelapp
//!
//! Core library of creel, a personal fishing catch log. It keeps one table of
//! catches plus their photos in a data directory, and answers filtered listings,
//! per-spot/per-lure statistics and spreadsheet exports over it.
//!
//! ## Architecture
//!
//! The crate is layered so that every UI (the `creel` CLI today) talks to the same API:
//!
//! ```text
//! UI (creel binary)
//!   └── api::CreelApi            thin facade: selector parsing, clock
//!         └── commands::*        business logic, returns CmdResult
//!               ├── query        pure filter/aggregate views
//!               ├── photos       attachment naming and storage
//!               └── store        CatchStore: cache, ids, save semantics
//!                     ├── table      `;`-delimited codec, lenient decoding
//!                     └── backend    FsBackend / MemBackend raw I/O
//! ```
//!
//! [`normalize`] holds the value parsers shared by every layer: lenient for data
//! read back from the table, strict for values a user just entered.
//!
//! ## Entry Points
//!
//! - [`init::initialize`]: production context over a data directory.
//! - [`store::memory::InMemoryStore`]: in-memory store for tests.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod init;
pub mod model;
pub mod normalize;
pub mod photos;
pub mod query;
pub mod store;
pub mod table;

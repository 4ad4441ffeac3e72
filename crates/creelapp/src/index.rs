//! # Catch Identifiers: Record Id vs Position
//!
//! Catches are referenced two ways:
//!
//! 1. **Record id (internal)**: a stable integer stored in the table's `id` column,
//!    assigned once when a catch is logged and never reused while that catch exists.
//! 2. **Position (external)**: the 0-based row number in table order, i.e. what the
//!    user sees in `creel list`.
//!
//! Positions drift: deleting row 2 moves every later row up. Every operation that
//! accepts a position therefore resolves it to a record id against a fresh read of
//! the table right before acting (see [`crate::store::CatchStore::resolve`]), and
//! from then on works by id only.
//!
//! ## Selector Syntax
//!
//! - `3`: the catch at position 3
//! - `#12` or `id:12`: the catch with id 12
//!
//! ## Canonical Positions
//!
//! Even when a listing is filtered, each entry keeps the position it has in the
//! full, unfiltered table, so `creel edit 4` targets the same catch whatever view
//! it was read from. Always build listings with [`index_records`].

use crate::model::{CatchRecord, RecordId};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A user input selecting one catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSelector {
    Position(usize),
    Id(RecordId),
}

impl fmt::Display for RowSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowSelector::Position(p) => write!(f, "{}", p),
            RowSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RowSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

/// A catch paired with its canonical position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub position: usize,
    #[serde(flatten)]
    pub record: CatchRecord,
}

/// Pairs every record with its position in table order.
pub fn index_records(records: Vec<CatchRecord>) -> Vec<DisplayRecord> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| DisplayRecord { position, record })
        .collect()
}

/// Parses `3`, `#12` or `id:12`.
pub fn parse_selector(s: &str) -> Result<RowSelector, String> {
    let s = s.trim();
    let id_part = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("id:"))
        .or_else(|| s.strip_prefix("ID:"));

    match id_part {
        Some(digits) => digits
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| RowSelector::Id(RecordId(id)))
            .ok_or_else(|| format!("Invalid record id: {}", s)),
        None => s
            .parse::<usize>()
            .map(RowSelector::Position)
            .map_err(|_| format!("Invalid selector: {} (use a position like 3 or an id like #12)", s)),
    }
}

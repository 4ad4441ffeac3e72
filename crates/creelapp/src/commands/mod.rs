//! # Command Layer
//!
//! This module contains the **core business logic** of creel. Each command lives in its
//! own submodule and implements a plain `run` function over a [`CatchStore`].
//!
//! ## Role and Responsibilities
//!
//! - Validate entered values (strict time parsing happens here, before any write)
//! - Resolve selectors to record ids right before mutating
//! - Return structured [`CmdResult`] values with affected records and messages
//! - Stay UI-agnostic: no printing, no prompts, no exit codes
//!
//! ## Locked Table
//!
//! A save that fails with [`CreelError::StoreLocked`] is not an error at this level.
//! The command returns normally with a warning message and `unsaved = true`; the
//! change stays in the store's dirty cache for the rest of the session.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and assert on `CmdResult` contents.
//!
//! ## Command Modules
//!
//! - [`add`]: Log a new catch
//! - [`edit`]: Overwrite a catch
//! - [`delete`]: Remove a catch (its photo stays)
//! - [`list`]: Filtered listing with canonical positions
//! - [`view`]: A single catch
//! - [`stats`]: Per-spot and per-lure summaries
//! - [`gallery`]: Catches with photos, newest first
//! - [`export`]: Spreadsheet bytes
//! - [`helpers`]: Shared utilities

use crate::error::{CreelError, Result};
use crate::index::DisplayRecord;
use crate::model::{CatchRecord, Field, LureType, RecordId, WeightUnit};
use crate::normalize::{
    format_date, format_time, parse_date, parse_date_or, parse_entered_time, parse_stored_time,
    safe_number,
};
use crate::query::GroupStats;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod gallery;
pub mod helpers;
pub mod list;
pub mod stats;
pub mod view;

#[derive(Debug, Clone, Serialize)]
pub struct CreelPaths {
    pub data_dir: PathBuf,
    pub table: PathBuf,
    pub photos: PathBuf,
    pub config: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A titled aggregate table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsTable {
    pub title: String,
    pub group_field: Field,
    pub rows: Vec<GroupStats>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<DisplayRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub stats: Vec<StatsTable>,
    pub export: Option<Vec<u8>>,
    pub messages: Vec<CmdMessage>,
    /// The change is only held in memory; the table could not be written.
    pub unsaved: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// Values for a catch as entered by the user.
///
/// `date` and `time` are kept as text: the date falls back to today when empty, the
/// time is parsed strictly when the input becomes a record.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchInput {
    pub date: String,
    pub time: String,
    pub species: String,
    pub length_cm: f64,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub spot: String,
    pub lure_type: LureType,
    pub lure_name: String,
    pub conditions: String,
    pub released: bool,
    pub comment: String,
}

impl CatchInput {
    /// Prefills an input from a stored record.
    ///
    /// Values the table could not read go through the lenient parsers here, so an
    /// edit starts from usable defaults (today, now, `0.0`, `kg`, `Other`, not released).
    pub fn from_record(record: &CatchRecord) -> Self {
        Self {
            date: format_date(parse_date(&Field::Date.value_of(record)).into_value()),
            time: format_time(parse_stored_time(&Field::Time.value_of(record)).into_value()),
            species: record.species.clone(),
            length_cm: safe_number(&Field::LengthCm.value_of(record), 0.0).into_value(),
            weight: safe_number(&Field::Weight.value_of(record), 0.0).into_value(),
            weight_unit: record.weight_unit.get().unwrap_or(WeightUnit::Kg),
            spot: record.spot.clone(),
            lure_type: record.lure_type.get().unwrap_or(LureType::Other),
            lure_name: record.lure_name.clone(),
            conditions: record.conditions.clone(),
            released: record.released.get().unwrap_or(false),
            comment: record.comment.clone(),
        }
    }

    /// Validates the input and builds a record draft (id not yet assigned).
    pub fn into_record(self, today: NaiveDate, photo_file: String) -> Result<CatchRecord> {
        let time = parse_entered_time(&self.time)?;

        let date = parse_date_or(&self.date, today);
        if date.is_defaulted() && !self.date.trim().is_empty() {
            return Err(CreelError::InvalidValue {
                field: "date",
                value: self.date,
            });
        }
        for (field, value) in [("length_cm", self.length_cm), ("weight", self.weight)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CreelError::InvalidValue {
                    field,
                    value: value.to_string(),
                });
            }
        }

        Ok(CatchRecord {
            id: RecordId(0),
            date: date.into_value().into(),
            time: time.into(),
            species: self.species.trim().to_string(),
            length_cm: self.length_cm.into(),
            weight: self.weight.into(),
            weight_unit: self.weight_unit.into(),
            spot: self.spot.trim().to_string(),
            lure_type: self.lure_type.into(),
            lure_name: self.lure_name.trim().to_string(),
            conditions: self.conditions,
            released: self.released.into(),
            comment: self.comment,
            photo_file,
        })
    }
}

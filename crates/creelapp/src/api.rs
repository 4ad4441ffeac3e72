//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all creel operations, whatever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: selector text becomes a [`RowSelector`], the clock is read here
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic belongs in `commands/*.rs`; presentation belongs to the caller.
//!
//! ## Selectors
//!
//! - **Position**: `N`, 0-based, as printed by `creel list` (e.g. `0`, `3`)
//! - **Record id**: `#N` or `id:N` (e.g. `#12`)
//!
//! Positions are resolved to ids against a fresh read of the table right before
//! the command acts.
//!
//! ## Generic Over StorageBackend
//!
//! `CreelApi<B: StorageBackend>` wraps a [`CatchStore`]:
//! - Production: `CreelApi<FsBackend>`
//! - Testing: `CreelApi<MemBackend>`

use crate::commands::{self, CatchInput, CmdResult, CreelPaths};
use crate::config::CreelConfig;
use crate::error::{CreelError, Result};
use crate::index::{self, RowSelector};
use crate::model::{LureType, WeightUnit};
use crate::normalize::{format_date, format_time};
use crate::photos::PhotoUpload;
use crate::query::Criteria;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;
use crate::table::LoadReport;
use chrono::{Local, NaiveDateTime};

/// The main API facade for creel operations.
pub struct CreelApi<B: StorageBackend> {
    store: CatchStore<B>,
    paths: CreelPaths,
    config: CreelConfig,
}

impl<B: StorageBackend> CreelApi<B> {
    pub fn new(store: CatchStore<B>, paths: CreelPaths, config: CreelConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn add_catch(&mut self, input: CatchInput, photo: Option<&PhotoUpload>) -> Result<CmdResult> {
        commands::add::run(&mut self.store, input, photo, now())
    }

    pub fn edit_catch(
        &mut self,
        selector: &str,
        input: CatchInput,
        photo: Option<&PhotoUpload>,
    ) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::edit::run(&mut self.store, selector, input, photo, now())
    }

    pub fn delete_catch(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::delete::run(&mut self.store, selector)
    }

    pub fn list_catches(&mut self, criteria: &Criteria) -> Result<CmdResult> {
        commands::list::run(&mut self.store, criteria)
    }

    pub fn view_catch(&mut self, selector: &str) -> Result<CmdResult> {
        let selector = parse_selector(selector)?;
        commands::view::run(&mut self.store, selector)
    }

    pub fn stats(&mut self) -> Result<CmdResult> {
        commands::stats::run(&mut self.store)
    }

    pub fn gallery(&mut self, criteria: &Criteria) -> Result<CmdResult> {
        commands::gallery::run(&mut self.store, criteria)
    }

    pub fn export(&mut self) -> Result<CmdResult> {
        commands::export::run(&mut self.store)
    }

    /// Prefilled input for editing the selected catch.
    pub fn edit_input(&mut self, selector: &str) -> Result<CatchInput> {
        let id = self.store.resolve(parse_selector(selector)?)?;
        let record = self.store.get(id)?;
        Ok(CatchInput::from_record(&record))
    }

    /// Input for a new catch: now, configured species and spot, everything else blank.
    pub fn new_input(&self) -> CatchInput {
        let now = now();
        CatchInput {
            date: format_date(now.date()),
            time: format_time(now.time()),
            species: self.config.default_species.clone(),
            length_cm: 0.0,
            weight: 0.0,
            weight_unit: WeightUnit::Kg,
            spot: self.config.default_spot.clone(),
            lure_type: LureType::Stickbait,
            lure_name: String::new(),
            conditions: String::new(),
            released: true,
            comment: String::new(),
        }
    }

    /// Retries writing changes held back by a locked table.
    pub fn flush(&mut self) -> Result<()> {
        self.store.flush()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn load_report(&self) -> Option<&LoadReport> {
        self.store.last_report()
    }

    pub fn paths(&self) -> &CreelPaths {
        &self.paths
    }

    pub fn config(&self) -> &CreelConfig {
        &self.config
    }
}

/// Parses selector text, mapping failures to [`CreelError::InvalidSelector`].
pub fn parse_selector(input: &str) -> Result<RowSelector> {
    index::parse_selector(input).map_err(CreelError::InvalidSelector)
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

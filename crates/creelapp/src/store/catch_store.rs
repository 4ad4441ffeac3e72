use super::backend::StorageBackend;
use crate::error::{CreelError, Result};
use crate::index::RowSelector;
use crate::model::{CatchRecord, RecordId};
use crate::table::{self, LoadReport};
use tracing::{debug, warn};

/// The catch log: a table behind a [`StorageBackend`], with an explicit cache.
///
/// The cache holds the decoded table between operations. It is dropped after
/// every successful save so the next read reflects what is on disk. When a save
/// fails because the table is locked, the mutated table is kept and marked dirty
/// until [`CatchStore::flush`] manages to write it.
pub struct CatchStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    cache: Option<Vec<CatchRecord>>,
    dirty: bool,
    last_report: Option<LoadReport>,
}

impl<B: StorageBackend> CatchStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            cache: None,
            dirty: false,
            last_report: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All records in table order, read through the cache.
    pub fn records(&mut self) -> Result<&[CatchRecord]> {
        if self.cache.is_none() {
            let records = self.read_backend()?;
            self.cache = Some(records);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Owned snapshot of the table.
    pub fn load(&mut self) -> Result<Vec<CatchRecord>> {
        Ok(self.records()?.to_vec())
    }

    /// Drops the cache and reads the table again.
    pub fn reload(&mut self) -> Result<&[CatchRecord]> {
        if self.dirty {
            warn!("Reloading discards unsaved catches");
        }
        self.invalidate();
        self.records()
    }

    /// Drops the cache (and any unsaved changes).
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.dirty = false;
    }

    /// True while the cache holds changes that could not be written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// What the most recent read of the table had to repair.
    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Replaces the whole table.
    pub fn save(&mut self, records: Vec<CatchRecord>) -> Result<()> {
        self.commit(records)
    }

    /// Retries persisting a dirty cache. A clean store is a no-op.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let records = self.cache.clone().unwrap_or_default();
        self.commit(records)
    }

    pub fn get(&mut self, id: RecordId) -> Result<CatchRecord> {
        self.records()?
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(CreelError::RecordNotFound(id))
    }

    /// Adds a record at the end of the table under a fresh id.
    /// The id carried by `draft` is ignored.
    pub fn append(&mut self, draft: CatchRecord) -> Result<CatchRecord> {
        let mut records = self.load()?;
        let id = next_id(&records);
        let record = CatchRecord { id, ..draft };
        records.push(record.clone());
        debug!(%id, "Appending catch");
        self.commit(records)?;
        Ok(record)
    }

    /// Overwrites every field of the record with `id`.
    pub fn update(&mut self, id: RecordId, draft: CatchRecord) -> Result<CatchRecord> {
        let mut records = self.load()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CreelError::RecordNotFound(id))?;
        *slot = CatchRecord { id, ..draft };
        let record = slot.clone();
        debug!(%id, "Updating catch");
        self.commit(records)?;
        Ok(record)
    }

    /// Removes the record with `id`; later records move up one position.
    pub fn delete(&mut self, id: RecordId) -> Result<CatchRecord> {
        let mut records = self.load()?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(CreelError::RecordNotFound(id))?;
        let removed = records.remove(index);
        debug!(%id, "Deleting catch");
        self.commit(records)?;
        Ok(removed)
    }

    /// Turns a selector into a record id.
    ///
    /// Positions are resolved against a fresh read of the table, unless the cache
    /// holds unsaved changes, which are what the user currently sees.
    pub fn resolve(&mut self, selector: RowSelector) -> Result<RecordId> {
        if !self.dirty {
            self.invalidate();
        }
        let records = self.records()?;
        match selector {
            RowSelector::Position(position) => records
                .get(position)
                .map(|r| r.id)
                .ok_or(CreelError::PositionOutOfRange {
                    position,
                    len: records.len(),
                }),
            RowSelector::Id(id) => records
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.id)
                .ok_or(CreelError::RecordNotFound(id)),
        }
    }

    fn read_backend(&mut self) -> Result<Vec<CatchRecord>> {
        let Some(text) = self.backend.read_table()? else {
            debug!(path = %self.backend.table_path().display(), "No catch table yet");
            self.last_report = Some(LoadReport::default());
            return Ok(Vec::new());
        };

        let (records, report) = table::decode(&text)?;
        debug!(rows = report.rows, "Loaded catch table");
        if !report.backfilled_columns.is_empty() {
            warn!(columns = ?report.backfilled_columns, "Catch table is missing columns; filled with defaults");
        }
        if report.unreadable_values > 0 {
            warn!(count = report.unreadable_values, "Unreadable values kept as they are");
        }
        if report.assigned_ids > 0 {
            debug!(count = report.assigned_ids, "Assigned ids to rows without one");
        }
        self.last_report = Some(report);
        Ok(records)
    }

    /// Writes `records` and settles the cache according to the outcome.
    ///
    /// A locked table keeps `records` as the dirty cache. Any other failure
    /// does the same when unsaved changes were already pending, so they
    /// survive for a later `flush`.
    fn commit(&mut self, records: Vec<CatchRecord>) -> Result<()> {
        let text = table::encode(&records)?;
        match self.backend.write_table(&text) {
            Ok(()) => {
                debug!(rows = records.len(), "Saved catch table");
                self.invalidate();
                Ok(())
            }
            Err(err) if self.dirty || matches!(err, CreelError::StoreLocked(_)) => {
                warn!("{}", err);
                self.cache = Some(records);
                self.dirty = true;
                Err(err)
            }
            Err(err) => {
                self.invalidate();
                Err(err)
            }
        }
    }
}

fn next_id(records: &[CatchRecord]) -> RecordId {
    records
        .iter()
        .map(|r| r.id)
        .max()
        .unwrap_or(RecordId(0))
        .next()
}

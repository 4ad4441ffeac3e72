use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CreelError, Result};
use crate::index::{index_records, DisplayRecord};
use crate::model::RecordId;
use crate::query::{self, Criteria};
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

/// Every record with its canonical position.
pub fn indexed_records<B: StorageBackend>(store: &mut CatchStore<B>) -> Result<Vec<DisplayRecord>> {
    Ok(index_records(store.load()?))
}

/// Records matching `criteria`, each keeping its position in the full table.
pub fn filtered_records<B: StorageBackend>(
    store: &mut CatchStore<B>,
    criteria: &Criteria,
) -> Result<Vec<DisplayRecord>> {
    Ok(indexed_records(store)?
        .into_iter()
        .filter(|dr| query::matches(&dr.record, criteria))
        .collect())
}

/// The record with `id` and its current position.
pub fn display_record<B: StorageBackend>(
    store: &mut CatchStore<B>,
    id: RecordId,
) -> Result<DisplayRecord> {
    indexed_records(store)?
        .into_iter()
        .find(|dr| dr.record.id == id)
        .ok_or(CreelError::RecordNotFound(id))
}

/// Turns a locked-table failure into a warning on `result`.
///
/// Returns `Ok(None)` when the change is only held in the store's cache.
pub fn persisted<T>(outcome: Result<T>, result: &mut CmdResult) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(err @ CreelError::StoreLocked(_)) => {
            result.unsaved = true;
            result.add_message(CmdMessage::warning(format!(
                "{} The change is kept for this session only; close the file and try again.",
                err
            )));
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

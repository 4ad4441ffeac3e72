use crate::commands::helpers::{display_record, persisted};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

/// Removes the selected catch. Its photo file is left in place.
pub fn run<B: StorageBackend>(store: &mut CatchStore<B>, selector: RowSelector) -> Result<CmdResult> {
    let id = store.resolve(selector)?;
    let target = display_record(store, id)?;

    let mut result = CmdResult::default();
    persisted(store.delete(id), &mut result)?;

    if !result.unsaved {
        result.add_message(CmdMessage::success(format!(
            "Catch deleted ({}): {}",
            target.position,
            target.record.summary()
        )));
    }
    if target.record.has_photo() {
        result.add_message(CmdMessage::info(format!(
            "Photo kept: {}",
            target.record.photo_file
        )));
    }
    result.affected_records.push(target);
    Ok(result)
}

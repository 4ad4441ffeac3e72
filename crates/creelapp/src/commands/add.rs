use crate::commands::helpers::{display_record, persisted};
use crate::commands::{CatchInput, CmdMessage, CmdResult};
use crate::error::{CreelError, Result};
use crate::photos::{store_photo, PhotoUpload};
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;
use chrono::NaiveDateTime;

/// Logs a new catch at the end of the table.
///
/// The entered time is validated before anything is written, photo included.
pub fn run<B: StorageBackend>(
    store: &mut CatchStore<B>,
    input: CatchInput,
    photo: Option<&PhotoUpload>,
    now: NaiveDateTime,
) -> Result<CmdResult> {
    let mut draft = input.into_record(now.date(), String::new())?;
    draft.photo_file = store_photo(store.backend(), photo, now)?;

    let mut result = CmdResult::default();
    let id = match persisted(store.append(draft), &mut result)? {
        Some(record) => record.id,
        None => store
            .records()?
            .last()
            .map(|r| r.id)
            .ok_or_else(|| CreelError::Store("Appended catch is missing".to_string()))?,
    };

    let display = display_record(store, id)?;
    if !result.unsaved {
        result.add_message(CmdMessage::success(format!(
            "Catch logged ({}): {}",
            display.position,
            display.record.summary()
        )));
    }
    result.affected_records.push(display);
    Ok(result)
}

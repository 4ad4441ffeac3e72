use crate::commands::helpers::display_record;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

/// A single catch, with a warning when its photo reference does not resolve.
pub fn run<B: StorageBackend>(store: &mut CatchStore<B>, selector: RowSelector) -> Result<CmdResult> {
    let id = store.resolve(selector)?;
    let display = display_record(store, id)?;

    let mut result = CmdResult::default();
    if display.record.has_photo() && !store.backend().photo_exists(&display.record.photo_file) {
        result.add_message(CmdMessage::warning(format!(
            "Cannot display photo {} (invalid path?)",
            display.record.photo_file
        )));
    }
    Ok(result.with_listed_records(vec![display]))
}

use crate::commands::helpers::filtered_records;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::Criteria;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

pub fn run<B: StorageBackend>(store: &mut CatchStore<B>, criteria: &Criteria) -> Result<CmdResult> {
    let records = filtered_records(store, criteria)?;
    let mut result = CmdResult::default();

    if store.records()?.is_empty() {
        result.add_message(CmdMessage::info("No catches logged yet."));
    } else if records.is_empty() {
        result.add_message(CmdMessage::info("No catches match the filters."));
    }
    if store.is_dirty() {
        result.unsaved = true;
        result.add_message(CmdMessage::warning(
            "Some changes are not saved yet: the catch table is locked.",
        ));
    }

    Ok(result.with_listed_records(records))
}

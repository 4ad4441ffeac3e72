use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::to_xlsx_bytes;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

/// Workbook bytes for the whole log.
pub fn run<B: StorageBackend>(store: &mut CatchStore<B>) -> Result<CmdResult> {
    let records = store.records()?;
    let bytes = to_xlsx_bytes(records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} catches",
        records.len()
    )));
    result.export = Some(bytes);
    Ok(result)
}

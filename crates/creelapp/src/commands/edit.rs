use crate::commands::helpers::{display_record, persisted};
use crate::commands::{CatchInput, CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::photos::{store_photo, PhotoUpload};
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;
use chrono::NaiveDateTime;

/// Overwrites every field of the selected catch.
///
/// Without a new photo the existing reference is kept.
pub fn run<B: StorageBackend>(
    store: &mut CatchStore<B>,
    selector: RowSelector,
    input: CatchInput,
    photo: Option<&PhotoUpload>,
    now: NaiveDateTime,
) -> Result<CmdResult> {
    let id = store.resolve(selector)?;
    let existing = store.get(id)?;

    let mut draft = input.into_record(now.date(), existing.photo_file)?;
    let new_photo = store_photo(store.backend(), photo, now)?;
    if !new_photo.is_empty() {
        draft.photo_file = new_photo;
    }

    let mut result = CmdResult::default();
    persisted(store.update(id, draft), &mut result)?;

    let display = display_record(store, id)?;
    if !result.unsaved {
        result.add_message(CmdMessage::success(format!(
            "Catch updated ({}): {}",
            display.position,
            display.record.summary()
        )));
    }
    result.affected_records.push(display);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_input::{scenario, with_species};
    use crate::commands::{add, MessageLevel};
    use crate::error::CreelError;
    use crate::model::RecordId;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap()
    }

    fn store_with(species: &[&str]) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for s in species {
            add::run(&mut store, with_species(s), None, now()).unwrap();
        }
        store
    }

    #[test]
    fn overwrites_selected_position() {
        let mut store = store_with(&["A", "B", "C"]);
        let result = run(
            &mut store,
            RowSelector::Position(1),
            with_species("Bar"),
            None,
            now(),
        )
        .unwrap();

        assert_eq!(result.affected_records[0].record.id, RecordId(2));
        let species: Vec<String> = store.load().unwrap().into_iter().map(|r| r.species).collect();
        assert_eq!(species, vec!["A", "Bar", "C"]);
    }

    #[test]
    fn keeps_photo_without_new_upload() {
        let mut store = InMemoryStore::new();
        let photo = PhotoUpload::new(vec![9], "a.jpg");
        add::run(&mut store, scenario(), Some(&photo), now()).unwrap();

        run(&mut store, RowSelector::Id(RecordId(1)), with_species("Bass"), None, now()).unwrap();
        let record = store.get(RecordId(1)).unwrap();
        assert_eq!(record.species, "Bass");
        assert_eq!(record.photo_file, "photos/20240602_081500_a.jpg");
    }

    #[test]
    fn replaces_photo_with_new_upload() {
        let mut store = store_with(&["A"]);
        let photo = PhotoUpload::new(vec![9], "new.png");
        run(&mut store, RowSelector::Position(0), scenario(), Some(&photo), now()).unwrap();
        assert_eq!(
            store.get(RecordId(1)).unwrap().photo_file,
            "photos/20240602_081500_new.png"
        );
    }

    #[test]
    fn invalid_time_leaves_record_untouched() {
        let mut store = store_with(&["A"]);
        let input = CatchInput {
            time: "7:".to_string(),
            ..with_species("B")
        };
        let err = run(&mut store, RowSelector::Position(0), input, None, now()).unwrap_err();
        assert!(matches!(err, CreelError::InvalidTimeFormat(_)));
        assert_eq!(store.get(RecordId(1)).unwrap().species, "A");
    }

    #[test]
    fn out_of_range_position_fails() {
        let mut store = store_with(&["A"]);
        let err = run(&mut store, RowSelector::Position(3), scenario(), None, now()).unwrap_err();
        assert!(matches!(err, CreelError::PositionOutOfRange { position: 3, len: 1 }));
    }

    #[test]
    fn locked_table_keeps_edit_in_session() {
        let mut store = store_with(&["A"]);
        store.backend().set_simulate_locked(true);
        let result = run(&mut store, RowSelector::Position(0), with_species("Z"), None, now()).unwrap();

        assert!(result.unsaved);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.get(RecordId(1)).unwrap().species, "Z");
    }
}

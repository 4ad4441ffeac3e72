use crate::commands::helpers::filtered_records;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::Criteria;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;
use std::cmp::Reverse;
use tracing::warn;

/// Filtered catches that have a photo, newest first.
///
/// A reference that no longer resolves is reported as a warning; the catch is still listed.
pub fn run<B: StorageBackend>(store: &mut CatchStore<B>, criteria: &Criteria) -> Result<CmdResult> {
    let mut records: Vec<_> = filtered_records(store, criteria)?
        .into_iter()
        .filter(|dr| dr.record.has_photo())
        .collect();
    // Catches without a readable date or time sort last
    records.sort_by_key(|dr| Reverse((dr.record.date.get(), dr.record.time.get())));

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No photos for the selected catches."));
    }
    for dr in &records {
        if !store.backend().photo_exists(&dr.record.photo_file) {
            warn!(reference = %dr.record.photo_file, "Photo not found");
            result.add_message(CmdMessage::warning(format!(
                "Cannot display photo for catch {} ({}): invalid path?",
                dr.position, dr.record.photo_file
            )));
        }
    }
    Ok(result.with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::commands::test_input::with_species;
    use crate::model::{Field, LureType};
    use crate::photos::PhotoUpload;
    use crate::query::criteria;
    use crate::store::memory::fixtures::catch;
    use crate::store::memory::InMemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn lists_photos_newest_first() {
        let mut store = InMemoryStore::new();
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let photo = PhotoUpload::new(vec![1], "p.jpg");

        let mut older = with_species("Old");
        older.date = "2024-05-01".to_string();
        add::run(&mut store, older, Some(&photo), now).unwrap();
        add::run(&mut store, with_species("NoPhoto"), None, now).unwrap();
        let mut newer = with_species("New");
        newer.date = "2024-05-20".to_string();
        add::run(&mut store, newer, Some(&photo), now).unwrap();

        let result = run(&mut store, &Criteria::new()).unwrap();
        let species: Vec<&str> = result
            .listed_records
            .iter()
            .map(|d| d.record.species.as_str())
            .collect();
        assert_eq!(species, vec!["New", "Old"]);
        assert_eq!(result.listed_records[0].position, 2);
        assert!(!result.has_warnings());
    }

    #[test]
    fn dangling_reference_is_a_warning() {
        let mut store = InMemoryStore::new();
        let mut record = catch("Bar", "Le Havre", LureType::Jig);
        record.photo_file = "photos/missing.jpg".to_string();
        store.append(record).unwrap();

        let result = run(&mut store, &criteria([(Field::Species, "Bar")])).unwrap();
        assert_eq!(result.listed_records.len(), 1);
        assert!(result.has_warnings());
    }

    #[test]
    fn no_photos_message() {
        let mut store = InMemoryStore::new();
        store.append(catch("Bar", "Le Havre", LureType::Jig)).unwrap();
        let result = run(&mut store, &Criteria::new()).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}

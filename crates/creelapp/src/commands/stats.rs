use crate::commands::{CmdMessage, CmdResult, StatsTable};
use crate::error::Result;
use crate::model::Field;
use crate::query::group_aggregate;
use crate::store::backend::StorageBackend;
use crate::store::CatchStore;

/// Catch counts and mean length per spot and per lure type, over the whole log.
pub fn run<B: StorageBackend>(store: &mut CatchStore<B>) -> Result<CmdResult> {
    let records = store.records()?;
    let mut result = CmdResult::default();

    if records.is_empty() {
        result.add_message(CmdMessage::info("No catches logged yet."));
        return Ok(result);
    }

    for (title, field) in [("By spot", Field::Spot), ("By lure type", Field::LureType)] {
        result.stats.push(StatsTable {
            title: title.to_string(),
            group_field: field,
            rows: group_aggregate(records, field, Field::Species),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LureType;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn aggregates_by_spot_and_lure() {
        let mut fixture = StoreFixture::new()
            .with_catch("Bar", "Le Havre", LureType::Jig)
            .with_catch("Bar", "Etretat", LureType::Stickbait)
            .with_catch("Bass", "Etretat", LureType::Jig);

        let result = run(&mut fixture.store).unwrap();
        assert_eq!(result.stats.len(), 2);

        let by_spot = &result.stats[0];
        assert_eq!(by_spot.group_field, Field::Spot);
        assert_eq!(by_spot.rows[0].key, "Etretat");
        assert_eq!(by_spot.rows[0].count, 2);
        assert_eq!(by_spot.rows[0].mean_length_cm, Some(42.0));

        let by_lure = &result.stats[1];
        assert_eq!(by_lure.rows[0].key, "Jig");
        assert_eq!(by_lure.rows[0].count, 2);
    }

    #[test]
    fn empty_log_has_no_tables() {
        let mut fixture = StoreFixture::new();
        let result = run(&mut fixture.store).unwrap();
        assert!(result.stats.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}

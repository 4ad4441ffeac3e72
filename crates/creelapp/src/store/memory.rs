use super::catch_store::CatchStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatchStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatchStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{CatchRecord, LureType, RecordId, Stored, WeightUnit};
    use chrono::{NaiveDate, NaiveTime};

    /// A fully populated record, ready to be appended.
    pub fn catch(species: &str, spot: &str, lure_type: LureType) -> CatchRecord {
        CatchRecord {
            id: RecordId(0),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().into(),
            time: NaiveTime::from_hms_opt(6, 30, 0).unwrap().into(),
            species: species.to_string(),
            length_cm: Stored::Value(42.0),
            weight: Stored::Value(1.2),
            weight_unit: WeightUnit::Kg.into(),
            spot: spot.to_string(),
            lure_type: lure_type.into(),
            lure_name: "X".to_string(),
            conditions: String::new(),
            released: true.into(),
            comment: String::new(),
            photo_file: String::new(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_catches(mut self, count: usize) -> Self {
            for i in 0..count {
                let species = format!("Species {}", i + 1);
                self.store
                    .append(catch(&species, "Le Havre", LureType::Jig))
                    .unwrap();
            }
            self
        }

        pub fn with_catch(mut self, species: &str, spot: &str, lure_type: LureType) -> Self {
            self.store.append(catch(species, spot, lure_type)).unwrap();
            self
        }

        pub fn with_record(mut self, record: CatchRecord) -> Self {
            self.store.append(record).unwrap();
            self
        }
    }
}

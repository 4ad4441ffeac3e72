//! # Filtering and Aggregation
//!
//! Read-only views over catch records. Nothing here touches the store: callers
//! load the records, then filter or summarize them.
//!
//! Every comparison uses a field's canonical text ([`Field::value_of`]), so a
//! criterion on `released` matches `"Yes"`/`"No"` and one on `length_cm` matches
//! `"42.0"`.

use crate::model::{CatchRecord, Field};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Accepted values per field. A field with an empty set does not filter.
pub type Criteria = BTreeMap<Field, BTreeSet<String>>;

/// Builds criteria from `(field, value)` pairs, collecting repeated fields.
pub fn criteria<I, S>(pairs: I) -> Criteria
where
    I: IntoIterator<Item = (Field, S)>,
    S: Into<String>,
{
    let mut criteria = Criteria::new();
    for (field, value) in pairs {
        criteria.entry(field).or_default().insert(value.into());
    }
    criteria
}

pub fn matches(record: &CatchRecord, criteria: &Criteria) -> bool {
    criteria
        .iter()
        .all(|(field, accepted)| accepted.is_empty() || accepted.contains(&field.value_of(record)))
}

/// Records matching every criterion, in input order.
pub fn filter<'a, I>(records: I, criteria: &Criteria) -> Vec<&'a CatchRecord>
where
    I: IntoIterator<Item = &'a CatchRecord>,
{
    records
        .into_iter()
        .filter(|r| matches(r, criteria))
        .collect()
}

/// One group of a [`group_aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: String,
    /// Records in the group with a non-empty count field.
    pub count: usize,
    /// Mean `length_cm` over the group's readable lengths, one decimal. `None`
    /// when no record in the group has one.
    pub mean_length_cm: Option<f64>,
}

/// Groups records by `group_field`; records with an empty key are left out.
///
/// Groups come back by descending count. Equal counts keep the order in which
/// their key first appeared.
pub fn group_aggregate<'a, I>(records: I, group_field: Field, count_field: Field) -> Vec<GroupStats>
where
    I: IntoIterator<Item = &'a CatchRecord>,
{
    struct Acc {
        count: usize,
        length_sum: f64,
        lengths: usize,
    }

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Acc> = HashMap::new();

    for record in records {
        let key = group_field.value_of(record);
        if key.trim().is_empty() {
            continue;
        }
        let acc = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Acc {
                count: 0,
                length_sum: 0.0,
                lengths: 0,
            }
        });
        if !count_field.value_of(record).trim().is_empty() {
            acc.count += 1;
        }
        if let Some(length) = record.length_cm.get() {
            acc.length_sum += length;
            acc.lengths += 1;
        }
    }

    let mut stats: Vec<GroupStats> = order
        .into_iter()
        .filter_map(|key| {
            let acc = groups.remove(&key)?;
            Some(GroupStats {
                mean_length_cm: (acc.lengths > 0)
                    .then(|| round1(acc.length_sum / acc.lengths as f64)),
                count: acc.count,
                key,
            })
        })
        .collect();
    // sort_by is stable
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Sorted unique non-empty values of `field`.
pub fn distinct_values<'a, I>(records: I, field: Field) -> Vec<String>
where
    I: IntoIterator<Item = &'a CatchRecord>,
{
    records
        .into_iter()
        .map(|r| field.value_of(r))
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

//! # Table Codec
//!
//! The catch log is persisted as `;`-delimited UTF-8 text with a header row:
//!
//! ```text
//! id;date;time;species;length_cm;weight;weight_unit;spot;lure_type;lure_name;conditions;released;comment;photo_file
//! 1;2024-06-01;06:30;Bar;42.0;1.2;kg;Le Havre;Jig;X;;Yes;;
//! ```
//!
//! Decoding is lenient. Columns are matched by header name (legacy French names
//! included), so column order on disk does not matter. Missing columns are
//! back-filled with empty values, every value then goes through the lenient
//! parsers in [`crate::normalize`], and rows without a usable id get a fresh one
//! after the current maximum. A value the parsers do not understand is kept as
//! the exact text that was read ([`Stored::Raw`]) and written back unchanged.
//! What had to be repaired is counted in a [`LoadReport`] rather than raised as
//! an error.

use crate::error::{CreelError, Result};
use crate::model::{
    parse_released, CatchRecord, Field, LureType, RecordId, Stored, WeightUnit, ID_COLUMN,
};
use crate::normalize::{parse_date, parse_stored_time, safe_number};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::collections::{HashMap, HashSet};

pub const DELIMITER: u8 = b';';

/// What a decode had to repair.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    /// Canonical columns absent from the header, filled with empty values.
    pub backfilled_columns: Vec<&'static str>,
    /// Non-empty values that could not be parsed; they are kept as read.
    pub unreadable_values: usize,
    /// Rows that had no usable id and received a new one.
    pub assigned_ids: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.backfilled_columns.is_empty() && self.unreadable_values == 0 && self.assigned_ids == 0
    }
}

/// Header row: the id column followed by the canonical columns.
pub fn header() -> Vec<&'static str> {
    std::iter::once(ID_COLUMN)
        .chain(Field::ALL.iter().map(|f| f.column()))
        .collect()
}

pub fn decode(text: &str) -> Result<(Vec<CatchRecord>, LoadReport)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let positions = column_positions(&headers);

    let mut report = LoadReport {
        backfilled_columns: Field::ALL
            .iter()
            .filter(|f| !positions.contains_key(&Some(**f)))
            .map(|f| f.column())
            .collect(),
        ..Default::default()
    };

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |field: Option<Field>| -> &str {
            positions
                .get(&field)
                .and_then(|&i| row.get(i))
                .unwrap_or("")
        };
        let raw_id = cell(None).trim().parse::<u64>().ok().filter(|id| *id > 0);
        let record = decode_row(&cell, &mut report);
        rows.push((raw_id, record));
    }

    let records = assign_ids(rows, &mut report);
    report.rows = records.len();
    Ok((records, report))
}

pub fn encode(records: &[CatchRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(header())?;
    for record in records {
        let mut row = vec![record.id.0.to_string()];
        row.extend(Field::ALL.iter().map(|f| f.value_of(record)));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CreelError::Store(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CreelError::Store(e.to_string()))
}

/// Maps each known column to its index in the header. `None` is the id column.
fn column_positions(headers: &StringRecord) -> HashMap<Option<Field>, usize> {
    let mut positions = HashMap::new();
    for (i, name) in headers.iter().enumerate() {
        let name = name.trim_start_matches('\u{feff}').trim().to_lowercase();
        if name == ID_COLUMN {
            positions.entry(None).or_insert(i);
            continue;
        }
        let field = Field::ALL
            .into_iter()
            .find(|f| f.column() == name || f.legacy_column() == Some(name.as_str()));
        if let Some(field) = field {
            positions.entry(Some(field)).or_insert(i);
        }
    }
    positions
}

fn decode_row<'a>(
    cell: &impl Fn(Option<Field>) -> &'a str,
    report: &mut LoadReport,
) -> CatchRecord {
    let mut unreadable = 0;
    let date = cell(Some(Field::Date));
    let time = cell(Some(Field::Time));
    let length_cm = cell(Some(Field::LengthCm));
    let weight = cell(Some(Field::Weight));
    let weight_unit = cell(Some(Field::WeightUnit));
    let lure_type = cell(Some(Field::LureType));
    let released = cell(Some(Field::Released));

    let record = CatchRecord {
        id: RecordId(0),
        date: stored(date, parse_date(date).ok(), &mut unreadable),
        time: stored(time, parse_stored_time(time).ok(), &mut unreadable),
        species: cell(Some(Field::Species)).to_string(),
        length_cm: stored(length_cm, safe_number(length_cm, 0.0).ok(), &mut unreadable),
        weight: stored(weight, safe_number(weight, 0.0).ok(), &mut unreadable),
        weight_unit: stored(weight_unit, weight_unit.parse::<WeightUnit>().ok(), &mut unreadable),
        spot: cell(Some(Field::Spot)).to_string(),
        lure_type: stored(lure_type, lure_type.parse::<LureType>().ok(), &mut unreadable),
        lure_name: cell(Some(Field::LureName)).to_string(),
        conditions: cell(Some(Field::Conditions)).to_string(),
        released: stored(released, parse_released(released).ok(), &mut unreadable),
        comment: cell(Some(Field::Comment)).to_string(),
        photo_file: cell(Some(Field::PhotoFile)).to_string(),
    };
    report.unreadable_values += unreadable;
    record
}

/// The parsed value, or the cell text verbatim. Non-empty text that did not parse
/// is counted as unreadable.
fn stored<T>(text: &str, parsed: Option<T>, unreadable: &mut usize) -> Stored<T> {
    match parsed {
        Some(value) => Stored::Value(value),
        None => {
            if !text.trim().is_empty() {
                *unreadable += 1;
            }
            Stored::Raw(text.to_string())
        }
    }
}

/// Keeps the first occurrence of every valid id; everything else gets a fresh one.
fn assign_ids(
    rows: Vec<(Option<u64>, CatchRecord)>,
    report: &mut LoadReport,
) -> Vec<CatchRecord> {
    let max_id = rows.iter().filter_map(|(id, _)| *id).max().unwrap_or(0);
    let mut next = RecordId(max_id).next();
    let mut seen = HashSet::new();

    rows.into_iter()
        .map(|(raw_id, mut record)| {
            record.id = match raw_id {
                Some(id) if seen.insert(id) => RecordId(id),
                _ => {
                    report.assigned_ids += 1;
                    let id = next;
                    next = next.next();
                    id
                }
            };
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    const HEADER: &str = "id;date;time;species;length_cm;weight;weight_unit;spot;lure_type;lure_name;conditions;released;comment;photo_file";

    fn record(id: u64, species: &str) -> CatchRecord {
        CatchRecord {
            id: RecordId(id),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().into(),
            time: NaiveTime::from_hms_opt(6, 30, 0).unwrap().into(),
            species: species.into(),
            length_cm: Stored::Value(42.0),
            weight: Stored::Value(1.2),
            weight_unit: WeightUnit::Kg.into(),
            spot: "Le Havre".into(),
            lure_type: LureType::Jig.into(),
            lure_name: "X".into(),
            conditions: "tide; rising".into(),
            released: true.into(),
            comment: String::new(),
            photo_file: "photos/20240601_063000_bar.jpg".into(),
        }
    }

    #[test]
    fn header_has_id_and_canonical_columns() {
        assert_eq!(header().join(";"), HEADER);
    }

    #[test]
    fn encode_writes_canonical_text() {
        let text = encode(&[record(1, "Bar")]).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));
        assert_eq!(
            lines.next(),
            Some("1;2024-06-01;06:30;Bar;42.0;1.2;kg;Le Havre;Jig;X;\"tide; rising\";Yes;;photos/20240601_063000_bar.jpg")
        );
    }

    #[test]
    fn decode_reads_back_what_encode_wrote() {
        let records = vec![record(1, "Bar"), record(4, "Mackerel")];
        let (decoded, report) = decode(&encode(&records).unwrap()).unwrap();
        assert_eq!(decoded, records);
        assert!(report.is_clean());
        assert_eq!(report.rows, 2);
    }

    #[test]
    fn decode_header_only_is_empty() {
        let (decoded, report) = decode(&format!("{}\n", HEADER)).unwrap();
        assert!(decoded.is_empty());
        assert!(report.backfilled_columns.is_empty());
    }

    #[test]
    fn decode_backfills_missing_columns_and_ids() {
        let text = "date;species;spot\n01/06/2024;Bar;Etretat\n";
        let (decoded, report) = decode(text).unwrap();

        assert_eq!(decoded.len(), 1);
        let r = &decoded[0];
        assert_eq!(r.id, RecordId(1));
        assert_eq!(r.date, Stored::Value(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert_eq!(r.species, "Bar");
        assert_eq!(r.spot, "Etretat");
        assert_eq!(r.lure_name, "");
        assert_eq!(r.photo_file, "");
        // Missing cells stay empty rather than taking a guessed value
        assert_eq!(r.time, Stored::empty());
        assert!(r.length_cm.is_empty());
        assert!(r.released.is_empty());
        assert_eq!(report.backfilled_columns.len(), 10);
        assert!(report.backfilled_columns.contains(&"photo_file"));
        assert_eq!(report.assigned_ids, 1);
        assert_eq!(report.unreadable_values, 0);
    }

    #[test]
    fn decode_accepts_legacy_french_columns() {
        let text = "date;heure;espece;taille_cm;poids;unite_poids;spot;type_leurre;nom_leurre;conditions;remis_a_leau;commentaire;photo_fichier\n\
                    2024-05-02;21:15:00;Bar;55.5;2.1;kg;Antifer;Leurre souple;Black Minnow;;Non;beau;\n";
        let (decoded, report) = decode(text).unwrap();
        let r = &decoded[0];
        assert_eq!(r.time, Stored::Value(NaiveTime::from_hms_opt(21, 15, 0).unwrap()));
        assert_eq!(r.length_cm, Stored::Value(55.5));
        assert_eq!(r.lure_type, Stored::Value(LureType::SoftLure));
        assert_eq!(r.released, Stored::Value(false));
        assert_eq!(r.comment, "beau");
        assert!(report.backfilled_columns.is_empty());
        assert_eq!(report.unreadable_values, 0);
    }

    #[test]
    fn decode_reorders_columns_by_name() {
        let text = "species;id;spot\nBar;9;Fecamp\n";
        let (decoded, _) = decode(text).unwrap();
        assert_eq!(decoded[0].id, RecordId(9));
        assert_eq!(decoded[0].spot, "Fecamp");
    }

    #[test]
    fn decode_replaces_duplicate_and_invalid_ids() {
        let text = format!(
            "{}\n3;2024-06-01;06:30;A;1;1;kg;s;Jig;;;Yes;;\n3;2024-06-01;06:30;B;1;1;kg;s;Jig;;;Yes;;\nx;2024-06-01;06:30;C;1;1;kg;s;Jig;;;Yes;;\n",
            HEADER
        );
        let (decoded, report) = decode(&text).unwrap();
        let ids: Vec<u64> = decoded.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(report.assigned_ids, 2);
    }

    #[test]
    fn decode_tolerates_short_rows() {
        let text = format!("{}\n2;2024-06-01;06:30;Bar\n", HEADER);
        let (decoded, report) = decode(&text).unwrap();
        assert_eq!(decoded[0].species, "Bar");
        assert!(decoded[0].length_cm.is_empty());
        assert_eq!(report.unreadable_values, 0);
    }

    #[test]
    fn unreadable_values_are_written_back_verbatim() {
        let text = "date;heure;espece;taille_cm;poids;type_leurre;remis_a_leau\n\
                    ;;Bar;;1,2;Spinner;peut-etre\n";
        let (decoded, report) = decode(text).unwrap();
        let r = &decoded[0];
        assert_eq!(r.lure_type, Stored::Raw("Spinner".to_string()));
        assert_eq!(r.weight, Stored::Raw("1,2".to_string()));
        assert_eq!(report.unreadable_values, 3);

        let encoded = encode(&decoded).unwrap();
        assert_eq!(
            encoded.lines().nth(1),
            Some("1;;;Bar;;1,2;;;Spinner;;;peut-etre;;")
        );
    }
}

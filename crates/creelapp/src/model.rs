//! # Catch Records
//!
//! A [`CatchRecord`] is one row of the catch log. Every field is scalar; the
//! table has a fixed, ordered column set ([`COLUMNS`]) that every persisted row
//! carries, plus a leading [`ID_COLUMN`] holding the stable [`RecordId`].
//!
//! Text values are kept verbatim. Typed values (date, time, numbers, enums) are
//! held as [`Stored`]: either a parsed value with a single canonical text form, or
//! the cell text exactly as it was read when it could not be understood. That text
//! (empty for a missing cell) is written back unchanged, so a legacy row is never
//! overwritten with guessed values. [`Field::value_of`] produces what the table
//! codec writes and what filters compare against.

use crate::error::{CreelError, Result};
use crate::normalize::{format_date, format_number, format_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical data columns, in on-disk order.
pub const COLUMNS: [&str; 13] = [
    "date",
    "time",
    "species",
    "length_cm",
    "weight",
    "weight_unit",
    "spot",
    "lure_type",
    "lure_name",
    "conditions",
    "released",
    "comment",
    "photo_file",
];

/// Key column written before the data columns.
pub const ID_COLUMN: &str = "id";

/// Stable identifier of a record, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn next(self) -> Self {
        RecordId(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A typed cell of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stored<T> {
    Value(T),
    /// Text that did not parse, or an empty cell, kept verbatim.
    Raw(String),
}

impl<T> Stored<T> {
    pub fn empty() -> Self {
        Stored::Raw(String::new())
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Stored::Value(v) => Some(v),
            Stored::Raw(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Stored::Raw(s) if s.trim().is_empty())
    }

    /// Canonical text of a value, the original text otherwise.
    pub fn text(&self, format: impl Fn(&T) -> String) -> String {
        match self {
            Stored::Value(v) => format(v),
            Stored::Raw(s) => s.clone(),
        }
    }
}

impl<T: Copy> Stored<T> {
    pub fn get(&self) -> Option<T> {
        self.value().copied()
    }
}

impl<T> From<T> for Stored<T> {
    fn from(value: T) -> Self {
        Stored::Value(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    G,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::G => "g",
        }
    }
}

impl FromStr for WeightUnit {
    type Err = CreelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "g" => Ok(WeightUnit::G),
            _ => Err(CreelError::InvalidValue {
                field: "weight_unit",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lure families offered when logging a catch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LureType {
    Stickbait,
    Jig,
    #[serde(rename = "Soft lure")]
    SoftLure,
    Creature,
    Other,
}

impl LureType {
    pub const ALL: [LureType; 5] = [
        LureType::Stickbait,
        LureType::Jig,
        LureType::SoftLure,
        LureType::Creature,
        LureType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LureType::Stickbait => "Stickbait",
            LureType::Jig => "Jig",
            LureType::SoftLure => "Soft lure",
            LureType::Creature => "Creature",
            LureType::Other => "Other",
        }
    }
}

impl FromStr for LureType {
    type Err = CreelError;

    /// Accepts the English labels and the French labels older logs were written with.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stickbait" => Ok(LureType::Stickbait),
            "jig" => Ok(LureType::Jig),
            "soft lure" | "soft" | "softlure" | "leurre souple" => Ok(LureType::SoftLure),
            "creature" | "créature" => Ok(LureType::Creature),
            "other" | "autre" => Ok(LureType::Other),
            _ => Err(CreelError::InvalidValue {
                field: "lure_type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Persisted form of the `released` flag.
pub fn released_label(released: bool) -> &'static str {
    if released {
        "Yes"
    } else {
        "No"
    }
}

/// Parses a `released` value. `Oui`/`Non` come from older logs.
pub fn parse_released(text: &str) -> Result<bool> {
    match text.trim().to_lowercase().as_str() {
        "yes" | "y" | "oui" | "true" => Ok(true),
        "no" | "n" | "non" | "false" => Ok(false),
        _ => Err(CreelError::InvalidValue {
            field: "released",
            value: text.to_string(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub id: RecordId,
    pub date: Stored<NaiveDate>,
    pub time: Stored<NaiveTime>,
    pub species: String,
    pub length_cm: Stored<f64>,
    pub weight: Stored<f64>,
    pub weight_unit: Stored<WeightUnit>,
    pub spot: String,
    pub lure_type: Stored<LureType>,
    pub lure_name: String,
    pub conditions: String,
    pub released: Stored<bool>,
    pub comment: String,
    /// Relative reference into the photo store, empty when no photo was attached.
    pub photo_file: String,
}

impl CatchRecord {
    pub fn has_photo(&self) -> bool {
        !self.photo_file.trim().is_empty()
    }

    /// One-line description used in messages and pickers.
    pub fn summary(&self) -> String {
        format!(
            "{} {} - {} {} cm at {}",
            Field::Date.value_of(self),
            Field::Time.value_of(self),
            self.species,
            Field::LengthCm.value_of(self),
            self.spot
        )
    }
}

/// A column of the catch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Date,
    Time,
    Species,
    LengthCm,
    Weight,
    WeightUnit,
    Spot,
    LureType,
    LureName,
    Conditions,
    Released,
    Comment,
    PhotoFile,
}

impl Field {
    /// All fields, in canonical column order.
    pub const ALL: [Field; 13] = [
        Field::Date,
        Field::Time,
        Field::Species,
        Field::LengthCm,
        Field::Weight,
        Field::WeightUnit,
        Field::Spot,
        Field::LureType,
        Field::LureName,
        Field::Conditions,
        Field::Released,
        Field::Comment,
        Field::PhotoFile,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Time => "time",
            Field::Species => "species",
            Field::LengthCm => "length_cm",
            Field::Weight => "weight",
            Field::WeightUnit => "weight_unit",
            Field::Spot => "spot",
            Field::LureType => "lure_type",
            Field::LureName => "lure_name",
            Field::Conditions => "conditions",
            Field::Released => "released",
            Field::Comment => "comment",
            Field::PhotoFile => "photo_file",
        }
    }

    /// Column names older logs used for the same field.
    pub fn legacy_column(self) -> Option<&'static str> {
        match self {
            Field::Time => Some("heure"),
            Field::Species => Some("espece"),
            Field::LengthCm => Some("taille_cm"),
            Field::Weight => Some("poids"),
            Field::WeightUnit => Some("unite_poids"),
            Field::LureType => Some("type_leurre"),
            Field::LureName => Some("nom_leurre"),
            Field::Released => Some("remis_a_leau"),
            Field::Comment => Some("commentaire"),
            Field::PhotoFile => Some("photo_fichier"),
            Field::Date | Field::Spot | Field::Conditions => None,
        }
    }

    /// Canonical text of this field for the given record.
    pub fn value_of(self, record: &CatchRecord) -> String {
        match self {
            Field::Date => record.date.text(|d| format_date(*d)),
            Field::Time => record.time.text(|t| format_time(*t)),
            Field::Species => record.species.clone(),
            Field::LengthCm => record.length_cm.text(|n| format_number(*n)),
            Field::Weight => record.weight.text(|n| format_number(*n)),
            Field::WeightUnit => record.weight_unit.text(|u| u.as_str().to_string()),
            Field::Spot => record.spot.clone(),
            Field::LureType => record.lure_type.text(|l| l.label().to_string()),
            Field::LureName => record.lure_name.clone(),
            Field::Conditions => record.conditions.clone(),
            Field::Released => record.released.text(|r| released_label(*r).to_string()),
            Field::Comment => record.comment.clone(),
            Field::PhotoFile => record.photo_file.clone(),
        }
    }
}

impl FromStr for Field {
    type Err = CreelError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Field::ALL
            .into_iter()
            .find(|f| f.column() == wanted || f.legacy_column() == Some(wanted.as_str()))
            .ok_or_else(|| CreelError::InvalidValue {
                field: "field",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatchRecord {
        CatchRecord {
            id: RecordId(7),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().into(),
            time: NaiveTime::from_hms_opt(6, 30, 0).unwrap().into(),
            species: "Bar".into(),
            length_cm: Stored::Value(42.0),
            weight: Stored::Value(1.2),
            weight_unit: WeightUnit::Kg.into(),
            spot: "Le Havre".into(),
            lure_type: LureType::Jig.into(),
            lure_name: "X".into(),
            conditions: String::new(),
            released: true.into(),
            comment: String::new(),
            photo_file: String::new(),
        }
    }

    #[test]
    fn field_order_matches_columns() {
        let names: Vec<&str> = Field::ALL.iter().map(|f| f.column()).collect();
        assert_eq!(names, COLUMNS.to_vec());
        assert_eq!(COLUMNS.len(), 13);
    }

    #[test]
    fn value_of_uses_canonical_forms() {
        let record = sample();
        assert_eq!(Field::Date.value_of(&record), "2024-06-01");
        assert_eq!(Field::Time.value_of(&record), "06:30");
        assert_eq!(Field::LengthCm.value_of(&record), "42.0");
        assert_eq!(Field::Weight.value_of(&record), "1.2");
        assert_eq!(Field::Released.value_of(&record), "Yes");
        assert_eq!(Field::LureType.value_of(&record), "Jig");
    }

    #[test]
    fn lure_type_accepts_legacy_labels() {
        assert_eq!("Leurre souple".parse::<LureType>().unwrap(), LureType::SoftLure);
        assert_eq!("Créature".parse::<LureType>().unwrap(), LureType::Creature);
        assert_eq!("autre".parse::<LureType>().unwrap(), LureType::Other);
        assert!("spinner".parse::<LureType>().is_err());
    }

    #[test]
    fn released_accepts_french_answers() {
        assert!(parse_released("Oui").unwrap());
        assert!(!parse_released("Non").unwrap());
        assert!(parse_released("maybe").is_err());
    }

    #[test]
    fn field_parses_current_and_legacy_names() {
        assert_eq!("lure-name".parse::<Field>().unwrap(), Field::LureName);
        assert_eq!("espece".parse::<Field>().unwrap(), Field::Species);
        assert!("depth".parse::<Field>().is_err());
    }

    #[test]
    fn summary_reads_naturally() {
        assert_eq!(sample().summary(), "2024-06-01 06:30 - Bar 42.0 cm at Le Havre");
        assert_eq!(RecordId(7).to_string(), "#7");
    }
}

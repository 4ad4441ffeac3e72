//! Output formatting for the CLI.
//!
//! Every function here turns command results into a `String`; printing is the
//! caller's job. Column alignment uses display width (`unicode-width`) so accented
//! spot names and species line up.

use super::styles;
use creelapp::commands::{CmdMessage, MessageLevel, StatsTable};
use creelapp::index::DisplayRecord;
use creelapp::model::Field;
use creelapp::normalize::format_number;
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const LIST_COLUMNS: [&str; 11] = [
    "#", "id", "date", "time", "species", "cm", "weight", "spot", "lure", "released", "photo",
];

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Success => styles::SUCCESS.apply_to(&message.content).to_string(),
            MessageLevel::Info => styles::INFO.apply_to(&message.content).to_string(),
            MessageLevel::Warning => styles::WARNING
                .apply_to(format!("Warning: {}", message.content))
                .to_string(),
            MessageLevel::Error => styles::ERROR
                .apply_to(format!("Error: {}", message.content))
                .to_string(),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_list(records: &[DisplayRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let rows = records
        .iter()
        .map(|dr| {
            let r = &dr.record;
            vec![
                dr.position.to_string(),
                r.id.0.to_string(),
                Field::Date.value_of(r),
                Field::Time.value_of(r),
                r.species.clone(),
                Field::LengthCm.value_of(r),
                format!("{} {}", Field::Weight.value_of(r), Field::WeightUnit.value_of(r))
                    .trim()
                    .to_string(),
                r.spot.clone(),
                lure(&Field::LureType.value_of(r), &r.lure_name),
                Field::Released.value_of(r),
                if r.has_photo() { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    table(&LIST_COLUMNS, rows)
}

/// Full detail of one catch.
pub fn render_record(dr: &DisplayRecord, photo_path: Option<&Path>) -> String {
    let label_width = Field::ALL
        .iter()
        .map(|f| f.column().width())
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{} {}\n",
        styles::POSITION.apply_to(dr.position),
        styles::TITLE.apply_to(dr.record.summary())
    );
    out.push_str(&format!(
        "  {}  {}\n",
        styles::MUTED.apply_to(pad("id", label_width)),
        dr.record.id
    ));
    for field in Field::ALL {
        let value = match (field, photo_path) {
            (Field::PhotoFile, Some(path)) if dr.record.has_photo() => path.display().to_string(),
            _ => field.value_of(&dr.record),
        };
        if value.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "  {}  {}\n",
            styles::MUTED.apply_to(pad(field.column(), label_width)),
            value
        ));
    }
    out
}

pub fn render_stats(tables: &[StatsTable]) -> String {
    let mut out = String::new();
    for (i, stats) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", styles::TITLE.apply_to(&stats.title)));
        let rows = stats
            .rows
            .iter()
            .map(|row| {
                vec![
                    row.key.clone(),
                    row.count.to_string(),
                    row.mean_length_cm.map(format_number).unwrap_or_default(),
                ]
            })
            .collect();
        out.push_str(&table(&[stats.group_field.column(), "catches", "mean cm"], rows));
    }
    out
}

/// Catches with their resolved photo paths.
pub fn render_gallery(entries: &[(DisplayRecord, String)]) -> String {
    let mut out = String::new();
    for (dr, path) in entries {
        out.push_str(&format!(
            "{} {}\n   {}\n",
            styles::POSITION.apply_to(dr.position),
            dr.record.summary(),
            styles::MUTED.apply_to(path)
        ));
    }
    out
}

pub fn list_json(records: &[DisplayRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

fn lure(label: &str, name: &str) -> String {
    match (label.is_empty(), name.is_empty()) {
        (_, true) => label.to_string(),
        (true, false) => name.to_string(),
        (false, false) => format!("{} ({})", label, name),
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// Aligned text table; header styled, first column styled as a position for lists.
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.width());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| styles::HEADER.apply_to(pad(h, *w)).to_string())
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad(cell, *w);
                if i == 0 && headers.first() == Some(&"#") {
                    styles::POSITION.apply_to(padded).to_string()
                } else {
                    padded
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

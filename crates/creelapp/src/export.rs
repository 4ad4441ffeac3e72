//! Spreadsheet export of the catch log.

use crate::error::Result;
use crate::model::{CatchRecord, Field};
use crate::table;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub const SHEET_NAME: &str = "Catches";

/// Builds a workbook with one sheet holding `records`, header row first.
pub fn to_xlsx_bytes(records: &[CatchRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, name) in table::header().into_iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &bold)?;
    }

    for (i, record) in records.iter().enumerate() {
        write_row(sheet, i as u32 + 1, record)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_row(sheet: &mut Worksheet, row: u32, record: &CatchRecord) -> Result<()> {
    sheet.write_number(row, 0, record.id.0 as f64)?;
    for (i, field) in Field::ALL.into_iter().enumerate() {
        let col = i as u16 + 1;
        match field {
            Field::LengthCm | Field::Weight => {
                let number = match field {
                    Field::LengthCm => &record.length_cm,
                    _ => &record.weight,
                };
                match number.get() {
                    Some(n) => sheet.write_number(row, col, n)?,
                    None => sheet.write_string(row, col, field.value_of(record))?,
                }
            }
            _ => sheet.write_string(row, col, field.value_of(record))?,
        };
    }
    Ok(())
}

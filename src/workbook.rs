use crate::error::Error;
use crate::normalize::Cell;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::{debug, info};

/// The evidence overview lives on the second sheet when the workbook has more
/// than one; otherwise on the only sheet.
pub fn select_sheet(sheet_names: &[String]) -> Option<&String> {
    sheet_names.get(1).or_else(|| sheet_names.first())
}

/// Read the evidence sheet and return every row after the header block.
/// Rows are laid out from column A of the sheet, regardless of where the
/// first used cell is.
pub fn read_data_rows(path: &Path, header_rows: usize) -> Result<Vec<Vec<Cell>>, Error> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet = select_sheet(&sheet_names)
        .cloned()
        .ok_or_else(|| Error::Other(format!("No worksheet found in {}", path.display())))?;
    info!("Reading sheet '{}' from {}", sheet, path.display());

    let range = workbook.worksheet_range(&sheet)?;
    let rows = data_rows(&range, header_rows);
    debug!("{} data rows after skipping {} header rows", rows.len(), header_rows);

    Ok(rows)
}

pub fn data_rows(range: &Range<Data>, header_rows: usize) -> Vec<Vec<Cell>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    let first_row = header_rows as u64;
    (first_row..=end_row as u64)
        .map(|row| {
            (0..=end_col)
                .map(|col| {
                    range
                        .get_value((row as u32, col))
                        .map(to_cell)
                        .unwrap_or(Cell::Empty)
                })
                .collect()
        })
        .collect()
}

pub fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(n) => Cell::Int(*n),
        Data::Float(n) => Cell::Float(*n),
        Data::Bool(b) => Cell::Bool(*b),
        // serial 0 is what Excel stores for an untouched date cell
        Data::DateTime(dt) if dt.as_f64() < 1.0 => {
            zero_date().map(Cell::DateTime).unwrap_or(Cell::Empty)
        }
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::DateTime(datetime),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

/// Excel's day zero, 1899-12-30; calamine renders serial 0 as the day after.
fn zero_date() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

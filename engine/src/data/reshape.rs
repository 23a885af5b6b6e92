// Wide year tables -> (identifier, year, quantity) records.
use shared::brazilian_format::to_number;
use shared::models::{LongRecord, RawTable};

use crate::error::EngineError;

/// Turns one-column-per-year rows into one record per (row, year column).
///
/// The identifier column is matched ignoring case and every other column is treated
/// as a year. Columns whose header is not an integer year are skipped. Output is
/// ordered by year, then identifier.
pub fn melt_years(table: &RawTable, id_column: &str) -> Result<Vec<LongRecord>, EngineError> {
    let id_idx = table
        .column_index_ci(id_column)
        .ok_or_else(|| EngineError::schema("wide year table", id_column))?;

    let year_columns: Vec<(usize, i32)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|&(idx, _)| idx != id_idx)
        .filter_map(|(idx, header)| match parse_year(header) {
            Some(year) => Some((idx, year)),
            None => {
                tracing::debug!(header = %header, "Skipping non-year column");
                None
            }
        })
        .collect();

    let mut records = Vec::with_capacity(table.rows.len() * year_columns.len());
    for row in &table.rows {
        for &(idx, year) in &year_columns {
            records.push(LongRecord {
                identifier: RawTable::cell_at(row, id_idx).to_string(),
                year,
                quantity: to_number(RawTable::cell_at(row, idx)),
            });
        }
    }

    records.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.identifier.cmp(&b.identifier)));
    Ok(records)
}

/// "2020", " 2021 " and "2022.0" are years; "Total" is not.
pub(crate) fn parse_year(header: &str) -> Option<i32> {
    let header = header.trim();
    if let Ok(year) = header.parse::<i32>() {
        return Some(year);
    }
    let value = header.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0 && value.abs() <= i32::MAX as f64)
        .then_some(value as i32)
}

//! Typed views over the dashboard's source tables.
//!
//! Each builder checks the columns it needs up front (a missing column is a
//! `Schema` error) and then parses cell by cell: bad numbers become zero, rows
//! missing a year or period are dropped.

use shared::brazilian_format::{to_integer, to_number};
use shared::models::{LongRecord, RawTable, ServiceRecord, YearRecord};

use super::period::parse_period;
use super::reshape::{melt_years, parse_year};
use crate::error::EngineError;

pub const YEAR_COLUMN: &str = "ano";
pub const QUANTITY_COLUMN: &str = "quantidade";

pub const PERIOD_COLUMN: &str = "Período de saída";
pub const SERVICE_COLUMN: &str = "Serviço de Saúde";
pub const DOSE_COLUMNS: [&str; 4] = ["250 UI", "500 UI", "1000 UI", "1500 UI"];
pub const TOTAL_COLUMN: &str = "Total Geral";

pub const MEDICINE_COLUMN: &str = "medicamento";

/// Ministry distribution per year, sorted by year.
pub fn distribution_by_year(table: &RawTable) -> Result<Vec<YearRecord>, EngineError> {
    let year_idx = require_ci(table, "distribution by year", YEAR_COLUMN)?;
    let qty_idx = require_ci(table, "distribution by year", QUANTITY_COLUMN)?;

    let mut records: Vec<YearRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let year = parse_year(RawTable::cell_at(row, year_idx))?;
            Some(YearRecord {
                year,
                quantity: to_number(RawTable::cell_at(row, qty_idx)),
            })
        })
        .collect();
    log_dropped("distribution by year", table.len(), records.len());

    records.sort_by_key(|r| r.year);
    Ok(records)
}

/// Distribution per health service and month. Rows whose period label does not
/// parse are left out.
pub fn service_distribution(table: &RawTable) -> Result<Vec<ServiceRecord>, EngineError> {
    const TABLE: &str = "distribution by service";
    let period_idx = require(table, TABLE, PERIOD_COLUMN)?;
    let service_idx = require(table, TABLE, SERVICE_COLUMN)?;
    let total_idx = require(table, TABLE, TOTAL_COLUMN)?;
    let mut dose_idx = [0usize; 4];
    for (slot, name) in dose_idx.iter_mut().zip(DOSE_COLUMNS) {
        *slot = require(table, TABLE, name)?;
    }

    let records: Vec<ServiceRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let cell = |idx: usize| RawTable::cell_at(row, idx);
            let label = cell(period_idx);
            let period = parse_period(label)?;
            Some(ServiceRecord {
                period_label: label.to_string(),
                period,
                service: cell(service_idx).to_string(),
                doses: dose_idx.map(|idx| to_integer(cell(idx))),
                total: to_integer(cell(total_idx)),
            })
        })
        .collect();
    log_dropped(TABLE, table.len(), records.len());

    Ok(records)
}

/// Acquisitions per medicine, reshaped from one column per year.
pub fn acquisitions(table: &RawTable) -> Result<Vec<LongRecord>, EngineError> {
    melt_years(table, MEDICINE_COLUMN).map_err(|e| match e {
        EngineError::Schema { column, .. } => EngineError::schema("acquisitions by medicine", column),
        other => other,
    })
}

fn require(table: &RawTable, name: &str, column: &str) -> Result<usize, EngineError> {
    table
        .column_index(column)
        .ok_or_else(|| EngineError::schema(name, column))
}

fn require_ci(table: &RawTable, name: &str, column: &str) -> Result<usize, EngineError> {
    table
        .column_index_ci(column)
        .ok_or_else(|| EngineError::schema(name, column))
}

fn log_dropped(table: &str, before: usize, after: usize) {
    if after < before {
        tracing::debug!(table, dropped = before - after, kept = after, "Dropped rows with missing required fields");
    }
}

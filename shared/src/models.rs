use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A delimited table with every cell kept as text.
///
/// The loader only produces rows with exactly `headers.len()` cells. Tables built
/// by hand may be ragged; a missing cell reads as "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, compared after trimming.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Same as `column_index` but ignoring case ("Medicamento" == "medicamento").
    pub fn column_index_ci(&self, name: &str) -> Option<usize> {
        let wanted = name.to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Values of one column in row order, or `None` if the column is absent.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| Self::cell_at(row, idx)).collect())
    }

    /// Cell of `row` under column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        self.rows.get(row).map(|r| Self::cell_at(r, idx))
    }

    /// Cell `idx` of `row`, or "" past the end of a short row.
    pub fn cell_at(row: &[String], idx: usize) -> &str {
        row.get(idx).map_or("", String::as_str)
    }
}

/// One row of the distribution-by-year table (`ano`, `quantidade`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    pub quantity: f64,
}

/// One row of the distribution-by-service table after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub period_label: String,
    pub period: NaiveDate,
    pub service: String,
    /// 250 UI, 500 UI, 1000 UI and 1500 UI, in that order.
    pub doses: [i64; 4],
    pub total: i64,
}

/// (identifier, year, quantity) produced by reshaping a wide year table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub identifier: String,
    pub year: i32,
    pub quantity: f64,
}

/// Summed value for one distinct grouping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket<K> {
    pub key: K,
    pub value: f64,
}

/// Per-period sums, one value per selected column in column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub period: NaiveDate,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub from: i32,
    pub to: i32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub services: usize,
    pub total: i64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionSummary {
    pub from: i32,
    pub to: i32,
    pub medicines: usize,
    pub total: f64,
}

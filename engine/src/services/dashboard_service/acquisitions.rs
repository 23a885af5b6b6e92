// Handler for the acquisitions page (coagulopathy medicines bought by the ministry).
use serde::Serialize;
use shared::models::{AcquisitionSummary, Bucket, LongRecord};

use super::helpers::load_dataset;
use crate::config::DashboardSettings;
use crate::data::aggregate::{distinct_sorted, filter_rows, sum_by};
use crate::data::datasets;
use crate::data::summary::acquisition_summary;
use crate::data::DatasetCache;
use crate::error::EngineError;

#[derive(Debug, Clone, Serialize)]
pub struct AcquisitionsView {
    /// Every medicine in the table, for the selection filter.
    pub medicines: Vec<String>,
    pub selected: Vec<String>,
    pub summary: AcquisitionSummary,
    pub yearly_totals: Vec<Bucket<i32>>,
    /// Stacked composition keyed by (year, medicine).
    pub composition: Vec<Bucket<(i32, String)>>,
    pub records: Vec<LongRecord>,
}

/// `selected == None` means every medicine.
pub fn handle_acquisitions(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
    selected: Option<&[String]>,
) -> Result<AcquisitionsView, EngineError> {
    let file = &settings.datasets.acquisitions;
    let table = load_dataset(settings, cache, file)?;
    let records = datasets::acquisitions(&table)?;
    if records.is_empty() {
        return Err(EngineError::EmptyDataset(format!("{} is empty", file)));
    }

    let medicines = distinct_sorted(&records, |r: &LongRecord| r.identifier.as_str());
    let selected: Vec<String> = match selected {
        None => medicines.clone(),
        Some([]) => {
            return Err(EngineError::InvalidArgument(
                "select at least one medicine".to_string(),
            ))
        }
        Some(names) => names.to_vec(),
    };

    let filtered = filter_rows(&records, &selected, |r: &LongRecord| r.identifier.as_str());
    let summary = acquisition_summary(&filtered).ok_or_else(|| {
        EngineError::InvalidArgument(format!(
            "none of the selected medicines are present: {}",
            selected.join(", ")
        ))
    })?;

    let yearly_totals = sum_by(&filtered, |r| r.year, |r| r.quantity);
    let composition = sum_by(&filtered, |r| (r.year, r.identifier.clone()), |r| r.quantity);

    tracing::info!(
        medicines = summary.medicines,
        from = summary.from,
        to = summary.to,
        "Built acquisitions view"
    );

    Ok(AcquisitionsView {
        medicines,
        selected,
        summary,
        yearly_totals,
        composition,
        records: filtered,
    })
}

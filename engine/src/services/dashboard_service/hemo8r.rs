// Handler for the Hemo 8R page: ministry distribution per year plus the
// per-service distribution with monthly series and a top-N ranking.
use serde::Serialize;
use shared::models::{Bucket, MonthlyPoint, ServiceRecord, ServiceSummary, YearRecord, YearSummary};

use super::helpers::load_dataset;
use crate::config::DashboardSettings;
use crate::data::aggregate::{monthly_sums, sum_by, top_n};
use crate::data::datasets::{self, DOSE_COLUMNS, TOTAL_COLUMN};
use crate::data::summary::{service_summary, year_summary};
use crate::data::DatasetCache;
use crate::error::EngineError;

#[derive(Debug, Clone, Serialize)]
pub struct MinistryPanel {
    pub summary: YearSummary,
    pub by_year: Vec<Bucket<i32>>,
    pub records: Vec<YearRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePanel {
    pub summary: ServiceSummary,
    /// Names of the columns summed in `monthly`, in value order.
    pub series: Vec<String>,
    pub monthly: Vec<MonthlyPoint>,
    pub top_services: Vec<Bucket<String>>,
    pub records: Vec<ServiceRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Hemo8rView {
    /// Absent when the ministry table could not be loaded or has no rows.
    pub ministry: Option<MinistryPanel>,
    pub services: ServicePanel,
}

pub fn handle_hemo8r(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
) -> Result<Hemo8rView, EngineError> {
    let ministry = match ministry_panel(settings, cache) {
        Ok(panel) => panel,
        Err(e) => {
            // The ministry panel is optional; the page carries on without it.
            tracing::warn!(error = %e, "Ministry distribution unavailable");
            None
        }
    };

    let services = service_panel(settings, cache)?;
    Ok(Hemo8rView { ministry, services })
}

fn ministry_panel(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
) -> Result<Option<MinistryPanel>, EngineError> {
    let table = load_dataset(settings, cache, &settings.datasets.ministry_distribution)?;
    let records = datasets::distribution_by_year(&table)?;
    let Some(summary) = year_summary(&records) else {
        return Ok(None);
    };
    let by_year = sum_by(&records, |r| r.year, |r| r.quantity);
    Ok(Some(MinistryPanel {
        summary,
        by_year,
        records,
    }))
}

fn service_panel(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
) -> Result<ServicePanel, EngineError> {
    let file = &settings.datasets.service_distribution;
    let table = load_dataset(settings, cache, file)?;
    let records = datasets::service_distribution(&table)?;
    let summary = service_summary(&records)
        .ok_or_else(|| EngineError::EmptyDataset(format!("{} has no rows with a valid period", file)))?;

    let series = DOSE_COLUMNS
        .iter()
        .chain(std::iter::once(&TOTAL_COLUMN))
        .map(|s| s.to_string())
        .collect();
    let monthly = monthly_sums(
        &records,
        |r| Some(r.period),
        |r| {
            r.doses
                .iter()
                .chain(std::iter::once(&r.total))
                .map(|&v| v as f64)
                .collect()
        },
    );
    let top_services = top_n(
        sum_by(&records, |r| r.service.clone(), |r| r.total as f64),
        settings.top_n,
    )?;

    tracing::info!(
        records = summary.records,
        services = summary.services,
        months = monthly.len(),
        "Built service distribution panel"
    );

    Ok(ServicePanel {
        summary,
        series,
        monthly,
        top_services,
        records,
    })
}

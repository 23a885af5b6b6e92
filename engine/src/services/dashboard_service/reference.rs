// Read-only pages: Emicizumabe scenarios (HB/ROCHE) and the patients table.
use serde::Serialize;
use shared::models::RawTable;

use super::helpers::load_dataset;
use crate::config::DashboardSettings;
use crate::data::DatasetCache;
use crate::error::EngineError;

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceView {
    /// Hemobrás scenario, in UI.
    pub hb: RawTable,
    /// ROCHE scenario, in mg.
    pub roche: RawTable,
}

pub fn handle_emicizumabe(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
) -> Result<ReferenceView, EngineError> {
    let hb = load_dataset(settings, cache, &settings.datasets.emicizumabe_hb)?;
    let roche = load_dataset(settings, cache, &settings.datasets.emicizumabe_roche)?;
    Ok(ReferenceView {
        hb: RawTable::clone(&hb),
        roche: RawTable::clone(&roche),
    })
}

pub fn handle_patients(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
) -> Result<RawTable, EngineError> {
    let table = load_dataset(settings, cache, &settings.datasets.emicizumabe_patients)?;
    Ok(RawTable::clone(&table))
}

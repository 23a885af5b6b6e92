// Helpers shared by the page handlers.
use shared::models::RawTable;
use std::sync::Arc;

use crate::config::DashboardSettings;
use crate::data::DatasetCache;
use crate::error::EngineError;

/// Loads one of the configured files through the cache.
pub fn load_dataset(
    settings: &DashboardSettings,
    cache: &mut DatasetCache,
    file_name: &str,
) -> Result<Arc<RawTable>, EngineError> {
    let path = settings.path_for(file_name);
    cache.get_or_load(&path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to load dataset");
        e
    })
}

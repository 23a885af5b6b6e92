// Dashboard settings: where the datasets live and the ranking size.
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// File names of the six source tables, relative to `data_dir`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetFiles {
    pub ministry_distribution: String,
    pub service_distribution: String,
    pub acquisitions: String,
    pub emicizumabe_hb: String,
    pub emicizumabe_roche: String,
    pub emicizumabe_patients: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        DatasetFiles {
            ministry_distribution: "hemo8R_MS.csv".to_string(),
            service_distribution: "historico_hemo8r.csv".to_string(),
            acquisitions: "medicamentos_coagulopatias.csv".to_string(),
            emicizumabe_hb: "dados_emicizumabe_HB.csv".to_string(),
            emicizumabe_roche: "dados_emicizumabe_ROCHE.csv".to_string(),
            // Historical file name, kept as deployed.
            emicizumabe_patients: "emicizumane_pacientes.csv".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardSettings {
    pub data_dir: PathBuf,
    pub datasets: DatasetFiles,
    /// Services shown in the ranking chart.
    pub top_n: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            data_dir: PathBuf::from("."),
            datasets: DatasetFiles::default(),
            top_n: 15,
        }
    }
}

impl DashboardSettings {
    pub const TOP_N_RANGE: RangeInclusive<usize> = 5..=31;

    /// Settings embedded in the binary.
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        let settings: DashboardSettings = serde_json::from_str(config_str)?;
        Ok(settings.normalized())
    }

    /// Reads a JSON settings file; absent keys fall back to the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;
        let settings: DashboardSettings = serde_json::from_str(&config_str)
            .with_context(|| format!("Invalid settings file '{}'", path.display()))?;
        Ok(settings.normalized())
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        let clamped = self
            .top_n
            .clamp(*Self::TOP_N_RANGE.start(), *Self::TOP_N_RANGE.end());
        if clamped != self.top_n {
            tracing::warn!(requested = self.top_n, used = clamped, "top_n outside the supported range");
            self.top_n = clamped;
        }
        self
    }
}

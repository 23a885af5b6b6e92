// engine/src/services/dashboard_service/mod.rs
// DashboardService owns the settings and the dataset cache and dispatches to
// one handler per page. Handlers live in sibling modules.

use serde::Serialize;
use shared::models::RawTable;
use std::fmt;
use std::str::FromStr;

use crate::config::DashboardSettings;
use crate::data::DatasetCache;
use crate::error::EngineError;

pub mod acquisitions;
pub mod helpers;
pub mod hemo8r;
pub mod reference;
pub mod text;

pub use acquisitions::AcquisitionsView;
pub use hemo8r::{Hemo8rView, MinistryPanel, ServicePanel};
pub use reference::ReferenceView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Page {
    Hemo8r,
    Emicizumabe,
    Acquisitions,
    Patients,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Hemo8r, Page::Emicizumabe, Page::Acquisitions, Page::Patients];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Hemo8r => "Hemo 8R",
            Page::Emicizumabe => "Emicizumabe",
            Page::Acquisitions => "Aquisições – Coagulopatias (MS)",
            Page::Patients => "Emicizumabe – Pacientes",
        }
    }
}

impl FromStr for Page {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hemo8r" | "hemo-8r" => Ok(Page::Hemo8r),
            "emicizumabe" => Ok(Page::Emicizumabe),
            "aquisicoes" | "aquisições" | "acquisitions" => Ok(Page::Acquisitions),
            "pacientes" | "patients" => Ok(Page::Patients),
            other => Err(EngineError::InvalidArgument(format!("Unknown page: {}", other))),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", content = "view")]
pub enum PageView {
    Hemo8r(Hemo8rView),
    Emicizumabe(ReferenceView),
    Acquisitions(AcquisitionsView),
    Patients(RawTable),
}

pub struct DashboardService {
    settings: DashboardSettings,
    cache: DatasetCache,
}

impl DashboardService {
    pub fn new(settings: DashboardSettings) -> Self {
        DashboardService {
            settings,
            cache: DatasetCache::new(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Builds the view for `page`. `selection` only applies to the acquisitions page.
    pub fn render(&mut self, page: Page, selection: Option<&[String]>) -> Result<PageView, EngineError> {
        tracing::info!(page = %page, "Rendering page");
        let result = match page {
            Page::Hemo8r => self.hemo8r().map(PageView::Hemo8r),
            Page::Emicizumabe => self.emicizumabe().map(PageView::Emicizumabe),
            Page::Acquisitions => self.acquisitions(selection).map(PageView::Acquisitions),
            Page::Patients => self.patients().map(PageView::Patients),
        };
        if let Err(e) = &result {
            tracing::error!(page = %page, error = %e, "Page rendering halted");
        }
        result
    }

    pub fn hemo8r(&mut self) -> Result<Hemo8rView, EngineError> {
        hemo8r::handle_hemo8r(&self.settings, &mut self.cache)
    }

    pub fn emicizumabe(&mut self) -> Result<ReferenceView, EngineError> {
        reference::handle_emicizumabe(&self.settings, &mut self.cache)
    }

    pub fn acquisitions(&mut self, selection: Option<&[String]>) -> Result<AcquisitionsView, EngineError> {
        acquisitions::handle_acquisitions(&self.settings, &mut self.cache, selection)
    }

    pub fn patients(&mut self) -> Result<RawTable, EngineError> {
        reference::handle_patients(&self.settings, &mut self.cache)
    }
}

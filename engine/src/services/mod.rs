// Page-level services built on top of the data pipeline.
pub mod dashboard_service;

pub use dashboard_service::{DashboardService, Page, PageView};

// Scalar metrics shown above each chart. All return None on empty input.
use shared::models::{
    AcquisitionSummary, LongRecord, ServiceRecord, ServiceSummary, YearRecord, YearSummary,
};
use std::collections::HashSet;

pub fn year_summary(records: &[YearRecord]) -> Option<YearSummary> {
    let from = records.iter().map(|r| r.year).min()?;
    let to = records.iter().map(|r| r.year).max()?;
    Some(YearSummary {
        from,
        to,
        total: records.iter().map(|r| r.quantity).sum(),
    })
}

pub fn service_summary(records: &[ServiceRecord]) -> Option<ServiceSummary> {
    let from = records.iter().map(|r| r.period).min()?;
    let to = records.iter().map(|r| r.period).max()?;
    let services: HashSet<&str> = records.iter().map(|r| r.service.as_str()).collect();
    Some(ServiceSummary {
        from,
        to,
        services: services.len(),
        total: records.iter().map(|r| r.total).sum(),
        records: records.len(),
    })
}

pub fn acquisition_summary(records: &[LongRecord]) -> Option<AcquisitionSummary> {
    let from = records.iter().map(|r| r.year).min()?;
    let to = records.iter().map(|r| r.year).max()?;
    let medicines: HashSet<&str> = records.iter().map(|r| r.identifier.as_str()).collect();
    Some(AcquisitionSummary {
        from,
        to,
        medicines: medicines.len(),
        total: records.iter().map(|r| r.quantity).sum(),
    })
}

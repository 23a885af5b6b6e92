// Plain-text rendering of page views for the command line.
use shared::brazilian_format::{format_decimal, format_thousands};
use shared::models::RawTable;
use std::fmt::{self, Write};

use super::{AcquisitionsView, Hemo8rView, PageView, ReferenceView};
use crate::data::period::format_period;

pub fn render_text(view: &PageView) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match view {
        PageView::Hemo8r(v) => hemo8r(&mut out, v)?,
        PageView::Emicizumabe(v) => reference(&mut out, v)?,
        PageView::Acquisitions(v) => acquisitions(&mut out, v)?,
        PageView::Patients(table) => {
            heading(&mut out, "Emicizumabe – Pacientes")?;
            raw_table(&mut out, table)?;
        }
    }
    Ok(out)
}

fn qty(value: f64) -> String {
    format_thousands(value.trunc() as i64)
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "== {} ==", title)
}

fn hemo8r(out: &mut String, view: &Hemo8rView) -> fmt::Result {
    heading(out, "Hemo 8R")?;

    writeln!(out, "-- Distribuição – Ministério da Saúde")?;
    match &view.ministry {
        Some(panel) => {
            let s = &panel.summary;
            writeln!(out, "De: {}  Até: {}  Total distribuído (UI): {}", s.from, s.to, qty(s.total))?;
            for b in &panel.by_year {
                writeln!(out, "  {}: {}", b.key, qty(b.value))?;
            }
        }
        None => {
            writeln!(out, "Sem dados do MS.")?;
        }
    }

    let p = &view.services;
    let s = &p.summary;
    writeln!(out, "-- Distribuição – Serviços de Saúde")?;
    writeln!(
        out,
        "De: {}  Até: {}  Serviços: {}  Volume total (UI): {}  Registros: {}",
        format_period(s.from),
        format_period(s.to),
        format_thousands(s.services as i64),
        format_thousands(s.total),
        format_thousands(s.records as i64)
    )?;

    writeln!(out, "-- Evolução mensal por UI ({})", p.series.join(" | "))?;
    for point in &p.monthly {
        let values: Vec<String> = point.values.iter().map(|&v| qty(v)).collect();
        writeln!(out, "  {}: {}", format_period(point.period), values.join(" | "))?;
    }

    writeln!(out, "-- Top serviços por volume total (UI)")?;
    for (rank, b) in p.top_services.iter().enumerate() {
        writeln!(out, "  {:>2}. {}: {}", rank + 1, b.key, qty(b.value))?;
    }
    Ok(())
}

fn reference(out: &mut String, view: &ReferenceView) -> fmt::Result {
    heading(out, "Emicizumabe")?;
    writeln!(out, "-- Cenário Hemobrás (UI)")?;
    raw_table(out, &view.hb)?;
    writeln!(out, "-- Cenário ROCHE (mg)")?;
    raw_table(out, &view.roche)
}

fn acquisitions(out: &mut String, view: &AcquisitionsView) -> fmt::Result {
    heading(out, "Aquisições – Coagulopatias (MS)")?;
    let s = &view.summary;
    writeln!(
        out,
        "Período: {}–{}  Medicamentos distintos: {}  Total adquirido: {}",
        s.from,
        s.to,
        s.medicines,
        qty(s.total)
    )?;

    writeln!(out, "-- Total anual (medicamentos selecionados)")?;
    for b in &view.yearly_totals {
        writeln!(out, "  {}: {}", b.key, qty(b.value))?;
    }

    writeln!(out, "-- Composição por medicamento")?;
    for b in &view.composition {
        writeln!(out, "  {} {}: {}", b.key.0, b.key.1, format_decimal(b.value, 2))?;
    }
    Ok(())
}

fn raw_table(out: &mut String, table: &RawTable) -> fmt::Result {
    writeln!(out, "{}", table.headers.join(" | "))?;
    for row in &table.rows {
        writeln!(out, "{}", row.join(" | "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard_service::ServicePanel;
    use chrono::NaiveDate;
    use shared::models::{AcquisitionSummary, Bucket, MonthlyPoint, ServiceSummary};

    #[test]
    fn test_patients_table_rendering() {
        let table = RawTable::new(
            vec!["Paciente".into(), "Peso".into()],
            vec![vec!["P1".into(), "30,5".into()]],
        );
        let text = render_text(&PageView::Patients(table)).unwrap();
        assert_eq!(text, "== Emicizumabe – Pacientes ==\nPaciente | Peso\nP1 | 30,5\n");
    }

    #[test]
    fn test_acquisitions_metrics_use_brazilian_grouping() {
        let view = AcquisitionsView {
            medicines: vec!["FatorVIII".into()],
            selected: vec!["FatorVIII".into()],
            summary: AcquisitionSummary { from: 2020, to: 2021, medicines: 1, total: 1_300_500.7 },
            yearly_totals: vec![Bucket { key: 2021, value: 1_300_000.0 }],
            composition: vec![Bucket { key: (2021, "FatorVIII".into()), value: 1200.5 }],
            records: vec![],
        };
        let text = render_text(&PageView::Acquisitions(view)).unwrap();
        assert!(text.contains("Período: 2020–2021"));
        assert!(text.contains("Total adquirido: 1.300.500"));
        assert!(text.contains("  2021: 1.300.000"));
        assert!(text.contains("  2021 FatorVIII: 1200,50"));
    }

    #[test]
    fn test_hemo8r_without_ministry_panel() {
        let jan = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let view = Hemo8rView {
            ministry: None,
            services: ServicePanel {
                summary: ServiceSummary { from: jan, to: jan, services: 1, total: 4500, records: 2 },
                series: vec!["250 UI".into(), "Total Geral".into()],
                monthly: vec![MonthlyPoint { period: jan, values: vec![1000.0, 4500.0] }],
                top_services: vec![Bucket { key: "Hemocentro A".into(), value: 4500.0 }],
                records: vec![],
            },
        };
        let text = render_text(&PageView::Hemo8r(view)).unwrap();
        assert!(text.contains("Sem dados do MS."));
        assert!(text.contains("De: jan/2023  Até: jan/2023"));
        assert!(text.contains("Volume total (UI): 4.500"));
        assert!(text.contains("  jan/2023: 1.000 | 4.500"));
        assert!(text.contains("   1. Hemocentro A: 4.500"));
    }
}

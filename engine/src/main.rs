// Dashboard command-line entry point: renders one page view as text or JSON.
use anyhow::Context;
use clap::Parser;
use engine::config::DashboardSettings;
use engine::services::dashboard_service::text::render_text;
use engine::services::{DashboardService, Page};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hemo-dashboard", version, about = "Hemophilia treatment dashboard data views")]
struct Args {
    /// JSON settings file; the embedded defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page to render: hemo8r, emicizumabe, aquisicoes or pacientes
    #[arg(long, default_value = "hemo8r")]
    page: Page,

    /// Number of services in the Hemo 8R ranking (clamped to 5..=31)
    #[arg(long)]
    top: Option<usize>,

    /// Medicine to include on the acquisitions page (repeatable; all when omitted)
    #[arg(long = "medicine")]
    medicines: Vec<String>,

    /// Print the view as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => DashboardSettings::from_file(path)?,
        None => DashboardSettings::load_default()?,
    };
    if let Some(top) = args.top {
        settings = settings.with_top_n(top);
    }
    info!(data_dir = %settings.data_dir.display(), page = %args.page, "Starting dashboard");

    let mut service = DashboardService::new(settings);
    let selection = (!args.medicines.is_empty()).then_some(args.medicines.as_slice());

    let view = match service.render(args.page, selection) {
        Ok(view) => view,
        Err(e) if e.halts_page() => {
            eprintln!("Erro ao carregar a página {}: {}", args.page, e);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_text(&view).context("Failed to render page text")?);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["hemo-dashboard"]).unwrap();
        assert_eq!(args.page, Page::Hemo8r);
        assert!(args.config.is_none());
        assert!(args.top.is_none());
        assert!(args.medicines.is_empty());
        assert!(!args.json);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "hemo-dashboard",
            "--config",
            "dados/painel.json",
            "--page",
            "aquisicoes",
            "--top",
            "10",
            "--medicine",
            "FatorVIII",
            "--medicine",
            "FatorIX",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("dados/painel.json")));
        assert_eq!(args.page, Page::Acquisitions);
        assert_eq!(args.top, Some(10));
        assert_eq!(args.medicines, vec!["FatorVIII", "FatorIX"]);
        assert!(args.json);
    }

    #[test]
    fn test_rejects_unknown_page_and_bad_top() {
        assert!(Args::try_parse_from(["hemo-dashboard", "--page", "inicio"]).is_err());
        assert!(Args::try_parse_from(["hemo-dashboard", "--top", "muitos"]).is_err());
        assert!(Args::try_parse_from(["hemo-dashboard", "--verbose"]).is_err());
    }
}

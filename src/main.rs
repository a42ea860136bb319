//! CLI entry point for the station dashboard.
//!
//! Acts as a thin shell over the library: it opens the workbook, lets the
//! user pick a sheet and a station through subcommands, and prints or writes
//! the resulting views.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use station_dashboard::catalog::parse_selection;
use station_dashboard::category::DeviceCategory;
use station_dashboard::config::{DEFAULT_WORKBOOK, Settings};
use station_dashboard::dashboard::Dashboard;
use station_dashboard::fetch::{BasicClient, fetch_bytes};
use station_dashboard::output::{log_notices, print_json, print_pretty, write_view};
use station_dashboard::source::{self, WorkbookSource, XlsxWorkbook};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "station_dashboard")]
#[command(about = "Weather-station network dashboard: map, statistics and directory per device sheet", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Workbook file, directory of CSV sheets, or http(s) URL
    #[arg(long, global = true, env = "STATION_WORKBOOK", default_value = DEFAULT_WORKBOOK)]
    workbook: String,

    /// Directory containing the per-category images (aws.png, arg.png, ...)
    #[arg(long, global = true, env = "STATION_ASSET_DIR", default_value = ".")]
    asset_dir: PathBuf,
}

impl From<GlobalArgs> for Settings {
    fn from(args: GlobalArgs) -> Self {
        Settings {
            workbook: args.workbook,
            asset_dir: args.asset_dir,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the sheets of the workbook and their device categories
    Sheets,
    /// List the stations of a sheet as "<id> - <name>"
    Stations {
        #[arg(short, long)]
        sheet: String,
    },
    /// Print headline metrics and chart summaries of a sheet as JSON
    Summary {
        #[arg(short, long)]
        sheet: String,
    },
    /// Print the full record of one station
    Detail {
        #[arg(short, long)]
        sheet: String,

        /// Station id, or a "<id> - <name>" label
        #[arg(long)]
        station: String,
    },
    /// Write map page, map state, summaries, directory and detail files
    Render {
        #[arg(short, long)]
        sheet: String,

        /// Station to highlight; defaults to the first station of the sheet
        #[arg(long)]
        station: Option<String>,

        /// Directory to write the output files into
        #[arg(short, long, default_value = "dashboard")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/station_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("station_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from(cli.global);

    let workbook = open_workbook(&settings).await?;
    let mut dashboard = match Dashboard::open(workbook, settings) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            error!(error = %e, "Cannot read sheet names, the workbook may be corrupt");
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::Sheets => {
            for name in dashboard.sheet_names() {
                let category = DeviceCategory::from_sheet_name(name);
                info!(
                    sheet = %name,
                    category = category.map(DeviceCategory::code).unwrap_or("-"),
                    device = category.map(DeviceCategory::full_name).unwrap_or("-"),
                    "Sheet"
                );
            }
        }
        Commands::Stations { sheet } => {
            let catalog = dashboard.catalog(&sheet)?;
            let options = catalog.site_options();
            for option in &options {
                info!(id_site = %option.id_site, "{}", option.display);
            }
            info!(sheet = %sheet, stations = catalog.len(), listed = options.len(), "Station list");
        }
        Commands::Summary { sheet } => {
            let view = dashboard.view(&sheet, None);
            log_notices(&view.notices);
            if view.has_errors() {
                bail!("cannot summarize sheet '{sheet}'");
            }
            info!(
                total = view.stats.total_stations,
                provinces = view.stats.provinces,
                active_since = %view.stats.active_since_label(),
                "Headline"
            );
            print_json(&serde_json::json!({
                "stats": view.stats,
                "summary": view.summary,
            }))?;
        }
        Commands::Detail { sheet, station } => {
            let id = parse_selection(&station);
            let view = dashboard.view(&sheet, Some(id));
            log_notices(&view.notices);
            if view.catalog.is_empty() {
                bail!("sheet '{sheet}' has no stations to show");
            }
            let Some(record) = &view.selected else {
                bail!("station '{id}' not found in sheet '{sheet}'");
            };
            print_pretty(record);
            print_json(record)?;
        }
        Commands::Render {
            sheet,
            station,
            out_dir,
        } => {
            let catalog = dashboard.catalog(&sheet).ok();
            let selected = match station.as_deref() {
                Some(label) => Some(parse_selection(label).to_string()),
                None => catalog
                    .as_ref()
                    .and_then(|c| c.site_options().into_iter().next())
                    .map(|o| o.id_site),
            };

            let view = dashboard.view(&sheet, selected.as_deref());
            log_notices(&view.notices);
            if view.has_errors() {
                bail!("cannot render sheet '{sheet}'");
            }

            let written = write_view(&out_dir, &view)?;
            for path in &written {
                info!(path = %path.display(), "Written");
            }
        }
    }

    Ok(())
}

/// Opens the configured workbook from disk or downloads it first.
#[tracing::instrument(skip(settings), fields(workbook = %settings.workbook))]
async fn open_workbook(settings: &Settings) -> Result<Box<dyn WorkbookSource>> {
    if settings.is_remote() {
        let url = settings.workbook.as_str();
        let bytes = fetch_bytes(&BasicClient::new()?, url).await?;
        return Ok(Box::new(XlsxWorkbook::from_bytes(url, bytes)?));
    }

    match source::open_local(settings.workbook_path()) {
        Ok(workbook) => Ok(workbook),
        Err(e) => {
            error!(error = %e, "Workbook not available; place it next to the binary or set STATION_WORKBOOK");
            Err(e.into())
        }
    }
}

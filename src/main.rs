// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use bank_dashboard::{logging, DashboardConfig, DashboardView, Dashboard, FormatPolicy, ViewState};
use std::env;
use std::path::PathBuf;

/// Parsed command line: `[snapshot] [--config <file>] [--locale <code>]`
#[derive(Debug, Default)]
struct Args {
    snapshot: bool,
    config: Option<PathBuf>,
    locale: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "snapshot" => parsed.snapshot = true,
            "--config" => {
                let path = iter.next().context("--config needs a file path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--locale" => {
                let code = iter.next().context("--locale needs a code (en, ru)")?;
                parsed.locale = Some(code.clone());
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    let log_path = logging::init().context("failed to open log file")?;

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };

    let dashboard = config.build_dashboard();
    let mut state = dashboard
        .mount(&config.locale, config.initial_visible)
        .context("invalid locale props")?;

    if let Some(code) = &args.locale {
        state = bank_dashboard::apply(&state, bank_dashboard::Action::SetLocale(code.clone()))?;
    }

    tracing::info!(snapshot = args.snapshot, log = %log_path.display(), "starting");

    if args.snapshot {
        run_snapshot(&dashboard, &state, config.format)
    } else {
        run_ui_mode(dashboard, state, config.format)
    }
}

/// Print the derived text view as JSON
fn run_snapshot(dashboard: &Dashboard, state: &ViewState, policy: FormatPolicy) -> Result<()> {
    let view = DashboardView::derive(dashboard, state, policy);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(dashboard: Dashboard, state: ViewState, policy: FormatPolicy) -> Result<()> {
    let mut app = ui::App::new(dashboard, state, policy);
    ui::run_ui(&mut app)?;
    tracing::info!("ui closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_dashboard: Dashboard, _state: ViewState, _policy: FormatPolicy) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print the view: bank-dashboard snapshot");
    std::process::exit(1);
}

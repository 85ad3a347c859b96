//! Folio CLI
//!
//! - `folio init`: write a default `folio.toml` and a sample scenario
//! - `folio render`: write the page as static HTML
//! - `folio simulate`: run a headless scenario and report the result

mod project;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_app::render::{render_document, render_snapshot};
use folio_app::{
    run_loaded_scenario, HeadlessRunConfig, HeadlessScenario, Page, PageRuntime, SiteConfig,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio page renderer and headless scenario runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default folio.toml and a sample scenario
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
    /// Render the page to HTML
    Render {
        /// Config file, or a directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Mount the page, run this many milliseconds of frames and inline
        /// the resulting animation styles
        #[arg(long)]
        at_ms: Option<u64>,
    },
    /// Run a headless scenario against the page
    Simulate {
        /// Scenario JSON file
        #[arg(short, long)]
        scenario: PathBuf,
        /// Config file, or a directory containing folio.toml
        #[arg(short, long, default_value = ".")]
        config: PathBuf,
        /// Write the JSON report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,
        /// Logical milliseconds per frame
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Init { path, force } => project::init_site(&path, force),
        Command::Render { config, out, at_ms } => render(&config, out.as_deref(), at_ms),
        Command::Simulate {
            scenario,
            config,
            report,
            tick_ms,
        } => simulate(&scenario, &config, report.as_deref(), tick_ms),
    }
}

fn render(config_path: &Path, out: Option<&Path>, at_ms: Option<u64>) -> Result<()> {
    let config = SiteConfig::load(config_path)?;

    let html = match at_ms {
        None => {
            let mut page = Page::build(&config)?;
            page.layout(folio_app::prelude::Size::new(
                config.viewport.width as f32,
                config.viewport.height as f32,
            ))?;
            render_document(&page, &config.profile)
        }
        Some(ms) => {
            let mut runtime = PageRuntime::new(&config)?;
            let mut page = runtime.mount()?;
            let mut remaining = ms;
            while remaining > 0 {
                let step = remaining.min(16);
                page.frame(step as f32);
                remaining -= step;
            }
            render_snapshot(&page, &config.profile)
        }
    };

    match out {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = html.len(), "page rendered");
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn simulate(
    scenario_path: &Path,
    config_path: &Path,
    report_path: Option<&Path>,
    tick_ms: u64,
) -> Result<()> {
    let config = SiteConfig::load(config_path)?;
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    let runtime_cfg = HeadlessRunConfig {
        width: config.viewport.width,
        height: config.viewport.height,
        tick_ms,
        ..HeadlessRunConfig::default()
    };

    tracing::info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        "running scenario"
    );
    let outcome = run_loaded_scenario(&config, &scenario, runtime_cfg)?;
    let report = outcome.report();

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
        tracing::info!(path = %path.display(), "report written");
    }

    if outcome.is_failed() {
        bail!(
            "scenario failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }
    Ok(())
}

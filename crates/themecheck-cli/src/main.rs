//! themecheck CLI - mobile theme smoke test for the maum-baedal web app
//!
//! Usage:
//!   themecheck                         Check http://localhost:3000 in test mode
//!   themecheck --base-url <URL>        Check another origin
//!   themecheck --json report.json      Also write the report as JSON
//!   themecheck --strict                Exit 1 unless every check passed

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use themecheck_browser::run_verification;
use themecheck_core::RunConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "themecheck")]
#[command(author, version, about = "Verify the violet gradient theme in a headless browser")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file (defaults to ./themecheck.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Origin of the application under test
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Directory screenshots are written to
    #[arg(long, value_name = "DIR")]
    screenshot_dir: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Also write the report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Exit with status 1 when any check failed
    #[arg(long)]
    strict: bool,
}

impl Cli {
    /// Load the config file and apply flag overrides
    fn resolve_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RunConfig::load_or_default(&std::env::current_dir()?)
                .context("Failed to load themecheck.toml")?,
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(dir) = &self.screenshot_dir {
            config.screenshot_dir = dir.clone();
        }
        if self.headed {
            config.browser.headless = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.resolve_config()?;
    info!("Checking {} (test mode: {})", config.base_url, config.test_mode);

    println!("🚀 Starting maum-baedal UI verification...");

    let report = run_verification(&config)
        .await
        .context("Failed to start the browser")?;
    let all_passed = report.print();

    if let Some(path) = &cli.json {
        report
            .write_json(path)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if cli.strict && !all_passed {
        std::process::exit(1);
    }

    Ok(())
}

use anyhow::{Context, Result};
use center_common::{Locale, observability::init_logging};
use center_config::{CenterConfig, CenterConfigLoader, default_config_path};
use center_core::{Dataset, seed::seed_dataset};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tether::Tether;
mod tether;

/// Terminal dashboard for warranty claims and technical-support tickets.
#[derive(Parser, Debug)]
#[command(name = "service-center", version, about)]
struct Cli {
    /// Configuration file; `<config dir>/service-center/center.yaml` is used when present
    #[arg(short, long, env = "CENTER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interface language (ar, en)
    #[arg(short, long)]
    locale: Option<Locale>,

    /// YAML or JSON records file to show instead of the built-in sample data
    #[arg(short, long, value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Print the built-in sample data as YAML and exit
    #[arg(long)]
    dump_seed: bool,
}

/// Defaults < config file < `CENTER__*` env < command line.
fn load_config(cli: &Cli) -> Result<CenterConfig> {
    let loader = match (&cli.config, default_config_path()) {
        (Some(path), _) => CenterConfigLoader::new().with_file(path),
        (None, Some(path)) => CenterConfigLoader::new().with_optional_file(path),
        (None, None) => CenterConfigLoader::new(),
    };
    let cfg = loader.load().context("failed to load configuration")?;
    Ok(apply_cli(cfg, cli))
}

fn apply_cli(mut cfg: CenterConfig, cli: &Cli) -> CenterConfig {
    if let Some(locale) = cli.locale {
        cfg.locale = locale;
    }
    if let Some(path) = &cli.dataset {
        cfg.dataset.path = Some(path.clone());
    }
    cfg
}

fn load_dataset(cfg: &CenterConfig) -> Result<Dataset> {
    match &cfg.dataset.path {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display())),
        None => {
            tracing::info!("no dataset configured; using built-in sample data");
            Ok(seed_dataset(Utc::now()))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.dump_seed {
        print!("{}", seed_dataset(Utc::now()).to_yaml()?);
        return Ok(());
    }

    // 1) Config, then logging from its `logging` section
    let cfg = load_config(&cli)?;
    let log_path = init_logging(cfg.logging.to_log_config())?;

    // 2) Records
    let dataset = load_dataset(&cfg)?;
    tracing::info!(
        claims = dataset.claims.len(),
        tickets = dataset.tickets.len(),
        locale = %cfg.locale,
        "dashboard starting"
    );

    // 3) Actors; returns once the dashboard quits or CTRL-C arrives
    let result = Tether::build(&cfg, dataset)?.run().await;
    if let Err(e) = &result {
        tracing::error!(error = ?e, "dashboard stopped with an error");
        eprintln!("see {} for details", log_path.display());
    }
    result
}

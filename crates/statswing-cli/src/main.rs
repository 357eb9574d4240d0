// StatSwing command-line entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout carries only results)
// 2. Parse arguments
// 3. Load config (copying defaults on first run unless --data is given)
// 4. Load the player data CSV
// 5. Run one query and print the result

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use statswing_cli::cli::Cli;
use statswing_cli::{commands, report};
use statswing_core::config::{self, CompareConfig, Config, DataConfig};
use statswing_core::{Dataset, Labels, QueryEngine};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Parse arguments
    let cli = Cli::parse();

    // 3. Load config. An explicit --data path makes the config file optional
    //    and skips copying defaults into config/.
    let config = match (config::load_config(cli.data.is_none()), &cli.data) {
        (Ok(config), _) => config,
        (Err(e), Some(path)) => {
            warn!("Config unavailable ({}); using defaults with --data", e);
            Config {
                data: DataConfig {
                    player_data: path.display().to_string(),
                },
                compare: CompareConfig::default(),
            }
        }
        (Err(e), None) => return Err(e).context("failed to load configuration"),
    };

    // 4. Load the dataset
    let labels = Labels::standard();
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.player_data));
    let dataset = Dataset::load(&data_path, &labels.stats)
        .with_context(|| format!("failed to load player data from {}", data_path.display()))?;
    if dataset.is_empty() {
        warn!("{} contains no usable rows", data_path.display());
    }
    info!("Dataset ready: {} rows", dataset.len());

    // 5. Query and print
    let engine = QueryEngine::new(&dataset, &labels);
    let output = commands::execute(&cli.command, &engine, &config.compare.stats);
    let rendered = if cli.json {
        report::render_json(&output).context("failed to serialize output")?
    } else {
        report::render_text(&output)
    };
    println!("{rendered}");

    Ok(())
}

/// Initialize tracing on stderr. `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("statswing_cli=warn,statswing_core=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

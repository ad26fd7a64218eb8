use anyhow::{Context, Result};
use application::Controller;
use catalog::{FileStorage, ProductStore};
use clap::Parser;
use cli::{Input, Shell};
use common::{init_structured_logging, AppConfig, LoggingConfig};
use console::style;
use llm::ContentClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "product-ai")]
#[command(about = "AI-assisted manager for a digital product catalog")]
#[command(version)]
struct Cli {
    /// Directory holding the catalog file (overrides CATALOG_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Write JSON log lines to stderr (overrides LOG_JSON)
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Nothing is rendered without a usable configuration
    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", style("Configuration error:").red().bold());
            std::process::exit(1);
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    if cli.log_json {
        config = config.with_log_json(true);
    }

    init_structured_logging(LoggingConfig::from_app_config(&config))?;
    info!(data_dir = %config.data_dir.display(), "Starting product-ai");

    let storage = FileStorage::new(&config.data_dir);
    let store = ProductStore::with_key(storage, config.storage_key.clone());
    let client = ContentClient::from_config(&config).context("Failed to create AI client")?;

    let mut controller = Controller::new(store, Arc::new(client));
    controller.load();

    println!(
        "{} {}",
        style("Product AI Manager").cyan().bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!();

    Shell::new(controller, Input::stdin()).run().await?;
    Ok(())
}

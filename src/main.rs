use std::path::PathBuf;
use std::sync::Arc;

mod catalog;
mod config;
mod db;
mod error;
mod models;
mod password;
mod rules;
mod server;
mod tracker;

use config::Config;
use db::Repository;
use error::Result;
use tracker::Tracker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG overrides the info default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    // Check for --import flag
    let import_path = if args.len() >= 3 && args[1] == "--import" {
        Some(PathBuf::from(&args[2]))
    } else {
        None
    };

    let repository = Repository::new(&config.db_path).await?;
    tracing::info!("Using database {}", config.db_path);

    // If import path provided, import the catalog and exit
    if let Some(path) = import_path {
        let summary = catalog::import_catalog_file(&repository, &path).await?;
        println!(
            "Imported {} departments, {} subjects and {} content items from {:?}",
            summary.departments, summary.subjects, summary.contents, path
        );
        return Ok(());
    }

    let tracker = Arc::new(Tracker::new(repository));
    server::serve(tracker, &config.bind_address).await
}

//! itemsync
//!
//! Reconciles the items declared in a JSON manifest against a Zabbix server.
//!
//! Usage:
//!   itemsync --url https://zabbix/api_jsonrpc.php --token $TOKEN apply items.json
//!
//! Connection settings fall back to ZABBIX_URL, ZABBIX_TOKEN, ZABBIX_USER and
//! ZABBIX_PASS.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use itemsync_cli::{ConnectionArgs, DEFAULT_CONCURRENCY, Manifest, Operation};
use itemsync_client::{ClientConfig, ItemApi, ZabbixClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "itemsync")]
#[command(about = "Reconcile declared Zabbix items and item prototypes with a server")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or update every item in the manifest
    Apply {
        manifest: PathBuf,

        /// Records processed at once
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Re-read every created item from the server
    Refresh { manifest: PathBuf },
    /// Delete every created item
    Destroy { manifest: PathBuf },
    /// Print the server's API version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = args.connection.client_config();

    match args.command {
        Command::Version => {
            let client = ZabbixClient::new(config)?;
            let version = client
                .refresh_version()
                .await
                .context("Failed to query API version")?;
            println!("{version}");
            Ok(())
        }
        Command::Apply {
            manifest,
            concurrency,
        } => execute(&manifest, config, Operation::Apply, concurrency).await,
        Command::Refresh { manifest } => {
            execute(&manifest, config, Operation::Refresh, DEFAULT_CONCURRENCY).await
        }
        Command::Destroy { manifest } => {
            execute(&manifest, config, Operation::Destroy, DEFAULT_CONCURRENCY).await
        }
    }
}

async fn execute(
    path: &Path,
    config: ClientConfig,
    operation: Operation,
    concurrency: usize,
) -> Result<()> {
    let mut manifest = Manifest::load(path)?;
    if operation == Operation::Apply {
        manifest.validate()?;
    }

    let client = ZabbixClient::connect(config)
        .await
        .context("Failed to connect to Zabbix")?;
    let api: Arc<dyn ItemApi> = Arc::new(client);

    info!(
        "{:?} {} items from {}",
        operation,
        manifest.items.len(),
        path.display()
    );
    let summary = itemsync_cli::run(&mut manifest, api, operation, concurrency).await;

    manifest.save(path)?;
    info!("{}", summary);

    if !summary.is_success() {
        bail!("{} of {} items failed", summary.failed, manifest.items.len());
    }
    Ok(())
}

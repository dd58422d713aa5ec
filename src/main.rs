//! Essence Store CLI
//!
//! Backup and inspection tooling around the local database.
//!
//! ## Usage
//!
//! ```bash
//! # Write a full backup snapshot into the current directory
//! essence-store export
//!
//! # Write it somewhere else
//! essence-store export --output ~/backups
//!
//! # Restore a snapshot, overwriting all local data
//! essence-store import ~/backups/Essence_Full_Backup_2026-08-26.json --force
//!
//! # Show what each collection currently holds
//! essence-store stats
//!
//! # Point at a non-default data directory
//! essence-store --data-dir /tmp/essence stats
//! ```

use clap::{Parser, Subcommand};
use essence_store::{Collection, Config, EssenceStore};
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "essence-store")]
#[command(about = "Local-first store for Essence life-management data")]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory
    #[arg(long, env = "ESSENCE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Legacy key-value directory consulted on first run
    #[arg(long)]
    legacy_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a full backup snapshot
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
    /// Restore a backup snapshot, overwriting all local data
    Import {
        /// Snapshot file to restore
        file: PathBuf,

        /// Confirm the irreversible overwrite
        #[arg(long)]
        force: bool,
    },
    /// Show per-collection entry counts
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("essence_store=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        Config::load(config_path)?
    } else {
        Config::default()
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = args.legacy_dir {
        config.legacy_dir = Some(dir);
    }

    let store = EssenceStore::open(&config)?;

    match args.command {
        Command::Export { output } => {
            tokio::fs::create_dir_all(&output).await?;
            let path = store.write_snapshot_file(&output).await?;
            println!("{}", path.display());
        }
        Command::Import { file, force } => {
            if !force {
                anyhow::bail!(
                    "importing overwrites ALL local data irreversibly; re-run with --force to confirm"
                );
            }
            let snapshot = store.restore_snapshot_file(&file).await?;
            info!(export_date = %snapshot.export_date, "Import complete");
        }
        Command::Stats => {
            for collection in Collection::ALL {
                let summary = match store.raw_value(collection)? {
                    None => "absent".to_string(),
                    Some(Value::Null) => "null".to_string(),
                    Some(Value::Array(items)) => format!("{} items", items.len()),
                    Some(Value::Object(map)) => format!("{} entries", map.len()),
                    Some(_) => "1 value".to_string(),
                };
                println!("{:<24} {}", collection.key(), summary);
            }
        }
    }

    Ok(())
}

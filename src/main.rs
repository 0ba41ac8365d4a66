use anyhow::Context;
use clap::{Parser, Subcommand};
use erp_store::{backup, export, Config, StorageProvider, Store};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "erp-store")]
#[command(author, version, about = "ERP data store administration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record count per collection
    Stats,
    /// Write a collection as CSV
    Export {
        /// Collection name, e.g. projects
        collection: String,
        /// Output file (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Write a snapshot of every collection
    Backup {
        /// Snapshot file to create
        file: PathBuf,
    },
    /// Load a snapshot, keeping record ids
    Restore {
        /// Snapshot file to read
        file: PathBuf,
    },
}

/// `RUST_LOG` directives when set and valid, otherwise `info`.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("configuration error")?;
    let provider = StorageProvider::new(config);
    let store = provider
        .get_db()
        .await
        .context("failed to open the store")?;

    match cli.command {
        Commands::Stats => {
            for collection in store.collections().await? {
                let count = store.scan(&collection).await?.len();
                println!("{:<28} {:>8}", collection, count);
            }
        }
        Commands::Export { collection, output } => {
            let csv = export::export_collection(store.as_ref(), &collection).await?;
            match output {
                Some(path) => std::fs::write(&path, csv)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", csv),
            }
        }
        Commands::Backup { file } => {
            let snapshot = backup::take_snapshot(store.as_ref()).await?;
            let bytes = backup::encode(&snapshot)?;
            std::fs::write(&file, bytes)
                .with_context(|| format!("failed to write {}", file.display()))?;
            tracing::info!(
                path = %file.display(),
                documents = snapshot.document_count(),
                "Backup written"
            );
        }
        Commands::Restore { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let snapshot = backup::decode(&bytes)?;
            let summary = backup::restore(store.as_ref(), &snapshot).await?;
            println!(
                "Restored {} documents in {} collections",
                summary.documents, summary.collections
            );
        }
    }

    Ok(())
}

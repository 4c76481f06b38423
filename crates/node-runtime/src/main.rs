//! # Quantum-Ledger Node Runtime
//!
//! The main entry point for the Quantum-Ledger node.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG` filters, default `info`)
//! 2. Load configuration (from file/env)
//! 3. Build genesis state
//! 4. Run the startup batch, if one is configured
//! 5. Wait for Ctrl+C

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{load_config, GenesisBuilder, NodeRuntime, TransactionOutcome};
use shared_types::SignedTransaction;

fn read_batch(path: &Path) -> Result<Vec<SignedTransaction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse batch file {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Quantum-Ledger Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    // Load configuration
    let config = load_config().context("Failed to load configuration")?;

    // Build genesis state
    let genesis = GenesisBuilder::new(&config.genesis, &config.ledger)
        .build()
        .context("Failed to build genesis state")?;

    let runtime = NodeRuntime::new(config.ledger.clone(), genesis);

    match &config.runtime.batch_path {
        Some(path) => {
            let batch = read_batch(path)?;
            let outcomes = runtime.submit_batch(batch).await?;
            for outcome in &outcomes {
                match outcome {
                    TransactionOutcome::Handled(record) => info!(
                        transaction = %record.transaction_id,
                        status = %record.status,
                        fee = record.transaction_fee,
                        "handled"
                    ),
                    TransactionOutcome::Rejected {
                        transaction_id,
                        code,
                    } => warn!(transaction = %transaction_id, %code, "rejected at ingest"),
                    TransactionOutcome::Aborted(err) => warn!(error = %err, "aborted"),
                }
            }
        }
        None => info!("No startup batch configured (set QL_BATCH)"),
    }

    // Keep the node running
    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    info!(state_hash = %hex::encode(runtime.state_hash()), "Shutdown complete");
    Ok(())
}

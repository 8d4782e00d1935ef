//! Leave engine HTTP server.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;
use leave_engine::store::LeaveStore;

#[derive(Parser, Debug)]
#[command(name = "leave-engine", version)]
struct Args {
    /// Directory containing settings.yaml.
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,

    /// Listen address, e.g. 127.0.0.1:3000
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,

    /// Optional JSON snapshot of employees and records to start from.
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load(&args.config)?;
    let store = match &args.seed {
        Some(path) => {
            let seed = ConfigLoader::load_seed(path)?;
            LeaveStore::from_parts(seed.employees, seed.records)?
        }
        None => LeaveStore::new(),
    };
    tracing::info!(
        config = %args.config.display(),
        employees = store.headcount(),
        records = store.record_count(),
        max_concurrent_percentage = %config.capacity().max_concurrent_percentage,
        "working set loaded"
    );

    let app = create_router(AppState::new(config, store));

    tracing::info!(listen = %args.listen, "leave engine starting");
    axum::serve(tokio::net::TcpListener::bind(args.listen).await?, app).await?;
    Ok(())
}

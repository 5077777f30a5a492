use std::error::Error;
use std::process::exit;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use payroll_export::api::{AppState, create_router};
use payroll_export::config::ConfigLoader;
use payroll_export::export::PayrollExporter;
use payroll_export::tips::InMemoryTipSource;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the payroll YAML configuration.
    #[arg(long, default_value = "config/payroll.yaml")]
    config_path: String,
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = start(cli).await {
        error!("Error: {:#?}", e);
        exit(1);
    }
}

async fn start(cli: Cli) -> Result<(), Box<dyn Error>> {
    let loader = ConfigLoader::load(&cli.config_path)?;

    let tips = match loader.tip_seed_path() {
        Some(path) => InMemoryTipSource::load(path)?,
        None => InMemoryTipSource::new(),
    };

    let exporter = PayrollExporter::new(loader.config().clone(), tips);
    let router = create_router(AppState::new(exporter));

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    info!(address = %cli.bind, "Payroll export server listening");
    axum::serve(listener, router).await?;

    Ok(())
}

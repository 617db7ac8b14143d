use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use showreel::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting showreel v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}

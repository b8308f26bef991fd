use anyhow::{Context, Result};
use clap::Parser;

use divergence_meter::cli::Cli;
use divergence_meter::logging::init_tracing;
use divergence_meter::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = cli.load_config().context("failed to load configuration")?;
    cli.apply(&mut config);
    config
        .validate()
        .context("invalid configuration after applying command-line flags")?;

    let log_path = cli.log_path();
    init_tracing(&log_path)
        .with_context(|| format!("failed to open log file '{}'", log_path.display()))?;
    tracing::info!(
        mode = ?config.upstream.mode,
        seed = ?cli.seed,
        "divergence meter starting"
    );

    ui::run(config, cli.seed).await.context("terminal ui failed")?;

    tracing::info!("divergence meter stopped");
    Ok(())
}

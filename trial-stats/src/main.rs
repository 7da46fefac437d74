use anyhow::{Context, Result};
use clap::Parser;
use trial_stats::{build_report, Cli, Config};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for verbose output
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config and apply CLI overrides
    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_to_config(&mut config);
    config.validate()?;
    tracing::debug!(?config, "configuration resolved");

    let report = build_report(&cli.datafile, cli.mode(), &config)?;

    config
        .reporter()
        .report(&report)
        .context("Failed to write report")?;

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use em_cli::commands::{dump, episodes, labels, load, snapshot};
use em_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut out = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Dump { input }) => {
            let registry = load::registry(input)?;
            dump::run(&mut out, &registry)?;
        }
        Some(Commands::Labels {
            input,
            order,
            display,
        }) => {
            let mut registry = load::registry(input)?;
            labels::run(
                &mut out,
                &mut registry,
                order.unwrap_or(config.order),
                display.unwrap_or(config.display),
            )?;
        }
        Some(Commands::Episodes {
            input,
            intervals,
            dimension,
        }) => {
            let intervals = if intervals.is_empty() {
                config
                    .intervals()
                    .context("invalid intervals in configuration")?
            } else {
                intervals.clone()
            };
            let registry = load::registry(input)?;
            episodes::run(
                &mut out,
                &registry,
                &intervals,
                dimension.unwrap_or(config.dimension),
            )?;
        }
        Some(Commands::Snapshot { input }) => {
            let registry = load::registry(input)?;
            snapshot::run(&mut out, &registry)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

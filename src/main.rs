//! flashblock CLI - submit signed transaction batches to the Flashblock relay

use clap::Parser;
use flashblock_client::cli::{config, endpoints, submit, Cli, Commands};
use flashblock_client::random_tip_address;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::new(filter))
        .init();

    match &cli.command {
        Commands::Config { action } => config::handle(action, cli.config.as_deref()),
        Commands::Tip => {
            println!("{}", random_tip_address());
            Ok(())
        }
        Commands::Endpoints { action } => {
            let ctx = cli.load_context()?;
            endpoints::handle(action, ctx).await
        }
        Commands::Submit(args) => {
            let ctx = cli.load_context()?;
            submit::handle(args, ctx).await
        }
    }
}

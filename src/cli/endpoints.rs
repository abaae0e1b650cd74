//! Relay endpoint commands

use super::Context;
use crate::relay::{rank, SubmissionCoordinator};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum EndpointCommands {
    /// List configured endpoints in selection order
    List,

    /// Probe every endpoint and show health and latency
    Probe {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn handle(action: &EndpointCommands, ctx: Context) -> anyhow::Result<()> {
    match action {
        EndpointCommands::List => {
            println!("RELAY ENDPOINTS ({})\n", ctx.registry.len());
            for endpoint in ctx.registry.list() {
                println!("  {:<12} {}", endpoint.name(), endpoint.base_url());
            }
        }

        EndpointCommands::Probe { json } => {
            if !ctx.quiet {
                eprintln!(
                    "Probing {} endpoints (timeout {}ms)...",
                    ctx.registry.len(),
                    ctx.client.probe_timeout.as_millis()
                );
            }

            let coordinator = SubmissionCoordinator::new(ctx.registry, ctx.client)?;
            let results = coordinator.prober().probe_all().await;
            let best = rank(&results).map(|r| r.endpoint.name().to_string());

            if *json {
                let json = serde_json::json!({
                    "results": results,
                    "selected": best,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            } else {
                println!("{:<12} {:<8} {:>8}  {}", "NAME", "HEALTHY", "LATENCY", "STATUS");
                println!("{}", "─".repeat(40));
                for r in &results {
                    let marker = if best.as_deref() == Some(r.endpoint.name()) {
                        " *"
                    } else {
                        ""
                    };
                    println!(
                        "{:<12} {:<8} {:>6}ms  {}{}",
                        r.endpoint.name(),
                        if r.healthy { "yes" } else { "no" },
                        r.latency_ms,
                        r.status
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "error".to_string()),
                        marker
                    );
                }
            }
        }
    }

    Ok(())
}

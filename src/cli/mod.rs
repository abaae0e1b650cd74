//! CLI command modules
//!
//! Each subcommand has its own module with argument definitions and handlers.

pub mod config;
pub mod endpoints;
pub mod submit;

use crate::config::{ClientConfig, ConfigFile, EndpointConfig};
use crate::relay::EndpointRegistry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "flashblock")]
#[command(
    version,
    about = "Submit pre-signed transaction batches to the fastest Flashblock relay"
)]
#[command(after_help = r#"EXAMPLES:
    # Submit transactions.json to the fastest healthy endpoint
    AUTH_HEADER=your-token flashblock submit

    # Submit a specific file through the Frankfurt endpoint
    flashblock submit batch.json --prefer fra --auth your-token

    # Probe all endpoints and show latency
    flashblock endpoints probe

    # Add a private relay and skip London
    flashblock --endpoint private=http://10.0.0.5:8080 --exclude london endpoints list

ENVIRONMENT VARIABLES:
    AUTH_HEADER    Authorization header value for submissions

CONFIG FILE:
    Default: ~/.config/flashblock/config.toml
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Add or override an endpoint as NAME=URL (can be repeated)
    #[arg(long = "endpoint", action = clap::ArgAction::Append, global = true)]
    pub endpoints: Vec<String>,

    /// Exclude an endpoint by name (can be repeated)
    #[arg(long = "exclude", action = clap::ArgAction::Append, global = true)]
    pub exclude: Vec<String>,

    /// Probe timeout in milliseconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub probe_timeout_ms: Option<u64>,

    /// Submission timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Retries on 429/5xx responses
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a batch of signed transactions
    Submit(submit::SubmitArgs),

    /// List and probe relay endpoints
    Endpoints {
        #[command(subcommand)]
        action: endpoints::EndpointCommands,
    },

    /// Print a random tip address
    Tip,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

/// Settings resolved from the config file and global flags
pub struct Context {
    pub registry: EndpointRegistry,
    pub client: ClientConfig,
    pub config_file: Option<ConfigFile>,
    pub quiet: bool,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn load_context(&self) -> anyhow::Result<Context> {
        let config_file = match &self.config {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default()?,
        };

        let extra = self
            .endpoints
            .iter()
            .map(|pair| EndpointConfig::parse_pair(pair))
            .collect::<crate::Result<Vec<_>>>()?;
        let registry = EndpointRegistry::assemble(config_file.as_ref(), &extra, &self.exclude)?;

        let mut client = match &config_file {
            Some(cf) => cf.client_config()?,
            None => ClientConfig::default(),
        };
        if let Some(ms) = self.probe_timeout_ms {
            client = client.with_probe_timeout(Duration::from_millis(ms));
        }
        if let Some(secs) = self.timeout {
            client = client.with_submit_timeout(Duration::from_secs(secs));
        }
        if let Some(retries) = self.retries {
            client = client.with_max_retries(retries);
        }
        client.validate()?;

        Ok(Context {
            registry,
            client,
            config_file,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "flashblock",
            "submit",
            "batch.json",
            "--prefer",
            "fra",
            "--retries",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.retries, Some(5));
        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.file, PathBuf::from("batch.json"));
                assert_eq!(args.prefer.as_deref(), Some("fra"));
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn test_load_context_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[settings]\nprobe_timeout_ms = 900\n\n[disabled_endpoints]\nnames = [\"ams\"]\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "flashblock",
            "--config",
            path.to_str().unwrap(),
            "--endpoint",
            "dev=http://127.0.0.1:7000",
            "--exclude",
            "ny",
            "--timeout",
            "3",
            "endpoints",
            "list",
        ])
        .unwrap();

        let ctx = cli.load_context().unwrap();
        assert_eq!(ctx.client.probe_timeout, Duration::from_millis(900));
        assert_eq!(ctx.client.submit_timeout, Duration::from_secs(3));
        assert!(ctx.registry.find("ams").is_none());
        assert!(ctx.registry.find("ny").is_none());
        assert_eq!(
            ctx.registry.find("dev").unwrap().base_url(),
            "http://127.0.0.1:7000"
        );
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        for flag in ["--timeout", "--probe-timeout-ms"] {
            let parsed = Cli::try_parse_from(["flashblock", flag, "0", "endpoints", "list"]);
            assert!(parsed.is_err(), "{} 0 was accepted", flag);
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ntimeout_seconds = 0\n").unwrap();
        let cli = Cli::try_parse_from([
            "flashblock",
            "--config",
            path.to_str().unwrap(),
            "endpoints",
            "list",
        ])
        .unwrap();
        assert!(cli.load_context().is_err());
    }
}

//! Batch submission command

use super::Context;
use crate::error::{ConfigError, Result};
use crate::relay::{random_tip_address, SubmissionCoordinator, SubmissionOutcome};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct SubmitArgs {
    /// JSON file holding an array of encoded transactions
    #[arg(default_value = "transactions.json")]
    pub file: PathBuf,

    /// Use this endpoint instead of probing (falls back to probing if unknown)
    #[arg(long, short)]
    pub prefer: Option<String>,

    /// Authorization header value
    #[arg(long, env = "AUTH_HEADER", hide_env_values = true)]
    pub auth: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Read a JSON array of transaction strings, e.g. `["base64_tx1", "base64_tx2"]`
pub fn load_transactions(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::InvalidTransactions(format!("failed to read '{}': {}", path.display(), e))
    })?;

    let txs: Vec<String> = serde_json::from_str(&content).map_err(|e| {
        ConfigError::InvalidTransactions(format!("invalid JSON in '{}': {}", path.display(), e))
    })?;

    if txs.is_empty() {
        return Err(ConfigError::InvalidTransactions(format!(
            "no transactions found in '{}'",
            path.display()
        ))
        .into());
    }

    Ok(txs)
}

/// Credential from flag/env first, then the config file
fn resolve_credential(args: &SubmitArgs, ctx: &Context) -> Result<String> {
    args.auth
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| ctx.config_file.as_ref().and_then(|cf| cf.credential()))
        .ok_or_else(|| ConfigError::MissingCredential.into())
}

pub async fn handle(args: &SubmitArgs, ctx: Context) -> anyhow::Result<()> {
    let credential = resolve_credential(args, &ctx)?;
    let transactions = load_transactions(&args.file)?;

    if !ctx.quiet {
        eprintln!(
            "Submitting {} transaction(s) across {} endpoint(s)...",
            transactions.len(),
            ctx.registry.len()
        );
    }

    let coordinator = SubmissionCoordinator::new(ctx.registry, ctx.client)?;
    let outcome = coordinator
        .submit(&credential, &transactions, args.prefer.as_deref())
        .await?;
    let tip = random_tip_address();

    if args.json {
        let json = serde_json::json!({
            "outcome": outcome,
            "tip_address": tip,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_outcome(&outcome, tip);
    }

    Ok(())
}

fn print_outcome(outcome: &SubmissionOutcome, tip: &str) {
    println!(
        "status: {}, success: {}, code: {}, message: {}",
        outcome.http_status, outcome.succeeded, outcome.response_code, outcome.message
    );
    println!(
        "endpoint: {}, durationMs: {}, attempts: {}{}",
        outcome.endpoint_used,
        outcome.duration_ms,
        outcome.attempts,
        if outcome.failed_over {
            " (failover)"
        } else {
            ""
        }
    );
    println!("signatures: {:?}", outcome.signatures);
    println!("tipAddress: {}", tip);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::relay::EndpointRegistry;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_transactions() {
        let dir = tempfile::tempdir().unwrap();

        let ok = write(&dir, "ok.json", r#"["tx1", "tx2"]"#);
        assert_eq!(load_transactions(&ok).unwrap(), vec!["tx1", "tx2"]);

        let empty = write(&dir, "empty.json", "[]");
        let err = load_transactions(&empty).unwrap_err().to_string();
        assert!(err.contains("no transactions found"));

        let bad = write(&dir, "bad.json", r#"{"transactions": []}"#);
        let err = load_transactions(&bad).unwrap_err().to_string();
        assert!(err.contains("invalid JSON"));

        let missing = dir.path().join("missing.json");
        let err = load_transactions(&missing).unwrap_err().to_string();
        assert!(err.contains("failed to read"));
    }

    #[test]
    fn test_resolve_credential() {
        let ctx = Context {
            registry: EndpointRegistry::with_defaults().unwrap(),
            client: ClientConfig::default(),
            config_file: None,
            quiet: true,
        };
        let mut args = SubmitArgs {
            file: PathBuf::from("transactions.json"),
            prefer: None,
            auth: Some("  token  ".to_string()),
            json: false,
        };
        assert_eq!(resolve_credential(&args, &ctx).unwrap(), "token");

        args.auth = Some("   ".to_string());
        assert!(resolve_credential(&args, &ctx).is_err());

        let mut file = crate::config::ConfigFile::default();
        file.auth_header = Some("from-file".to_string());
        let ctx = Context {
            config_file: Some(file),
            ..ctx
        };
        assert_eq!(resolve_credential(&args, &ctx).unwrap(), "from-file");
    }
}

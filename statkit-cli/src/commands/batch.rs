//! Batch command - send several calls as one bulk request.

use anyhow::{Context, Result};
use clap::Args;
use statkit_core::PendingCall;
use statkit_modules::NamespaceRegistry;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// JSON file holding `[{"method": ..., "params": {...}}, ...]`, or `-`
    /// for stdin.
    pub file: String,
}

/// Parses a list of calls.
pub fn parse_calls(input: &str) -> Result<Vec<PendingCall>> {
    let calls: Vec<PendingCall> =
        serde_json::from_str(input).context("Batch input must be a JSON array of calls")?;
    Ok(calls)
}

async fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        Ok(input)
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read {file}"))
    }
}

/// Runs the batch command.
pub async fn run(args: &BatchArgs, cli: &Cli) -> Result<()> {
    let calls = parse_calls(&read_input(&args.file).await?)?;
    for call in &calls {
        if !NamespaceRegistry::knows_method(call.method()) {
            warn!(method = %call.method(), "Method not in the namespace registry, sending anyway");
        }
    }

    let client = cli.client().await?;
    let batch = client.batch();
    for call in calls {
        batch.push(call);
    }
    info!(calls = batch.len(), "Sending batch");

    let results = batch.flush().await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_batch(&results));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_batch(&results)?);
        }
    }

    Ok(())
}

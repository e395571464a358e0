//! Call command - invoke one remote method.

use anyhow::{Result, bail};
use clap::Args;
use statkit_core::{ParamValue, Params};
use statkit_modules::NamespaceRegistry;
use tracing::{info, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the call command.
#[derive(Args)]
pub struct CallArgs {
    /// Qualified method name, e.g. `VisitsSummary.get`.
    pub method: String,

    /// Parameters as `key=value`. Repeat a key to send an array.
    pub params: Vec<String>,
}

/// Parses `key=value` arguments. A key given more than once becomes a list
/// in the order given.
pub fn parse_params(args: &[String]) -> Result<Params> {
    let mut params = Params::new();

    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Invalid parameter '{arg}': expected key=value");
        };
        if key.is_empty() {
            bail!("Invalid parameter '{arg}': empty key");
        }

        let value = ParamValue::from(value);
        let merged = match params.remove(key) {
            None => value,
            Some(ParamValue::List(mut items)) => {
                items.push(value);
                ParamValue::List(items)
            }
            Some(previous) => ParamValue::List(vec![previous, value]),
        };
        params.insert(key, merged);
    }

    Ok(params)
}

/// Runs the call command.
pub async fn run(args: &CallArgs, cli: &Cli) -> Result<()> {
    if !args.method.contains('.') {
        bail!(
            "Invalid method '{}': expected Namespace.method",
            args.method
        );
    }
    if !NamespaceRegistry::knows_method(&args.method) {
        warn!(method = %args.method, "Method not in the namespace registry, sending anyway");
    }

    let params = parse_params(&args.params)?;
    info!(method = %args.method, params = params.len(), "Calling");

    let client = cli.client().await?;
    let payload = client.call(&args.method, params).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_payload(&payload));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_payload(&payload)?);
        }
    }

    Ok(())
}

//! Namespaces command - list API namespaces.

use anyhow::{Result, anyhow};
use clap::Args;
use statkit_modules::NamespaceRegistry;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the namespaces command.
#[derive(Args)]
pub struct NamespacesArgs {
    /// Show the methods of one namespace (remote name, CLI name or alias).
    pub name: Option<String>,
}

/// Runs the namespaces command.
pub fn run(args: &NamespacesArgs, cli: &Cli) -> Result<()> {
    match &args.name {
        Some(name) => show_namespace(name, cli),
        None => list_namespaces(cli),
    }
}

fn list_namespaces(cli: &Cli) -> Result<()> {
    info!("Listing namespaces");
    let namespaces = NamespaceRegistry::all();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_namespaces_header());
            println!("{}", "─".repeat(70));
            for desc in namespaces {
                println!("{}", formatter.format_namespace_line(desc));
            }

            println!();
            println!(
                "Total: {} namespaces ({} methods)",
                namespaces.len(),
                namespaces.iter().map(|d| d.methods.len()).sum::<usize>()
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_namespaces(namespaces)?);
        }
    }

    Ok(())
}

fn show_namespace(name: &str, cli: &Cli) -> Result<()> {
    let desc = NamespaceRegistry::lookup(name).ok_or_else(|| anyhow!("Unknown namespace: {name}"))?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_namespace_detail(desc));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_namespaces(std::slice::from_ref(desc))?);
        }
    }

    Ok(())
}

//! Config command - manage profiles and credentials.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde::Serialize;
use statkit_store::{Config, default_config_dir, default_config_path, keychain};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the resolved settings of the selected profile.
    Show,

    /// Show configuration paths.
    Path,

    /// Set the endpoint URL of the selected profile.
    SetUrl {
        /// Endpoint, e.g. `https://stats.example.com/`.
        url: String,
    },

    /// Set the site used when a call does not name one.
    SetSite {
        /// Site ID.
        site: u32,
    },

    /// Store the API token in the system keychain.
    SetToken {
        /// Token; read from stdin when omitted.
        token: Option<String>,
    },

    /// Remove the stored API token.
    DeleteToken,
}

/// Resolved profile as shown by `config show`. Never carries the token.
#[derive(Debug, Serialize)]
struct ProfileView {
    profile: String,
    endpoint: String,
    default_site: Option<u32>,
    format: String,
    language: Option<String>,
    timeout_secs: u64,
    secure: bool,
    token_source: String,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::SetUrl { url } => set_url(url, cli).await,
        ConfigAction::SetSite { site } => set_site(*site, cli).await,
        ConfigAction::SetToken { token } => set_token(token.as_deref(), cli).await,
        ConfigAction::DeleteToken => delete_token(cli).await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let config = Config::load().await?;
    let resolved = statkit_store::resolve(&config, cli.profile.as_deref(), &cli.overrides())?;
    let client = &resolved.client;

    let view = ProfileView {
        profile: resolved.name.clone(),
        endpoint: client.endpoint.to_string(),
        default_site: client.default_site,
        format: client.format.to_string(),
        language: client.language.clone(),
        timeout_secs: client.timeout.as_secs(),
        secure: client.secure,
        token_source: resolved.token_source.to_string(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("statkit Configuration ({})", view.profile);
            println!("{}", "─".repeat(40));
            println!();
            println!("Endpoint:      {}", view.endpoint);
            println!(
                "Default site:  {}",
                view.default_site
                    .map_or_else(|| "-".to_string(), |s| s.to_string())
            );
            println!("Format:        {}", view.format);
            println!("Language:      {}", view.language.as_deref().unwrap_or("-"));
            println!("Timeout:       {}s", view.timeout_secs);
            println!("Method:        {}", if view.secure { "POST" } else { "GET" });
            println!("Token:         {}", view.token_source);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&view)?);
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let config_path = default_config_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:  {}", config_dir.display());
            println!("Config file: {}", config_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "config_file": config_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_url(url: &str, cli: &Cli) -> Result<()> {
    let mut config = Config::load().await?;
    config.set_url(cli.profile.as_deref(), url)?;
    config.save().await?;

    let profile = config.profile_name(cli.profile.as_deref());
    info!(profile, url, "Endpoint updated");
    println!("Endpoint for '{profile}' set to: {url}");

    Ok(())
}

async fn set_site(site: u32, cli: &Cli) -> Result<()> {
    let mut config = Config::load().await?;
    config.set_default_site(cli.profile.as_deref(), site);
    config.save().await?;

    let profile = config.profile_name(cli.profile.as_deref());
    info!(profile, site, "Default site updated");
    println!("Default site for '{profile}' set to: {site}");

    Ok(())
}

async fn set_token(token: Option<&str>, cli: &Cli) -> Result<()> {
    let token = match token {
        Some(token) => token.trim().to_string(),
        None => read_token_line().await?,
    };
    if token.is_empty() {
        bail!("Empty token");
    }

    let config = Config::load().await?;
    let profile = config.profile_name(cli.profile.as_deref());
    keychain::store_token(profile, &token)?;

    info!(profile, "Token stored");
    println!("Token for '{profile}' stored in the keychain");

    Ok(())
}

async fn read_token_line() -> Result<String> {
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprintln!("Paste token and press Enter:");
    }

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

async fn delete_token(cli: &Cli) -> Result<()> {
    let config = Config::load().await?;
    let profile = config.profile_name(cli.profile.as_deref());
    keychain::delete_token(profile)?;

    info!(profile, "Token deleted");
    println!("Token for '{profile}' removed");

    Ok(())
}

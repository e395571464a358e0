// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! statkit CLI - query a Matomo-compatible reporting API from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Point the default profile at a server and store a token
//! statkit config set-url https://stats.example.com/
//! statkit config set-token
//!
//! # Any remote method, parameters as key=value
//! statkit call VisitsSummary.get idSite=1 period=day date=today
//!
//! # Repeat a key to send an array
//! statkit call SitesManager.addSiteAliasUrls idSite=1 urls=https://a.example.com urls=https://b.example.com
//!
//! # Several calls in one request
//! statkit batch calls.json
//!
//! # Visits, actions and referrers in one round trip
//! statkit summary --site 1 --period week --date yesterday
//!
//! # Known namespaces and their methods
//! statkit namespaces goals
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use statkit_core::ResponseFormat;
use statkit_fetch::{Client, FetchError};
use statkit_store::{Config, Overrides, StoreError};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{batch, call, config, namespaces, summary};

// ============================================================================
// CLI Definition
// ============================================================================

/// statkit CLI - analytics reporting API client.
#[derive(Parser)]
#[command(name = "statkit")]
#[command(about = "Query a Matomo-compatible analytics reporting API")]
#[command(long_about = r#"
statkit sends calls to a Matomo-compatible reporting API, either one at a
time or bundled into a single bulk request.

Connection settings come from, highest precedence first:
  • --url / --token flags
  • STATKIT_URL / STATKIT_TOKEN_AUTH environment variables
  • the selected profile (token from its token_env variable or the keychain)

Examples:
  statkit call API.getMatomoVersion
  statkit call Actions.getPageUrls idSite=1 period=month date=today
  statkit summary --site 1
  statkit --format json --pretty batch calls.json
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Profile to use instead of the configured default.
    #[arg(long, short = 'p', global = true)]
    pub profile: Option<String>,

    /// Endpoint URL, overriding the profile.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token, overriding the profile and keychain.
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Response format requested from the server (json, xml, csv, tsv, html, rss, original).
    #[arg(long, global = true)]
    pub api_format: Option<ResponseFormat>,

    /// Send parameters in the query string instead of a POST body.
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Call one remote method.
    #[command(visible_alias = "c")]
    Call(call::CallArgs),

    /// Send several calls from a JSON file as one bulk request.
    #[command(visible_alias = "b")]
    Batch(batch::BatchArgs),

    /// Visits, actions and referrer overview for one site.
    #[command(visible_alias = "s")]
    Summary(summary::SummaryArgs),

    /// List API namespaces and their methods.
    #[command(visible_alias = "ns")]
    Namespaces(namespaces::NamespacesArgs),

    /// Manage profiles and credentials.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The remote API reported an error.
    ApiError = 2,
    /// The request failed in transit or returned something unreadable.
    TransportError = 3,
    /// No usable configuration.
    ConfigError = 4,
}

impl ExitCode {
    /// Picks the exit code for an error.
    fn for_error(error: &anyhow::Error) -> Self {
        if let Some(fetch) = error.downcast_ref::<FetchError>() {
            if fetch.is_api() {
                return Self::ApiError;
            }
            if fetch.is_transport() {
                return Self::TransportError;
            }
        }
        if let Some(store) = error.downcast_ref::<StoreError>() {
            return match store {
                StoreError::Fetch(_) | StoreError::Config(_) => Self::ConfigError,
                e if e.is_unconfigured() => Self::ConfigError,
                _ => Self::Error,
            };
        }
        Self::Error
    }
}

impl Cli {
    /// Per-invocation connection overrides.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            token: self.token.clone(),
            format: self.api_format,
            insecure: self.insecure,
        }
    }

    /// Builds a client for the selected profile.
    pub async fn client(&self) -> Result<Client> {
        let config = Config::load().await?;
        let resolved = statkit_store::resolve(&config, self.profile.as_deref(), &self.overrides())?;
        Ok(Client::new(resolved.client)?)
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("statkit=debug,info")
        } else {
            EnvFilter::new("statkit=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Call(args) => call::run(args, &cli).await,
        Commands::Batch(args) => batch::run(args, &cli).await,
        Commands::Summary(args) => summary::run(args, &cli).await,
        Commands::Namespaces(args) => namespaces::run(args, &cli),
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let cli = Cli::try_parse_from([
            "statkit",
            "--format",
            "json",
            "call",
            "VisitsSummary.get",
            "idSite=1",
            "period=day",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Call(args) = cli.command else {
            panic!("expected call");
        };
        assert_eq!(args.method, "VisitsSummary.get");
        assert_eq!(args.params, vec!["idSite=1", "period=day"]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "statkit",
            "summary",
            "--site",
            "3",
            "--profile",
            "staging",
            "--insecure",
            "--api-format",
            "xml",
        ])
        .unwrap();

        assert_eq!(cli.profile.as_deref(), Some("staging"));
        let overrides = cli.overrides();
        assert!(overrides.insecure);
        assert_eq!(overrides.format, Some(ResponseFormat::Xml));
    }

    #[test]
    fn test_unknown_api_format_rejected() {
        assert!(Cli::try_parse_from(["statkit", "--api-format", "yaml", "namespaces"]).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let api = anyhow::Error::new(FetchError::api("Invalid idSite"));
        assert!(matches!(ExitCode::for_error(&api), ExitCode::ApiError));

        let timeout = anyhow::Error::new(FetchError::Timeout(std::time::Duration::from_secs(1)));
        assert!(matches!(ExitCode::for_error(&timeout), ExitCode::TransportError));

        let missing = anyhow::Error::new(StoreError::MissingEndpoint("default".into()));
        assert!(matches!(ExitCode::for_error(&missing), ExitCode::ConfigError));

        let other = anyhow::anyhow!("bad input");
        assert!(matches!(ExitCode::for_error(&other), ExitCode::Error));
    }
}

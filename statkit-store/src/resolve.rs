//! Turning a stored profile into a [`ClientConfig`].
//!
//! Sources, highest precedence first:
//!
//! | Setting | Sources |
//! |---------|---------|
//! | Endpoint | override, `STATKIT_URL`, profile `url` |
//! | Token | override, `STATKIT_TOKEN_AUTH`, profile `token_env` variable, keychain |
//! | Format | override, profile `format` |
//! | Secure | `insecure` override, profile `secure` |
//!
//! Environment and keychain access are passed in as lookup closures so the
//! rules can be tested without touching process state.

use std::fmt;
use std::time::Duration;

use statkit_core::ResponseFormat;
use statkit_fetch::ClientConfig;
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::keychain;

/// Environment variable overriding the endpoint.
pub const ENV_URL: &str = "STATKIT_URL";

/// Environment variable overriding the token.
pub const ENV_TOKEN: &str = "STATKIT_TOKEN_AUTH";

// ============================================================================
// Overrides
// ============================================================================

/// Per-invocation settings that beat everything stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Endpoint.
    pub url: Option<String>,
    /// Token.
    pub token: Option<String>,
    /// Response format.
    pub format: Option<ResponseFormat>,
    /// Send parameters in the query string.
    pub insecure: bool,
}

// ============================================================================
// Token Source
// ============================================================================

/// Where the resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Passed on the command line.
    Override,
    /// Read from an environment variable.
    Env(String),
    /// Read from the system keychain.
    Keychain,
    /// No token; calls run anonymously.
    None,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => f.write_str("command line"),
            Self::Env(var) => write!(f, "environment ({var})"),
            Self::Keychain => f.write_str("keychain"),
            Self::None => f.write_str("none"),
        }
    }
}

/// A resolved profile.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    /// Profile name.
    pub name: String,
    /// Client settings.
    pub client: ClientConfig,
    /// Origin of the token.
    pub token_source: TokenSource,
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves a profile using explicit environment and keychain lookups.
pub fn resolve_with<E, K>(
    config: &Config,
    profile: Option<&str>,
    overrides: &Overrides,
    env: E,
    keychain: K,
) -> Result<ResolvedProfile, StoreError>
where
    E: Fn(&str) -> Option<String>,
    K: Fn(&str) -> Option<String>,
{
    let name = config.profile_name(profile).to_string();
    let stored = config.profile(profile)?;

    let non_empty = |var: &str| env(var).filter(|v| !v.trim().is_empty());

    let url = overrides
        .url
        .clone()
        .or_else(|| non_empty(ENV_URL))
        .or(stored.url)
        .ok_or_else(|| StoreError::MissingEndpoint(name.clone()))?;

    let (token, token_source) = if let Some(token) = overrides.token.clone() {
        (Some(token), TokenSource::Override)
    } else if let Some(token) = non_empty(ENV_TOKEN) {
        (Some(token), TokenSource::Env(ENV_TOKEN.to_string()))
    } else if let Some((var, token)) = stored
        .token_env
        .as_deref()
        .and_then(|var| non_empty(var).map(|t| (var, t)))
    {
        (Some(token), TokenSource::Env(var.to_string()))
    } else if let Some(token) = keychain(&name) {
        (Some(token), TokenSource::Keychain)
    } else {
        (None, TokenSource::None)
    };

    let mut builder = ClientConfig::builder(&url)
        .format(overrides.format.or(stored.format).unwrap_or_default())
        .secure(stored.secure && !overrides.insecure);

    if let Some(token) = token {
        builder = builder.token_auth(token);
    }
    if let Some(site) = stored.default_site {
        builder = builder.default_site(site);
    }
    if let Some(language) = stored.language {
        builder = builder.language(language);
    }
    if let Some(secs) = stored.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let client = builder.build()?;
    debug!(profile = %name, endpoint = %client.endpoint, token = %token_source, "Resolved profile");

    Ok(ResolvedProfile {
        name,
        client,
        token_source,
    })
}

/// Resolves a profile against the process environment and system keychain.
pub fn resolve(
    config: &Config,
    profile: Option<&str>,
    overrides: &Overrides,
) -> Result<ResolvedProfile, StoreError> {
    resolve_with(
        config,
        profile,
        overrides,
        |var| std::env::var(var).ok(),
        keychain::get_token,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config
            .set_url(None, "https://stats.example.com/")
            .unwrap();
        let profile = config.profile_mut(None);
        profile.default_site = Some(3);
        profile.token_env = Some("STATS_TOKEN".to_string());
        config
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn no_keychain(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_profile_settings_applied() {
        let resolved =
            resolve_with(&config(), None, &Overrides::default(), env(&[]), no_keychain).unwrap();

        assert_eq!(resolved.name, "default");
        assert_eq!(
            resolved.client.endpoint.as_str(),
            "https://stats.example.com/index.php"
        );
        assert_eq!(resolved.client.default_site, Some(3));
        assert!(resolved.client.secure);
        assert_eq!(resolved.token_source, TokenSource::None);
        assert!(!resolved.client.has_token());
    }

    #[test]
    fn test_token_precedence() {
        let keychain = |_: &str| Some("from-keychain".to_string());

        let resolved =
            resolve_with(&config(), None, &Overrides::default(), env(&[]), keychain).unwrap();
        assert_eq!(resolved.token_source, TokenSource::Keychain);

        let resolved = resolve_with(
            &config(),
            None,
            &Overrides::default(),
            env(&[("STATS_TOKEN", "from-profile-env")]),
            keychain,
        )
        .unwrap();
        assert_eq!(resolved.token_source, TokenSource::Env("STATS_TOKEN".into()));
        assert_eq!(resolved.client.token_auth.as_deref(), Some("from-profile-env"));

        let resolved = resolve_with(
            &config(),
            None,
            &Overrides::default(),
            env(&[("STATS_TOKEN", "from-profile-env"), (ENV_TOKEN, "from-env")]),
            keychain,
        )
        .unwrap();
        assert_eq!(resolved.client.token_auth.as_deref(), Some("from-env"));

        let overrides = Overrides {
            token: Some("from-flag".to_string()),
            ..Overrides::default()
        };
        let resolved = resolve_with(
            &config(),
            None,
            &overrides,
            env(&[(ENV_TOKEN, "from-env")]),
            keychain,
        )
        .unwrap();
        assert_eq!(resolved.token_source, TokenSource::Override);
        assert_eq!(resolved.client.token_auth.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_blank_env_ignored() {
        let resolved = resolve_with(
            &config(),
            None,
            &Overrides::default(),
            env(&[(ENV_TOKEN, "  "), (ENV_URL, "")]),
            no_keychain,
        )
        .unwrap();
        assert_eq!(resolved.token_source, TokenSource::None);
        assert_eq!(resolved.client.endpoint.host_str(), Some("stats.example.com"));
    }

    #[test]
    fn test_url_precedence() {
        let resolved = resolve_with(
            &config(),
            None,
            &Overrides::default(),
            env(&[(ENV_URL, "https://env.example.com/index.php")]),
            no_keychain,
        )
        .unwrap();
        assert_eq!(resolved.client.endpoint.host_str(), Some("env.example.com"));

        let overrides = Overrides {
            url: Some("https://flag.example.com/".to_string()),
            ..Overrides::default()
        };
        let resolved = resolve_with(
            &config(),
            None,
            &overrides,
            env(&[(ENV_URL, "https://env.example.com/")]),
            no_keychain,
        )
        .unwrap();
        assert_eq!(resolved.client.endpoint.host_str(), Some("flag.example.com"));
    }

    #[test]
    fn test_missing_endpoint() {
        let result = resolve_with(
            &Config::default(),
            None,
            &Overrides::default(),
            env(&[]),
            no_keychain,
        );
        assert!(matches!(result, Err(StoreError::MissingEndpoint(name)) if name == "default"));
    }

    #[test]
    fn test_insecure_and_format_overrides() {
        let overrides = Overrides {
            format: Some(ResponseFormat::Csv),
            insecure: true,
            ..Overrides::default()
        };
        let resolved = resolve_with(&config(), None, &overrides, env(&[]), no_keychain).unwrap();

        assert!(!resolved.client.secure);
        assert_eq!(resolved.client.format, ResponseFormat::Csv);
    }

    #[test]
    fn test_keychain_keyed_by_profile() {
        let mut config = config();
        config
            .set_url(Some("staging"), "https://staging.example.com/")
            .unwrap();

        let keychain = |profile: &str| (profile == "staging").then(|| "staging-token".to_string());
        let resolved = resolve_with(
            &config,
            Some("staging"),
            &Overrides::default(),
            env(&[]),
            keychain,
        )
        .unwrap();

        assert_eq!(resolved.name, "staging");
        assert_eq!(resolved.client.token_auth.as_deref(), Some("staging-token"));
    }
}

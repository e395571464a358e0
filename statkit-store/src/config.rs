//! Profile configuration.
//!
//! A profile names one reporting endpoint plus the defaults to use with it.
//! The file holds any number of profiles and remembers which one commands
//! use when `--profile` is not given.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use statkit_core::ResponseFormat;
use tracing::info;

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, save_json};

/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "default";

// ============================================================================
// Config
// ============================================================================

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Profile used when none is named.
    #[serde(default = "default_profile_name")]
    pub default_profile: String,
    /// Profiles by name.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,
}

/// Settings for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Site injected as `idSite` when a call does not name one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_site: Option<u32>,
    /// Default response format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ResponseFormat>,
    /// Language for translated report labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// POST parameters instead of putting them in the query string.
    #[serde(default = "default_true")]
    pub secure: bool,
    /// Environment variable holding the token for this profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            url: None,
            default_site: None,
            format: None,
            language: None,
            timeout_secs: None,
            secure: true,
            token_env: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: default_profile_name(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path()).await
    }

    /// Loads configuration from a specific path. A missing file yields the
    /// default configuration.
    pub async fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::default());
        }

        let config = load_json(path).await?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub async fn save(&self) -> Result<(), StoreError> {
        self.save_to(&Self::default_path()).await
    }

    /// Saves configuration to a specific path.
    pub async fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Name of the profile to use: `name` if given, else the default.
    pub fn profile_name<'a>(&'a self, name: Option<&'a str>) -> &'a str {
        name.unwrap_or(&self.default_profile)
    }

    /// Returns a profile by name (or the default profile).
    ///
    /// The default profile may be absent from the file; it then resolves to
    /// empty settings so environment variables alone can configure it. A
    /// named profile that does not exist is an error.
    pub fn profile(&self, name: Option<&str>) -> Result<ProfileConfig, StoreError> {
        let resolved = self.profile_name(name);
        match self.profiles.get(resolved) {
            Some(profile) => Ok(profile.clone()),
            None if resolved == self.default_profile => Ok(ProfileConfig::default()),
            None => Err(StoreError::ProfileNotFound(resolved.to_string())),
        }
    }

    /// Returns a profile for editing, creating it if needed.
    pub fn profile_mut(&mut self, name: Option<&str>) -> &mut ProfileConfig {
        let resolved = self.profile_name(name).to_string();
        self.profiles.entry(resolved).or_default()
    }

    /// Sets the endpoint of a profile after checking it parses as a URL.
    pub fn set_url(&mut self, name: Option<&str>, url: &str) -> Result<(), StoreError> {
        url::Url::parse(url).map_err(|e| StoreError::Config(format!("invalid URL {url}: {e}")))?;
        self.profile_mut(name).url = Some(url.to_string());
        Ok(())
    }

    /// Sets the default site of a profile.
    pub fn set_default_site(&mut self, name: Option<&str>, site: u32) {
        self.profile_mut(name).default_site = Some(site);
    }
}

// ============================================================================
// Tests
// ============================================================================

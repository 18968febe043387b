// SPDX-License-Identifier: MPL-2.0
//! This module handles the server configuration stored in a `settings.toml`
//! file.
//!
//! # Configuration Sections
//!
//! - `[site]` - Public base URL and listening address
//! - `[bangumi]` - Collection API credentials, paging and caching
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `PORTFOLIO_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! The Bangumi credentials can also come from the `BANGUMI_USERNAME` and
//! `BANGUMI_TOKEN` environment variables, which win over the file.
//!
//! # Examples
//!
//! ```no_run
//! use portfolio_site::config;
//!
//! let (mut config, warning) = config::load();
//! if let Some(warning) = warning {
//!     eprintln!("{warning}");
//! }
//! config.apply_env_overrides();
//! println!("listening on {}", config.site.bind_addr());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::bangumi::{CollectionType, SubjectType};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding `bangumi.username`.
pub const ENV_BANGUMI_USERNAME: &str = "BANGUMI_USERNAME";

/// Environment variable overriding `bangumi.token`.
pub const ENV_BANGUMI_TOKEN: &str = "BANGUMI_TOKEN";

// =============================================================================
// Section Structs
// =============================================================================

/// Public site settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SiteConfig {
    /// Canonical URL used in the sitemap. Defaults to the profile's URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Socket address the server listens on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
}

impl SiteConfig {
    pub fn bind_addr(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }
}

/// Bangumi collection API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BangumiConfig {
    /// Bangumi user whose collection is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Personal access token, sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_type: Option<SubjectType>,

    /// Shelf shown on the anime page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<CollectionType>,

    /// Entries requested per page.
    #[serde(default = "default_limit", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    #[serde(default = "default_timeout_secs", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Lifetime of cached pages; 0 disables the cache.
    #[serde(default = "default_cache_ttl_secs", skip_serializing_if = "Option::is_none")]
    pub cache_ttl_secs: Option<u64>,

    #[serde(default = "default_cache_capacity", skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
}

impl Default for BangumiConfig {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            api_base: None,
            user_agent: None,
            subject_type: None,
            collection_type: None,
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl BangumiConfig {
    /// API base URL without a trailing slash.
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(DEFAULT_BANGUMI_API_BASE)
            .trim_end_matches('/')
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(DEFAULT_BANGUMI_USER_AGENT)
    }

    pub fn subject_type(&self) -> SubjectType {
        self.subject_type.unwrap_or_default()
    }

    pub fn collection_type(&self) -> CollectionType {
        self.collection_type.unwrap_or_default()
    }

    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_BANGUMI_LIMIT)
            .clamp(MIN_BANGUMI_LIMIT, MAX_BANGUMI_LIMIT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(DEFAULT_BANGUMI_TIMEOUT_SECS)
                .clamp(MIN_BANGUMI_TIMEOUT_SECS, MAX_BANGUMI_TIMEOUT_SECS),
        )
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.cache_ttl_secs
                .unwrap_or(DEFAULT_BANGUMI_CACHE_TTL_SECS)
                .min(MAX_BANGUMI_CACHE_TTL_SECS),
        )
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
            .unwrap_or(DEFAULT_BANGUMI_CACHE_CAPACITY)
            .clamp(MIN_BANGUMI_CACHE_CAPACITY, MAX_BANGUMI_CACHE_CAPACITY)
    }

    /// Username, treating an empty string as unset.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }

    /// Token, treating an empty string as unset.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Server configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub bangumi: BangumiConfig,
}

impl Config {
    /// Applies `BANGUMI_USERNAME` / `BANGUMI_TOKEN` when they are set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(username) = lookup(ENV_BANGUMI_USERNAME).filter(|v| !v.is_empty()) {
            self.bangumi.username = Some(username);
        }
        if let Some(token) = lookup(ENV_BANGUMI_TOKEN).filter(|v| !v.is_empty()) {
            self.bangumi.token = Some(token);
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_limit() -> Option<u32> {
    Some(DEFAULT_BANGUMI_LIMIT)
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_BANGUMI_TIMEOUT_SECS)
}

fn default_cache_ttl_secs() -> Option<u64> {
    Some(DEFAULT_BANGUMI_CACHE_TTL_SECS)
}

fn default_cache_capacity() -> Option<usize> {
    Some(DEFAULT_BANGUMI_CACHE_CAPACITY)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "ignoring {}: {err}; using default settings",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

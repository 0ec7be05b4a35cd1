//! Application configuration.
//!
//! Loaded once at startup from a TOML file:
//!
//! ```toml
//! request_timeout_secs = 30
//! reload_on_startup = true
//! log_requests = false
//! log_responses = false
//!
//! [default_search]
//! talk_keywords = ["java"]
//! speaker_companies = []
//!
//! [portals.devoxxuk]
//! base_url = "https://devoxxuk.cfp.dev"
//! portal_type = "CFP_DEV"
//! description = "Devoxx UK"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::{Portal, PortalType, TalkSearchCriteria};

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-request read timeout. The aggregation deadline is this times the
    /// number of portals.
    pub request_timeout_secs: u64,

    /// Connect timeout; falls back to `request_timeout_secs`.
    pub connect_timeout_secs: Option<u64>,

    /// Wipe the store and aggregate with `default_search` before serving.
    pub reload_on_startup: bool,

    /// Log outgoing request lines and headers.
    pub log_requests: bool,

    /// Log response status and bodies.
    pub log_responses: bool,

    /// Criteria used for the startup reload.
    pub default_search: SearchConfig,

    /// Portals keyed by name.
    pub portals: BTreeMap<String, PortalConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: None,
            reload_on_startup: true,
            log_requests: false,
            log_responses: false,
            default_search: SearchConfig::default(),
            portals: BTreeMap::new(),
        }
    }
}

/// `[default_search]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub talk_keywords: Vec<String>,
    pub speaker_companies: Vec<String>,
}

/// One `[portals.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub portal_type: PortalType,
    #[serde(default)]
    pub description: Option<String>,
}

/// Configuration could not be loaded or failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("Portal '{portal}' has an empty base_url")]
    EmptyBaseUrl { portal: String },

    #[error("Portal '{portal}' has an invalid base_url '{url}': {reason}")]
    InvalidBaseUrl {
        portal: String,
        url: String,
        reason: String,
    },

    #[error("Portal name cannot be blank")]
    BlankPortalName,
}

impl AppConfig {
    /// Read, parse and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            target: "cfphub.config",
            path = %path.display(),
            portals = config.portals.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        if self.connect_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout {
                field: "connect_timeout_secs",
            });
        }
        for (name, portal) in &self.portals {
            validate_portal(name, &portal.base_url)?;
        }
        Ok(())
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs
                .unwrap_or(self.request_timeout_secs),
        )
    }

    /// Configured portals as domain values, ordered by name.
    pub fn portals(&self) -> Vec<Portal> {
        self.portals
            .iter()
            .map(|(name, cfg)| Portal {
                name: name.clone(),
                base_url: cfg.base_url.trim().to_string(),
                portal_type: cfg.portal_type,
                description: crate::utils::text::normalize_blank(cfg.description.as_deref()),
            })
            .collect()
    }

    /// The `[default_search]` table as criteria.
    pub fn default_criteria(&self) -> TalkSearchCriteria {
        TalkSearchCriteria::builder()
            .talk_keywords(&self.default_search.talk_keywords)
            .speaker_companies(&self.default_search.speaker_companies)
            .build()
    }
}

/// Check a portal's name and base URL.
///
/// Shared by config loading and the portal CRUD service.
pub fn validate_portal(name: &str, base_url: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::BlankPortalName);
    }
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::EmptyBaseUrl {
            portal: name.to_string(),
        });
    }
    match url::Url::parse(base_url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigError::InvalidBaseUrl {
            portal: name.to_string(),
            url: base_url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        }),
        Err(e) => Err(ConfigError::InvalidBaseUrl {
            portal: name.to_string(),
            url: base_url.to_string(),
            reason: e.to_string(),
        }),
    }
}

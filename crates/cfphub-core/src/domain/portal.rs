//! Portal domain types.
//!
//! A portal is one configured external CFP source. Its name is the identity
//! key everywhere: in configuration, in the store, and in the client cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The API shape a portal speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortalType {
    /// cfp.dev-style public API (server-side talk search supported).
    CfpDev,
    /// Sessionize `view/All` document API.
    Sessionize,
    /// Dev2Next portal, cfp.dev-compatible payloads without search.
    #[serde(rename = "DEV2NEXT")]
    Dev2Next,
}

impl PortalType {
    /// All supported portal types.
    pub const ALL: [Self; 3] = [Self::CfpDev, Self::Sessionize, Self::Dev2Next];

    /// Stable string form used in configuration and storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CfpDev => "CFP_DEV",
            Self::Sessionize => "SESSIONIZE",
            Self::Dev2Next => "DEV2NEXT",
        }
    }

    /// Whether the remote API can search talks by keyword itself.
    pub const fn supports_talk_search(self) -> bool {
        matches!(self, Self::CfpDev)
    }
}

impl fmt::Display for PortalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a portal type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown portal type '{0}' (expected CFP_DEV, SESSIONIZE or DEV2NEXT)")]
pub struct UnknownPortalType(pub String);

impl FromStr for PortalType {
    type Err = UnknownPortalType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "CFP_DEV" | "CFPDEV" => Ok(Self::CfpDev),
            "SESSIONIZE" => Ok(Self::Sessionize),
            "DEV2NEXT" | "DEV_2_NEXT" => Ok(Self::Dev2Next),
            _ => Err(UnknownPortalType(s.to_string())),
        }
    }
}

/// A configured CFP portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portal {
    /// Unique portal name (identity key).
    pub name: String,
    /// Base URL of the portal API, without trailing path.
    pub base_url: String,
    /// Which API shape the portal speaks.
    pub portal_type: PortalType,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Portal {
    /// Create a portal without a description.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        portal_type: PortalType,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            portal_type,
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Base URL without a trailing slash.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

//! meetcal configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{MeetcalError, MeetcalResult};

const DEFAULT_CUTOFF_DAYS: i64 = 14;
const DEFAULT_SUMMARY_LIMIT: usize = 8;
const DEFAULT_LINK_TEMPLATE: &str = "https://hannover.freifunk.net/wiki/Freifunk/Treffen#{location}";

/// Placeholder replaced by the location in a link template.
pub const LOCATION_PLACEHOLDER: &str = "{location}";

/// Configuration at ~/.config/meetcal/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeetcalConfig {
    /// Events that started more than this many days ago are left out
    pub cutoff_days: i64,

    /// Number of events in the JSON summary
    pub summary_limit: usize,

    pub escaping: Escaping,

    /// Description attached to every event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL written into every VEVENT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Length of every event, written as DURATION
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    /// Prefix of generated UIDs; no UID lines without it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid_prefix: Option<String>,

    pub links: LinkStrategy,
}

impl Default for MeetcalConfig {
    fn default() -> Self {
        MeetcalConfig {
            cutoff_days: DEFAULT_CUTOFF_DAYS,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
            escaping: Escaping::default(),
            description: None,
            url: None,
            duration_minutes: None,
            uid_prefix: None,
            links: LinkStrategy::default(),
        }
    }
}

/// How text values are written into iCalendar output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Escaping {
    /// Values are copied unchanged
    #[default]
    PassThrough,
    /// RFC 5545 TEXT escaping of backslash, semicolon, comma and newline
    Rfc5545,
}

/// How the JSON summary derives a URL for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Substitute the location (spaces as underscores) into `template`
    Template { template: String },
    /// Exact-match table from location to URL
    Lookup {
        #[serde(default)]
        locations: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<String>,
    },
}

impl Default for LinkStrategy {
    fn default() -> Self {
        LinkStrategy::Template {
            template: DEFAULT_LINK_TEMPLATE.to_string(),
        }
    }
}

impl LinkStrategy {
    pub fn url_for(&self, location: &str) -> String {
        match self {
            LinkStrategy::Template { template } => {
                template.replace(LOCATION_PLACEHOLDER, &location.replace(' ', "_"))
            }
            LinkStrategy::Lookup {
                locations,
                fallback,
            } => match locations.get(location) {
                Some(url) => url.clone(),
                None => {
                    tracing::warn!(location, "No link configured for location");
                    fallback.clone().unwrap_or_default()
                }
            },
        }
    }
}

impl MeetcalConfig {
    pub fn config_path() -> MeetcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MeetcalError::Config("Could not determine config directory".into()))?
            .join("meetcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> MeetcalResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = Self::config_path()?;
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    tracing::debug!(path = %default_path.display(), "No config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> MeetcalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MeetcalError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        let config = Self::from_toml(&contents)
            .map_err(|e| MeetcalError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> MeetcalResult<Self> {
        let config: MeetcalConfig =
            toml::from_str(contents).map_err(|e| MeetcalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> MeetcalResult<()> {
        if self.cutoff_days < 0 {
            return Err(MeetcalError::Config(format!(
                "cutoff_days must not be negative, got {}",
                self.cutoff_days
            )));
        }
        self.cutoff()?;
        Ok(())
    }

    pub fn cutoff(&self) -> MeetcalResult<Duration> {
        Duration::try_days(self.cutoff_days).ok_or_else(|| {
            MeetcalError::Config(format!("cutoff_days is too large, got {}", self.cutoff_days))
        })
    }
}

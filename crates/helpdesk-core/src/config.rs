//! Configuration for helpdesk
//!
//! Stored as TOML under the user config directory. Record data itself is
//! never persisted; this file is the only thing the program writes.

use crate::EmailPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// helpdesk configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reject registrations that reuse an existing email address
    pub unique_emails: bool,

    /// Populate the demo dataset at startup
    pub seed_demo_data: bool,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unique_emails: false,
            seed_demo_data: true,
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Date format for display (strftime format)
    pub date_format: String,

    /// How many tickets to show per category in the grouped view
    pub category_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            date_format: "%Y-%m-%d %H:%M".to_string(),
            category_preview: 5,
        }
    }
}

impl Config {
    /// The email policy this configuration selects.
    pub fn email_policy(&self) -> EmailPolicy {
        if self.unique_emails {
            EmailPolicy::Unique
        } else {
            EmailPolicy::Shared
        }
    }

    /// Default config file location: `<user config dir>/helpdesk/config.toml`.
    pub fn default_path() -> crate::Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| crate::Error::Other("Could not determine config directory".into()))?;
        Ok(base.join("helpdesk").join("config.toml"))
    }

    /// Load config from a TOML file; a missing file means defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Other(format!("Invalid config: {e}")))?;
        Ok(config)
    }

    /// Save config to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Other(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate a default config file with comments.
    pub fn default_with_comments() -> String {
        r#"# helpdesk configuration

# Reject registrations that reuse an existing email address
unique_emails = false

# Populate the demo dataset (users, tickets, articles) at startup
seed_demo_data = true

[display]
# Use colors in output
colors = true

# Date format for display (strftime format)
date_format = "%Y-%m-%d %H:%M"

# How many tickets to show per category in the grouped view
category_preview = 5
"#
        .to_string()
    }
}

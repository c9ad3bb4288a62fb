//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a transporter.toml, and if present we load settings from there.
//! This provides the vault location and the file extensions offered when choosing a target.

use facet::Facet;
use std::fs;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "transporter.toml";

#[derive(Facet, Clone)]
/// User preferences loaded from transporter.toml or falling back to defaults.
pub struct Config {
    #[facet(default = ".".to_string())]
    /// Directory holding the notes that push and pull can target.
    pub vault_root: String,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when listing the vault.
    pub file_extensions: Vec<String>,
}

impl Config {
    #[must_use]
    /// Load configuration from transporter.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string(CONFIG_FILE) {
            if let Some(config) = Self::parse(&contents) {
                return config;
            }
            tracing::warn!("ignoring malformed {CONFIG_FILE}");
        }
        Self::parse("").unwrap()
    }

    #[must_use]
    /// Parse configuration text, filling in defaults for missing keys.
    pub fn parse(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;

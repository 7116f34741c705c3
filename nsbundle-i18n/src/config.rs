//! Resolver configuration
//!
//! The lookup separator is validated when the configuration is built, so a
//! [`ResolverConfig`] that exists always carries a usable separator.

use crate::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Separator used between namespace and key unless configured otherwise.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Settings consumed by [`BundleResolver`](crate::BundleResolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResolverConfig")]
pub struct ResolverConfig {
    separator: String,
    name_prefix: Option<String>,
    name_suffix: Option<String>,
}

#[derive(Deserialize)]
struct RawResolverConfig {
    #[serde(default = "default_separator")]
    separator: String,
    #[serde(default)]
    name_prefix: Option<String>,
    #[serde(default)]
    name_suffix: Option<String>,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl TryFrom<RawResolverConfig> for ResolverConfig {
    type Error = BundleError;

    fn try_from(raw: RawResolverConfig) -> Result<Self> {
        Ok(ResolverConfig::new(raw.separator)?
            .with_name_prefix(raw.name_prefix)
            .with_name_suffix(raw.name_suffix))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            name_prefix: None,
            name_suffix: None,
        }
    }
}

impl ResolverConfig {
    /// Create a configuration with the given lookup separator.
    ///
    /// The separator is trimmed and must not be empty afterwards.
    pub fn new(separator: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            separator: validate_separator(separator.as_ref())?,
            ..Self::default()
        })
    }

    /// Replace the lookup separator.
    pub fn with_separator(mut self, separator: impl AsRef<str>) -> Result<Self> {
        self.separator = validate_separator(separator.as_ref())?;
        Ok(self)
    }

    /// Set the string prepended to every bundle path.
    pub fn with_name_prefix(mut self, prefix: Option<impl Into<String>>) -> Self {
        self.name_prefix = prefix.map(Into::into);
        self
    }

    /// Set the string appended to every bundle path.
    pub fn with_name_suffix(mut self, suffix: Option<impl Into<String>>) -> Self {
        self.name_suffix = suffix.map(Into::into);
        self
    }

    /// Parse from a JSON object with optional `separator`, `name_prefix` and
    /// `name_suffix` fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawResolverConfig = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Read `NSBUNDLE_SEPARATOR`, `NSBUNDLE_NAME_PREFIX` and
    /// `NSBUNDLE_NAME_SUFFIX`. Unset variables keep their defaults; a set but
    /// blank separator is rejected.
    pub fn from_env() -> Result<Self> {
        let separator = env::var("NSBUNDLE_SEPARATOR").unwrap_or_else(|_| default_separator());

        Ok(Self::new(separator)?
            .with_name_prefix(env::var("NSBUNDLE_NAME_PREFIX").ok())
            .with_name_suffix(env::var("NSBUNDLE_NAME_SUFFIX").ok()))
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn name_prefix(&self) -> Option<&str> {
        self.name_prefix.as_deref()
    }

    pub fn name_suffix(&self) -> Option<&str> {
        self.name_suffix.as_deref()
    }

    /// Full load path for a bundle path: prefix, path and suffix, verbatim.
    pub fn bundle_path(&self, path: &str) -> String {
        let prefix = self.name_prefix.as_deref().unwrap_or_default();
        let suffix = self.name_suffix.as_deref().unwrap_or_default();

        let mut full = String::with_capacity(prefix.len() + path.len() + suffix.len());
        full.push_str(prefix);
        full.push_str(path);
        full.push_str(suffix);
        full
    }
}

fn validate_separator(separator: &str) -> Result<String> {
    let separator = separator.trim();
    if separator.is_empty() {
        return Err(BundleError::InvalidConfiguration(
            "separator cannot be empty".to_string(),
        ));
    }
    Ok(separator.to_string())
}

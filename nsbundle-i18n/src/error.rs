//! Error types for bundle resolution and lookup

use thiserror::Error;

/// Errors that can occur while resolving bundles or looking up messages.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A referenced bundle path has no table for the requested locale
    #[error("No bundle found at '{path}' for locale {locale}")]
    MissingResource { path: String, locale: String },

    /// A qualified key has no entry in the table it selects
    #[error("Message not found: {key} for locale {locale}")]
    MissingKey { key: String, locale: String },

    /// Rejected resolver configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid locale string
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// A table source exists but could not be parsed
    #[error("Failed to parse message table: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl BundleError {
    pub(crate) fn missing_resource(path: impl Into<String>, locale: &crate::Locale) -> Self {
        BundleError::MissingResource {
            path: path.into(),
            locale: locale.tag(),
        }
    }

    pub(crate) fn missing_key(key: impl Into<String>, locale: &crate::Locale) -> Self {
        BundleError::MissingKey {
            key: key.into(),
            locale: locale.tag(),
        }
    }

    /// Whether this is a [`BundleError::MissingResource`].
    pub fn is_missing_resource(&self) -> bool {
        matches!(self, BundleError::MissingResource { .. })
    }

    /// Whether this is a [`BundleError::MissingKey`].
    pub fn is_missing_key(&self) -> bool {
        matches!(self, BundleError::MissingKey { .. })
    }
}

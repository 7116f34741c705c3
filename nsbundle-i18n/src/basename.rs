//! Basename specification parsing
//!
//! A specification is a comma separated list of `[namespace#]path` entries:
//!
//! ```text
//! global/global, lang#global/languages/lang, login#login/global
//! ```
//!
//! Entries without a namespace (or with an empty one, like `#path`) feed the
//! default namespace.

/// Separates the namespace from the path inside one entry. Fixed, unlike the
/// lookup separator.
pub const NAMESPACE_SEPARATOR: char = '#';

/// One `[namespace#]path` entry of a specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasenameEntry {
    /// Target namespace; `None` for the default namespace. Never empty.
    pub namespace: Option<String>,
    /// Bundle path, trimmed. May be empty for malformed entries like
    /// `"hello#"`; the loader reports those as missing.
    pub path: String,
}

impl BasenameEntry {
    /// Parse a single entry.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();

        match token.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, path)) => {
                let namespace = namespace.trim();
                Self {
                    namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
                    path: path.trim().to_string(),
                }
            }
            None => Self {
                namespace: None,
                path: token.to_string(),
            },
        }
    }

    pub fn is_default(&self) -> bool {
        self.namespace.is_none()
    }
}

/// Split a specification into entries, in order. Blank tokens are skipped.
pub fn parse_basenames(specification: &str) -> Vec<BasenameEntry> {
    specification
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(BasenameEntry::parse)
        .collect()
}

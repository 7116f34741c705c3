//! Locale representation
//!
//! Bundles are resolved per locale. The core never negotiates locales; it
//! hands the requested one to the loader, which walks [`Locale::candidates`]
//! to find the most specific table available.

use crate::{BundleError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A locale (language + optional script and region).
///
/// # Examples
///
/// ```
/// use nsbundle_i18n::Locale;
///
/// let en_us = Locale::new("en", Some("US"));
/// let parsed: Locale = "en_US".parse().unwrap();
/// assert_eq!(en_us, parsed);
/// assert_eq!(parsed.tag(), "en-US");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Language code (ISO 639, e.g., "en", "fr", "de")
    pub language: String,
    /// Optional region code (ISO 3166-1 or UN M.49, e.g., "US", "419")
    pub region: Option<String>,
    /// Optional script (e.g., "Latn", "Hans")
    pub script: Option<String>,
}

impl Locale {
    /// Create a new locale.
    pub fn new(language: impl Into<String>, region: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: None,
        }
    }

    /// Create a locale with script.
    pub fn with_script(
        language: impl Into<String>,
        script: Option<impl Into<String>>,
        region: Option<impl Into<String>>,
    ) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(|r| r.into().to_uppercase()),
            script: script.map(|s| title_case(&s.into())),
        }
    }

    /// Parse a BCP 47 style tag. Both `-` and `_` separate subtags, so
    /// `"en-US"` and `"en_US"` are equivalent.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);

        let language = parts.next().unwrap_or_default().to_lowercase();
        if language.len() < 2
            || language.len() > 3
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(BundleError::InvalidLocale(tag.to_string()));
        }

        let mut script = None;
        let mut region = None;

        for part in parts {
            if part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                script = Some(title_case(part));
            } else if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
                region = Some(part.to_uppercase());
            } else if part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()) {
                region = Some(part.to_string());
            } else {
                return Err(BundleError::InvalidLocale(tag.to_string()));
            }
        }

        Ok(Self {
            language,
            script,
            region,
        })
    }

    /// The language tag (e.g., "zh-Hans-CN").
    pub fn tag(&self) -> String {
        self.subtags().join("-")
    }

    /// Underscore-joined subtags, as used in bundle file names
    /// (`messages_en_US.json`).
    pub fn file_suffix(&self) -> String {
        self.subtags().join("_")
    }

    /// The locale with script and region stripped.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            script: None,
            region: None,
        }
    }

    /// Lookup chain from the most specific locale down to the bare language.
    ///
    /// `zh-Hans-CN` yields `zh-Hans-CN`, `zh-Hans`, `zh-CN`, `zh`.
    pub fn candidates(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];

        if self.script.is_some() && self.region.is_some() {
            chain.push(Self {
                language: self.language.clone(),
                script: self.script.clone(),
                region: None,
            });
            chain.push(Self {
                language: self.language.clone(),
                script: None,
                region: self.region.clone(),
            });
        }

        if self.script.is_some() || self.region.is_some() {
            chain.push(self.language_only());
        }

        chain
    }

    fn subtags(&self) -> Vec<&str> {
        let mut tags = vec![self.language.as_str()];
        if let Some(ref script) = self.script {
            tags.push(script);
        }
        if let Some(ref region) = self.region {
            tags.push(region);
        }
        tags
    }

    // Common locales

    /// English (no region)
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// English (GB)
    pub fn en_gb() -> Self {
        Self::new("en", Some("GB"))
    }

    /// French (no region)
    pub fn fr() -> Self {
        Self::new("fr", None::<&str>)
    }

    /// German (no region)
    pub fn de() -> Self {
        Self::new("de", None::<&str>)
    }

    /// German (Germany)
    pub fn de_de() -> Self {
        Self::new("de", Some("DE"))
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

//! Bundle loaders
//!
//! The resolver obtains raw tables through the [`BundleLoader`] trait. Two
//! implementations ship with the crate:
//!
//! - [`MemoryLoader`]: tables registered in code, handy for tests and
//!   embedded catalogs
//! - [`FileLoader`]: `.json` / `.properties` files under a base directory
//!
//! Both walk [`Locale::candidates`] and finally a locale-neutral table, so
//! `en-US` is served by `messages_en_US`, `messages_en`, then `messages`.

use crate::{BundleError, Locale, MessageTable, Result};
use nsbundle_log::{debug, trace};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Source of raw message tables.
///
/// `load` must fail with [`BundleError::MissingResource`] when no table
/// exists for the path and locale. Other errors (unreadable or malformed
/// sources) are passed through to the caller unchanged.
pub trait BundleLoader: Send + Sync {
    /// Load the table stored at `path` for `locale`.
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable>;
}

impl<L: BundleLoader + ?Sized> BundleLoader for &L {
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
        (**self).load(path, locale)
    }
}

impl<L: BundleLoader + ?Sized> BundleLoader for Arc<L> {
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
        (**self).load(path, locale)
    }
}

impl<L: BundleLoader + ?Sized> BundleLoader for Box<L> {
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
        (**self).load(path, locale)
    }
}

// ============================================================================
// In-memory loader
// ============================================================================

/// Loader backed by tables registered in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    /// Tables keyed by (path, locale tag); the empty tag is the neutral table
    tables: HashMap<(String, String), MessageTable>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table for `path` in `locale`, replacing any previous one.
    pub fn insert(&mut self, path: impl Into<String>, locale: &Locale, table: MessageTable) {
        self.tables.insert((path.into(), locale.tag()), table);
    }

    /// Register the locale-neutral table for `path`, used when no
    /// locale-specific table matches.
    pub fn insert_default(&mut self, path: impl Into<String>, table: MessageTable) {
        self.tables.insert((path.into(), String::new()), table);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<String>, locale: &Locale, table: MessageTable) -> Self {
        self.insert(path, locale, table);
        self
    }

    /// Builder-style [`insert_default`](Self::insert_default).
    pub fn with_default(mut self, path: impl Into<String>, table: MessageTable) -> Self {
        self.insert_default(path, table);
        self
    }

    fn find(&self, path: &str, tag: String) -> Option<&MessageTable> {
        self.tables.get(&(path.to_string(), tag))
    }
}

impl BundleLoader for MemoryLoader {
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
        locale
            .candidates()
            .iter()
            .find_map(|candidate| self.find(path, candidate.tag()))
            .or_else(|| self.find(path, String::new()))
            .cloned()
            .ok_or_else(|| BundleError::missing_resource(path, locale))
    }
}

// ============================================================================
// File loader
// ============================================================================

/// File formats understood by [`FileLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Properties,
}

impl TableFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Json => "json",
            TableFormat::Properties => "properties",
        }
    }

    fn parse(&self, content: &str) -> Result<MessageTable> {
        match self {
            TableFormat::Json => MessageTable::from_json(content),
            TableFormat::Properties => Ok(MessageTable::from_properties(content)),
        }
    }
}

/// Loader reading message files below a base directory.
///
/// For path `login/global` and locale `en-US` the candidates are, per
/// format: `login/global_en_US.<ext>`, `login/global_en.<ext>`,
/// `login/global.<ext>`. The first existing file wins.
///
/// Paths are always taken relative to the base directory: leading `/` is
/// ignored, so a name prefix like `/WEB-INF/messages/` stays inside it.
/// Paths with `..` components, or without a file name, never match.
#[derive(Debug, Clone)]
pub struct FileLoader {
    base_dir: PathBuf,
    formats: Vec<TableFormat>,
}

impl FileLoader {
    /// Create a loader reading JSON, then properties files, below `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            formats: vec![TableFormat::Json, TableFormat::Properties],
        }
    }

    /// Restrict (and order) the formats that are tried.
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = TableFormat>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `path` as a stem below the base directory, or `None` if it cannot
    /// name a file there.
    fn relative_stem(path: &str) -> Option<&str> {
        let stem = path.trim_start_matches(['/', '\\']);
        if stem.is_empty() || stem.ends_with(['/', '\\']) {
            return None;
        }

        Path::new(stem)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
            .then_some(stem)
    }

    fn candidate_files(&self, path: &str, locale: &Locale) -> Vec<(PathBuf, TableFormat)> {
        let Some(path) = Self::relative_stem(path) else {
            return Vec::new();
        };

        let stems = locale
            .candidates()
            .iter()
            .map(|candidate| format!("{}_{}", path, candidate.file_suffix()))
            .chain(std::iter::once(path.to_string()))
            .collect::<Vec<_>>();

        stems
            .iter()
            .flat_map(|stem| {
                self.formats.iter().map(move |format| {
                    (
                        self.base_dir.join(format!("{}.{}", stem, format.extension())),
                        *format,
                    )
                })
            })
            .collect()
    }
}

impl BundleLoader for FileLoader {
    fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
        for (file, format) in self.candidate_files(path, locale) {
            trace!("Probing {}", file.display());
            if !file.is_file() {
                continue;
            }

            let content = fs::read_to_string(&file)?;
            let table = format.parse(&content)?;
            debug!(
                "Loaded {} messages from {} for locale {}",
                table.len(),
                file.display(),
                locale
            );
            return Ok(table);
        }

        Err(BundleError::missing_resource(path, locale))
    }
}

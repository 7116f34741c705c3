//! Namespaced bundles
//!
//! A [`NamespacedBundle`] aggregates the tables of one resolved
//! specification for a single locale: an optional default table plus one
//! table per namespace. It is assembled by a [`NamespacedBundleBuilder`] and
//! never changes afterwards, so it can be shared across threads freely.
//!
//! # Key resolution
//!
//! With separator `.`:
//!
//! | Raw key          | Namespace `hello` known | Table consulted           |
//! |------------------|-------------------------|---------------------------|
//! | `hello.test.key` | yes                     | `hello` with `test.key`   |
//! | `other.key`      | no                      | default with `other.key`  |
//! | `.key`           | -                       | default with `.key`       |
//! | `plain`          | -                       | default with `plain`      |
//!
//! A key aimed at a known namespace never falls back to the default table.

use crate::{BundleError, Locale, MessageTable, Result};
use std::collections::HashMap;

/// Immutable, locale-specific aggregate of message tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacedBundle {
    separator: String,
    locale: Locale,
    default_table: Option<MessageTable>,
    namespace_tables: HashMap<String, MessageTable>,
}

impl NamespacedBundle {
    /// Start assembling a bundle.
    pub fn builder(separator: impl Into<String>, locale: Locale) -> NamespacedBundleBuilder {
        NamespacedBundleBuilder::new(separator, locale)
    }

    /// Look up a qualified key.
    ///
    /// Fails with [`BundleError::MissingKey`] when the selected table has no
    /// entry for the key. A failed lookup leaves the bundle untouched.
    pub fn lookup(&self, raw_key: &str) -> Result<&str> {
        self.get(raw_key)
            .ok_or_else(|| BundleError::missing_key(raw_key, &self.locale))
    }

    /// Like [`lookup`](Self::lookup), but `None` instead of an error.
    pub fn get(&self, raw_key: &str) -> Option<&str> {
        if let Some((namespace, key)) = raw_key.split_once(self.separator.as_str()) {
            if !namespace.is_empty() {
                if let Some(table) = self.namespace_tables.get(namespace) {
                    return table.get(key);
                }
            }
        }

        self.default_table.as_ref()?.get(raw_key)
    }

    pub fn contains_key(&self, raw_key: &str) -> bool {
        self.get(raw_key).is_some()
    }

    /// Separator between namespace and key.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Locale the tables were loaded for.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The default table, if any unprefixed entries were resolved.
    pub fn default_table(&self) -> Option<&MessageTable> {
        self.default_table.as_ref()
    }

    /// The merged table of a namespace.
    pub fn namespace(&self, name: &str) -> Option<&MessageTable> {
        self.namespace_tables.get(name)
    }

    /// Names of all namespaces, in no particular order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespace_tables.keys().map(String::as_str)
    }
}

/// Exclusively owned accumulator for a [`NamespacedBundle`].
///
/// Tables are merged in call order; when two tables for the same target
/// share a key, the later one wins.
#[derive(Debug)]
pub struct NamespacedBundleBuilder {
    separator: String,
    locale: Locale,
    default_table: Option<MessageTable>,
    namespace_tables: HashMap<String, MessageTable>,
}

impl NamespacedBundleBuilder {
    fn new(separator: impl Into<String>, locale: Locale) -> Self {
        Self {
            separator: separator.into(),
            locale,
            default_table: None,
            namespace_tables: HashMap::new(),
        }
    }

    /// Merge a table into the default namespace.
    pub fn add_default(&mut self, table: MessageTable) -> &mut Self {
        self.default_table
            .get_or_insert_with(MessageTable::new)
            .merge(table);
        self
    }

    /// Merge a table into `namespace`. An empty name targets the default
    /// namespace.
    pub fn add_namespaced(&mut self, namespace: &str, table: MessageTable) -> &mut Self {
        if namespace.is_empty() {
            return self.add_default(table);
        }

        self.namespace_tables
            .entry(namespace.to_string())
            .or_default()
            .merge(table);
        self
    }

    /// Merge a table into `namespace`, or into the default namespace for
    /// `None`.
    pub fn add(&mut self, namespace: Option<&str>, table: MessageTable) -> &mut Self {
        match namespace {
            Some(namespace) => self.add_namespaced(namespace, table),
            None => self.add_default(table),
        }
    }

    /// Freeze the accumulated tables.
    pub fn build(self) -> NamespacedBundle {
        NamespacedBundle {
            separator: self.separator,
            locale: self.locale,
            default_table: self.default_table,
            namespace_tables: self.namespace_tables,
        }
    }
}

//! Key → message tables
//!
//! A [`MessageTable`] is what a [`BundleLoader`](crate::BundleLoader) hands
//! back for one path and locale. Tables know nothing about namespaces; the
//! resolver decides where each one lands.

use crate::Result;
use std::collections::HashMap;

/// A flat table of message keys to localized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON.
    ///
    /// Nested objects are flattened into dotted keys, so
    /// `{"test": {"key": "value"}}` yields `test.key`. Non-string leaves
    /// are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut table = Self::new();
        table.flatten_into("", data);
        Ok(table)
    }

    fn flatten_into(&mut self, prefix: &str, object: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in object {
            let key = if prefix.is_empty() {
                key
            } else {
                format!("{}.{}", prefix, key)
            };

            match value {
                serde_json::Value::String(s) => {
                    self.messages.insert(key, s);
                }
                serde_json::Value::Object(nested) => self.flatten_into(&key, nested),
                _ => {}
            }
        }
    }

    /// Load from `.properties` text.
    ///
    /// Follows the Java format for what message files use: `key=value`,
    /// `key: value` and `key value` pairs, `#` / `!` comment lines, logical
    /// lines continued with a trailing backslash, and the escapes `\t`,
    /// `\n`, `\r`, `\f`, `\uXXXX` and `\<char>` (so `\=`, `\:` and `\ `
    /// can appear in keys). Leading whitespace of keys and values is
    /// skipped; trailing whitespace is kept. `\u` escapes forming surrogate
    /// pairs are not combined.
    pub fn from_properties(source: &str) -> Self {
        let mut table = Self::new();
        let mut lines = source.lines();

        while let Some(line) = lines.next() {
            let line = line.trim_start_matches(PROPERTY_BLANKS);
            if line.is_empty() || line.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = line.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start_matches(PROPERTY_BLANKS)),
                    None => break,
                }
            }

            let (key, value) = split_property(&logical);
            table.insert(unescape_property(key), unescape_property(value));
        }

        table
    }

    /// Add a message, replacing any previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Get a message.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Get all message keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Union `other` into this table. Keys present in both take the value
    /// from `other`.
    pub fn merge(&mut self, other: MessageTable) {
        self.messages.extend(other.messages);
    }
}

const PROPERTY_BLANKS: [char; 3] = [' ', '\t', '\x0c'];

/// Odd number of trailing backslashes: the last one escapes the line end.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`, `:` or blank.
fn split_property(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(PROPERTY_BLANKS);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..key_end], rest.trim_start_matches(PROPERTY_BLANKS))
}

fn unescape_property(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        out.push(decoded);
                        let _ = chars.nth(3);
                    }
                    None => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

impl<K, V> FromIterator<(K, V)> for MessageTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for MessageTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

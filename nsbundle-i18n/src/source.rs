//! Cached message source
//!
//! [`PrefixedMessageSource`] is the application-facing layer: it keeps an
//! ordered list of basename specifications, resolves each one lazily per
//! locale, caches the resulting bundles and answers message lookups with
//! optional positional arguments.

use crate::{
    BundleError, BundleLoader, BundleResolver, Locale, NamespacedBundle, ResolverConfig, Result,
};
use nsbundle_log::{debug, info, trace, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Message source over several namespaced basename specifications.
///
/// ```
/// use nsbundle_i18n::{Locale, MemoryLoader, MessageTable, PrefixedMessageSource, ResolverConfig};
///
/// let lang: MessageTable = [("de", "German")].into_iter().collect();
/// let global: MessageTable = [("title", "Welcome, {0}!")].into_iter().collect();
/// let loader = MemoryLoader::new()
///     .with_default("global/languages/lang", lang)
///     .with_default("global/global", global);
///
/// let mut source = PrefixedMessageSource::new(ResolverConfig::default(), loader);
/// source.add_basenames(["global/global, lang#global/languages/lang"]);
///
/// let en = Locale::en();
/// assert_eq!(source.get_message("lang.de", &[], &en).unwrap(), "German");
/// assert_eq!(source.get_message("title", &["Ada"], &en).unwrap(), "Welcome, Ada!");
/// ```
pub struct PrefixedMessageSource<L> {
    resolver: BundleResolver<L>,
    basenames: Vec<String>,
    /// Bundles keyed by (basename, locale tag)
    cache: RwLock<HashMap<(String, String), CachedBundle>>,
    use_code_as_default_message: bool,
}

/// Outcome of resolving one basename for one locale.
#[derive(Debug, Clone)]
enum CachedBundle {
    Resolved(Arc<NamespacedBundle>),
    /// The loader had no table for `path`; kept until the cache is cleared
    Missing { path: String },
}

impl CachedBundle {
    fn to_result(&self, locale: &Locale) -> Result<Arc<NamespacedBundle>> {
        match self {
            CachedBundle::Resolved(bundle) => Ok(Arc::clone(bundle)),
            CachedBundle::Missing { path } => Err(BundleError::missing_resource(path, locale)),
        }
    }
}

impl<L> std::fmt::Debug for PrefixedMessageSource<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixedMessageSource")
            .field("basenames", &self.basenames)
            .field("cached", &self.cache.read().len())
            .field("use_code_as_default_message", &self.use_code_as_default_message)
            .finish_non_exhaustive()
    }
}

impl<L: BundleLoader> PrefixedMessageSource<L> {
    /// Create a source without basenames.
    pub fn new(config: ResolverConfig, loader: L) -> Self {
        Self {
            resolver: BundleResolver::new(config, loader),
            basenames: Vec::new(),
            cache: RwLock::new(HashMap::new()),
            use_code_as_default_message: false,
        }
    }

    /// Return the message code itself instead of failing when no basename
    /// provides it.
    pub fn with_code_as_default_message(mut self, enabled: bool) -> Self {
        self.use_code_as_default_message = enabled;
        self
    }

    /// Append basename specifications. Each one is resolved into its own
    /// bundle; surrounding whitespace is trimmed and duplicates are ignored.
    pub fn add_basenames<I, S>(&mut self, basenames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for basename in basenames {
            let basename = basename.as_ref().trim();
            if !self.basenames.iter().any(|b| b == basename) {
                self.basenames.push(basename.to_string());
            }
        }
    }

    /// Replace all basename specifications and drop cached bundles.
    pub fn set_basenames<I, S>(&mut self, basenames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.basenames.clear();
        self.add_basenames(basenames);
        self.clear_cache();
    }

    pub fn basenames(&self) -> &[String] {
        &self.basenames
    }

    pub fn config(&self) -> &ResolverConfig {
        self.resolver.config()
    }

    /// The bundle for one basename specification and locale, resolving it
    /// on first use.
    ///
    /// A missing resource is remembered as well, so the loader is not asked
    /// again for that basename and locale until [`clear_cache`](Self::clear_cache).
    /// Other errors are not cached. Concurrent first calls may both resolve;
    /// the first outcome stored is the one every caller gets.
    pub fn bundle(&self, basename: &str, locale: &Locale) -> Result<Arc<NamespacedBundle>> {
        let key = (basename.to_string(), locale.tag());

        if let Some(cached) = self.cache.read().get(&key) {
            trace!("Bundle cache hit for '{}' ({})", basename, locale);
            return cached.to_result(locale);
        }

        let outcome = match self.resolver.resolve(basename, locale) {
            Ok(bundle) => {
                debug!("Cached bundle for '{}' ({})", basename, locale);
                CachedBundle::Resolved(Arc::new(bundle))
            }
            Err(BundleError::MissingResource { path, .. }) => {
                warn!(
                    "No bundle at '{}' for locale {}, skipping basename '{}'",
                    path, locale, basename
                );
                CachedBundle::Missing { path }
            }
            Err(err) => return Err(err),
        };

        let mut cache = self.cache.write();
        cache.entry(key).or_insert(outcome).to_result(locale)
    }

    /// Drop every cached bundle.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.write();
        if !cache.is_empty() {
            info!("Clearing {} cached message bundles", cache.len());
        }
        cache.clear();
    }

    /// Resolve the raw message for `code`.
    ///
    /// Basenames are consulted in order and the first bundle containing the
    /// code wins. A basename whose resource is missing for the locale is
    /// logged and skipped; any other error aborts the lookup.
    fn resolve_code(&self, code: &str, locale: &Locale) -> Result<Option<String>> {
        for basename in &self.basenames {
            let bundle = match self.bundle(basename, locale) {
                Ok(bundle) => bundle,
                Err(err) if err.is_missing_resource() => {
                    trace!("Skipping basename '{}': {}", basename, err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(message) = bundle.get(code) {
                return Ok(Some(message.to_string()));
            }
        }

        Ok(None)
    }

    /// Look up and format the message for `code`.
    ///
    /// `args` replace the positional placeholders `{0}`, `{1}`, ... Fails
    /// with [`BundleError::MissingKey`] when no basename provides the code,
    /// unless the code is configured as default message.
    pub fn get_message(&self, code: &str, args: &[&str], locale: &Locale) -> Result<String> {
        match self.resolve_code(code, locale)? {
            Some(message) => Ok(format_message(&message, args)),
            None if self.use_code_as_default_message => Ok(code.to_string()),
            None => Err(BundleError::missing_key(code, locale)),
        }
    }

    /// Like [`get_message`](Self::get_message), formatting `default` when
    /// the code cannot be resolved for any reason.
    pub fn get_message_or(
        &self,
        code: &str,
        args: &[&str],
        default: &str,
        locale: &Locale,
    ) -> String {
        match self.resolve_code(code, locale) {
            Ok(Some(message)) => format_message(&message, args),
            Ok(None) => format_message(default, args),
            Err(err) => {
                warn!("Falling back to default message for '{}': {}", code, err);
                format_message(default, args)
            }
        }
    }
}

/// Replace `{0}`, `{1}`, ... with the matching argument. Placeholders
/// without an argument are left as they are.
pub fn format_message(template: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let arg = after[..close].trim().parse::<usize>().ok()?;
            args.get(arg).map(|value| (value, close))
        });

        match replaced {
            Some((value, close)) => {
                result.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

//! Bundle resolution
//!
//! Turns a basename specification into a [`NamespacedBundle`] for one
//! locale by loading every referenced table and folding them together in
//! specification order.

use crate::basename::parse_basenames;
use crate::{BundleLoader, Locale, NamespacedBundle, ResolverConfig, Result};
use nsbundle_log::debug;

/// Resolves basename specifications through a [`BundleLoader`].
///
/// # Example
///
/// ```
/// use nsbundle_i18n::{BundleResolver, Locale, MemoryLoader, MessageTable, ResolverConfig};
///
/// let world: MessageTable = [("test.key", "value")].into_iter().collect();
/// let loader = MemoryLoader::new().with("world", &Locale::en(), world);
///
/// let resolver = BundleResolver::new(ResolverConfig::default(), loader);
/// let bundle = resolver.resolve("hello#world", &Locale::en()).unwrap();
///
/// assert_eq!(bundle.lookup("hello.test.key").unwrap(), "value");
/// ```
#[derive(Debug, Clone)]
pub struct BundleResolver<L> {
    config: ResolverConfig,
    loader: L,
}

impl<L: BundleLoader> BundleResolver<L> {
    /// Create a resolver. The configuration has already been validated.
    pub fn new(config: ResolverConfig, loader: L) -> Self {
        Self { config, loader }
    }

    /// Resolve `specification` for `locale`.
    ///
    /// Entries are loaded left to right. The first loader failure aborts
    /// the whole resolution and is returned as is; nothing partial is kept.
    pub fn resolve(&self, specification: &str, locale: &Locale) -> Result<NamespacedBundle> {
        let mut builder = NamespacedBundle::builder(self.config.separator(), locale.clone());

        for entry in parse_basenames(specification) {
            let path = self.config.bundle_path(&entry.path);
            let table = self.loader.load(&path, locale)?;

            debug!(
                "Resolved '{}' ({} messages) into {} for locale {}",
                path,
                table.len(),
                entry.namespace.as_deref().unwrap_or("<default>"),
                locale
            );

            builder.add(entry.namespace.as_deref(), table);
        }

        Ok(builder.build())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BundleError, MemoryLoader, MessageTable};
    use parking_lot::Mutex;

    fn table(entries: &[(&str, &str)]) -> MessageTable {
        entries.iter().copied().collect()
    }

    /// Records every path it is asked for.
    struct RecordingLoader {
        inner: MemoryLoader,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingLoader {
        fn new(inner: MemoryLoader) -> Self {
            Self {
                inner,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl BundleLoader for RecordingLoader {
        fn load(&self, path: &str, locale: &Locale) -> Result<MessageTable> {
            self.calls.lock().push(path.to_string());
            self.inner.load(path, locale)
        }
    }

    fn loader() -> MemoryLoader {
        MemoryLoader::new()
            .with_default("world", table(&[("test.key", "value")]))
            .with_default("other", table(&[("another", "key")]))
            .with_default("another", table(&[("yak", "yav")]))
    }

    #[test]
    fn test_resolve_namespaced_entry() {
        let resolver = BundleResolver::new(ResolverConfig::default(), loader());
        let bundle = resolver.resolve("hello#world", &Locale::en()).unwrap();

        assert_eq!(bundle.lookup("hello.test.key").unwrap(), "value");
        assert!(bundle.default_table().is_none());
        assert_eq!(bundle.separator(), ".");
    }

    #[test]
    fn test_resolve_default_entries_are_unioned() {
        let resolver = BundleResolver::new(ResolverConfig::default(), loader());
        let bundle = resolver.resolve("other, another", &Locale::en()).unwrap();

        assert_eq!(bundle.lookup("another").unwrap(), "key");
        assert_eq!(bundle.lookup("yak").unwrap(), "yav");
        assert_eq!(bundle.namespaces().count(), 0);
    }

    #[test]
    fn test_hash_with_empty_namespace_targets_default() {
        let resolver = BundleResolver::new(ResolverConfig::default(), loader());
        let bundle = resolver.resolve(" #world", &Locale::en()).unwrap();

        assert_eq!(bundle.lookup("test.key").unwrap(), "value");
        assert_eq!(bundle.namespaces().count(), 0);
    }

    #[test]
    fn test_later_entries_win() {
        let loader = MemoryLoader::new()
            .with_default("a", table(&[("k", "from a"), ("only_a", "1")]))
            .with_default("b", table(&[("k", "from b")]));
        let resolver = BundleResolver::new(ResolverConfig::default(), loader);

        let bundle = resolver.resolve("ns#a, ns#b, a, b", &Locale::en()).unwrap();
        assert_eq!(bundle.lookup("ns.k").unwrap(), "from b");
        assert_eq!(bundle.lookup("ns.only_a").unwrap(), "1");
        assert_eq!(bundle.lookup("k").unwrap(), "from b");

        let reversed = resolver.resolve("b, a", &Locale::en()).unwrap();
        assert_eq!(reversed.lookup("k").unwrap(), "from a");
    }

    #[test]
    fn test_fail_fast_on_missing_resource() {
        let recording = RecordingLoader::new(loader());
        let resolver = BundleResolver::new(ResolverConfig::default(), &recording);

        let err = resolver
            .resolve("world, missing, other", &Locale::en())
            .unwrap_err();

        assert!(matches!(err, BundleError::MissingResource { ref path, .. } if path == "missing"));
        assert_eq!(recording.calls(), vec!["world", "missing"]);
    }

    #[test]
    fn test_empty_path_reaches_loader() {
        let recording = RecordingLoader::new(loader());
        let resolver = BundleResolver::new(ResolverConfig::default(), &recording);

        let err = resolver.resolve("hello#", &Locale::en()).unwrap_err();

        assert!(err.is_missing_resource());
        assert_eq!(recording.calls(), vec![""]);
    }

    #[test]
    fn test_prefix_and_suffix_are_applied() {
        let inner = MemoryLoader::new()
            .with_default("/WEB-INF/messages/login/global.msg", table(&[("user", "User")]));
        let recording = RecordingLoader::new(inner);
        let config = ResolverConfig::default()
            .with_name_prefix(Some("/WEB-INF/messages/"))
            .with_name_suffix(Some(".msg"));
        let resolver = BundleResolver::new(config, &recording);

        let bundle = resolver.resolve("login#login/global", &Locale::en()).unwrap();

        assert_eq!(bundle.lookup("login.user").unwrap(), "User");
        assert_eq!(recording.calls(), vec!["/WEB-INF/messages/login/global.msg"]);
    }

    #[test]
    fn test_custom_separator() {
        let config = ResolverConfig::new("/").unwrap();
        let resolver = BundleResolver::new(config, loader());
        let bundle = resolver.resolve("hello#world", &Locale::en()).unwrap();

        assert_eq!(bundle.lookup("hello/test.key").unwrap(), "value");
        assert!(bundle.lookup("hello.test.key").is_err());
    }

    #[test]
    fn test_empty_specification_yields_empty_bundle() {
        let recording = RecordingLoader::new(loader());
        let resolver = BundleResolver::new(ResolverConfig::default(), &recording);

        let bundle = resolver.resolve(" , ", &Locale::en()).unwrap();

        assert!(bundle.default_table().is_none());
        assert_eq!(bundle.namespaces().count(), 0);
        assert!(recording.calls().is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = BundleResolver::new(ResolverConfig::default(), loader());
        let basenames = "hello#world, other, another, hello#other";

        let first = resolver.resolve(basenames, &Locale::en()).unwrap();
        let second = resolver.resolve(basenames, &Locale::en()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_locale_is_passed_to_loader() {
        let loader = MemoryLoader::new()
            .with("world", &Locale::en(), table(&[("greeting", "Hello")]))
            .with("world", &Locale::de(), table(&[("greeting", "Hallo")]));
        let resolver = BundleResolver::new(ResolverConfig::default(), loader);

        let de = resolver.resolve("hi#world", &Locale::de_de()).unwrap();
        assert_eq!(de.lookup("hi.greeting").unwrap(), "Hallo");
        assert_eq!(de.locale(), &Locale::de_de());

        let err = resolver.resolve("hi#world", &Locale::fr()).unwrap_err();
        assert!(err.is_missing_resource());
    }
}

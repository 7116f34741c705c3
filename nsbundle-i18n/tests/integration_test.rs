//! Integration tests for nsbundle-i18n

use nsbundle_i18n::*;
use std::fs;

fn table(entries: &[(&str, &str)]) -> MessageTable {
    entries.iter().copied().collect()
}

fn memory_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_default("world", table(&[("test.key", "value")]))
        .with_default("other", table(&[("another", "key")]))
        .with_default("another", table(&[("yak", "yav")]))
        .with_default("login/a", table(&[("user", "User")]))
        .with_default("login/b", table(&[("password", "Password")]))
}

#[test]
fn test_namespaced_lookup() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = resolver.resolve("hello#world", &Locale::en()).unwrap();

    assert_eq!(bundle.lookup("hello.test.key").unwrap(), "value");
}

#[test]
fn test_default_tables_are_unioned() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = resolver.resolve("other,another", &Locale::en()).unwrap();

    assert_eq!(bundle.lookup("another").unwrap(), "key");
    assert_eq!(bundle.lookup("yak").unwrap(), "yav");
}

#[test]
fn test_unknown_namespace_is_missing_key() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = resolver.resolve("other,another", &Locale::en()).unwrap();

    let err = bundle.lookup("non-existing.key").unwrap_err();
    assert!(err.is_missing_key());
    assert!(!bundle.default_table().unwrap().is_empty());
}

#[test]
fn test_unnamespaced_bundle_resolves_dotted_keys() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = resolver.resolve("world", &Locale::en()).unwrap();

    assert_eq!(bundle.lookup("test.key").unwrap(), "value");
}

#[test]
fn test_same_prefix_entries_are_merged() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = resolver
        .resolve("login#login/a, login#login/b", &Locale::en())
        .unwrap();

    assert_eq!(bundle.lookup("login.user").unwrap(), "User");
    assert_eq!(bundle.lookup("login.password").unwrap(), "Password");
}

#[test]
fn test_resolve_twice_is_structurally_equal() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let basenames = "hello#world, other, login#login/a";

    assert_eq!(
        resolver.resolve(basenames, &Locale::en()).unwrap(),
        resolver.resolve(basenames, &Locale::en()).unwrap()
    );
}

#[test]
fn test_empty_separator_rejected_before_resolution() {
    let err = ResolverConfig::new("").unwrap_err();
    assert!(matches!(err, BundleError::InvalidConfiguration(_)));

    let err = ResolverConfig::from_json(r#"{"separator": "  "}"#).unwrap_err();
    assert!(matches!(err, BundleError::InvalidConfiguration(_)));
}

#[test]
fn test_missing_resource_aborts_resolution() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());

    let err = resolver
        .resolve("hello#world, hello#nowhere", &Locale::en())
        .unwrap_err();
    assert!(err.is_missing_resource());
    assert!(err.to_string().contains("nowhere"));

    assert!(resolver.resolve("hello#", &Locale::en()).unwrap_err().is_missing_resource());
}

#[test]
fn test_file_backed_message_source() {
    let dir = tempfile::tempdir().unwrap();
    let messages = dir.path().join("messages");
    fs::create_dir_all(messages.join("global/languages")).unwrap();
    fs::create_dir_all(messages.join("login")).unwrap();

    fs::write(
        messages.join("global/global.properties"),
        "title = Welcome\ngreeting = Hello, {0}!\n",
    )
    .unwrap();
    fs::write(
        messages.join("global/global_de.properties"),
        "title = Willkommen\ngreeting = Hallo, {0}!\n",
    )
    .unwrap();
    fs::write(
        messages.join("global/languages/lang.json"),
        r#"{"de": "German", "en": "English"}"#,
    )
    .unwrap();
    fs::write(
        messages.join("login/global_en.json"),
        r#"{"form": {"user": "User name", "password": "Password"}}"#,
    )
    .unwrap();

    let config = ResolverConfig::from_json(r#"{"name_prefix": "messages/"}"#).unwrap();
    let mut source = PrefixedMessageSource::new(config, FileLoader::new(dir.path()));
    source.add_basenames([
        "global/global, lang#global/languages/lang",
        "login#login/global",
    ]);

    let en_us: Locale = "en-US".parse().unwrap();
    assert_eq!(source.get_message("title", &[], &en_us).unwrap(), "Welcome");
    assert_eq!(source.get_message("lang.de", &[], &en_us).unwrap(), "German");
    assert_eq!(source.get_message("login.form.user", &[], &en_us).unwrap(), "User name");
    assert_eq!(
        source.get_message("greeting", &["Ada"], &en_us).unwrap(),
        "Hello, Ada!"
    );

    let de = Locale::de_de();
    assert_eq!(source.get_message("title", &[], &de).unwrap(), "Willkommen");
    // no German login table: that basename is skipped
    assert!(source.get_message("login.form.user", &[], &de).unwrap_err().is_missing_key());
    assert_eq!(
        source.get_message_or("login.form.user", &[], "User", &de),
        "User"
    );
}

#[test]
fn test_bundle_shared_between_threads() {
    let resolver = BundleResolver::new(ResolverConfig::default(), memory_loader());
    let bundle = std::sync::Arc::new(
        resolver
            .resolve("hello#world, other", &Locale::en())
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bundle = std::sync::Arc::clone(&bundle);
            std::thread::spawn(move || {
                assert_eq!(bundle.lookup("hello.test.key").unwrap(), "value");
                assert_eq!(bundle.lookup("another").unwrap(), "key");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

//! Integration tests for nsbundle-log

use nsbundle_log::*;

#[test]
fn test_runtime_level_override() {
    init();
    let original = current_level();

    set_level(Level::Error);
    assert_eq!(current_level(), Level::Error);
    assert!(is_level_enabled(Level::Error));
    assert!(!is_level_enabled(Level::Warn));
    assert!(!is_level_enabled(Level::Off));

    set_debug(true);
    assert!(is_debug_enabled());
    assert_eq!(current_level(), Level::Debug);

    set_debug(false);
    set_level(original);
}

#[test]
fn test_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.level, Level::Info);
    assert_eq!(config.format, Format::Json);
    assert!(!config.debug);
}

//! Tests for wrapper configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [proxy]
        capability_detection = false
        disabled_capabilities = ["bounds", "indexed_access"]

        [logging]
        trace_dispatch = false
    "#;

    let config = WrapperConfig::from_toml_str(toml).unwrap();
    assert!(!config.proxy.capability_detection);
    assert_eq!(config.proxy.disabled_capabilities.len(), 2);
    assert!(config.is_capability_disabled("indexed_access"));
    assert!(!config.logging.trace_dispatch);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        proxy:
          capability_detection: true
          disabled_capabilities:
            - bounds
        logging:
          trace_dispatch: true
    "#;

    let config = WrapperConfig::from_yaml_str(yaml).unwrap();
    assert!(config.proxy.capability_detection);
    assert!(config.is_capability_disabled("bounds"));
    assert!(config.logging.trace_dispatch);
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = WrapperConfig::from_toml_str("").unwrap();
    assert_eq!(config, WrapperConfig::default());
    assert!(config.proxy.capability_detection);
    assert!(config.logging.trace_dispatch);
    assert!(config.proxy.disabled_capabilities.is_empty());
}

#[test]
fn test_partial_section_keeps_defaults() {
    let config = WrapperConfig::from_toml_str(
        r#"
        [proxy]
        disabled_capabilities = ["bounds"]
    "#,
    )
    .unwrap();
    assert!(config.proxy.capability_detection);
    assert!(config.logging.trace_dispatch);
}

#[test]
fn test_builder() {
    let config = WrapperConfig::new()
        .with_capability_detection(false)
        .with_disabled_capability("bounds")
        .with_trace_dispatch(false);

    assert!(!config.proxy.capability_detection);
    assert!(config.is_capability_disabled("bounds"));
    assert!(!config.is_capability_disabled("indexed_access"));
    assert!(!config.logging.trace_dispatch);
}

#[test]
fn test_validate_rejects_duplicates() {
    let config = WrapperConfig::new()
        .with_disabled_capability("bounds")
        .with_disabled_capability("bounds");
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_blank_names() {
    let config = WrapperConfig::new().with_disabled_capability("  ");
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file() {
    let result = WrapperConfig::load("/nonexistent/milpforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_invalid_toml() {
    let result = WrapperConfig::from_toml_str("[proxy\ncapability_detection = ");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

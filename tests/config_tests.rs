// Host-side tests for configuration parsing and fallback behavior.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}

use config::*;

#[test]
fn defaults_match_the_documented_fallback() {
    let cfg = GlobeConfig::default();
    assert_eq!(cfg.country_color, 0x000000);
    assert_eq!(cfg.border_color, 0xffffff);
    assert_eq!(cfg.globe_fill_color, 0x000000);
    assert_eq!(cfg.highlight_color, 0xffffff);
    assert!((cfg.rotation_speed - 0.002).abs() < 1e-9);
    assert!((cfg.country_scale - 1.0).abs() < 1e-6);
    assert!((cfg.border_scale - 1.01).abs() < 1e-6);
    assert!((cfg.globe_fill_scale - 0.98).abs() < 1e-6);
    assert!((cfg.highlight_scale - 1.02).abs() < 1e-6);
    assert!((cfg.floating_amplitude - 0.15).abs() < 1e-6);
    assert!((cfg.floating_speed - 0.5).abs() < 1e-6);
}

#[test]
fn document_extrusions_derive_the_scale_factors() {
    let body = r#"{
        "extrusions": { "country": { "above": 0.05, "below": 0.02 } },
        "border": { "height": 0.03 }
    }"#;
    let cfg = config_from_body(body);
    assert!((cfg.highlight_scale - 1.05).abs() < 1e-6);
    assert!((cfg.country_scale - 0.98).abs() < 1e-6);
    assert!((cfg.border_scale - 1.03).abs() < 1e-6);
    // untouched fields keep their defaults
    assert!((cfg.rotation_speed - 0.002).abs() < 1e-9);
}

#[test]
fn missing_fields_mean_zero() {
    let cfg = config_from_body("{}");
    assert!((cfg.highlight_scale - 1.0).abs() < 1e-6);
    assert!((cfg.country_scale - 1.0).abs() < 1e-6);
    assert!((cfg.border_scale - 1.0).abs() < 1e-6);

    let partial = config_from_body(r#"{ "extrusions": { "country": { "above": 0.1 } } }"#);
    assert!((partial.highlight_scale - 1.1).abs() < 1e-6);
    assert!((partial.country_scale - 1.0).abs() < 1e-6);
}

#[test]
fn malformed_documents_fall_back_to_defaults() {
    assert_eq!(config_from_body("not json"), GlobeConfig::default());
    assert_eq!(config_from_body(""), GlobeConfig::default());
    assert_eq!(config_from_body(r#"{ "extrusions": 3 }"#), GlobeConfig::default());
}

#[test]
fn parse_errors_are_typed() {
    assert!(matches!(
        parse_document("nope"),
        Err(ConfigError::Parse(_))
    ));
    assert!(parse_document("{}").is_ok());
}

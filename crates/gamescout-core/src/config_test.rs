use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("GEMINI_API_KEY", "test-key");
    m
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
        "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GEMINI_API_KEY"),
        "expected MissingEnvVar(GEMINI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_trims_api_key() {
    let mut map = HashMap::new();
    map.insert("GEMINI_API_KEY", "  abc123\n");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_key, "abc123");
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.api_key, "test-key");
    assert_eq!(cfg.model, "gemini-2.5-flash");
    assert_eq!(
        cfg.api_base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert_eq!(cfg.request_timeout_secs, 90);
    assert_eq!(cfg.user_agent, "gamescout/0.1 (deal-scanner)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn build_app_config_model_override() {
    let mut map = full_env();
    map.insert("GAMESCOUT_MODEL", "gemini-2.0-flash");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model, "gemini-2.0-flash");
}

#[test]
fn build_app_config_base_url_override() {
    let mut map = full_env();
    map.insert("GAMESCOUT_API_BASE_URL", "http://127.0.0.1:8080");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:8080");
}

#[test]
fn build_app_config_request_timeout_override() {
    let mut map = full_env();
    map.insert("GAMESCOUT_REQUEST_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 15);
}

#[test]
fn build_app_config_request_timeout_invalid() {
    let mut map = full_env();
    map.insert("GAMESCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GAMESCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GAMESCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_request_timeout_zero_rejected() {
    let mut map = full_env();
    map.insert("GAMESCOUT_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GAMESCOUT_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(GAMESCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_log_level_override() {
    let mut map = full_env();
    map.insert("GAMESCOUT_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn app_config_debug_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"), "api key leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn build_app_config_blank_optional_vars_use_defaults() {
    let mut map = full_env();
    map.insert("GAMESCOUT_MODEL", "");
    map.insert("GAMESCOUT_API_BASE_URL", "  ");
    map.insert("GAMESCOUT_REQUEST_TIMEOUT_SECS", " ");
    map.insert("GAMESCOUT_LOG_LEVEL", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.request_timeout_secs, 90);
    assert_eq!(cfg.log_level, "info");
}

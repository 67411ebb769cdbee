//! Coercion and constraint validation tests.
//!
//! Responsibilities:
//! - Test that malformed values fail with the right issue kind.
//! - Test that every failing field is reported in one error.
//! - Test that secret values never appear in error output.

use crate::loader::builder::ConfigLoader;
use crate::loader::error::{ConfigError, FieldIssue, IssueKind, ValidationErrors, ValueSource};

fn errors_for(env: &[(&str, &str)]) -> ValidationErrors {
    match ConfigLoader::new().with_env_vars(env.iter().copied()).build() {
        Err(ConfigError::Invalid(errors)) => errors,
        Err(other) => panic!("expected validation errors, got {other}"),
        Ok(_) => panic!("expected validation errors for {env:?}, got Ok"),
    }
}

fn single_issue(env: &[(&str, &str)]) -> FieldIssue {
    let errors = errors_for(env);
    assert_eq!(errors.len(), 1, "expected exactly one issue, got: {errors}");
    errors.issues()[0].clone()
}

#[test]
fn test_zero_expiry_is_constraint_violation() {
    let issue = single_issue(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]);
    assert_eq!(issue.key, "ACCESS_TOKEN_EXPIRE_MINUTES");
    assert_eq!(issue.kind, IssueKind::Constraint);
}

#[test]
fn test_negative_expiry_is_constraint_violation() {
    let issue = single_issue(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "-15")]);
    assert_eq!(issue.kind, IssueKind::Constraint);
    assert!(issue.message.contains("-15"));
}

#[test]
fn test_non_numeric_expiry_is_coercion_failure() {
    let issue = single_issue(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "not-a-number")]);
    assert_eq!(issue.kind, IssueKind::TypeCoercion);
    assert_eq!(issue.source, ValueSource::Environment);
    assert!(issue.message.contains("\"not-a-number\""));
}

#[test]
fn test_unrecognized_boolean_is_coercion_failure() {
    let issue = single_issue(&[("DEBUG", "sometimes")]);
    assert_eq!(issue.key, "DEBUG");
    assert_eq!(issue.kind, IssueKind::TypeCoercion);
}

#[test]
fn test_unknown_algorithm_is_coercion_failure() {
    let issue = single_issue(&[("ALGORITHM", "hs256")]);
    assert_eq!(issue.key, "ALGORITHM");
    assert_eq!(issue.kind, IssueKind::TypeCoercion);
    assert!(issue.message.contains("HS256"));
}

#[test]
fn test_prefix_must_start_with_slash() {
    let issue = single_issue(&[("API_V1_PREFIX", "api/v1")]);
    assert_eq!(issue.kind, IssueKind::Constraint);

    let issue = single_issue(&[("API_V1_PREFIX", "")]);
    assert_eq!(issue.kind, IssueKind::Constraint);
    assert!(issue.message.contains("empty"));
}

#[test]
fn test_prefix_with_route_captures_rejected() {
    for prefix in ["/api/:v1", "/api/*rest", "/api/{", "/api/{*rest}", "/api/{version}"] {
        let issue = single_issue(&[("API_V1_PREFIX", prefix)]);
        assert_eq!(issue.key, "API_V1_PREFIX", "{prefix}");
        assert_eq!(issue.kind, IssueKind::Constraint, "{prefix}");
        assert!(issue.message.contains(prefix), "{prefix}: {}", issue.message);
    }
}

#[test]
fn test_blank_project_name_rejected() {
    let issue = single_issue(&[("PROJECT_NAME", "   ")]);
    assert_eq!(issue.key, "PROJECT_NAME");
    assert_eq!(issue.kind, IssueKind::Constraint);
}

#[test]
fn test_version_must_be_semver_shaped() {
    let issue = single_issue(&[("VERSION", "v1")]);
    assert_eq!(issue.key, "VERSION");
    assert_eq!(issue.kind, IssueKind::Constraint);
}

#[test]
fn test_origin_list_reports_each_bad_entry() {
    let issue = single_issue(&[(
        "ALLOWED_ORIGINS",
        "http://ok.example.com,*,https://example.com/path",
    )]);
    assert_eq!(issue.kind, IssueKind::Constraint);
    assert!(issue.message.contains("\"*\""));
    assert!(issue.message.contains("https://example.com/path"));
    assert!(!issue.message.contains("\"http://ok.example.com\""));
}

#[test]
fn test_malformed_origin_json_is_coercion_failure() {
    let issue = single_issue(&[("ALLOWED_ORIGINS", "[\"http://a.com\",")]);
    assert_eq!(issue.kind, IssueKind::TypeCoercion);
}

#[test]
fn test_origin_order_preserved_from_comma_list() {
    let settings = ConfigLoader::new()
        .with_env_vars([("ALLOWED_ORIGINS", "http://a.com,http://b.com")])
        .build()
        .unwrap();
    assert_eq!(settings.allowed_origins, vec!["http://a.com", "http://b.com"]);
}

#[test]
fn test_websocket_url_requires_ws_scheme() {
    let issue = single_issue(&[("WEBSOCKET_URL", "http://localhost:8000/ws")]);
    assert_eq!(issue.key, "WEBSOCKET_URL");
    assert_eq!(issue.kind, IssueKind::Constraint);
}

#[test]
fn test_port_zero_and_out_of_range() {
    let issue = single_issue(&[("PORT", "0")]);
    assert_eq!(issue.kind, IssueKind::Constraint);

    let issue = single_issue(&[("PORT", "70000")]);
    assert_eq!(issue.kind, IssueKind::TypeCoercion);
}

#[test]
fn test_invalid_database_url_does_not_leak_value() {
    let secret_value = "hunter2-plaintext-password";
    let errors = errors_for(&[("DATABASE_URL", secret_value)]);

    let issue = errors.get("DATABASE_URL").unwrap();
    assert_eq!(issue.kind, IssueKind::Constraint);
    assert!(!errors.to_string().contains(secret_value));
    assert!(!format!("{:?}", errors).contains(secret_value));
}

#[test]
fn test_default_secret_key_rejected_in_production() {
    let issue = single_issue(&[("DEBUG", "false")]);
    assert_eq!(issue.key, "SECRET_KEY");
    assert_eq!(issue.kind, IssueKind::Constraint);
    assert_eq!(issue.source, ValueSource::Default);
}

#[test]
fn test_default_secret_key_allowed_in_debug() {
    let settings = ConfigLoader::new()
        .with_env_vars([("DEBUG", "true")])
        .build()
        .unwrap();
    assert!(settings.debug);
}

#[test]
fn test_empty_secret_key_rejected() {
    let issue = single_issue(&[("SECRET_KEY", "")]);
    assert_eq!(issue.key, "SECRET_KEY");
    assert_eq!(issue.kind, IssueKind::Constraint);
}

#[test]
fn test_all_failures_reported_together() {
    let errors = errors_for(&[
        ("DEBUG", "maybe"),
        ("ACCESS_TOKEN_EXPIRE_MINUTES", "-1"),
        ("ALGORITHM", "none"),
        ("WEBSOCKET_URL", "not a url"),
        ("PORT", "eighty"),
    ]);

    let keys: Vec<&str> = errors.issues().iter().map(|issue| issue.key).collect();
    assert_eq!(errors.len(), 5, "{errors}");
    for key in [
        "DEBUG",
        "ACCESS_TOKEN_EXPIRE_MINUTES",
        "ALGORITHM",
        "WEBSOCKET_URL",
        "PORT",
    ] {
        assert!(keys.contains(&key), "{key} missing from {keys:?}");
    }

    let rendered = errors.to_string();
    assert!(rendered.starts_with("invalid configuration (5 fields):"));
}

#[test]
fn test_coercion_failures_listed_before_constraint_failures() {
    let errors = errors_for(&[("VERSION", "latest"), ("PORT", "eighty")]);
    assert_eq!(errors.issues()[0].kind, IssueKind::TypeCoercion);
    assert_eq!(errors.issues()[0].key, "PORT");
    assert_eq!(errors.issues()[1].kind, IssueKind::Constraint);
    assert_eq!(errors.issues()[1].key, "VERSION");
}

#[test]
fn test_invalid_value_is_not_silently_replaced_by_default() {
    // An invalid env value fails even though the file has a valid one.
    let result = ConfigLoader::new()
        .with_file_values([("ACCESS_TOKEN_EXPIRE_MINUTES", "60")])
        .with_env_vars([("ACCESS_TOKEN_EXPIRE_MINUTES", "sixty")])
        .build();
    assert!(result.is_err());
}

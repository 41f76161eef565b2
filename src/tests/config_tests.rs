use super::*;
use std::fs;

#[test]
fn test_empty_config_gives_defaults() {
    let config = parse_config("{}").unwrap();
    assert_eq!(resolve_checker_options(&config).unwrap(), CheckerOptions::default());
}

#[test]
fn test_parse_accepts_comments_and_trailing_commas() {
    let source = r#"
        {
            // line comment
            "inspection": {
                /* block
                   comment */
                "reportCategory": "warning",
                "maxInferenceDepth": 64,
            },
        }
    "#;
    let options = resolve_checker_options(&parse_config(source).unwrap()).unwrap();
    assert_eq!(options.report_category, DiagnosticCategory::Warning);
    assert_eq!(options.max_inference_depth, 64);
    assert!(options.trust_property_doc_hints);
}

#[test]
fn test_comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{ "extends": "./base//x,/*y*/.json" }"#).unwrap();
    assert_eq!(config.extends.as_deref(), Some("./base//x,/*y*/.json"));
}

#[test]
fn test_booleans_accept_strings() {
    let source = r#"{
        "inspection": { "trustPropertyDocHints": "false", "skipDocOnlyReturns": "off" }
    }"#;
    let options = resolve_checker_options(&parse_config(source).unwrap()).unwrap();
    assert!(!options.trust_property_doc_hints);
    assert!(!options.skip_doc_only_returns);
}

#[test]
fn test_invalid_boolean_string_is_an_error() {
    let source = r#"{ "inspection": { "trustPropertyDocHints": "maybe" } }"#;
    let error = parse_config(source).unwrap_err();
    assert!(format!("{error:#}").contains("failed to parse phpcast config JSON"));
}

#[test]
fn test_zero_depth_is_rejected() {
    let config = parse_config(r#"{ "inspection": { "maxInferenceDepth": 0 } }"#).unwrap();
    assert!(resolve_checker_options(&config).is_err());
}

#[test]
fn test_load_follows_extends() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("base.json"),
        r#"{ "inspection": { "reportCategory": "error", "trustPropertyDocHints": false } }"#,
    )
    .unwrap();
    let child = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &child,
        r#"{ "extends": "./base.json", "inspection": { "reportCategory": "warning" } }"#,
    )
    .unwrap();

    let options = load_checker_options(&child).unwrap();
    assert_eq!(options.report_category, DiagnosticCategory::Warning);
    assert!(!options.trust_property_doc_hints);
    assert!(options.skip_doc_only_returns);
}

#[test]
fn test_extends_cycle_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    fs::write(&a, r#"{ "extends": "./b.json" }"#).unwrap();
    fs::write(&b, r#"{ "extends": "./a.json" }"#).unwrap();

    let error = load_config(&a).unwrap_err();
    assert!(format!("{error:#}").contains("cycle"));
}

#[test]
fn test_missing_file_mentions_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let error = load_checker_options(&missing).unwrap_err();
    assert!(format!("{error:#}").contains("missing.json"));
}

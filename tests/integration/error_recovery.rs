//! Error recovery and edge case tests.
//!
//! Missing or malformed fragments are skipped; only unparsable numbers
//! reject a transcript, and the visualization boundary absorbs that.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reasongraph::config::{Config, VisualizationConfig};
use reasongraph::error::{AppError, ConfigError, ParseError};
use reasongraph::methods::{parse, ReasoningMethod};
use reasongraph::visualize::visualize;
use serial_test::serial;

#[test]
fn test_empty_input_renders_question_only() {
    for method in ReasoningMethod::all() {
        let response = parse(*method, "The model refused to answer.", "Q?").unwrap();
        let diagram = response.render(&VisualizationConfig::for_method(*method));

        let body: Vec<&str> = diagram
            .lines()
            .filter(|line| !line.trim_start().starts_with("classDef"))
            .collect();
        assert_eq!(
            body,
            vec![
                "<div class=\"mermaid\">",
                "graph TD",
                "    Q[\"Q?\"]",
                "    class Q question;",
                "    linkStyle default stroke:#666,stroke-width:2px;",
                "</div>",
            ],
            "{method}"
        );
    }
}

#[test]
fn test_unclosed_tags_are_skipped() {
    let raw = r#"<step number="1">dangling <step number="2">closed</step><answer>open"#;
    let response = parse(ReasoningMethod::Chain, raw, "Q?").unwrap();
    let reparsed = serde_json::to_value(&response).unwrap();
    assert_eq!(reparsed["steps"].as_array().unwrap().len(), 1);
    assert!(reparsed["answer"].is_null());
}

#[test]
fn test_numeric_failure_reported_not_raised() {
    let raw = r#"<node id="root" score="NaN-ish">r</node>"#;
    let result = visualize(
        ReasoningMethod::BeamSearch,
        raw,
        "Q?",
        &VisualizationConfig::default(),
    );
    assert!(!result.success);
    assert!(result.visualization.is_none());
    assert_eq!(result.raw_output, raw);
}

#[test]
fn test_parse_error_converts_to_app_error() {
    let err = parse(
        ReasoningMethod::SelfConsistency,
        "Path 99999999999: <answer>1</answer>",
        "Q?",
    )
    .unwrap_err();
    assert_eq!(err, ParseError::invalid_number("path id", "99999999999"));

    let app: AppError = err.into();
    assert!(app.to_string().starts_with("Parse error:"));
}

#[test]
#[serial]
fn test_config_rejects_oversized_width() {
    std::env::set_var("CHARS_PER_LINE", "500");
    let result = Config::from_env();
    std::env::remove_var("CHARS_PER_LINE");

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { var, .. }) if var == "CHARS_PER_LINE"
    ));
}

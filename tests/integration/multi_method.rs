//! Cross-method behavior: dispatch, determinism and concurrent use.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use reasongraph::config::{Config, VisualizationConfig};
use reasongraph::methods::{parse, parse_selected_method, MethodResponse, ReasoningMethod};
use reasongraph::visualize::visualize;
use test_case::test_case;

const TRANSCRIPTS: [(ReasoningMethod, &str); 6] = [
    (
        ReasoningMethod::Chain,
        r#"<step number="1">a</step><step number="2">b</step><answer>c</answer>"#,
    ),
    (
        ReasoningMethod::Tree,
        r#"<node id="r">root</node><node id="k" parent="r">kid</node><answer>kid</answer>"#,
    ),
    (
        ReasoningMethod::LeastToMost,
        r#"<step number="1"><question>q</question><reasoning>r</reasoning><answer>a</answer></step><final_answer>f</final_answer>"#,
    ),
    (
        ReasoningMethod::SelfConsistency,
        "Path 1: <answer>x</answer> Path 2: <answer>y</answer> Path 3: <answer>y</answer>",
    ),
    (
        ReasoningMethod::SelfRefine,
        r#"<step number="1">a</step><answer>b</answer><revision_check>c</revision_check><revised_step number="1" revises="1">d</revised_step><revised_answer>e</revised_answer>"#,
    ),
    (
        ReasoningMethod::BeamSearch,
        r#"<node id="root" score="1">r</node><node id="result" parent="root" score="1" path_score="2">x</node><answer>Best path (path_score: 2): x</answer>"#,
    ),
];

#[test]
fn test_render_is_idempotent_for_every_method() {
    for (method, raw) in TRANSCRIPTS {
        let response = parse(method, raw, "Q?").unwrap();
        let config = VisualizationConfig::for_method(method);
        assert_eq!(response.render(&config), response.render(&config), "{method}");
    }
}

#[test]
fn test_reparse_yields_identical_diagram() {
    for (method, raw) in TRANSCRIPTS {
        let config = VisualizationConfig::for_method(method);
        let first = parse(method, raw, "Q?").unwrap().render(&config);
        let second = parse(method, raw, "Q?").unwrap().render(&config);
        assert_eq!(first, second, "{method}");
    }
}

#[test]
fn test_response_survives_json_round_trip() {
    for (method, raw) in TRANSCRIPTS {
        let response = parse(method, raw, "Q?").unwrap();
        let json = serde_json::to_string(&response).unwrap();
        let back: MethodResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method(), method);
        let config = VisualizationConfig::default();
        assert_eq!(back.render(&config), response.render(&config));
    }
}

#[test]
fn test_concurrent_visualizations_do_not_interfere() {
    let expected: Vec<String> = TRANSCRIPTS
        .iter()
        .map(|(method, raw)| {
            visualize(*method, raw, "Q?", &VisualizationConfig::for_method(*method))
                .visualization
                .unwrap()
        })
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .flat_map(|_| TRANSCRIPTS.iter().zip(&expected))
            .map(|((method, raw), want)| {
                scope.spawn(move || {
                    let config = VisualizationConfig::for_method(*method);
                    let got = visualize(*method, raw, "Q?", &config).visualization.unwrap();
                    assert_eq!(&got, want);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}

#[test_case("<selected_method>cot</selected_method>", Some(ReasoningMethod::Chain) ; "chain")]
#[test_case("Use <selected_method>srf</selected_method>.", Some(ReasoningMethod::SelfRefine) ; "embedded")]
#[test_case("<selected_method>Chain</selected_method>", None ; "long name rejected")]
#[test_case("<selected_method></selected_method>", None ; "empty")]
#[test_case("no tag", None ; "missing")]
fn test_parse_selected_method(text: &str, expected: Option<ReasoningMethod>) {
    assert_eq!(parse_selected_method(text), expected);
}

#[test]
fn test_config_overrides_apply_per_method() {
    let config = Config {
        max_lines: Some(2),
        ..Config::default()
    };
    let layout = config.visualization_for(ReasoningMethod::Tree);
    assert_eq!(layout.max_lines, 2);
    assert_eq!(layout.max_chars_per_line, 40);
}

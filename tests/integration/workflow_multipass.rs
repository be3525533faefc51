//! Multi-pass method workflows: self-consistency and self-refine.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use reasongraph::config::VisualizationConfig;
use reasongraph::methods::{
    parse_self_consistency, parse_self_refine, render_self_consistency, render_self_refine,
};

use super::edges;

#[test]
fn test_self_consistency_voting() {
    let raw = "Path 1: <answer>42</answer>\nPath 2: <answer>42</answer>\nPath 3: <answer>7</answer>";
    let response = parse_self_consistency(raw, "Q?").unwrap();

    assert_eq!(response.final_answer.as_deref(), Some("42"));
    assert_eq!(response.votes_for("42"), 2);
    assert_eq!(response.votes_for("7"), 1);

    let diagram = render_self_consistency(&response, &VisualizationConfig::default());
    assert_eq!(
        edges(&diagram),
        vec![
            "    Q --> P1",
            "    P1 --> A1",
            "    Q --> P2",
            "    P2 --> A2",
            "    Q --> P3",
            "    P3 --> A3",
            "    A1 --> F",
            "    A2 --> F",
            "    A3 --> F",
        ]
    );
}

#[test]
fn test_self_consistency_answers_compared_after_trimming() {
    let raw = "Path 1:\n<answer>  yes \n</answer>\nPath 2:\n<answer>yes</answer>";
    let response = parse_self_consistency(raw, "Q?").unwrap();
    assert_eq!(response.vote_counts.len(), 1);
    assert_eq!(response.votes_for("yes"), 2);
}

#[test]
fn test_self_consistency_no_answers_has_no_final_node() {
    let raw = "Path 1: <step number=\"1\">hmm</step>";
    let response = parse_self_consistency(raw, "Q?").unwrap();
    assert_eq!(response.final_answer, None);

    let diagram = render_self_consistency(&response, &VisualizationConfig::default());
    assert!(!diagram.contains("    F["));
    assert_eq!(edges(&diagram), vec!["    Q --> P1", "    P1 --> P1S1"]);
}

#[test]
fn test_self_refine_workflow() {
    let raw = r#"
<step number="2">Then subtract 4.</step>
<step number="1">Start with 10.</step>
<answer>6</answer>
<revision_check>Step 2 should subtract 3.</revision_check>
<revised_step number="2" revises="2">Then subtract 3.</revised_step>
<revised_answer>7</revised_answer>"#;

    let response = parse_self_refine(raw, "Q?").unwrap();
    let initial: Vec<u32> = response.initial_steps().map(|s| s.number).collect();
    assert_eq!(initial, vec![1, 2]);

    let diagram = render_self_refine(&response, &VisualizationConfig::default());
    assert_eq!(
        edges(&diagram),
        vec![
            "    Q --> S1",
            "    S1 --> S2",
            "    S2 --> A",
            "    A --> RC",
            "    RC --> R2",
            "    S2 --> R2",
            "    R2 --> RA",
        ]
    );
}

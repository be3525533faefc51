//! Sequential method workflows: chain of thoughts and least-to-most.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use reasongraph::config::VisualizationConfig;
use reasongraph::methods::{
    parse_chain, parse_least_to_most, render_chain, render_least_to_most, ReasoningMethod,
};

use super::edges;

#[test]
fn test_chain_workflow() {
    let raw = r#"Let's think.
<step number="3">So the total is 12.</step>
<step number="1">There are 3 boxes.</step>
<step number="2">Each box holds 4 pens.</step>
<answer>12 pens</answer>"#;

    let response = parse_chain(raw, "How many pens?").unwrap();
    let numbers: Vec<u32> = response.steps.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let diagram = render_chain(&response, &VisualizationConfig::default());
    assert_eq!(
        edges(&diagram),
        vec!["    Q --> S1", "    S1 --> S2", "    S2 --> S3", "    S3 --> A"]
    );
    assert!(diagram.starts_with("<div class=\"mermaid\">\ngraph TD\n"));
    assert!(diagram.ends_with("</div>"));
}

#[test]
fn test_chain_gapped_ordinals() {
    let raw = r#"<step number="10">b</step><step number="5">a</step>"#;
    let response = parse_chain(raw, "Q?").unwrap();
    let diagram = render_chain(&response, &VisualizationConfig::default());
    assert_eq!(edges(&diagram), vec!["    Q --> S5", "    S5 --> S10"]);
}

#[test]
fn test_chain_long_step_is_truncated() {
    let long = "word ".repeat(100);
    let raw = format!("<step number=\"1\">{long}</step>");
    let response = parse_chain(&raw, "Q?").unwrap();

    let config = VisualizationConfig::new(20, 2).unwrap();
    let diagram = render_chain(&response, &config);
    let label_line = diagram.lines().find(|l| l.starts_with("    S1[")).unwrap();
    assert_eq!(label_line, "    S1[\"word word word word<br>word word word wo...\"]");
}

#[test]
fn test_least_to_most_workflow() {
    let raw = r#"
<step number="1">
<question>What is 2 + 3?</question>
<reasoning>Add the numbers.</reasoning>
<answer>5</answer>
</step>
<step number="2">
<question>What is 5 * 4?</question>
<reasoning>Multiply the previous answer by 4.</reasoning>
<answer>20</answer>
</step>
<final_answer>20</final_answer>"#;

    let response = parse_least_to_most(raw, "What is (2 + 3) * 4?").unwrap();
    assert_eq!(response.steps.len(), 2);
    assert_eq!(response.steps[1].question, "What is 5 * 4?");

    let config = VisualizationConfig::for_method(ReasoningMethod::LeastToMost);
    let diagram = render_least_to_most(&response, &config);
    assert_eq!(edges(&diagram).len(), 8);
    assert!(diagram.contains("    A2[\"A2: 20\"]"));
    assert!(diagram.contains("    class R2 reasoning;"));
    assert!(diagram.contains("    classDef decomp fill:#f3e5f5,stroke:#7b1fa2,stroke-width:2px;"));
}

//! Test utilities and fixtures.
//!
//! This module provides shared testing infrastructure:
//! - Sample transcripts, one per reasoning method
//! - Common test helpers
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::methods::ReasoningMethod;

/// Chain-of-thoughts transcript with out-of-order steps.
pub const CHAIN_TRANSCRIPT: &str = r#"Let's solve this step by step:
<step number="2">
In May she sold half as many: 48 / 2 = 24.
</step>
<step number="1">
Natalia sold 48 clips in April.
</step>
<step number="3">
Altogether: 48 + 24 = 72.
</step>
<answer>
72
</answer>"#;

/// Tree-of-thoughts transcript with one orphan.
pub const TREE_TRANSCRIPT: &str = r#"
<node id="root">Plan the trip budget</node>
<node id="train" parent="root">Take the train for 40 dollars</node>
<node id="car" parent="root">Drive, fuel costs 55 dollars</node>
<node id="train.saver" parent="train">Book a saver fare for 30 dollars</node>
<node id="stray" parent="bus">Nobody asked about buses</node>
<answer>Book a saver fare for 30 dollars</answer>
"#;

/// Least-to-most transcript.
pub const LEAST_TO_MOST_TRANSCRIPT: &str = r#"
<step number="1">
<question>How long does one slide take?</question>
<reasoning>Climbing takes 4 minutes and sliding 1 minute.</reasoning>
<answer>5 minutes</answer>
</step>
<step number="2">
<question>How many slides fit in 15 minutes?</question>
<reasoning>15 / 5 = 3</reasoning>
<answer>3</answer>
</step>
<final_answer>Amy can slide 3 times.</final_answer>
"#;

/// Self-consistency transcript voting 42, 42, 7.
pub const SELF_CONSISTENCY_TRANSCRIPT: &str = r#"
Path 1:
<step number="1">6 * 7 = 42</step>
<answer>42</answer>

Path 2:
<step number="1">40 + 2 = 42</step>
<answer>42</answer>

Path 3:
<step number="1">Misread the question as 3 + 4</step>
<answer>7</answer>
"#;

/// Self-refine transcript with one revision.
pub const SELF_REFINE_TRANSCRIPT: &str = r#"
<step number="1">The trip is 120 km.</step>
<step number="2">It takes 3 hours, so 40 km/h.</step>
<answer>40 km/h</answer>
<revision_check>The trip took 2 hours, not 3.</revision_check>
<revised_step number="1" revises="2">It takes 2 hours, so 60 km/h.</revised_step>
<revised_answer>60 km/h</revised_answer>
"#;

/// Beam search transcript with one best path.
pub const BEAM_TRANSCRIPT: &str = r#"
<node id="root" score="0.5">Factor the quadratic</node>
<node id="split" parent="root" score="0.3">Split the middle term</node>
<node id="formula" parent="root" score="0.2">Use the quadratic formula</node>
<node id="result1" parent="split" score="0.2" path_score="1.0">x = 2 or x = 3</node>
<node id="result2" parent="formula" score="0.1" path_score="0.8">x = 2.1 or x = 3</node>
<answer>Best path (path_score: 1.0):
Splitting the middle term factors cleanly.</answer>
"#;

/// Sample transcript for a method.
#[must_use]
pub const fn transcript_for(method: ReasoningMethod) -> &'static str {
    match method {
        ReasoningMethod::Chain => CHAIN_TRANSCRIPT,
        ReasoningMethod::Tree => TREE_TRANSCRIPT,
        ReasoningMethod::LeastToMost => LEAST_TO_MOST_TRANSCRIPT,
        ReasoningMethod::SelfConsistency => SELF_CONSISTENCY_TRANSCRIPT,
        ReasoningMethod::SelfRefine => SELF_REFINE_TRANSCRIPT,
        ReasoningMethod::BeamSearch => BEAM_TRANSCRIPT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisualizationConfig;
    use crate::methods::parse;

    #[test]
    fn test_every_fixture_parses_and_renders_edges() {
        for method in ReasoningMethod::all() {
            let response = parse(*method, transcript_for(*method), "Q?").unwrap();
            let diagram = response.render(&VisualizationConfig::for_method(*method));
            assert!(diagram.contains("-->"), "{method} fixture rendered no edges");
        }
    }
}

//! Least-to-most prompting.
//!
//! The model decomposes the question into sub-questions and solves them in
//! order:
//!
//! ```text
//! <step number="1">
//!   <question>...</question>
//!   <reasoning>...</reasoning>
//!   <answer>...</answer>
//! </step>
//! <final_answer>...</final_answer>
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::core::{capture_text, first_capture, literal_regex, parse_ordinal, wrap_text};
use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};
use crate::error::ParseError;

const DECOMPOSITION_ID: &str = "D";
const DECOMPOSITION_LABEL: &str = "Problem Decomposition";
const FINAL_ID: &str = "F";

const PALETTE: &[NodeStyle] = &[
    NodeStyle::Default,
    NodeStyle::Question,
    NodeStyle::Reasoning,
    NodeStyle::Answer,
    NodeStyle::Decomposition,
];

static STEP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    literal_regex(concat!(
        r#"(?s)<step number="([0-9]+)">\s*"#,
        r"<question>(.*?)</question>\s*",
        r"<reasoning>(.*?)</reasoning>\s*",
        r"<answer>(.*?)</answer>\s*</step>",
    ))
});

static FINAL_ANSWER_PATTERN: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?s)<final_answer>\s*(.*?)\s*</final_answer>"));

/// One decompose-then-solve increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionStep {
    /// Ordinal from the `number` attribute.
    pub number: u32,
    /// The sub-question.
    pub question: String,
    /// Reasoning toward the sub-answer.
    pub reasoning: String,
    /// The sub-answer.
    pub answer: String,
}

/// A parsed least-to-most transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeastToMostResponse {
    /// The original question.
    pub question: String,
    /// Steps sorted by ordinal.
    pub steps: Vec<DecompositionStep>,
    /// The final answer as written by the model.
    pub final_answer: Option<String>,
}

/// Parse a least-to-most transcript.
///
/// Steps missing any of their three sub-blocks are skipped.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a step number overflows.
pub fn parse_least_to_most(
    raw_text: &str,
    question: &str,
) -> Result<LeastToMostResponse, ParseError> {
    let mut steps = STEP_PATTERN
        .captures_iter(raw_text)
        .map(|caps| {
            Ok(DecompositionStep {
                number: parse_ordinal("step number", caps.get(1).map_or("", |m| m.as_str()))?,
                question: capture_text(caps.get(2)),
                reasoning: capture_text(caps.get(3)),
                answer: capture_text(caps.get(4)),
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;
    steps.sort_by_key(|step| step.number);

    Ok(LeastToMostResponse {
        question: question.to_string(),
        steps,
        final_answer: first_capture(&FINAL_ANSWER_PATTERN, raw_text),
    })
}

/// Render a least-to-most response.
///
/// Each step becomes `S{n} --> R{n} --> A{n}`, chained to the next step's
/// sub-question.
#[must_use]
pub fn render_least_to_most(response: &LeastToMostResponse, config: &VisualizationConfig) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));

    if response.steps.is_empty() && response.final_answer.is_none() {
        return diagram.finish(PALETTE);
    }

    diagram.node(DECOMPOSITION_ID, DECOMPOSITION_LABEL);
    diagram.edge(QUESTION_ID, DECOMPOSITION_ID);
    diagram.class(DECOMPOSITION_ID, NodeStyle::Decomposition);

    let mut prev = DECOMPOSITION_ID.to_string();
    for step in &response.steps {
        let n = step.number;
        let (sub_question, reasoning, answer) = (format!("S{n}"), format!("R{n}"), format!("A{n}"));

        diagram.node(&sub_question, &wrap_text(&format!("Q{n}: {}", step.question), config));
        diagram.node(&reasoning, &wrap_text(&step.reasoning, config));
        diagram.node(&answer, &wrap_text(&format!("A{n}: {}", step.answer), config));

        diagram.edge(&prev, &sub_question);
        diagram.edge(&sub_question, &reasoning);
        diagram.edge(&reasoning, &answer);

        diagram.class(&sub_question, NodeStyle::Question);
        diagram.class(&reasoning, NodeStyle::Reasoning);
        diagram.class(&answer, NodeStyle::Answer);
        prev = answer;
    }

    if let Some(final_answer) = &response.final_answer {
        diagram.node(FINAL_ID, &wrap_text(&format!("Final: {final_answer}"), config));
        diagram.edge(&prev, FINAL_ID);
        diagram.class(FINAL_ID, NodeStyle::Answer);
    }

    diagram.finish(PALETTE)
}

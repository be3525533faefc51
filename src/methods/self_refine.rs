//! Self-refine.
//!
//! The model reasons, checks its own work, then revises selected steps:
//!
//! ```text
//! <step number="1">...</step>
//! <answer>...</answer>
//! <revision_check>...</revision_check>
//! <revised_step number="1" revises="2">...</revised_step>
//! <revised_answer>...</revised_answer>
//! ```
//!
//! A revised step names the step it revises; nothing checks that the
//! referenced step exists.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::core::{
    capture_text, first_capture, literal_regex, numbered_blocks, parse_ordinal, wrap_text,
    ANSWER_PATTERN, STEP_PATTERN,
};
use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};
use crate::error::ParseError;

const ANSWER_ID: &str = "A";
const REVISION_CHECK_ID: &str = "RC";
const REVISED_ANSWER_ID: &str = "RA";

const PALETTE: &[NodeStyle] = &[
    NodeStyle::Default,
    NodeStyle::Question,
    NodeStyle::Answer,
    NodeStyle::Revision,
];

static REVISION_CHECK_PATTERN: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?s)<revision_check>\s*(.*?)\s*</revision_check>"));

static REVISED_STEP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    literal_regex(
        r#"(?s)<revised_step number="([0-9]+)" revises="([0-9]+)">\s*(.*?)\s*</revised_step>"#,
    )
});

static REVISED_ANSWER_PATTERN: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?s)<revised_answer>\s*(.*?)\s*</revised_answer>"));

/// An initial or revised step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefineStep {
    /// Ordinal from the `number` attribute.
    pub number: u32,
    /// Step text.
    pub content: String,
    /// Ordinal of the initial step this one revises.
    pub revision_of: Option<u32>,
}

impl RefineStep {
    /// Whether this step came from a `revised_step` block.
    #[must_use]
    pub const fn is_revision(&self) -> bool {
        self.revision_of.is_some()
    }
}

/// A parsed self-refine transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfRefineResponse {
    /// The original question.
    pub question: String,
    /// Initial steps sorted by ordinal, then revised steps in transcript order.
    pub steps: Vec<RefineStep>,
    /// The initial answer.
    pub answer: Option<String>,
    /// The model's critique of its initial attempt.
    pub revision_check: Option<String>,
    /// The answer after revision.
    pub revised_answer: Option<String>,
}

impl SelfRefineResponse {
    /// Steps from the first attempt.
    pub fn initial_steps(&self) -> impl Iterator<Item = &RefineStep> {
        self.steps.iter().filter(|step| !step.is_revision())
    }

    /// Revised steps, in transcript order.
    pub fn revised_steps(&self) -> impl Iterator<Item = &RefineStep> {
        self.steps.iter().filter(|step| step.is_revision())
    }
}

/// Parse a self-refine transcript.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a step number or `revises`
/// target overflows.
pub fn parse_self_refine(raw_text: &str, question: &str) -> Result<SelfRefineResponse, ParseError> {
    let mut steps: Vec<RefineStep> = numbered_blocks(&STEP_PATTERN, raw_text, "step number")?
        .into_iter()
        .map(|(number, content)| RefineStep {
            number,
            content,
            revision_of: None,
        })
        .collect();
    steps.sort_by_key(|step| step.number);

    for caps in REVISED_STEP_PATTERN.captures_iter(raw_text) {
        let number = parse_ordinal("revised step number", caps.get(1).map_or("", |m| m.as_str()))?;
        let revises = parse_ordinal("revises", caps.get(2).map_or("", |m| m.as_str()))?;
        steps.push(RefineStep {
            number,
            content: capture_text(caps.get(3)),
            revision_of: Some(revises),
        });
    }

    Ok(SelfRefineResponse {
        question: question.to_string(),
        steps,
        answer: first_capture(&ANSWER_PATTERN, raw_text),
        revision_check: first_capture(&REVISION_CHECK_PATTERN, raw_text),
        revised_answer: first_capture(&REVISED_ANSWER_PATTERN, raw_text),
    })
}

/// Render a self-refine response.
#[must_use]
pub fn render_self_refine(response: &SelfRefineResponse, config: &VisualizationConfig) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));

    let mut prev = QUESTION_ID.to_string();
    for step in response.initial_steps() {
        let id = format!("S{}", step.number);
        diagram.node(&id, &wrap_text(&step.content, config));
        diagram.edge(&prev, &id);
        prev = id;
    }

    if let Some(answer) = &response.answer {
        diagram.node(ANSWER_ID, &wrap_text(answer, config));
        diagram.edge(&prev, ANSWER_ID);
        diagram.class(ANSWER_ID, NodeStyle::Answer);
        prev = ANSWER_ID.to_string();
    }

    let has_check = response.revision_check.is_some();
    if let Some(check) = &response.revision_check {
        diagram.node(REVISION_CHECK_ID, &wrap_text(check, config));
        diagram.edge(&prev, REVISION_CHECK_ID);
        diagram.class(REVISION_CHECK_ID, NodeStyle::Revision);
        prev = REVISION_CHECK_ID.to_string();
    }

    let mut last_revision: Option<String> = None;
    for step in response.revised_steps() {
        let id = format!("R{}", step.number);
        diagram.node(&id, &wrap_text(&step.content, config));

        if let Some(previous) = &last_revision {
            diagram.edge(previous, &id);
        }
        if has_check {
            diagram.edge(REVISION_CHECK_ID, &id);
        }
        if let Some(target) = step
            .revision_of
            .filter(|&target| response.initial_steps().any(|s| s.number == target))
        {
            diagram.edge(&format!("S{target}"), &id);
        }

        diagram.class(&id, NodeStyle::Revision);
        last_revision = Some(id);
    }

    if let Some(revised_answer) = &response.revised_answer {
        diagram.node(REVISED_ANSWER_ID, &wrap_text(revised_answer, config));
        diagram.edge(last_revision.as_ref().unwrap_or(&prev), REVISED_ANSWER_ID);
        diagram.class(REVISED_ANSWER_ID, NodeStyle::Answer);
    }

    diagram.finish(PALETTE)
}

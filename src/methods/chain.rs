//! Chain of thoughts.
//!
//! Transcript grammar:
//!
//! ```text
//! <step number="1">...</step>
//! <step number="2">...</step>
//! <answer>...</answer>
//! ```
//!
//! Diagram: `Q --> S1 --> S2 --> ... --> A`.

use serde::{Deserialize, Serialize};

use super::core::{first_capture, numbered_blocks, wrap_text, ANSWER_PATTERN, STEP_PATTERN};
use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};
use crate::error::ParseError;

const ANSWER_ID: &str = "A";

const PALETTE: &[NodeStyle] = &[NodeStyle::Default, NodeStyle::Question, NodeStyle::Answer];

// ============================================================================
// Types
// ============================================================================

/// One numbered reasoning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Ordinal from the `number` attribute.
    pub number: u32,
    /// Step text.
    pub content: String,
}

/// A parsed chain-of-thoughts transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    /// The original question.
    pub question: String,
    /// Steps sorted by ordinal.
    pub steps: Vec<Step>,
    /// The final answer, if one was given.
    pub answer: Option<String>,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a chain-of-thoughts transcript.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a step number overflows.
pub fn parse_chain(raw_text: &str, question: &str) -> Result<ChainResponse, ParseError> {
    let (steps, answer) = parse_steps_and_answer(raw_text)?;
    Ok(ChainResponse {
        question: question.to_string(),
        steps,
        answer,
    })
}

/// Sorted steps and the answer of one chain-grammar segment.
pub(crate) fn parse_steps_and_answer(
    text: &str,
) -> Result<(Vec<Step>, Option<String>), ParseError> {
    let mut steps: Vec<Step> = numbered_blocks(&STEP_PATTERN, text, "step number")?
        .into_iter()
        .map(|(number, content)| Step { number, content })
        .collect();
    steps.sort_by_key(|step| step.number);

    Ok((steps, first_capture(&ANSWER_PATTERN, text)))
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a chain-of-thoughts response.
#[must_use]
pub fn render_chain(response: &ChainResponse, config: &VisualizationConfig) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));

    let mut prev = QUESTION_ID.to_string();
    for step in &response.steps {
        let id = format!("S{}", step.number);
        diagram.node(&id, &wrap_text(&step.content, config));
        diagram.edge(&prev, &id);
        prev = id;
    }

    if let Some(answer) = &response.answer {
        diagram.node(ANSWER_ID, &wrap_text(answer, config));
        diagram.edge(&prev, ANSWER_ID);
        diagram.class(ANSWER_ID, NodeStyle::Answer);
    }

    diagram.finish(PALETTE)
}

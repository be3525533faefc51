//! Self-consistency.
//!
//! The model answers the question along several independent paths, each in
//! the chain-of-thoughts grammar and introduced by a `Path N:` marker:
//!
//! ```text
//! Path 1:
//! <step number="1">...</step>
//! <answer>42</answer>
//!
//! Path 2:
//! ...
//! ```
//!
//! The final answer is not parsed: it is the answer given by the most
//! paths, ties going to the answer seen first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::chain::{parse_steps_and_answer, Step};
use super::core::{literal_regex, parse_ordinal, wrap_text};
use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};
use crate::error::ParseError;

const FINAL_ID: &str = "F";

const PALETTE: &[NodeStyle] = &[
    NodeStyle::Default,
    NodeStyle::Question,
    NodeStyle::Path,
    NodeStyle::Answer,
    NodeStyle::Final,
];

static PATH_MARKER: Lazy<Regex> = Lazy::new(|| literal_regex(r"Path\s+([0-9]+):"));

// ============================================================================
// Types
// ============================================================================

/// One independent reasoning attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningPath {
    /// Id from the `Path N:` marker.
    pub path_id: u32,
    /// Steps sorted by ordinal.
    pub steps: Vec<Step>,
    /// This path's answer.
    pub answer: Option<String>,
}

/// Number of paths that reached one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    /// The answer text.
    pub answer: String,
    /// How many paths gave it.
    pub votes: usize,
}

/// A parsed self-consistency transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfConsistencyResponse {
    /// The original question.
    pub question: String,
    /// Paths in transcript order.
    pub paths: Vec<ReasoningPath>,
    /// The most frequent path answer.
    pub final_answer: Option<String>,
    /// Vote tally in first-seen order.
    pub vote_counts: Vec<VoteCount>,
}

impl SelfConsistencyResponse {
    /// Votes cast for `answer`.
    #[must_use]
    pub fn votes_for(&self, answer: &str) -> usize {
        self.vote_counts
            .iter()
            .find(|count| count.answer == answer)
            .map_or(0, |count| count.votes)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a self-consistency transcript.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a path id or step number
/// overflows.
pub fn parse_self_consistency(
    raw_text: &str,
    question: &str,
) -> Result<SelfConsistencyResponse, ParseError> {
    let markers: Vec<(u32, usize, usize)> = PATH_MARKER
        .captures_iter(raw_text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some((id.as_str(), whole.start(), whole.end()))
        })
        .map(|(id, start, end)| Ok((parse_ordinal("path id", id)?, start, end)))
        .collect::<Result<_, ParseError>>()?;

    let mut paths = Vec::with_capacity(markers.len());
    for (i, &(path_id, _, content_start)) in markers.iter().enumerate() {
        let content_end = markers
            .get(i + 1)
            .map_or(raw_text.len(), |&(_, next_start, _)| next_start);
        let (steps, answer) = parse_steps_and_answer(&raw_text[content_start..content_end])?;
        paths.push(ReasoningPath {
            path_id,
            steps,
            answer,
        });
    }

    let vote_counts = tally(paths.iter().filter_map(|path| path.answer.as_deref()));
    let final_answer = majority(&vote_counts);

    Ok(SelfConsistencyResponse {
        question: question.to_string(),
        paths,
        final_answer,
        vote_counts,
    })
}

/// Count answers, keeping first-seen order.
fn tally<'a>(answers: impl Iterator<Item = &'a str>) -> Vec<VoteCount> {
    let mut counts: Vec<VoteCount> = Vec::new();
    for answer in answers {
        match counts.iter_mut().find(|count| count.answer == answer) {
            Some(count) => count.votes += 1,
            None => counts.push(VoteCount {
                answer: answer.to_string(),
                votes: 1,
            }),
        }
    }
    counts
}

/// First answer with the highest count.
fn majority(counts: &[VoteCount]) -> Option<String> {
    counts
        .iter()
        .fold(None::<&VoteCount>, |best, count| match best {
            Some(best) if best.votes >= count.votes => Some(best),
            _ => Some(count),
        })
        .map(|count| count.answer.clone())
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a self-consistency response.
///
/// The question fans out to every path; every path answer fans into the
/// voted final answer.
#[must_use]
pub fn render_self_consistency(
    response: &SelfConsistencyResponse,
    config: &VisualizationConfig,
) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));

    for path in &response.paths {
        let head = format!("P{}", path.path_id);
        diagram.node(&head, &format!("Path {}", path.path_id));
        diagram.edge(QUESTION_ID, &head);
        diagram.class(&head, NodeStyle::Path);

        let mut prev = head;
        for step in &path.steps {
            let id = format!("P{}S{}", path.path_id, step.number);
            diagram.node(&id, &wrap_text(&step.content, config));
            diagram.edge(&prev, &id);
            prev = id;
        }

        if let Some(answer) = &path.answer {
            let id = format!("A{}", path.path_id);
            diagram.node(&id, &wrap_text(answer, config));
            diagram.edge(&prev, &id);
            diagram.class(&id, NodeStyle::Answer);
        }
    }

    if let Some(final_answer) = response
        .final_answer
        .as_ref()
        .filter(|_| !response.vote_counts.is_empty())
    {
        let distribution = response
            .vote_counts
            .iter()
            .map(|count| {
                let noun = if count.votes == 1 { "vote" } else { "votes" };
                format!("{}: {} {noun}", count.answer, count.votes)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let label =
            format!("Final Answer (by voting): {final_answer} | Vote Distribution: {distribution}");
        diagram.node(FINAL_ID, &wrap_text(&label, config));
        for path in response.paths.iter().filter(|path| path.answer.is_some()) {
            diagram.edge(&format!("A{}", path.path_id), FINAL_ID);
        }
        diagram.class(FINAL_ID, NodeStyle::Final);
    }

    diagram.finish(PALETTE)
}

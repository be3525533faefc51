//! Transcript parsing for beam search.
//!
//! Grammar:
//!
//! ```text
//! <node id="root" score="0.5">...</node>
//! <node id="a" parent="root" score="0.3">...</node>
//! <node id="result1" parent="a" score="0.2" path_score="1.0">...</node>
//! <answer>Best path (path_score: 1.0): ...</answer>
//! ```
//!
//! Unlike the other methods, scores are mandatory numbers: a score that
//! does not parse fails the whole transcript.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::{BeamNode, BeamSearchResponse};
use crate::error::ParseError;
use crate::methods::arena::Arena;
use crate::methods::core::{capture_text, first_capture, literal_regex, parse_score, ANSWER_PATTERN};

/// Absolute tolerance when matching a node's path score to the best score.
pub const PATH_SCORE_TOLERANCE: f64 = 1e-6;

static NODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    literal_regex(concat!(
        r#"(?s)<node id="([^"]+)"(?:\s+parent="([^"]+)")?\s*score="([^"]+)""#,
        r#"(?:\s+path_score="([^"]+)")?\s*>\s*(.*?)\s*</node>"#,
    ))
});

static BEST_PATH_HEADER: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?s)\ABest path \(path_score:\s*([^)]+)\):\s*(.*)\z"));

/// Parse a beam search transcript.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a `score`, `path_score` or the
/// best path score in the answer is not a number.
pub fn parse_beam_search(raw_text: &str, question: &str) -> Result<BeamSearchResponse, ParseError> {
    let parsed = NODE_PATTERN
        .captures_iter(raw_text)
        .map(|caps| node_from_captures(&caps))
        .collect::<Result<Vec<_>, ParseError>>()?;

    let result_ids: Vec<String> = parsed
        .iter()
        .filter(|node| node.is_result())
        .map(|node| node.id.clone())
        .collect();

    let mut arena = Arena::build(parsed);

    let mut result_nodes: Vec<usize> = Vec::new();
    for id in &result_ids {
        if let Some(&index) = arena.index.get(id) {
            if !result_nodes.contains(&index) {
                result_nodes.push(index);
            }
        }
    }

    let (best_score, answer) = parse_answer(raw_text)?;
    if let Some(best) = best_score {
        mark_best_paths(&mut arena, best);
    }

    Ok(BeamSearchResponse {
        question: question.to_string(),
        nodes: arena.nodes,
        root: arena.root,
        answer,
        best_score,
        result_nodes,
    })
}

fn node_from_captures(caps: &Captures<'_>) -> Result<BeamNode, ParseError> {
    let score = parse_score("score", caps.get(3).map_or("", |m| m.as_str()))?;
    let path_score = caps
        .get(4)
        .map(|m| parse_score("path_score", m.as_str()))
        .transpose()?;

    Ok(BeamNode {
        id: capture_text(caps.get(1)),
        content: capture_text(caps.get(5)),
        score,
        parent_id: caps.get(2).map(|m| m.as_str().to_string()),
        children: Vec::new(),
        is_best_path: false,
        path_score,
    })
}

/// Split the answer block into the stated best score and the explanation.
///
/// Without a `Best path (path_score: B):` header the whole block is the
/// explanation and no path is marked.
fn parse_answer(raw_text: &str) -> Result<(Option<f64>, Option<String>), ParseError> {
    let Some(block) = first_capture(&ANSWER_PATTERN, raw_text) else {
        return Ok((None, None));
    };

    match BEST_PATH_HEADER.captures(&block) {
        Some(caps) => {
            let best = parse_score("best path_score", caps.get(1).map_or("", |m| m.as_str()))?;
            let explanation = capture_text(caps.get(2));
            Ok((Some(best), Some(explanation).filter(|text| !text.is_empty())))
        }
        None => Ok((None, Some(block))),
    }
}

/// Mark every node whose path score matches `best`, and all its ancestors.
fn mark_best_paths(arena: &mut Arena<BeamNode>, best: f64) {
    let matches: Vec<usize> = arena
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| {
            node.path_score
                .is_some_and(|score| (score - best).abs() < PATH_SCORE_TOLERANCE)
        })
        .map(|(index, _)| index)
        .collect();

    for start in matches {
        let mut current = Some(start);
        // Stops at a marked node: its ancestors are already marked, and a
        // parent-id cycle ends here too.
        while let Some(index) = current {
            match arena.nodes.get_mut(index) {
                Some(node) if !node.is_best_path => node.is_best_path = true,
                _ => break,
            }
            current = arena.parent_of(index);
        }
    }
}

//! Beam search.
//!
//! The model keeps several scored candidates per level and reports the
//! cumulative `path_score` of each finished path. The answer names the best
//! path score; every node on a path reaching it is highlighted.
//!
//! # Module Structure
//!
//! - `types`: response types
//! - `parsing`: transcript parsing and best-path marking

mod parsing;
mod types;

pub use parsing::{parse_beam_search, PATH_SCORE_TOLERANCE};
pub use types::{BeamNode, BeamSearchResponse, RESULT_PREFIX};

use std::fmt::Write as _;

use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};
use crate::methods::arena::preorder;
use crate::methods::core::{escape_node_id, wrap_text, LINE_BREAK};
use crate::methods::tree::NODE_PREFIX;

const ANSWER_ID: &str = "Answer";

const PALETTE: &[NodeStyle] = &[
    NodeStyle::Intermediate,
    NodeStyle::BestIntermediate,
    NodeStyle::Question,
    NodeStyle::Result,
    NodeStyle::BestResult,
    NodeStyle::FinalAnswer,
];

/// Render a beam search response.
///
/// Every result node feeds the final answer, whether or not it lies on the
/// best path or is reachable from the root.
///
/// Node content is fitted with [`wrap_text`]; the `Score` and `Path Score`
/// lines are appended after the fitted box, so a node label can run up to
/// two lines past `max_lines`.
#[must_use]
pub fn render_beam_search(response: &BeamSearchResponse, config: &VisualizationConfig) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));

    for visit in preorder(&response.nodes, response.root) {
        let Some(node) = response.nodes.get(visit.node) else {
            continue;
        };
        let id = escape_node_id(NODE_PREFIX, &node.id);
        diagram.node(&id, &node_label(node, config));

        let parent = visit
            .parent
            .and_then(|index| response.nodes.get(index))
            .map_or_else(|| QUESTION_ID.to_string(), |p| escape_node_id(NODE_PREFIX, &p.id));
        diagram.edge(&parent, &id);
        diagram.class(&id, node_style(node));
    }

    if let Some(answer) = &response.answer {
        let label = response.best_score.map_or_else(
            || format!("Final Answer: {answer}"),
            |score| format!("Final Answer (Path Score: {score:.2}): {answer}"),
        );
        diagram.node(ANSWER_ID, &wrap_text(&label, config));

        for node in response
            .result_nodes
            .iter()
            .filter_map(|&index| response.nodes.get(index))
        {
            diagram.edge(&escape_node_id(NODE_PREFIX, &node.id), ANSWER_ID);
        }
        diagram.class(ANSWER_ID, NodeStyle::FinalAnswer);
    }

    diagram.finish(PALETTE)
}

fn node_label(node: &BeamNode, config: &VisualizationConfig) -> String {
    let mut label = format!(
        "{}{LINE_BREAK}Score: {:.2}",
        wrap_text(&node.content, config),
        node.score
    );
    if let Some(path_score) = node.path_score.filter(|score| score.abs() > 0.0) {
        let _ = write!(label, "{LINE_BREAK}Path Score: {path_score:.2}");
    }
    label
}

fn node_style(node: &BeamNode) -> NodeStyle {
    match (node.is_result(), node.is_best_path) {
        (true, true) => NodeStyle::BestResult,
        (true, false) => NodeStyle::Result,
        (false, true) => NodeStyle::BestIntermediate,
        (false, false) => NodeStyle::Intermediate,
    }
}

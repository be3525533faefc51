//! Tree of thoughts.
//!
//! Transcript grammar:
//!
//! ```text
//! <node id="root">...</node>
//! <node id="approach1" parent="root">...</node>
//! <answer>...</answer>
//! ```
//!
//! Nodes are linked through their `parent` ids. Every node whose text
//! appears verbatim inside the answer is flagged as an answer node. This is
//! a containment heuristic: short or generic node text can match by
//! accident.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::arena::{preorder, Arena, ArenaNode};
use super::core::{
    capture_text, escape_node_id, first_capture, literal_regex, wrap_text, ANSWER_PATTERN,
};
use crate::config::VisualizationConfig;
use crate::diagram::{Diagram, NodeStyle, QUESTION_ID};

/// Prefix of diagram ids derived from model-chosen node ids.
pub(crate) const NODE_PREFIX: &str = "N_";

const ANSWER_ID: &str = "Answer";

const PALETTE: &[NodeStyle] = &[
    NodeStyle::Default,
    NodeStyle::Question,
    NodeStyle::Answer,
    NodeStyle::FinalAnswer,
];

static NODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    literal_regex(r#"(?s)<node id="([^"]+)"(?:\s+parent="([^"]+)")?\s*>\s*(.*?)\s*</node>"#)
});

// ============================================================================
// Types
// ============================================================================

/// One explored branch point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtNode {
    /// Model-chosen id.
    pub id: String,
    /// Node text.
    pub content: String,
    /// Declared parent id.
    pub parent_id: Option<String>,
    /// Indices of resolved children in [`TreeResponse::nodes`].
    pub children: Vec<usize>,
    /// Whether the node text appears inside the answer.
    pub is_answer: bool,
}

impl ArenaNode for ThoughtNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn children(&self) -> &[usize] {
        &self.children
    }

    fn push_child(&mut self, index: usize) {
        self.children.push(index);
    }
}

/// A parsed tree-of-thoughts transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeResponse {
    /// The original question.
    pub question: String,
    /// All parsed nodes in first-seen order, orphans included.
    pub nodes: Vec<ThoughtNode>,
    /// Index of the root node.
    pub root: Option<usize>,
    /// The final answer, if one was given.
    pub answer: Option<String>,
}

impl TreeResponse {
    /// The root node, if any.
    #[must_use]
    pub fn root_node(&self) -> Option<&ThoughtNode> {
        self.root.and_then(|index| self.nodes.get(index))
    }

    /// Children of `node`, in first-seen order.
    pub fn children_of<'a>(
        &'a self,
        node: &'a ThoughtNode,
    ) -> impl Iterator<Item = &'a ThoughtNode> + 'a {
        node.children.iter().filter_map(|&index| self.nodes.get(index))
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a tree-of-thoughts transcript.
///
/// Never fails: unmatched fragments are skipped and unresolvable parent
/// ids leave the node unlinked.
#[must_use]
pub fn parse_tree(raw_text: &str, question: &str) -> TreeResponse {
    let parsed = NODE_PATTERN.captures_iter(raw_text).map(|caps| ThoughtNode {
        id: capture_text(caps.get(1)),
        content: capture_text(caps.get(3)),
        parent_id: caps.get(2).map(|m| m.as_str().to_string()),
        children: Vec::new(),
        is_answer: false,
    });
    let Arena {
        mut nodes, root, ..
    } = Arena::build(parsed);

    let answer = first_capture(&ANSWER_PATTERN, raw_text);
    if let Some(answer) = &answer {
        for node in &mut nodes {
            node.is_answer = answer.contains(node.content.as_str());
        }
    }

    TreeResponse {
        question: question.to_string(),
        nodes,
        root,
        answer,
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a tree-of-thoughts response.
///
/// The root hangs off the question; every leaf reached feeds the answer.
#[must_use]
pub fn render_tree(response: &TreeResponse, config: &VisualizationConfig) -> String {
    let mut diagram = Diagram::new(&wrap_text(&response.question, config));
    let mut leaves = Vec::new();

    for visit in preorder(&response.nodes, response.root) {
        let Some(node) = response.nodes.get(visit.node) else {
            continue;
        };
        let id = escape_node_id(NODE_PREFIX, &node.id);
        diagram.node(&id, &wrap_text(&node.content, config));

        let parent = visit
            .parent
            .and_then(|index| response.nodes.get(index))
            .map_or_else(|| QUESTION_ID.to_string(), |p| escape_node_id(NODE_PREFIX, &p.id));
        diagram.edge(&parent, &id);

        if node.is_answer {
            diagram.class(&id, NodeStyle::Answer);
        }
        if node.children.is_empty() {
            leaves.push(id);
        }
    }

    if let Some(answer) = &response.answer {
        diagram.node(ANSWER_ID, &wrap_text(answer, config));
        for leaf in &leaves {
            diagram.edge(leaf, ANSWER_ID);
        }
        diagram.class(ANSWER_ID, NodeStyle::FinalAnswer);
    }

    diagram.finish(PALETTE)
}

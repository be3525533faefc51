//! Beam search response types.

use serde::{Deserialize, Serialize};

use crate::methods::arena::ArenaNode;

/// Id prefix marking a terminal result node.
pub const RESULT_PREFIX: &str = "result";

/// One scored branch point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamNode {
    /// Model-chosen id.
    pub id: String,
    /// Node text.
    pub content: String,
    /// Score of this step.
    pub score: f64,
    /// Declared parent id.
    pub parent_id: Option<String>,
    /// Indices of resolved children in [`BeamSearchResponse::nodes`].
    pub children: Vec<usize>,
    /// Whether the node lies on a path reaching the best score.
    pub is_best_path: bool,
    /// Cumulative score from the root.
    pub path_score: Option<f64>,
}

impl BeamNode {
    /// Whether the id marks a terminal result.
    #[must_use]
    pub fn is_result(&self) -> bool {
        self.id.starts_with(RESULT_PREFIX)
    }
}

impl ArenaNode for BeamNode {
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

/// A parsed beam search transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSearchResponse {
    /// The original question.
    pub question: String,
    /// All parsed nodes in first-seen order, orphans included.
    pub nodes: Vec<BeamNode>,
    /// Index of the root node.
    pub root: Option<usize>,
    /// Answer explanation.
    pub answer: Option<String>,
    /// Best cumulative score stated in the answer.
    pub best_score: Option<f64>,
    /// Indices of nodes whose id starts with `result`, in transcript order.
    pub result_nodes: Vec<usize>,
}

impl BeamSearchResponse {
    /// Nodes marked as lying on the best path.
    pub fn best_path(&self) -> impl Iterator<Item = &BeamNode> {
        self.nodes.iter().filter(|node| node.is_best_path)
    }
}

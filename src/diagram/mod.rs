//! Mermaid diagram assembly.
//!
//! Every renderer builds its output through [`Diagram`], which fixes the
//! layout shared by all methods:
//!
//! ```text
//! <div class="mermaid">
//! graph TD
//!     Q["question"]
//!     ...node declarations and edges, in emission order...
//!     ...class assignments...
//!     ...class definitions for the method's palette...
//!     linkStyle default stroke:#666,stroke-width:2px;
//! </div>
//! ```
//!
//! Output depends only on the calls made, so rendering the same parsed
//! response twice yields identical strings.

use serde::{Deserialize, Serialize};

/// Identifier of the question node present in every diagram.
pub const QUESTION_ID: &str = "Q";

const OPENING: &str = "<div class=\"mermaid\">";
const CLOSING: &str = "</div>";
const GRAPH_HEADER: &str = "graph TD";
const LINK_STYLE: &str = "    linkStyle default stroke:#666,stroke-width:2px;";

/// Style class applied to a diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStyle {
    /// Fallback style for unclassified nodes.
    Default,
    /// The original question or a sub-question.
    Question,
    /// An answer node.
    Answer,
    /// Intermediate reasoning.
    Reasoning,
    /// Problem decomposition marker.
    Decomposition,
    /// Revision check or revised step.
    Revision,
    /// Head of an independent reasoning path.
    Path,
    /// Voted final answer.
    Final,
    /// Synthesized final answer.
    FinalAnswer,
    /// Beam node off the best path.
    Intermediate,
    /// Beam node on the best path.
    BestIntermediate,
    /// Beam result node off the best path.
    Result,
    /// Beam result node on the best path.
    BestResult,
}

impl NodeStyle {
    /// Class name used in the diagram.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Question => "question",
            Self::Answer => "answer",
            Self::Reasoning => "reasoning",
            Self::Decomposition => "decomp",
            Self::Revision => "revision",
            Self::Path => "path",
            Self::Final => "final",
            Self::FinalAnswer => "final_answer",
            Self::Intermediate => "intermediate",
            Self::BestIntermediate => "best_intermediate",
            Self::Result => "result",
            Self::BestResult => "best_result",
        }
    }

    /// Fill and stroke settings for the class definition.
    #[must_use]
    pub const fn definition(&self) -> &'static str {
        match self {
            Self::Default | Self::Reasoning | Self::Intermediate => {
                "fill:#f9f9f9,stroke:#333,stroke-width:2px"
            }
            Self::Question => "fill:#e3f2fd,stroke:#1976d2,stroke-width:2px",
            Self::Answer | Self::Final | Self::FinalAnswer => {
                "fill:#d4edda,stroke:#28a745,stroke-width:2px"
            }
            Self::Decomposition => "fill:#f3e5f5,stroke:#7b1fa2,stroke-width:2px",
            Self::Revision => "fill:#fff3cd,stroke:#ffc107,stroke-width:2px",
            Self::Path => "fill:#fff3e0,stroke:#f57c00,stroke-width:2px",
            Self::BestIntermediate => "fill:#eff6ff,stroke:#3b82f6,stroke-width:2px",
            Self::Result => "fill:#f3f4f6,stroke:#4b5563,stroke-width:2px",
            Self::BestResult => "fill:#bfdbfe,stroke:#3b82f6,stroke-width:2px",
        }
    }
}

/// Incrementally built Mermaid flowchart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    body: Vec<String>,
    classes: Vec<String>,
}

impl Diagram {
    /// Start a diagram with the question node.
    ///
    /// `question_label` must already be fitted with
    /// [`wrap_text`](crate::methods::wrap_text).
    #[must_use]
    pub fn new(question_label: &str) -> Self {
        let mut diagram = Self {
            body: Vec::new(),
            classes: Vec::new(),
        };
        diagram.node(QUESTION_ID, question_label);
        diagram.class(QUESTION_ID, NodeStyle::Question);
        diagram
    }

    /// Declare a node with a label.
    pub fn node(&mut self, id: &str, label: &str) {
        self.body.push(format!("    {id}[\"{label}\"]"));
    }

    /// Declare an edge.
    pub fn edge(&mut self, from: &str, to: &str) {
        self.body.push(format!("    {from} --> {to}"));
    }

    /// Assign a style class to a node.
    pub fn class(&mut self, id: &str, style: NodeStyle) {
        self.classes
            .push(format!("    class {id} {};", style.as_str()));
    }

    /// Finish the diagram with class definitions for `palette`.
    #[must_use]
    pub fn finish(self, palette: &[NodeStyle]) -> String {
        let mut lines = Vec::with_capacity(self.body.len() + self.classes.len() + palette.len() + 5);
        lines.push(OPENING.to_string());
        lines.push(GRAPH_HEADER.to_string());
        lines.extend(self.body);
        lines.extend(self.classes);
        lines.extend(
            palette
                .iter()
                .map(|style| format!("    classDef {} {};", style.as_str(), style.definition())),
        );
        lines.push(LINK_STYLE.to_string());
        lines.push(CLOSING.to_string());
        lines.join("\n")
    }
}

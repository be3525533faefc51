//! Reasoning methods.
//!
//! This module implements the six transcript parser/renderer pairs:
//! - Sequential: chain of thoughts, least-to-most
//! - Branching: tree of thoughts, beam search
//! - Multi-pass: self-consistency, self-refine
//!
//! # Architecture
//!
//! Each method owns its response type, a `parse_*` function and a
//! `render_*` function. Nothing is shared between methods except the
//! text fitter and tag helpers in `core`, the node arena used by the
//! branching methods, and the [`Diagram`](crate::diagram::Diagram)
//! builder. [`MethodResponse`] is the tagged union selected by
//! [`ReasoningMethod`] at the boundary.
//!
//! # Example
//!
//! ```
//! use reasongraph::config::VisualizationConfig;
//! use reasongraph::methods::{parse, ReasoningMethod};
//!
//! let raw = r#"<step number="1">48 / 2 = 24</step>
//! <step number="2">48 + 24 = 72</step>
//! <answer>72</answer>"#;
//!
//! let response = parse(ReasoningMethod::Chain, raw, "How many clips?").unwrap();
//! let diagram = response.render(&VisualizationConfig::default());
//! assert!(diagram.contains("S1 --> S2"));
//! ```

mod arena;
mod beam;
mod chain;
mod core;
mod least_to_most;
mod self_consistency;
mod self_refine;
mod tree;

pub use beam::{
    parse_beam_search, render_beam_search, BeamNode, BeamSearchResponse, PATH_SCORE_TOLERANCE,
    RESULT_PREFIX,
};
pub use chain::{parse_chain, render_chain, ChainResponse, Step};
pub use self::core::{escape_node_id, wrap_text, LINE_BREAK, TRUNCATION_SUFFIX};
pub use least_to_most::{
    parse_least_to_most, render_least_to_most, DecompositionStep, LeastToMostResponse,
};
pub use self_consistency::{
    parse_self_consistency, render_self_consistency, ReasoningPath, SelfConsistencyResponse,
    VoteCount,
};
pub use self_refine::{parse_self_refine, render_self_refine, RefineStep, SelfRefineResponse};
pub use tree::{parse_tree, render_tree, ThoughtNode, TreeResponse};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::VisualizationConfig;
use crate::error::ParseError;

/// Reasoning method enumeration.
///
/// Serialized as the short method id (`cot`, `tot`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasoningMethod {
    /// Chain of thoughts: numbered steps then an answer.
    #[serde(rename = "cot")]
    Chain,
    /// Tree of thoughts: nodes linked by parent ids.
    #[serde(rename = "tot")]
    Tree,
    /// Least-to-most: sub-questions solved in order.
    #[serde(rename = "l2m")]
    LeastToMost,
    /// Self-consistency: independent paths and a majority vote.
    #[serde(rename = "scr")]
    SelfConsistency,
    /// Self-refine: steps, a revision check, revised steps.
    #[serde(rename = "srf")]
    SelfRefine,
    /// Beam search: scored nodes and a best cumulative path.
    #[serde(rename = "bs")]
    BeamSearch,
}

impl ReasoningMethod {
    /// Returns the method id.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chain => "cot",
            Self::Tree => "tot",
            Self::LeastToMost => "l2m",
            Self::SelfConsistency => "scr",
            Self::SelfRefine => "srf",
            Self::BeamSearch => "bs",
        }
    }

    /// Returns the human-readable method name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Chain => "Chain of Thoughts",
            Self::Tree => "Tree of Thoughts",
            Self::LeastToMost => "Least to Most",
            Self::SelfConsistency => "Self-consistency",
            Self::SelfRefine => "Self-Refine",
            Self::BeamSearch => "Beam Search",
        }
    }

    /// Returns all available methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Chain,
            Self::Tree,
            Self::SelfConsistency,
            Self::SelfRefine,
            Self::LeastToMost,
            Self::BeamSearch,
        ]
    }
}

impl std::fmt::Display for ReasoningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReasoningMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "cot" | "chain" | "chain_of_thoughts" => Ok(Self::Chain),
            "tot" | "tree" | "tree_of_thoughts" => Ok(Self::Tree),
            "l2m" | "least_to_most" => Ok(Self::LeastToMost),
            "scr" | "self_consistency" => Ok(Self::SelfConsistency),
            "srf" | "self_refine" => Ok(Self::SelfRefine),
            "bs" | "beam" | "beam_search" => Ok(Self::BeamSearch),
            _ => Err(ParseError::UnknownMethod {
                input: s.to_string(),
            }),
        }
    }
}

/// A parsed transcript for any method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum MethodResponse {
    /// Chain of thoughts.
    #[serde(rename = "cot")]
    Chain(ChainResponse),
    /// Tree of thoughts.
    #[serde(rename = "tot")]
    Tree(TreeResponse),
    /// Least-to-most.
    #[serde(rename = "l2m")]
    LeastToMost(LeastToMostResponse),
    /// Self-consistency.
    #[serde(rename = "scr")]
    SelfConsistency(SelfConsistencyResponse),
    /// Self-refine.
    #[serde(rename = "srf")]
    SelfRefine(SelfRefineResponse),
    /// Beam search.
    #[serde(rename = "bs")]
    BeamSearch(BeamSearchResponse),
}

impl MethodResponse {
    /// The method that produced this response.
    #[must_use]
    pub const fn method(&self) -> ReasoningMethod {
        match self {
            Self::Chain(_) => ReasoningMethod::Chain,
            Self::Tree(_) => ReasoningMethod::Tree,
            Self::LeastToMost(_) => ReasoningMethod::LeastToMost,
            Self::SelfConsistency(_) => ReasoningMethod::SelfConsistency,
            Self::SelfRefine(_) => ReasoningMethod::SelfRefine,
            Self::BeamSearch(_) => ReasoningMethod::BeamSearch,
        }
    }

    /// The original question.
    #[must_use]
    pub fn question(&self) -> &str {
        match self {
            Self::Chain(r) => &r.question,
            Self::Tree(r) => &r.question,
            Self::LeastToMost(r) => &r.question,
            Self::SelfConsistency(r) => &r.question,
            Self::SelfRefine(r) => &r.question,
            Self::BeamSearch(r) => &r.question,
        }
    }

    /// Render this response as a diagram string.
    #[must_use]
    pub fn render(&self, config: &VisualizationConfig) -> String {
        match self {
            Self::Chain(r) => render_chain(r, config),
            Self::Tree(r) => render_tree(r, config),
            Self::LeastToMost(r) => render_least_to_most(r, config),
            Self::SelfConsistency(r) => render_self_consistency(r, config),
            Self::SelfRefine(r) => render_self_refine(r, config),
            Self::BeamSearch(r) => render_beam_search(r, config),
        }
    }
}

/// Parse a transcript with the parser for `method`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidNumber`] if a numeric attribute in the
/// transcript cannot be parsed.
pub fn parse(
    method: ReasoningMethod,
    raw_text: &str,
    question: &str,
) -> Result<MethodResponse, ParseError> {
    Ok(match method {
        ReasoningMethod::Chain => MethodResponse::Chain(parse_chain(raw_text, question)?),
        ReasoningMethod::Tree => MethodResponse::Tree(parse_tree(raw_text, question)),
        ReasoningMethod::LeastToMost => {
            MethodResponse::LeastToMost(parse_least_to_most(raw_text, question)?)
        }
        ReasoningMethod::SelfConsistency => {
            MethodResponse::SelfConsistency(parse_self_consistency(raw_text, question)?)
        }
        ReasoningMethod::SelfRefine => {
            MethodResponse::SelfRefine(parse_self_refine(raw_text, question)?)
        }
        ReasoningMethod::BeamSearch => {
            MethodResponse::BeamSearch(parse_beam_search(raw_text, question)?)
        }
    })
}

static SELECTED_METHOD_PATTERN: Lazy<Regex> =
    Lazy::new(|| self::core::literal_regex(r"<selected_method>(\w+)</selected_method>"));

/// Extract a model's method choice from `<selected_method>id</selected_method>`.
///
/// Only exact method ids are accepted; anything else yields `None`.
///
/// # Examples
///
/// ```
/// use reasongraph::methods::{parse_selected_method, ReasoningMethod};
///
/// let reply = "I would use <selected_method>bs</selected_method> here.";
/// assert_eq!(parse_selected_method(reply), Some(ReasoningMethod::BeamSearch));
/// assert_eq!(parse_selected_method("<selected_method>beam</selected_method>"), None);
/// ```
#[must_use]
pub fn parse_selected_method(text: &str) -> Option<ReasoningMethod> {
    let id = SELECTED_METHOD_PATTERN.captures(text)?.get(1)?.as_str();
    ReasoningMethod::all()
        .iter()
        .copied()
        .find(|method| method.as_str() == id)
}

//! Best-effort visualization boundary.
//!
//! The transcript is the primary deliverable and the diagram is optional:
//! a transcript that fails to parse still comes back, with the diagram
//! reported as unavailable.

use serde::{Deserialize, Serialize};

use crate::config::VisualizationConfig;
use crate::methods::{parse, ReasoningMethod};

/// Outcome of visualizing one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visualization {
    /// Whether a diagram was produced.
    pub success: bool,
    /// Method used to parse the transcript.
    pub method: ReasoningMethod,
    /// The transcript, unchanged.
    pub raw_output: String,
    /// The diagram, when parsing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,
    /// Why the diagram is unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Parse and render a transcript, never failing.
///
/// # Examples
///
/// ```
/// use reasongraph::config::VisualizationConfig;
/// use reasongraph::methods::ReasoningMethod;
/// use reasongraph::visualize::visualize;
///
/// let config = VisualizationConfig::default();
/// let result = visualize(ReasoningMethod::Chain, "<answer>4</answer>", "2 + 2?", &config);
/// assert!(result.success);
///
/// let bad = r#"<node id="root" score="?">x</node>"#;
/// let result = visualize(ReasoningMethod::BeamSearch, bad, "Q?", &config);
/// assert!(!result.success);
/// assert_eq!(result.raw_output, bad);
/// ```
#[must_use]
pub fn visualize(
    method: ReasoningMethod,
    raw_text: &str,
    question: &str,
    config: &VisualizationConfig,
) -> Visualization {
    tracing::debug!(method = %method, bytes = raw_text.len(), "Parsing transcript");

    match parse(method, raw_text, question) {
        Ok(response) => {
            let diagram = response.render(config);
            tracing::info!(method = %method, bytes = diagram.len(), "Visualization rendered");
            Visualization {
                success: true,
                method,
                raw_output: raw_text.to_string(),
                visualization: Some(diagram),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(method = %method, error = %e, "Visualization unavailable");
            Visualization {
                success: false,
                method,
                raw_output: raw_text.to_string(),
                visualization: None,
                error: Some(e.to_string()),
            }
        }
    }
}

//! Reasoning transcript visualizer.
//!
//! Turns tagged reasoning transcripts produced by a language model into
//! Mermaid flowcharts for visual inspection.
//!
//! # Features
//!
//! - Six reasoning methods: chain of thoughts, tree of thoughts,
//!   least-to-most, self-consistency, self-refine, beam search
//! - Tolerant tag extraction: malformed fragments are skipped
//! - Deterministic output: the same transcript renders byte-identically
//! - Fixed-size node labels with configurable width and height
//!
//! # Quick Start
//!
//! ```bash
//! reasongraph tot "Plan the trip" --input transcript.txt
//! ```
//!
//! # Architecture
//!
//! ```text
//! transcript ──▶ parse_<method> ──▶ <Method>Response ──▶ render_<method> ──▶ diagram
//!                     │                                        │
//!                     └──────── core (tags, wrap_text) ────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod diagram;
pub mod error;
pub mod methods;
pub mod visualize;

#[cfg(test)]
mod test_utils;

pub use config::{Config, VisualizationConfig};
pub use error::{AppError, ConfigError, ParseError};
pub use methods::{parse, parse_selected_method, MethodResponse, ReasoningMethod};
pub use visualize::{visualize, Visualization};

//! Integration tests for the reasoning transcript visualizer.
//!
//! These tests drive the public API the way the binary does:
//! transcript in, diagram string out.

mod error_recovery;
mod multi_method;
mod workflow_multipass;
mod workflow_sequential;

/// Edge lines of a rendered diagram, in emission order.
pub fn edges(diagram: &str) -> Vec<&str> {
    diagram.lines().filter(|line| line.contains(" --> ")).collect()
}

//! Shared infrastructure for all reasoning methods.
//!
//! This module provides functionality every parser/renderer pair needs:
//! - [`wrap_text`]: fits arbitrary text into a fixed-size diagram label
//! - Tag extraction helpers built on lazily compiled [`Regex`] patterns
//! - Numeric attribute parsing with [`ParseError`] reporting
//! - [`escape_node_id`]: diagram-safe identifiers for model-chosen ids
//!
//! # Tag extraction contract
//!
//! Every pattern is matched with dot-matches-newline and lazy content
//! captures. Optional attributes that are absent map to `None`. Captured
//! content is trimmed. Fragments that do not match are skipped; only an
//! unparsable numeric attribute is an error.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::config::VisualizationConfig;
use crate::error::ParseError;

/// Line break marker understood by the diagram renderer.
pub const LINE_BREAK: &str = "<br>";

/// Suffix written over the tail of a truncated label.
pub const TRUNCATION_SUFFIX: &str = "...";

/// Compile a literal pattern.
///
/// Only ever called with string literals from this crate.
#[allow(clippy::expect_used)]
pub(crate) fn literal_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern must compile")
}

/// `<step number="N">content</step>`
pub(crate) static STEP_PATTERN: Lazy<Regex> =
    Lazy::new(|| literal_regex(r#"(?s)<step number="([0-9]+)">\s*(.*?)\s*</step>"#));

/// `<answer>content</answer>`
pub(crate) static ANSWER_PATTERN: Lazy<Regex> =
    Lazy::new(|| literal_regex(r"(?s)<answer>\s*(.*?)\s*</answer>"));

/// Fit text into a label of at most `max_lines` lines of
/// `max_chars_per_line` characters, joined with [`LINE_BREAK`].
///
/// Newlines become spaces and double quotes become single quotes so the
/// result can sit inside a quoted diagram label. Words are never split
/// unless a single word is wider than a line. When lines are dropped, the
/// last kept line ends in [`TRUNCATION_SUFFIX`] without growing past the
/// width.
///
/// # Examples
///
/// ```
/// use reasongraph::config::VisualizationConfig;
/// use reasongraph::methods::wrap_text;
///
/// let config = VisualizationConfig { max_chars_per_line: 10, max_lines: 2 };
/// assert_eq!(wrap_text("the quick brown fox", &config), "the quick<br>brown fox");
/// assert_eq!(
///     wrap_text("the quick brown fox jumps over", &config),
///     "the quick<br>brown f..."
/// );
/// assert_eq!(wrap_text("", &config), "");
/// ```
#[must_use]
pub fn wrap_text(text: &str, config: &VisualizationConfig) -> String {
    let width = config.max_chars_per_line.max(1);
    let cleaned = text.replace('\n', " ").replace('"', "'");

    let mut lines = wrap_lines(&cleaned, width);
    if lines.len() > config.max_lines {
        lines.truncate(config.max_lines);
        if let Some(last) = lines.last_mut() {
            *last = truncate_line(last, width);
        }
    }

    lines.join(LINE_BREAK)
}

/// Greedy word wrap. `width` must be at least 1.
fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= width {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        // Oversized word: fill what is left of the current line, then
        // emit width-sized pieces.
        let chars: Vec<char> = word.chars().collect();
        let mut rest = chars.as_slice();
        if current_len > 0 {
            let room = width.saturating_sub(current_len + 1);
            if room > 0 {
                current.push(' ');
                current.extend(&rest[..room]);
                rest = &rest[room..];
            }
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        for piece in rest.chunks(width) {
            if piece.len() == width {
                lines.push(piece.iter().collect());
            } else {
                current = piece.iter().collect();
                current_len = piece.len();
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Overwrite the tail of a line with the truncation suffix.
fn truncate_line(line: &str, width: usize) -> String {
    let marker_len = TRUNCATION_SUFFIX.len().min(width);
    let mut truncated: String = line.chars().take(width - marker_len).collect();
    truncated.push_str(&TRUNCATION_SUFFIX[..marker_len]);
    truncated
}

/// Escape a model-chosen id into a diagram-safe node identifier.
///
/// ASCII alphanumerics are kept; every other character becomes
/// `_{hex code point}_`. The mapping is injective, so distinct ids never
/// collide, and the prefix keeps the result clear of fixed ids and
/// diagram keywords.
///
/// # Examples
///
/// ```
/// use reasongraph::methods::escape_node_id;
///
/// assert_eq!(escape_node_id("N_", "approach1.1"), "N_approach1_2e_1");
/// assert_eq!(escape_node_id("N_", "root"), "N_root");
/// ```
#[must_use]
pub fn escape_node_id(prefix: &str, raw: &str) -> String {
    let mut id = String::with_capacity(prefix.len() + raw.len());
    id.push_str(prefix);
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            id.push(ch);
        } else {
            let _ = write!(id, "_{:x}_", u32::from(ch));
        }
    }
    id
}

/// Trimmed text of an optional capture group.
pub(crate) fn capture_text(capture: Option<Match<'_>>) -> String {
    capture.map_or_else(String::new, |m| m.as_str().trim().to_string())
}

/// First capture group of the first match, trimmed.
///
/// A block with only whitespace inside counts as absent.
pub(crate) fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .map(|caps| capture_text(caps.get(1)))
        .filter(|content| !content.is_empty())
}

/// Every `(number, content)` pair captured by a two-group pattern.
pub(crate) fn numbered_blocks(
    pattern: &Regex,
    text: &str,
    field: &str,
) -> Result<Vec<(u32, String)>, ParseError> {
    pattern
        .captures_iter(text)
        .map(|caps| {
            let number = parse_ordinal(field, caps.get(1).map_or("", |m| m.as_str()))?;
            Ok((number, capture_text(caps.get(2))))
        })
        .collect()
}

/// Parse an ordinal attribute such as a step number or path id.
pub(crate) fn parse_ordinal(field: &str, raw: &str) -> Result<u32, ParseError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseError::invalid_number(field, raw))
}

/// Parse a score attribute.
pub(crate) fn parse_score(field: &str, raw: &str) -> Result<f64, ParseError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseError::invalid_number(field, raw))
}

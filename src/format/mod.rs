//! Answer formatting: LLM markdown/LaTeX output to chat-safe plain text.
//!
//! The destination channel renders neither markdown nor LaTeX, so the raw
//! answer is rewritten in three passes: math blocks are lifted out and
//! rendered inline (`\frac{1}{2}` becomes `(1)/(2)`), the rendered math is
//! substituted back wrapped in backticks, and the surrounding text is
//! reflowed with header/paragraph spacing rules.

mod extract;
mod lines;
mod math;

use extract::{extract_latex_blocks, placeholder};
use lines::normalize_lines;
use math::format_math_expression;

/// Returned instead of failing: a formatting problem must never prevent a
/// reply from being sent.
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error. Please try again later.";

/// Format one raw model answer for the chat channel.
///
/// Empty or whitespace-only input yields [`FALLBACK_MESSAGE`]. Everything
/// else is best-effort: malformed LaTeX degrades to literal text.
pub fn format_answer(raw_answer: &str) -> String {
    if raw_answer.trim().is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }

    let (mut text, blocks) = extract_latex_blocks(raw_answer);
    for (index, block) in blocks.iter().enumerate() {
        // Single backticks render as monospace in the chat client.
        let rendered = format!("`{}`", format_math_expression(block));
        text = text.replace(&placeholder(index), &rendered);
    }

    normalize_lines(&text)
}

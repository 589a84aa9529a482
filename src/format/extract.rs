//! LaTeX block extraction: lift `\(...\)` / `\[...\]` spans out of the text.

use std::sync::LazyLock;

use regex::Regex;

/// Inline or display math span. Lazy (leftmost-shortest) and non-nested: the
/// first matching closer ends the block. `(?s)` lets a block span newlines.
static LATEX_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\(.*?\\\)|\\\[.*?\\\]").expect("valid latex span regex"));

/// Placeholder for block `index`. Private-use codepoints bracket the index so
/// the token cannot collide with anything an LLM can emit.
pub(crate) fn placeholder(index: usize) -> String {
    format!("\u{E000}{}\u{E001}", index)
}

/// Replace every LaTeX block in `text` with a positional placeholder.
///
/// Returns the rewritten text and the original blocks in reading order:
/// block `i` corresponds to `placeholder(i)`. Text outside recognized blocks
/// is untouched.
pub(crate) fn extract_latex_blocks(text: &str) -> (String, Vec<String>) {
    let spans: Vec<(usize, usize)> = LATEX_BLOCK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let blocks: Vec<String> = spans
        .iter()
        .map(|&(start, end)| text[start..end].to_string())
        .collect();

    // Substitute right to left so earlier spans keep their byte offsets.
    let mut rewritten = text.to_string();
    for (index, &(start, end)) in spans.iter().enumerate().rev() {
        rewritten.replace_range(start..end, &placeholder(index));
    }

    (rewritten, blocks)
}

//! Line/paragraph normalization: markdown-ish structure to chat-safe text.

/// Headers that get promoted to their own paragraph.
const HEADER_LABELS: [&str; 2] = ["Step", "Summary"];

/// Sentence starters that continue the preceding equation, so no separator
/// line is inserted before them. English-specific on purpose; do not
/// generalize without a product decision.
const CONTINUATION_STARTERS: [&str; 3] = ["This", "Since", "Therefore"];

/// Rewrite markdown structure (headers, emphasis, blank runs) into plain
/// text with chat-friendly spacing. Not idempotent, and not required to be.
pub(crate) fn normalize_lines(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::new();

    for (idx, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();

        if let Some(label) = header_label(trimmed) {
            if out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            out.push(label.to_string());
            continue;
        }

        if trimmed.is_empty() {
            // Collapse runs of blank lines to one.
            if out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            continue;
        }

        // Emphasis markers go, except inside lines carrying code spans where
        // `*`/`_` may be meaningful.
        let emitted = if trimmed.contains('`') {
            trimmed.to_string()
        } else {
            trimmed.replace(['*', '_'], "").trim().to_string()
        };
        out.push(emitted.clone());

        if let Some(next) = lines.get(idx + 1) {
            let next = next.trim();
            let before_header = next.starts_with('#')
                || HEADER_LABELS.iter().any(|label| next.starts_with(label));
            // Separate an equation from following prose unless the prose
            // explicitly continues it.
            let after_equation = emitted.contains('=')
                && !CONTINUATION_STARTERS
                    .iter()
                    .any(|starter| next.starts_with(starter));
            if before_header || after_equation {
                out.push(String::new());
            }
        }
    }

    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// If `trimmed` is a `#` header whose label starts with "Step" or "Summary",
/// return the label with the `#` markers dropped. Other headers fall through
/// to generic treatment.
fn header_label(trimmed: &str) -> Option<&str> {
    if !trimmed.starts_with('#') {
        return None;
    }
    let label = trimmed.trim_start_matches('#').trim();
    HEADER_LABELS
        .iter()
        .any(|prefix| label.starts_with(prefix))
        .then_some(label)
}

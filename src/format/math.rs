//! Math-expression formatting: one LaTeX fragment to compact plain text.

/// Literal command/character substitutions, applied before the structural
/// walk. Multi-character commands come first so `\times` is consumed before
/// any shorter replacement could touch it.
const SYMBOL_TABLE: &[(&str, &str)] = &[
    ("\\times", "×"),
    ("\\approx", "≈"),
    ("\\cdot", "·"),
    ("\\div", "÷"),
    ("\\neq", "≠"),
    ("\\le", "≤"),
    ("\\ge", "≥"),
    ("\\pm", "±"),
    ("_", "ₓ"),
    ("^", "ⁿ"),
];

/// Render one LaTeX fragment as plain text.
///
/// Best-effort: malformed input never fails, unrecognized constructs pass
/// through as literal text. Only `\frac` and `\sqrt` get structural
/// treatment; every other command is reduced to its brace contents.
pub(crate) fn format_math_expression(latex: &str) -> String {
    let mut s = latex.trim();

    // Strip one matching delimiter pair at the very start/end.
    for (open, close) in [("\\[", "\\]"), ("\\(", "\\)")] {
        if s.starts_with(open) && s.ends_with(close) && s.len() >= open.len() + close.len() {
            s = s[open.len()..s.len() - close.len()].trim();
            break;
        }
    }

    let mut substituted = s.to_string();
    for (from, to) in SYMBOL_TABLE {
        substituted = substituted.replace(from, to);
    }

    rewrite_structure(&substituted)
}

/// Walk the text character by character, rewriting `\frac{a}{b}` to
/// `(a)/(b)` and `\sqrt{x}` to `√(x)`. Other braces are stripped but their
/// contents kept; characters outside any construct pass through.
fn rewrite_structure(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                // Command name: maximal run of alphabetic characters.
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_ascii_alphabetic() {
                    j += 1;
                }
                let name: String = chars[i + 1..j].iter().collect();
                match name.as_str() {
                    "frac" => match read_group(&chars, j) {
                        Some((num, after_num)) => match read_group(&chars, after_num) {
                            Some((den, after_den)) => {
                                out.push('(');
                                out.push_str(&rewrite_structure(&num));
                                out.push_str(")/(");
                                out.push_str(&rewrite_structure(&den));
                                out.push(')');
                                i = after_den;
                            }
                            None => {
                                // Denominator missing: emit the sole group parenthesized.
                                out.push('(');
                                out.push_str(&rewrite_structure(&num));
                                out.push(')');
                                i = after_num;
                            }
                        },
                        None => {
                            out.push_str("\\frac");
                            i = j;
                        }
                    },
                    "sqrt" => match read_group(&chars, j) {
                        Some((inner, after)) => {
                            out.push('√');
                            out.push('(');
                            out.push_str(&rewrite_structure(&inner));
                            out.push(')');
                            i = after;
                        }
                        None => {
                            out.push_str("\\sqrt");
                            i = j;
                        }
                    },
                    "" => {
                        // Lone backslash (or escaped punctuation): literal.
                        out.push('\\');
                        i += 1;
                    }
                    _ => {
                        // Unknown command: drop the command token, keep
                        // whatever follows (braces are stripped below).
                        i = j;
                    }
                }
            }
            '{' | '}' => {
                // Bare braces are structure only; contents already flow through.
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Read one `{...}` group starting at `start` (whitespace allowed before the
/// brace). Returns the group's inner text and the index just past its
/// closing brace. An unterminated group runs to end of input. Returns None
/// when no opening brace is found.
fn read_group(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut i = start;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i >= chars.len() || chars[i] != '{' {
        return None;
    }

    let mut depth = 1;
    let mut inner = String::new();
    i += 1;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((inner, i + 1));
                }
            }
            _ => {}
        }
        inner.push(chars[i]);
        i += 1;
    }

    // Never closed: truncate gracefully at end of input.
    Some((inner, i))
}

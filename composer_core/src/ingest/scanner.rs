//! Brace-balanced block extraction.
//!
//! Generation output often concatenates several JSON objects with no
//! separators, or buries them in prose. The scanner walks the text once,
//! tracking double-quoted strings (with backslash escapes) so braces inside
//! string content never affect the depth count, and emits each substring
//! where the nesting depth returns to zero.

/// Extract every top-level `{...}` block from free-form text.
///
/// Braces inside string literals are ignored, and a stray closing brace at
/// depth zero is skipped rather than corrupting later blocks.
pub(crate) fn scan_object_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' if !in_string && depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(from) = start.take() {
                        blocks.push(&text[from..=index]);
                    }
                }
            }
            _ => {}
        }
    }

    blocks
}

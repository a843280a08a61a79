//! Dialect repair for embedded raw-input strings.
//!
//! Generation backends sometimes hand back JSON wrapped in markdown code
//! fences, or Python literal syntax (single quotes, `None`/`True`/`False`)
//! instead of JSON. Each fixup is a named strategy; the chain tries them in
//! order on top of whatever the previous applicable strategy produced, and
//! the first candidate that parses wins.

use serde_json::Value;

/// One named text fixup. `apply` returns `None` when the strategy does not
/// recognize the input.
pub(crate) struct RepairStrategy {
    pub(crate) name: &'static str,
    pub(crate) apply: fn(&str) -> Option<String>,
}

pub(crate) const STRATEGIES: [RepairStrategy; 2] = [
    RepairStrategy {
        name: "code fence",
        apply: strip_code_fence,
    },
    RepairStrategy {
        name: "python literal",
        apply: rewrite_python_literals,
    },
];

/// Strip a surrounding markdown code fence, with an optional `json` tag.
fn strip_code_fence(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix("```")?;
    let body = body.strip_prefix("json").unwrap_or(body);
    let body = body.strip_suffix("```").unwrap_or(body);
    Some(body.trim().to_string())
}

/// Rewrite Python literal syntax into JSON.
///
/// Only fires on text that already looks like a container (`{` or `[`) and
/// actually contains a single quote; anything else is left for other
/// strategies.
fn rewrite_python_literals(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) || !trimmed.contains('\'') {
        return None;
    }

    Some(
        trimmed
            .replace('\'', "\"")
            .replace("None", "null")
            .replace("True", "true")
            .replace("False", "false"),
    )
}

/// Parse `raw` as JSON, falling back through the repair chain on failure.
///
/// Every attempt is logged. Returns `None` only when the strict parse and
/// every applicable strategy all fail.
pub(crate) fn parse_with_repair(raw: &str, log: &mut Vec<String>) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            log.push("Raw input parsed as strict JSON".to_string());
            return Some(value);
        }
        Err(err) => {
            log.push(format!("Strict parse of raw input failed: {}", err));
        }
    }

    let mut current = raw.to_string();
    for strategy in &STRATEGIES {
        if let Some(candidate) = (strategy.apply)(&current) {
            log.push(format!("Trying repair strategy: {}", strategy.name));
            match serde_json::from_str::<Value>(&candidate) {
                Ok(value) => {
                    log.push(format!("Repair strategy succeeded: {}", strategy.name));
                    return Some(value);
                }
                Err(err) => {
                    log.push(format!(
                        "Repair strategy failed ({}): {}",
                        strategy.name, err
                    ));
                }
            }
            current = candidate;
        }
    }

    log.push("No repair strategy recovered the raw input".to_string());
    None
}

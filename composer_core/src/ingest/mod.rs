//! Ingestion normalizer for free-form generation output.
//!
//! Generation backends return text that is supposed to contain enrichment
//! records but rarely arrives clean: objects are concatenated back to back,
//! wrapped in commentary, nested under envelope fields, or written in Python
//! literal dialect. The normalizer recovers as many usable records as it can
//! and reports every decision it made.
//!
//! Recovery runs in three layers:
//!
//! 1. **Block scan**: [`scan_object_blocks`] isolates each top-level
//!    `{...}` substring; every block gets a strict JSON parse. Blocks that
//!    fail to parse are logged and skipped, with no repair at this layer.
//! 2. **Shape normalization**: each parsed value is matched against known
//!    record shapes, in precedence order:
//!    - a `raw_input` field is unwrapped (string payloads go through the
//!      repair chain in [`repair`]) and its contents normalized recursively,
//!    - a `data` envelope holding a `questions` array is lifted,
//!    - a value with its own `questions` array is taken as canonical,
//!    - a flat value with `topic` plus `base_content` or `question` is
//!      wrapped as a single-question input,
//!    - a value with a `situations` array becomes a [`SituationRecord`],
//!    - anything else is rejected with a reason.
//! 3. **Whole-text fallback**: when the block scan recovers nothing, the
//!    entire trimmed text is parsed as a JSON array (bracket-wrapped if
//!    needed) and each element normalized.
//!
//! Nothing in here returns an error. Worst case is an empty record list and
//! a log explaining every rejection.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use question_model::{Category, EnrichmentInput};

mod repair;
mod scanner;

use repair::parse_with_repair;
use scanner::scan_object_blocks;

fn default_gender_policy() -> String {
    "neutral".to_string()
}

/// A situation-family record, carried alongside question inputs.
///
/// These share the ingestion pipeline but feed a different downstream flow,
/// so unrecognized source fields are preserved in `extra` instead of being
/// dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationRecord {
    pub topic: String,

    /// Always the situation sentinel; never derived from an order code.
    pub category: String,

    #[serde(default)]
    pub order_code_prefix: String,

    #[serde(default = "default_gender_policy")]
    pub gender_policy: String,

    pub situations: Vec<Value>,

    /// Source fields with no canonical slot.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recovered record, either content family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecoveredRecord {
    Question(EnrichmentInput),
    Situation(SituationRecord),
}

impl RecoveredRecord {
    /// Topic of the record, whichever family it belongs to.
    pub fn topic(&self) -> &str {
        match self {
            RecoveredRecord::Question(input) => &input.topic,
            RecoveredRecord::Situation(record) => &record.topic,
        }
    }

    /// The record as a question input, if it is one.
    pub fn as_question(&self) -> Option<&EnrichmentInput> {
        match self {
            RecoveredRecord::Question(input) => Some(input),
            RecoveredRecord::Situation(_) => None,
        }
    }
}

/// Everything one recovery pass produced: the records plus the ordered
/// decision log. The log is part of the contract; callers render it as
/// diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReport {
    pub records: Vec<RecoveredRecord>,
    pub log: Vec<String>,
}

impl RecoveryReport {
    /// The question-family inputs, ready for the composers.
    pub fn question_inputs(&self) -> Vec<&EnrichmentInput> {
        self.records
            .iter()
            .filter_map(RecoveredRecord::as_question)
            .collect()
    }
}

/// Recover every usable record from a block of generation output.
pub fn recover_records(text: &str) -> RecoveryReport {
    let mut log = Vec::new();
    let mut records = Vec::new();

    log.push(format!(
        "Scanning {} chars of generation output",
        text.chars().count()
    ));

    for block in scan_object_blocks(text) {
        log.push(format!(
            "Found candidate block ({} chars)",
            block.chars().count()
        ));
        match serde_json::from_str::<Value>(block) {
            Ok(value) => {
                let recovered = normalize_value(&value, &mut log);
                if recovered.is_empty() {
                    log.push("Block parsed but produced no usable records".to_string());
                }
                records.extend(recovered);
            }
            Err(err) => {
                log.push(format!("Skipping block, parse failed: {}", err));
            }
        }
    }

    if records.is_empty() {
        log.push("Block scan recovered nothing, trying whole-text parse".to_string());
        records = recover_whole_text(text, &mut log);
    }

    log.push(format!("Recovered {} records", records.len()));

    RecoveryReport { records, log }
}

/// Parse the entire trimmed input as a JSON array and normalize each element.
fn recover_whole_text(text: &str, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        log.push("Input is empty".to_string());
        return Vec::new();
    }

    let wrapped = if trimmed.starts_with('[') {
        trimmed.to_string()
    } else {
        format!("[{}]", trimmed)
    };

    match serde_json::from_str::<Value>(&wrapped) {
        Ok(Value::Array(items)) => {
            let mut records = Vec::new();
            for item in &items {
                records.extend(normalize_value(item, log));
            }
            records
        }
        Ok(_) => {
            log.push("Whole-text parse did not yield an array".to_string());
            Vec::new()
        }
        Err(err) => {
            log.push(format!("Whole-text parse failed: {}", err));
            Vec::new()
        }
    }
}

/// Match one parsed value against the known record shapes.
fn normalize_value(value: &Value, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    let object = match value.as_object() {
        Some(object) => object,
        None => {
            log.push("Value is not an object, skipping".to_string());
            return Vec::new();
        }
    };

    if let Some(raw) = object.get("raw_input") {
        return normalize_raw_input(raw, log);
    }

    if let Some(data) = object.get("data") {
        if data.get("questions").map_or(false, Value::is_array) {
            return lift_data_envelope(data, log);
        }
    }

    if object.get("questions").map_or(false, Value::is_array) {
        return convert_question_record(value.clone(), log);
    }

    if has_text(object, "topic")
        && (has_text(object, "base_content") || has_text(object, "question"))
    {
        return wrap_flat_question(object, log);
    }

    if object.get("situations").map_or(false, Value::is_array) {
        return normalize_situations(object, log);
    }

    let reason = if object.get("situations").is_some() {
        "situations field is not an array"
    } else if has_text(object, "topic") {
        "topic present but no questions, content, or situations"
    } else {
        "no topic, questions, or situations"
    };
    log.push(format!("Rejecting unrecognizable record: {}", reason));
    Vec::new()
}

/// Unwrap a `raw_input` field: repair string payloads, flatten arrays, and
/// normalize whatever comes out.
fn normalize_raw_input(raw: &Value, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    log.push("Unwrapping raw_input field".to_string());

    let inner = match raw {
        Value::String(text) => match parse_with_repair(text, log) {
            Some(parsed) => parsed,
            // Leave the string as-is so the recursion logs the skip.
            None => Value::String(text.clone()),
        },
        other => other.clone(),
    };

    match inner {
        Value::Array(items) => {
            log.push(format!("raw_input holds an array of {} items", items.len()));
            let mut records = Vec::new();
            for item in &items {
                records.extend(normalize_value(item, log));
            }
            records
        }
        other => normalize_value(&other, log),
    }
}

/// Lift the canonical fields out of a `data` envelope, skipping nulls so
/// the usual defaults fill the gaps.
fn lift_data_envelope(data: &Value, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    log.push("Lifting record out of data envelope".to_string());

    let mut lifted = Map::new();
    for key in [
        "topic",
        "category",
        "order_code_prefix",
        "gender_policy",
        "questions",
    ] {
        if let Some(field) = data.get(key) {
            if !field.is_null() {
                lifted.insert(key.to_string(), field.clone());
            }
        }
    }

    convert_question_record(Value::Object(lifted), log)
}

/// Wrap a flat `topic` + content record as a single-question input.
fn wrap_flat_question(object: &Map<String, Value>, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    log.push("Wrapping flat record as a single-question input".to_string());

    let content = ["base_content", "question"]
        .iter()
        .find_map(|key| {
            object
                .get(*key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .unwrap_or("");

    let wrapped = json!({
        "topic": field_or(object, "topic", Value::Null),
        "category": field_or(object, "category", json!(Category::default().as_str())),
        "order_code_prefix": field_or(object, "order_code_prefix", json!("")),
        "gender_policy": field_or(object, "gender_policy", json!("neutral")),
        "questions": [{
            "context_variant": field_or(object, "context_variant", json!("Default")),
            "base_content": content,
            "enrichment_materials": field_or(object, "enrichment_materials", json!({})),
        }],
    });

    convert_question_record(wrapped, log)
}

/// Build a [`SituationRecord`], synthesizing the canonical fields and
/// keeping everything else in `extra`.
fn normalize_situations(
    object: &Map<String, Value>,
    log: &mut Vec<String>,
) -> Vec<RecoveredRecord> {
    const RESERVED: [&str; 5] = [
        "topic",
        "category",
        "order_code_prefix",
        "gender_policy",
        "situations",
    ];

    let topic = string_or_number(object, "이슈 요약")
        .or_else(|| string_or_number(object, "일련번호"))
        .unwrap_or_else(|| "Unknown Situation".to_string());

    log.push(format!("Accepted situation record: {}", topic));

    let situations = object
        .get("situations")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut extra = Map::new();
    for (key, value) in object {
        if !RESERVED.contains(&key.as_str()) {
            extra.insert(key.clone(), value.clone());
        }
    }

    vec![RecoveredRecord::Situation(SituationRecord {
        topic,
        category: Category::Situation.as_str().to_string(),
        order_code_prefix: string_or_number(object, "일련번호").unwrap_or_default(),
        gender_policy: default_gender_policy(),
        situations,
        extra,
    })]
}

/// Validate a question-shaped value into an [`EnrichmentInput`].
fn convert_question_record(value: Value, log: &mut Vec<String>) -> Vec<RecoveredRecord> {
    match EnrichmentInput::from_value(value) {
        Ok(input) => {
            log.push(format!("Accepted question record: {}", input.topic));
            vec![RecoveredRecord::Question(input)]
        }
        Err(err) => {
            log.push(format!("Question record failed validation: {}", err));
            Vec::new()
        }
    }
}

/// True when `key` holds a non-empty string.
fn has_text(object: &Map<String, Value>, key: &str) -> bool {
    object
        .get(key)
        .and_then(Value::as_str)
        .map_or(false, |text| !text.is_empty())
}

/// The field's value, unless it is absent or null.
fn field_or(object: &Map<String, Value>, key: &str, fallback: Value) -> Value {
    match object.get(key) {
        Some(value) if !value.is_null() => value.clone(),
        _ => fallback,
    }
}

/// The field as a string, accepting numbers for id-like source columns.
fn string_or_number(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_to_back_flat_records() {
        let text = concat!(
            r#"{"topic": "주말", "question": "주말에 뭐 해?"}"#,
            r#"{"topic": "아침", "base_content": "아침형이야?"}"#,
        );

        let report = recover_records(text);

        assert_eq!(report.records.len(), 2);
        assert!(!report.log.is_empty());
        assert_eq!(report.records[0].topic(), "주말");
        assert_eq!(report.records[1].topic(), "아침");
    }

    #[test]
    fn test_flat_record_gets_defaults() {
        let report = recover_records(r#"{"topic": "주말", "question": "주말에 뭐 해?"}"#);

        let input = report.records[0].as_question().unwrap();
        assert_eq!(input.category, "Friend");
        assert_eq!(input.order_code_prefix, "");
        assert_eq!(input.gender_policy, "neutral");
        assert_eq!(input.questions.len(), 1);
        assert_eq!(input.questions[0].context_variant, "Default");
        assert_eq!(input.questions[0].base_content, "주말에 뭐 해?");
    }

    #[test]
    fn test_base_content_wins_over_question() {
        let text = r#"{"topic": "주말", "base_content": "본문", "question": "질문"}"#;
        let report = recover_records(text);

        let input = report.records[0].as_question().unwrap();
        assert_eq!(input.questions[0].base_content, "본문");
    }

    #[test]
    fn test_raw_input_python_list_is_recovered() {
        let text = r#"{"raw_input": "[{'topic': '주말', 'question': '주말에 뭐 해?'}, {'topic': '아침', 'question': '아침형이야?'}]"}"#;

        let report = recover_records(text);

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].topic(), "주말");
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("python literal")));
    }

    #[test]
    fn test_raw_input_code_fence_is_recovered() {
        let text = concat!(
            r#"{"raw_input": "```json\n"#,
            r#"{\"topic\": \"주말\", \"question\": \"주말에 뭐 해?\"}\n```"}"#,
        );

        let report = recover_records(text);

        assert_eq!(report.records.len(), 1);
        assert!(report.log.iter().any(|line| line.contains("code fence")));
    }

    #[test]
    fn test_raw_input_array_value_is_flattened() {
        let text = r#"{"raw_input": [{"topic": "주말", "question": "주말에 뭐 해?"}]}"#;

        let report = recover_records(text);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].topic(), "주말");
    }

    #[test]
    fn test_unrecoverable_raw_input_is_skipped() {
        let report = recover_records(r#"{"raw_input": "질문 생성 실패"}"#);

        assert!(report.records.is_empty());
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("No repair strategy recovered")));
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("not an object")));
    }

    #[test]
    fn test_data_envelope_is_lifted() {
        let text = r#"{
            "status": "ok",
            "data": {
                "topic": "주말",
                "order_code_prefix": "B-01",
                "gender_policy": null,
                "questions": [{
                    "context_variant": "Default",
                    "base_content": "주말에 뭐 해?",
                    "enrichment_materials": {}
                }]
            }
        }"#;

        let report = recover_records(text);

        let input = report.records[0].as_question().unwrap();
        assert_eq!(input.topic, "주말");
        assert_eq!(input.order_code_prefix, "B-01");
        assert_eq!(input.gender_policy, "neutral");
    }

    #[test]
    fn test_canonical_record_passes_through() {
        let text = r#"{
            "topic": "주말",
            "category": "Friend",
            "order_code_prefix": "B-01",
            "questions": [{
                "context_variant": "Default",
                "base_content": "주말에 뭐 해?",
                "enrichment_materials": {
                    "enrichment_psychological_tensions": "계획 vs 즉흥"
                }
            }]
        }"#;

        let report = recover_records(text);

        let input = report.records[0].as_question().unwrap();
        assert_eq!(input.questions[0].enrichment_materials.tensions(), vec![
            "계획 vs 즉흥"
        ]);
    }

    #[test]
    fn test_situation_record_is_normalized() {
        let text = r#"{
            "일련번호": 42,
            "이슈 요약": "층간소음 갈등",
            "situations": [{"step": 1}],
            "비고": "참고용"
        }"#;

        let report = recover_records(text);

        assert_eq!(report.records.len(), 1);
        match &report.records[0] {
            RecoveredRecord::Situation(record) => {
                assert_eq!(record.topic, "층간소음 갈등");
                assert_eq!(record.category, "Situation");
                assert_eq!(record.order_code_prefix, "42");
                assert_eq!(record.gender_policy, "neutral");
                assert_eq!(record.situations.len(), 1);
                assert!(record.extra.contains_key("비고"));
                assert!(record.extra.contains_key("이슈 요약"));
            }
            RecoveredRecord::Question(_) => panic!("expected a situation record"),
        }
    }

    #[test]
    fn test_unrecognizable_record_is_rejected_with_reason() {
        let report = recover_records(r#"{"topic": "주말", "note": "내용 없음"}"#);

        assert!(report.records.is_empty());
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("topic present but no questions")));
    }

    #[test]
    fn test_record_without_topic_is_rejected() {
        let report = recover_records(r#"{"note": "데이터 아님"}"#);

        assert!(report.records.is_empty());
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("no topic, questions, or situations")));
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = recover_records("   ");

        assert!(report.records.is_empty());
        assert!(report.log.iter().any(|line| line.contains("Input is empty")));
    }

    #[test]
    fn test_whole_text_fallback_logs_non_objects() {
        let report = recover_records("\"hello\"");

        assert!(report.records.is_empty());
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("trying whole-text parse")));
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("not an object")));
    }

    #[test]
    fn test_broken_block_is_logged_and_skipped() {
        let text = r#"{"topic": "주말" "question": "쉼표 없음"}{"topic": "아침", "question": "아침형이야?"}"#;

        let report = recover_records(text);

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].topic(), "아침");
        assert!(report
            .log
            .iter()
            .any(|line| line.contains("parse failed")));
    }

    #[test]
    fn test_question_inputs_filters_situations() {
        let text = concat!(
            r#"{"topic": "주말", "question": "주말에 뭐 해?"}"#,
            r#"{"일련번호": "S-1", "situations": []}"#,
        );

        let report = recover_records(text);

        assert_eq!(report.records.len(), 2);
        let inputs = report.question_inputs();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].topic, "주말");
    }
}

//! Compression rule tables.
//!
//! Rules are data, not code: each compressor flavor is described by a
//! [`RuleSet`] value holding an ordered phrase-substitution table, an ordered
//! list of particle patterns, a character ceiling, and an overflow style. The
//! built-in tables below are the canonical Korean profiles; [`RuleSet`] also
//! deserializes from TOML so localized or experimental tables can ship as
//! data files.
//!
//! Tables are evaluated top to bottom and order carries meaning: an early
//! short rule can fire inside the text of a later long rule. Where that
//! happens below it reproduces live behavior and is kept as-is.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A literal substring replacement, applied to all occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseRule {
    pub from: String,
    pub to: String,
}

/// A regex-driven rewrite, applied after the phrase table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleRule {
    /// Regular-expression pattern; validated when a compressor is built.
    pub pattern: String,
    pub to: String,
}

/// What to do when compressed text still exceeds the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Truncate to `max_chars - 1` and append `?`.
    QuestionMark,
    /// Truncate to `max_chars - 1` and append `…`.
    Ellipsis,
    /// Truncate to `max_chars` with no terminator.
    #[default]
    Chop,
}

/// An ordered set of rewrite rules for one compressor flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Ordered literal replacements, evaluated top to bottom.
    #[serde(default)]
    pub phrases: Vec<PhraseRule>,

    /// Ordered regex rewrites, evaluated after the phrase table.
    #[serde(default)]
    pub particles: Vec<ParticleRule>,

    /// Length ceiling in characters (not bytes).
    pub max_chars: usize,

    /// Append `?` when the result ends in neither `?` nor `!`.
    #[serde(default)]
    pub ensure_question_mark: bool,

    #[serde(default)]
    pub overflow: Overflow,
}

impl RuleSet {
    /// Parse a rule set from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str(text)?)
    }

    /// Question profile for balance questions: 50 chars, `?` on overflow.
    pub fn balance_question() -> Self {
        build(
            QUESTION_PHRASES,
            QUESTION_PARTICLES,
            50,
            true,
            Overflow::QuestionMark,
        )
    }

    /// Question profile for truth questions: 50 chars, ellipsis on overflow.
    pub fn truth_question() -> Self {
        build(
            QUESTION_PHRASES,
            QUESTION_PARTICLES,
            50,
            true,
            Overflow::Ellipsis,
        )
    }

    /// Option profile for balance options: 15 chars, bare truncation.
    pub fn balance_option() -> Self {
        build(OPTION_PHRASES, OPTION_PARTICLES, 15, false, Overflow::Chop)
    }

    /// Answer profile for truth answers: 15 chars, bare truncation.
    pub fn truth_answer() -> Self {
        build(ANSWER_PHRASES, ANSWER_PARTICLES, 15, false, Overflow::Chop)
    }
}

fn build(
    phrases: &[(&str, &str)],
    particles: &[(&str, &str)],
    max_chars: usize,
    ensure_question_mark: bool,
    overflow: Overflow,
) -> RuleSet {
    RuleSet {
        phrases: phrases
            .iter()
            .map(|(from, to)| PhraseRule {
                from: (*from).to_string(),
                to: (*to).to_string(),
            })
            .collect(),
        particles: particles
            .iter()
            .map(|(pattern, to)| ParticleRule {
                pattern: (*pattern).to_string(),
                to: (*to).to_string(),
            })
            .collect(),
        max_chars,
        ensure_question_mark,
        overflow,
    }
}

/// Question-flavor phrase table, shared by the balance and truth profiles.
const QUESTION_PHRASES: &[(&str, &str)] = &[
    // Plural companions
    ("아이들과", "아이와"),
    ("가족들이랑", "가족과"),
    ("친구들이랑", "친구와"),
    // Sentence endings
    ("함께 해본 적 있어?", "해봤어?"),
    ("어떻게 생각해?", "어때?"),
    ("어떤 시간 보내?", "뭐 해?"),
    ("시간을 보내다", "놀기"),
    ("그림 그리면서", "그림 그리며"),
    ("이야기 나누기", "대화"),
    ("생각해본 적 있어?", "생각해봐"),
    ("알고 있어?", "알아?"),
    ("어떠했어?", "어땠어?"),
    // Noun phrases
    ("기억에 남는", "기억남는"),
    ("가장 좋아하는", "최애"),
    ("무엇인가요?", "뭐야?"),
    ("무엇인가?", "뭐야?"),
];

/// Question-flavor particle elision: object/subject/possessive markers.
const QUESTION_PARTICLES: &[(&str, &str)] = &[
    ("을 ", " "),
    ("를 ", " "),
    ("이 ", " "),
    ("가 ", " "),
    ("의 ", " "),
];

/// Option-flavor phrase table.
const OPTION_PHRASES: &[(&str, &str)] = &[
    // Choice scaffolding
    ("쪽을 선택", ""),
    ("반대 선택", "아님"),
    ("선택 안 함", "안 함"),
    ("하는 것", ""),
    ("하기", ""),
    ("함", ""),
    ("됨", ""),
    // Known long phrases with fixed short forms
    ("하루 꽉 채운 액티비티 여행", "꽉찬 액티비티"),
    ("숙소 중심으로 쉬는 힐링 여행", "숙소 힐링"),
    ("미리 계획한 일정대로", "계획대로"),
    ("그날 기분대로 움직이기", "기분따라"),
    ("놀아줘야 한다는", "놀아주는"),
    ("아이보다 그림 못 그릴 때의", "실력 부족"),
    ("칭찬과 솔직함 사이의", "칭찬 vs 솔직"),
];

/// Option-flavor particle elision.
const OPTION_PARTICLES: &[(&str, &str)] = &[
    // Connective phrases
    ("에 대한", ""),
    ("을 위한", ""),
    ("에 관한", ""),
    ("으로 인한", ""),
    ("때문에", ""),
    ("때의", "때"),
    // Trailing particles
    ("의 ", " "),
    ("을 ", " "),
    ("를 ", " "),
    ("이 ", " "),
    ("가 ", " "),
    ("은 ", " "),
    ("는 ", " "),
    ("와 ", " "),
    ("과 ", " "),
    ("로 ", " "),
    // Verb stems
    ("하다", ""),
    ("있다", ""),
];

/// Answer-flavor phrase table.
const ANSWER_PHRASES: &[(&str, &str)] = &[
    // Hedging tails
    ("쪽인 것 같아", ""),
    ("기억이 더 남아", "기억"),
    ("생각이 들어", "생각"),
    ("하는 것", ""),
    ("하기", ""),
    ("함", ""),
    ("느낌이야", "느낌"),
    ("쪽이야", ""),
    // Recurring typo in generated text
    ("기억놔", "기억나"),
    // Known long phrases with fixed short forms
    ("놀아줘야 한다는", "의무적인"),
    ("아이보다 그림 못 그릴 때의", "실력 부족"),
    ("칭찬과 솔직함 사이의", "칭찬 vs 솔직"),
    ("피곤하지만 억지로", "억지로"),
    // Verb stems
    ("있다", ""),
    ("하다", ""),
    ("되다", ""),
];

/// Answer-flavor particle elision.
const ANSWER_PARTICLES: &[(&str, &str)] = &[
    // Connective phrases
    ("에 대한", ""),
    ("을 위한", ""),
    ("에 관한", ""),
    ("으로 인한", ""),
    ("때문에", ""),
    ("때의", "때"),
    // Trailing particles
    ("의 ", " "),
    ("을 ", " "),
    ("를 ", " "),
    ("이 ", " "),
    ("가 ", " "),
    ("은 ", " "),
    ("는 ", " "),
    ("와 ", " "),
    ("과 ", " "),
    ("로 ", " "),
];

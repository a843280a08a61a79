//! Text Compressor - deterministic rewriting of generated question text.
//!
//! Every compressor flavor runs the same four stages over its own rule table:
//! 1. **Phrases**: ordered literal substring replacements
//! 2. **Particles**: ordered regex rewrites (Korean particle elision)
//! 3. **Whitespace**: collapse runs to one space, trim the ends
//! 4. **Finish + clamp**: flavor ending rule, then the hard character ceiling
//!
//! Compression never fails: any input string, including the empty string,
//! produces a string within the flavor's ceiling. Truncation may cut
//! mid-word; downstream display accepts that as the cost of a hard ceiling.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use question_model::{Overflow, RuleSet};

/// Matches runs of whitespace for the normalization stage.
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

// The four canonical flavors, compiled once and cloned out on demand.
// Cloning is cheap: compiled regexes are reference-counted.
static BALANCE_QUESTION: Lazy<TextCompressor> = Lazy::new(|| {
    TextCompressor::from_rules(&RuleSet::balance_question())
        .expect("Built-in balance question rules are valid")
});
static TRUTH_QUESTION: Lazy<TextCompressor> = Lazy::new(|| {
    TextCompressor::from_rules(&RuleSet::truth_question())
        .expect("Built-in truth question rules are valid")
});
static BALANCE_OPTION: Lazy<TextCompressor> = Lazy::new(|| {
    TextCompressor::from_rules(&RuleSet::balance_option())
        .expect("Built-in balance option rules are valid")
});
static TRUTH_ANSWER: Lazy<TextCompressor> = Lazy::new(|| {
    TextCompressor::from_rules(&RuleSet::truth_answer())
        .expect("Built-in truth answer rules are valid")
});

/// Errors raised while compiling a rule set into a compressor.
#[derive(Debug, Error)]
pub enum CompressorError {
    /// A particle rule's pattern failed to compile.
    #[error("invalid particle pattern '{pattern}': {source}")]
    InvalidParticlePattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A compiled rewrite pipeline for one output flavor.
#[derive(Debug, Clone)]
pub struct TextCompressor {
    phrases: Vec<(String, String)>,
    particles: Vec<(Regex, String)>,
    max_chars: usize,
    ensure_question_mark: bool,
    overflow: Overflow,
}

impl TextCompressor {
    /// Compile a rule set, validating every particle pattern.
    pub fn from_rules(rules: &RuleSet) -> Result<Self, CompressorError> {
        let mut particles = Vec::with_capacity(rules.particles.len());
        for rule in &rules.particles {
            let pattern = Regex::new(&rule.pattern).map_err(|source| {
                CompressorError::InvalidParticlePattern {
                    pattern: rule.pattern.clone(),
                    source,
                }
            })?;
            particles.push((pattern, rule.to.clone()));
        }

        Ok(Self {
            phrases: rules
                .phrases
                .iter()
                .map(|rule| (rule.from.clone(), rule.to.clone()))
                .collect(),
            particles,
            max_chars: rules.max_chars,
            ensure_question_mark: rules.ensure_question_mark,
            overflow: rules.overflow,
        })
    }

    /// The canonical question compressor for balance questions.
    pub fn balance_question() -> Self {
        BALANCE_QUESTION.clone()
    }

    /// The canonical question compressor for truth questions.
    pub fn truth_question() -> Self {
        TRUTH_QUESTION.clone()
    }

    /// The canonical option compressor.
    pub fn balance_option() -> Self {
        BALANCE_OPTION.clone()
    }

    /// The canonical answer compressor.
    pub fn truth_answer() -> Self {
        TRUTH_ANSWER.clone()
    }

    /// The flavor's ceiling, in characters.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Apply the full rewrite pipeline to one string.
    pub fn compress(&self, text: &str) -> String {
        // Stage 1: ordered literal replacements
        let mut out = text.to_string();
        for (from, to) in &self.phrases {
            out = out.replace(from.as_str(), to.as_str());
        }

        // Stage 2: ordered particle rewrites
        for (pattern, to) in &self.particles {
            out = pattern.replace_all(&out, to.as_str()).into_owned();
        }

        // Stage 3: whitespace normalization
        let collapsed = WHITESPACE_RUN.replace_all(&out, " ");
        let mut out = collapsed.trim().to_string();

        // Stage 4: flavor ending, then the hard ceiling
        if self.ensure_question_mark && !out.ends_with('?') && !out.ends_with('!') {
            out.push('?');
        }
        self.clamp(out)
    }

    /// Ceilings are measured in characters; Korean text makes byte
    /// truncation both wrong and panic-prone.
    fn clamp(&self, text: String) -> String {
        if text.chars().count() <= self.max_chars {
            return text;
        }

        match self.overflow {
            Overflow::QuestionMark => {
                let mut clipped: String =
                    text.chars().take(self.max_chars.saturating_sub(1)).collect();
                clipped.push('?');
                clipped
            }
            Overflow::Ellipsis => {
                let mut clipped: String =
                    text.chars().take(self.max_chars.saturating_sub(1)).collect();
                clipped.push('…');
                clipped
            }
            Overflow::Chop => text.chars().take(self.max_chars).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use question_model::{ParticleRule, PhraseRule};

    #[test]
    fn test_question_phrase_substitution() {
        let question = TextCompressor::balance_question();
        assert_eq!(
            question.compress("가장 좋아하는 음식이 무엇인가요?"),
            "최애 음식 뭐야?"
        );
    }

    #[test]
    fn test_question_particle_elision() {
        let question = TextCompressor::balance_question();
        assert_eq!(question.compress("친구를 만나면"), "친구 만나면?");
    }

    #[test]
    fn test_question_mark_appended() {
        let question = TextCompressor::balance_question();
        assert_eq!(question.compress("주말에 뭐 해"), "주말에 뭐 해?");
        // Already-terminated text is left alone.
        assert_eq!(question.compress("정말 신나!"), "정말 신나!");
    }

    #[test]
    fn test_question_overflow_terminators() {
        let long = "가나다라마바사아자차카타파하".repeat(4);

        let balance = TextCompressor::balance_question().compress(&long);
        assert_eq!(balance.chars().count(), 50);
        assert!(balance.ends_with('?'));

        let truth = TextCompressor::truth_question().compress(&long);
        assert_eq!(truth.chars().count(), 50);
        assert!(truth.ends_with('…'));
    }

    #[test]
    fn test_option_chop_has_no_terminator() {
        let option = TextCompressor::balance_option();
        let long = "가나다라마바사아자차카타파하가나다라마바";
        let compressed = option.compress(long);
        assert_eq!(compressed.chars().count(), 15);
        assert!(!compressed.ends_with('…'));
        assert!(!compressed.ends_with('?'));
    }

    #[test]
    fn test_option_scaffolding_stripped() {
        let option = TextCompressor::balance_option();
        assert_eq!(option.compress("산책 쪽을 선택"), "산책");
        assert_eq!(option.compress("산책 반대 선택"), "산책 아님");
        assert_eq!(option.compress("그날 기분대로 움직이기"), "기분따라");
    }

    #[test]
    fn test_option_rule_order_shadowing() {
        // "선택 안 함" collapses to "안 함" and then loses its "함" to the
        // later verb-stem rule. Live behavior, kept deliberately.
        let option = TextCompressor::balance_option();
        assert_eq!(option.compress("선택 안 함"), "안");
    }

    #[test]
    fn test_answer_hedging_stripped() {
        let answer = TextCompressor::truth_answer();
        assert_eq!(answer.compress("놀아줘야 한다는 기억이 더 남아"), "의무적인 기억");
        assert_eq!(answer.compress("피곤하지만 억지로"), "억지로");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let answer = TextCompressor::truth_answer();
        assert_eq!(answer.compress("  그냥   좋아  "), "그냥 좋아");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(TextCompressor::balance_question().compress(""), "?");
        assert_eq!(TextCompressor::balance_option().compress(""), "");
        assert_eq!(TextCompressor::truth_answer().compress(""), "");
    }

    #[test]
    fn test_ceiling_holds_for_all_flavors() {
        let long = "아주 긴 문장 ".repeat(30);
        let inputs = ["", "짧다", long.as_str()];
        let flavors = [
            TextCompressor::balance_question(),
            TextCompressor::truth_question(),
            TextCompressor::balance_option(),
            TextCompressor::truth_answer(),
        ];
        for flavor in &flavors {
            for input in &inputs {
                assert!(flavor.compress(input).chars().count() <= flavor.max_chars());
            }
        }
    }

    #[test]
    fn test_idempotent_on_clean_text() {
        let question = TextCompressor::balance_question();
        let once = question.compress("주말에 뭐 해?");
        assert_eq!(question.compress(&once), once);

        let answer = TextCompressor::truth_answer();
        let clean = answer.compress("그냥 좋아");
        assert_eq!(answer.compress(&clean), clean);
    }

    #[test]
    fn test_from_rules_rejects_bad_pattern() {
        let rules = RuleSet {
            phrases: Vec::new(),
            particles: vec![ParticleRule {
                pattern: "(".to_string(),
                to: String::new(),
            }],
            max_chars: 10,
            ensure_question_mark: false,
            overflow: Overflow::Chop,
        };

        let result = TextCompressor::from_rules(&rules);
        assert!(matches!(
            result,
            Err(CompressorError::InvalidParticlePattern { .. })
        ));
    }

    #[test]
    fn test_toml_rules_match_code_built_rules() {
        let toml_rules = RuleSet::from_toml_str(
            r#"
                max_chars = 50
                ensure_question_mark = true
                overflow = "question_mark"

                [[phrases]]
                from = "가장 좋아하는"
                to = "최애"

                [[particles]]
                pattern = "이 "
                to = " "
            "#,
        )
        .unwrap();

        let code_rules = RuleSet {
            phrases: vec![PhraseRule {
                from: "가장 좋아하는".to_string(),
                to: "최애".to_string(),
            }],
            particles: vec![ParticleRule {
                pattern: "이 ".to_string(),
                to: " ".to_string(),
            }],
            max_chars: 50,
            ensure_question_mark: true,
            overflow: Overflow::QuestionMark,
        };

        let from_toml = TextCompressor::from_rules(&toml_rules).unwrap();
        let from_code = TextCompressor::from_rules(&code_rules).unwrap();
        let sample = "가장 좋아하는 간식이 뭐야";
        assert_eq!(from_toml.compress(sample), from_code.compress(sample));
        assert_eq!(from_toml.compress(sample), "최애 간식 뭐야?");
    }
}

//! Bias-attribute redaction applied before any scoring

use crate::config::AnonymizerConfig;
use crate::error::Result;
use crate::processing::entities::{EntityRecognizer, GazetteerRecognizer};
use regex::Regex;
use std::collections::HashSet;

/// Replacement for every redacted span. Lower-case so re-anonymizing is a no-op.
pub const REDACTION_MARKER: &str = "<redacted>";

const GENDER_TERMS: &[&str] = &[
    "he", "she", "him", "her", "his", "hers", "male", "female", "man", "woman", "men", "women",
];

const RELIGION_TERMS: &[&str] = &[
    "hindu", "muslim", "christian", "sikh", "jewish", "buddhist", "jain",
];

const TITLE_TERMS: &[&str] = &["mr", "mrs", "ms", "miss", "sir", "madam"];

pub struct Anonymizer {
    recognizer: Box<dyn EntityRecognizer>,
    term_patterns: Vec<Regex>,
}

impl Anonymizer {
    pub fn new() -> Result<Self> {
        Self::with_config(&AnonymizerConfig::default())
    }

    pub fn with_config(config: &AnonymizerConfig) -> Result<Self> {
        Ok(Self::with_recognizer(Box::new(GazetteerRecognizer::with_config(config)?)))
    }

    pub fn with_recognizer(recognizer: Box<dyn EntityRecognizer>) -> Self {
        // Applied in this order: gender, religion, titles.
        let term_patterns = [GENDER_TERMS, RELIGION_TERMS, TITLE_TERMS]
            .iter()
            .map(|terms| {
                Regex::new(&format!(r"(?i)\b(?:{})\b", terms.join("|")))
                    .expect("Invalid term regex")
            })
            .collect();

        Self {
            recognizer,
            term_patterns,
        }
    }

    /// Lower-case `text`, redact recognized entities everywhere they occur,
    /// then redact gender, religion and title terms.
    pub fn anonymize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut anonymized = self.remove_named_entities(&lowered);

        for pattern in &self.term_patterns {
            anonymized = pattern.replace_all(&anonymized, REDACTION_MARKER).into_owned();
        }

        anonymized
    }

    /// Every occurrence of a detected entity's text is replaced, not only the
    /// detected span. Replacement is literal. A replacement can put a new word
    /// boundary next to text the recognizer skipped, so recognition repeats
    /// until a pass finds nothing left to replace.
    fn remove_named_entities(&self, text: &str) -> String {
        let mut seen = HashSet::new();
        let mut anonymized = text.to_string();

        loop {
            let mut replaced = false;
            for entity in self.recognizer.recognize(&anonymized) {
                if entity.text.is_empty() || !seen.insert(entity.text.clone()) {
                    continue;
                }
                if anonymized.contains(&entity.text) {
                    anonymized = anonymized.replace(&entity.text, REDACTION_MARKER);
                    replaced = true;
                }
            }
            if !replaced {
                return anonymized;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::entities::{Entity, EntityLabel};

    struct FixedRecognizer(Vec<&'static str>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            self.0
                .iter()
                .filter_map(|needle| {
                    text.find(needle).map(|start| Entity {
                        text: needle.to_string(),
                        label: EntityLabel::Person,
                        start,
                        end: start + needle.len(),
                    })
                })
                .collect()
        }
    }

    #[test]
    fn test_empty_input() {
        let anonymizer = Anonymizer::new().unwrap();
        assert_eq!(anonymizer.anonymize(""), "");
    }

    #[test]
    fn test_terms_whole_word_only() {
        let anonymizer = Anonymizer::new().unwrap();
        let text = anonymizer.anonymize("She is the manager; Mr Smith helped them. Theme: menu");

        assert_eq!(
            text,
            "<redacted> is the manager; <redacted> smith helped them. theme: menu"
        );
    }

    #[test]
    fn test_religion_terms() {
        let anonymizer = Anonymizer::new().unwrap();
        let text = anonymizer.anonymize("member of the Sikh and Jain communities");
        assert_eq!(text, "member of the <redacted> and <redacted> communities");
    }

    #[test]
    fn test_entity_replaced_everywhere() {
        let anonymizer = Anonymizer::new().unwrap();
        let text = anonymizer.anonymize("Lived in London. Londoners love london.");

        assert!(!text.contains("london"));
        assert_eq!(
            text,
            "lived in <redacted>. <redacted>ers love <redacted>."
        );
    }

    #[test]
    fn test_entity_text_is_not_a_pattern() {
        let anonymizer = Anonymizer::with_recognizer(Box::new(FixedRecognizer(vec!["c++ (x)"])));
        let text = anonymizer.anonymize("knows c++ (x) and c++ (x) and cx");
        assert_eq!(text, "knows <redacted> and <redacted> and cx");
    }

    #[test]
    fn test_header_name_redacted() {
        let anonymizer = Anonymizer::new().unwrap();
        let text = anonymizer.anonymize("Sarah Okafor\nData scientist. Contact Sarah Okafor.");
        assert!(!text.contains("sarah"));
        assert!(!text.contains("okafor"));
    }

    #[test]
    fn test_idempotent() {
        let anonymizer = Anonymizer::new().unwrap();
        let once = anonymizer.anonymize(
            "John Carter\nHe is an American analyst from Chicago. His Muslim colleague, Mrs Lee.",
        );
        let twice = anonymizer.anonymize(&once);
        assert_eq!(once, twice);

        let once = anonymizer.anonymize("lived in paris, parisjohn!");
        assert_eq!(once, "lived in <redacted>, <redacted><redacted>!");
        assert_eq!(anonymizer.anonymize(&once), once);
    }
}

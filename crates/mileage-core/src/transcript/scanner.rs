//! Single-pass token scan over a transcript.

use tracing::{debug, trace};

use crate::models::config::Vocabulary;
use crate::models::fillup::ParsedFillUp;

use super::aggregator::{Aggregator, FieldAssignment};
use super::normalizer::{tokenize, Token};
use super::rules::{default_rules, FieldRule};
use super::TranscriptParser;

/// Token-scan transcript parser.
///
/// Walks the tokens once, left to right. At each position the rules are
/// tried in priority order and the first match claims its tokens; a position
/// no rule matches is skipped. A field recognized twice keeps the later value.
pub struct TokenScanParser {
    vocabulary: Vocabulary,
    rules: Vec<Box<dyn FieldRule + Send + Sync>>,
}

impl TokenScanParser {
    /// Create a parser with the default vocabulary and rule order.
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            rules: default_rules(),
        }
    }

    /// Use a custom vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Run the scan and return assignments in the order they were made.
    pub fn scan(&self, tokens: &[Token]) -> Vec<FieldAssignment> {
        let mut assignments = Vec::new();
        let mut cursor = 0;

        while cursor < tokens.len() {
            let matched = self
                .rules
                .iter()
                .find_map(|rule| rule.apply(tokens, cursor, &self.vocabulary).map(|m| (rule.name(), m)));

            match matched {
                Some((rule, m)) => {
                    trace!(
                        "{} rule set {} at token {} ({} consumed)",
                        rule,
                        m.assignment.field(),
                        cursor,
                        m.consumed
                    );
                    cursor += m.consumed;
                    assignments.push(m.assignment);
                }
                None => cursor += 1,
            }
        }

        assignments
    }
}

impl Default for TokenScanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptParser for TokenScanParser {
    fn name(&self) -> &'static str {
        "token_scan"
    }

    fn parse(&self, transcript: &str) -> ParsedFillUp {
        let tokens = tokenize(transcript);

        let mut aggregator = Aggregator::new();
        for assignment in self.scan(&tokens) {
            aggregator.push(assignment);
        }

        debug!(
            "Scanned {} tokens, {} field assignments",
            tokens.len(),
            aggregator.assignments()
        );

        aggregator.finish()
    }
}

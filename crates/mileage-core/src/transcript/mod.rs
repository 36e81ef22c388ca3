//! Fill-up extraction from free-form transcripts.
//!
//! Transcripts come from a speech engine (once per partial and final result)
//! or from OCR of a receipt. Both are plain text to this module; parsing is
//! stateless and never fails.

pub mod aggregator;
pub mod normalizer;
mod regex_parser;
pub mod rules;
mod scanner;

pub use aggregator::{Aggregator, FieldAssignment};
pub use normalizer::{parse_number, tokenize, Token};
pub use regex_parser::RegexTranscriptParser;
pub use scanner::TokenScanParser;

use lazy_static::lazy_static;

use crate::models::config::{ExtractionConfig, ParseStrategy};
use crate::models::fillup::ParsedFillUp;

/// Trait for transcript parsing.
pub trait TranscriptParser {
    /// Strategy name for logs and output.
    fn name(&self) -> &'static str;

    /// Extract fill-up fields from a transcript.
    fn parse(&self, transcript: &str) -> ParsedFillUp;
}

impl<P: TranscriptParser + ?Sized> TranscriptParser for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn parse(&self, transcript: &str) -> ParsedFillUp {
        (**self).parse(transcript)
    }
}

impl<P: TranscriptParser + ?Sized> TranscriptParser for std::sync::Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn parse(&self, transcript: &str) -> ParsedFillUp {
        (**self).parse(transcript)
    }
}

lazy_static! {
    static ref DEFAULT_PARSER: TokenScanParser = TokenScanParser::new();
}

/// Parse a transcript with the default token scan.
pub fn parse(transcript: &str) -> ParsedFillUp {
    DEFAULT_PARSER.parse(transcript)
}

/// Build the parser selected by the extraction configuration.
pub fn parser_for(config: &ExtractionConfig) -> Box<dyn TranscriptParser + Send + Sync> {
    match config.strategy {
        ParseStrategy::TokenScan => {
            Box::new(TokenScanParser::new().with_vocabulary(config.vocabulary.clone()))
        }
        ParseStrategy::Regex => Box::new(RegexTranscriptParser::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_parse() {
        let parsed = parse("154000 km 54 L $80");
        assert_eq!(parsed.odometer, Some(Decimal::new(154000, 0)));
        assert_eq!(parse("154000 km 54 L $80"), parsed);
    }

    #[test]
    fn test_parser_for_strategy() {
        let mut config = ExtractionConfig::default();
        assert_eq!(parser_for(&config).name(), "token_scan");

        config.strategy = ParseStrategy::Regex;
        let parser = parser_for(&config);
        assert_eq!(parser.name(), "regex");
        assert_eq!(
            parser.parse("100 km then actually 200 km").odometer,
            Some(Decimal::new(100, 0))
        );
    }

    #[test]
    fn test_parsers_are_shareable_across_threads() {
        let parser = std::sync::Arc::new(parser_for(&ExtractionConfig::default()));

        let handles: Vec<_> = ["54 l", "$80", "in fernie"]
            .into_iter()
            .map(|text| {
                let parser = std::sync::Arc::clone(&parser);
                std::thread::spawn(move || parser.parse(text))
            })
            .collect();

        let results: Vec<ParsedFillUp> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[0].volume, Some(Decimal::new(54, 0)));
        assert_eq!(results[1].amount, Some(Decimal::new(80, 0)));
        assert_eq!(results[2].location, "Fernie");
    }
}

//! Whole-text regex parser: one search per field, first occurrence wins.

use lazy_static::lazy_static;
use regex::Captures;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::Vocabulary;
use crate::models::fillup::ParsedFillUp;

use super::normalizer::{parse_number, title_case, tokenize, Token};
use super::rules::patterns::{AMOUNT, LOCATION, ODOMETER, VOLUME};
use super::rules::starts_field;
use super::TranscriptParser;

lazy_static! {
    static ref VOCABULARY: Vocabulary = Vocabulary::default();
}

/// Regex transcript parser.
///
/// Agrees with [`TokenScanParser`](super::TokenScanParser) whenever each
/// field appears at most once. When a field is repeated this parser keeps the
/// first occurrence, the token scan the last. Uses the built-in default
/// vocabulary only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTranscriptParser;

impl RegexTranscriptParser {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptParser for RegexTranscriptParser {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn parse(&self, transcript: &str) -> ParsedFillUp {
        let text = tokenize(transcript)
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let parsed = ParsedFillUp {
            volume: VOLUME.captures(&text).and_then(|c| first_number(&c)),
            amount: find_amount(&text),
            odometer: ODOMETER.captures(&text).and_then(|c| first_number(&c)),
            location: find_location(&text),
        };

        debug!("Regex search over {} characters", text.len());

        parsed
    }
}

/// First amount whose numeral is not claimed by a following unit word.
///
/// Only the detached `$ 45` form can be followed by a unit; the search
/// resumes at the numeral when it is.
fn find_amount(text: &str) -> Option<Decimal> {
    let mut start = 0;
    while let Some(caps) = AMOUNT.captures_at(text, start) {
        let end = caps.get(0)?.end();
        match caps.get(2) {
            Some(numeral) if followed_by_unit(&text[end..]) => start = numeral.start() - 1,
            _ => return first_number(&caps),
        }
    }
    None
}

fn followed_by_unit(rest: &str) -> bool {
    rest.split_whitespace()
        .next()
        .is_some_and(|word| VOCABULARY.is_unit(Token::new(word).bare()))
}

/// First location phrase whose opening word is a place name.
///
/// A marker followed by a stop word, another marker, a number or a currency
/// token starts no phrase; the search resumes after it.
fn find_location(text: &str) -> String {
    let mut start = 0;
    while let Some(caps) = LOCATION.captures_at(text, start) {
        let Some(phrase) = caps.get(1) else {
            break;
        };

        let opens_phrase = phrase
            .as_str()
            .split_whitespace()
            .next()
            .map(Token::new)
            .is_some_and(|first| {
                !first.bare().is_empty()
                    && first.as_str() != VOCABULARY.location_marker
                    && !VOCABULARY.is_location_stop_word(first.bare())
                    && !starts_field(&first, &VOCABULARY)
            });

        if opens_phrase {
            return title_case(phrase.as_str().split_whitespace());
        }
        // The phrase is preceded by whitespace, where the next marker may start
        start = phrase.start() - 1;
    }
    String::new()
}

/// Value of the first participating capture group.
fn first_number(caps: &Captures<'_>) -> Option<Decimal> {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .and_then(|m| parse_number(m.as_str()))
}

//! Location phrases introduced by the marker word (`in lake country`).

use crate::models::config::Vocabulary;

use super::{starts_field, FieldRule, RuleMatch};
use crate::transcript::aggregator::FieldAssignment;
use crate::transcript::normalizer::{title_case, Token};

/// Matches `in <words...>` up to the end of the phrase.
///
/// The phrase ends at the end of input, after a word carrying trailing
/// punctuation, before a stop word or another marker, or before a token that
/// starts another field (a number or a currency-marked token).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationRule;

impl FieldRule for LocationRule {
    fn name(&self) -> &'static str {
        "location"
    }

    fn apply(&self, tokens: &[Token], cursor: usize, vocabulary: &Vocabulary) -> Option<RuleMatch> {
        if tokens.get(cursor)?.as_str() != vocabulary.location_marker {
            return None;
        }

        let mut words = Vec::new();
        let mut end = cursor + 1;
        while let Some(token) = tokens.get(end) {
            if vocabulary.is_location_stop_word(token.bare())
                || token.as_str() == vocabulary.location_marker
                || starts_field(token, vocabulary)
            {
                break;
            }
            end += 1;

            let word = token.bare();
            if !word.is_empty() {
                words.push(word);
            }
            if token.ends_clause() {
                break;
            }
        }

        if words.is_empty() {
            return None;
        }

        Some(RuleMatch::new(
            FieldAssignment::Location(title_case(words)),
            end - cursor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::normalizer::tokenize;

    fn apply(text: &str) -> Option<RuleMatch> {
        LocationRule.apply(&tokenize(text), 0, &Vocabulary::default())
    }

    fn location(name: &str, consumed: usize) -> Option<RuleMatch> {
        Some(RuleMatch::new(FieldAssignment::Location(name.to_string()), consumed))
    }

    #[test]
    fn test_stops_before_stop_word() {
        assert_eq!(apply("in Lake Country for the trip"), location("Lake Country", 3));
        assert_eq!(apply("in vernon and 50 liters"), location("Vernon", 2));
        assert_eq!(apply("in vernon in kelowna"), location("Vernon", 2));
    }

    #[test]
    fn test_stops_at_end_and_punctuation() {
        assert_eq!(apply("in abbotsford"), location("Abbotsford", 2));
        assert_eq!(apply("in fernie. 50 l"), location("Fernie", 2));
        assert_eq!(apply("in kelowna, bc"), location("Kelowna", 2));
        assert_eq!(apply("in vernon . ok"), location("Vernon", 3));
    }

    #[test]
    fn test_stops_before_other_fields() {
        assert_eq!(apply("in vancouver 150,000 km"), location("Vancouver", 2));
        assert_eq!(apply("in lake country $56"), location("Lake Country", 3));
    }

    #[test]
    fn test_marker_without_phrase() {
        assert_eq!(apply("in"), None);
        assert_eq!(apply("in for gas"), None);
        assert_eq!(apply("in 54 l"), None);
        assert_eq!(apply("in . vernon"), None);
    }

    #[test]
    fn test_requires_marker() {
        assert_eq!(apply("into the city"), None);
        assert_eq!(apply("vernon"), None);
    }
}

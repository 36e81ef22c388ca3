//! Amount recognition around the currency marker.

use rust_decimal::Decimal;

use crate::models::config::Vocabulary;

use super::{FieldRule, RuleMatch};
use crate::transcript::aggregator::FieldAssignment;
use crate::transcript::normalizer::{parse_number, Token};

/// Matches an amount marked by the currency symbol or a currency word.
///
/// Accepted forms, with `$` as the marker:
///
/// | tokens          | consumed |
/// |-----------------|----------|
/// | `$45.50`        | 1        |
/// | `45.50$`        | 1        |
/// | `$ 45.50`       | 2        |
/// | `paid $45.50`   | 2        |
/// | `45.50 $`       | 2        |
/// | `45.50 dollars` | 2        |
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountRule;

impl FieldRule for AmountRule {
    fn name(&self) -> &'static str {
        "amount"
    }

    fn apply(&self, tokens: &[Token], cursor: usize, vocabulary: &Vocabulary) -> Option<RuleMatch> {
        let marker = vocabulary.currency_marker;
        let current = tokens.get(cursor)?;
        let next = tokens.get(cursor + 1);

        let found = |value: Decimal, consumed: usize| {
            Some(RuleMatch::new(FieldAssignment::Amount(value), consumed))
        };

        // Marker on the current token.
        let bare = current.bare();
        if let Some(rest) = bare.strip_prefix(marker) {
            if rest.is_empty() {
                // `$ 45 l` leaves the numeral to the volume rule
                let unit_follows = tokens
                    .get(cursor + 2)
                    .is_some_and(|t| vocabulary.is_unit(t.bare()));
                if let Some(value) = next.and_then(Token::number).filter(|_| !unit_follows) {
                    return found(value, 2);
                }
            } else if let Some(value) = parse_number(rest) {
                return found(value, 1);
            }
        }
        if let Some(value) = bare.strip_suffix(marker).and_then(parse_number) {
            return found(value, 1);
        }

        let next = next?;

        // Marker on the next token.
        if let Some(rest) = next.bare().strip_prefix(marker) {
            let value = if rest.is_empty() {
                current.number()
            } else {
                parse_number(rest)
            };
            if let Some(value) = value {
                return found(value, 2);
            }
        }

        // `<number> dollars`
        if vocabulary.is_currency_word(next.bare()) {
            if let Some(value) = current.number() {
                return found(value, 2);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::normalizer::tokenize;

    fn apply(text: &str) -> Option<RuleMatch> {
        AmountRule.apply(&tokenize(text), 0, &Vocabulary::default())
    }

    fn amount(value: Decimal, consumed: usize) -> Option<RuleMatch> {
        Some(RuleMatch::new(FieldAssignment::Amount(value), consumed))
    }

    #[test]
    fn test_marker_forms() {
        let value = Decimal::new(4550, 2);

        assert_eq!(apply("$45.50"), amount(value, 1));
        assert_eq!(apply("45.50$"), amount(value, 1));
        assert_eq!(apply("$ 45.50"), amount(value, 2));
        assert_eq!(apply("paid $45.50"), amount(value, 2));
        assert_eq!(apply("45.50 $"), amount(value, 2));
        assert_eq!(apply("45.50 dollars"), amount(value, 2));
        assert_eq!(apply("45.50 bucks."), amount(value, 2));
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(apply("$1,204.10"), amount(Decimal::new(120410, 2), 1));
    }

    #[test]
    fn test_unparseable_marker_does_not_match() {
        assert_eq!(apply("$"), None);
        assert_eq!(apply("$abc"), None);
        assert_eq!(apply("paid $"), None);
        assert_eq!(apply("many dollars"), None);
        assert_eq!(apply("45.50 euros"), None);
    }

    #[test]
    fn test_detached_marker_leaves_unit_numeral() {
        assert_eq!(apply("$ 45 l"), None);
        assert_eq!(apply("$ 150,000 km."), None);
        assert_eq!(apply("$ 45 for gas"), amount(Decimal::new(45, 0), 2));
    }

    #[test]
    fn test_custom_marker() {
        let vocabulary = Vocabulary {
            currency_marker: '€',
            ..Default::default()
        };

        assert_eq!(
            AmountRule.apply(&tokenize("€12"), 0, &vocabulary),
            amount(Decimal::new(12, 0), 1)
        );
        assert_eq!(AmountRule.apply(&tokenize("$12"), 0, &vocabulary), None);
    }
}

//! Number-plus-unit rules for odometer readings and fuel volumes.

use crate::models::config::Vocabulary;
use crate::models::fillup::FillUpField;

use super::{FieldRule, RuleMatch};
use crate::transcript::aggregator::FieldAssignment;
use crate::transcript::normalizer::Token;

/// Matches `<number> <unit>` where the unit word selects the field.
#[derive(Debug, Clone, Copy)]
pub struct UnitRule {
    field: FillUpField,
}

impl UnitRule {
    /// `154,000 km`, `150000 kilometers`.
    pub fn odometer() -> Self {
        Self {
            field: FillUpField::Odometer,
        }
    }

    /// `54 l`, `47.3 liters`.
    pub fn volume() -> Self {
        Self {
            field: FillUpField::Volume,
        }
    }

    fn is_unit(&self, word: &str, vocabulary: &Vocabulary) -> bool {
        match self.field {
            FillUpField::Odometer => vocabulary.is_distance_unit(word),
            FillUpField::Volume => vocabulary.is_volume_unit(word),
            FillUpField::Amount | FillUpField::Location => false,
        }
    }
}

impl FieldRule for UnitRule {
    fn name(&self) -> &'static str {
        match self.field {
            FillUpField::Odometer => "odometer",
            _ => "volume",
        }
    }

    fn apply(&self, tokens: &[Token], cursor: usize, vocabulary: &Vocabulary) -> Option<RuleMatch> {
        let value = tokens.get(cursor)?.number()?;
        let unit = tokens.get(cursor + 1)?;

        if !self.is_unit(unit.bare(), vocabulary) {
            return None;
        }

        let assignment = match self.field {
            FillUpField::Odometer => FieldAssignment::Odometer(value),
            _ => FieldAssignment::Volume(value),
        };
        Some(RuleMatch::new(assignment, 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::normalizer::tokenize;
    use rust_decimal::Decimal;

    fn apply(rule: UnitRule, text: &str) -> Option<RuleMatch> {
        rule.apply(&tokenize(text), 0, &Vocabulary::default())
    }

    #[test]
    fn test_odometer_with_separators() {
        assert_eq!(
            apply(UnitRule::odometer(), "150,000 kilometers"),
            Some(RuleMatch::new(FieldAssignment::Odometer(Decimal::new(150000, 0)), 2))
        );
    }

    #[test]
    fn test_volume_units() {
        for text in ["54 l", "54 L", "54 liters", "54 litres.", "54 liter"] {
            assert_eq!(
                apply(UnitRule::volume(), text),
                Some(RuleMatch::new(FieldAssignment::Volume(Decimal::new(54, 0)), 2)),
                "{text}"
            );
        }
    }

    #[test]
    fn test_wrong_unit_does_not_match() {
        assert_eq!(apply(UnitRule::volume(), "54 gallons"), None);
        assert_eq!(apply(UnitRule::volume(), "54 km"), None);
        assert_eq!(apply(UnitRule::odometer(), "54 l"), None);
    }

    #[test]
    fn test_needs_number_and_unit() {
        assert_eq!(apply(UnitRule::odometer(), "km 54"), None);
        assert_eq!(apply(UnitRule::odometer(), "154000"), None);
        assert_eq!(apply(UnitRule::odometer(), ""), None);
    }
}

//! Accumulation of recognized fields into a [`ParsedFillUp`].

use rust_decimal::Decimal;

use crate::models::fillup::{FillUpField, ParsedFillUp};

/// A value recognized for one field during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAssignment {
    Volume(Decimal),
    Amount(Decimal),
    Odometer(Decimal),
    Location(String),
}

impl FieldAssignment {
    /// The field this assignment targets.
    pub fn field(&self) -> FillUpField {
        match self {
            FieldAssignment::Volume(_) => FillUpField::Volume,
            FieldAssignment::Amount(_) => FillUpField::Amount,
            FieldAssignment::Odometer(_) => FillUpField::Odometer,
            FieldAssignment::Location(_) => FillUpField::Location,
        }
    }
}

/// Builds the output record from assignments in scan order.
///
/// A later assignment to a field replaces an earlier one. Nothing is
/// validated or rejected.
#[derive(Debug, Default)]
pub struct Aggregator {
    record: ParsedFillUp,
    assignments: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment, overwriting any earlier value for its field.
    pub fn push(&mut self, assignment: FieldAssignment) {
        self.assignments += 1;
        match assignment {
            FieldAssignment::Volume(v) => self.record.volume = Some(v),
            FieldAssignment::Amount(v) => self.record.amount = Some(v),
            FieldAssignment::Odometer(v) => self.record.odometer = Some(v),
            FieldAssignment::Location(v) => self.record.location = v,
        }
    }

    /// Number of assignments pushed so far, overwritten ones included.
    pub fn assignments(&self) -> usize {
        self.assignments
    }

    pub fn finish(self) -> ParsedFillUp {
        self.record
    }
}

impl FromIterator<FieldAssignment> for ParsedFillUp {
    fn from_iter<I: IntoIterator<Item = FieldAssignment>>(iter: I) -> Self {
        let mut aggregator = Aggregator::new();
        for assignment in iter {
            aggregator.push(assignment);
        }
        aggregator.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unassigned_fields_stay_absent() {
        let parsed: ParsedFillUp = vec![FieldAssignment::Volume(Decimal::new(54, 0))]
            .into_iter()
            .collect();

        assert_eq!(
            parsed,
            ParsedFillUp {
                volume: Some(Decimal::new(54, 0)),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_last_assignment_wins() {
        let mut aggregator = Aggregator::new();
        aggregator.push(FieldAssignment::Odometer(Decimal::new(100, 0)));
        aggregator.push(FieldAssignment::Location("Fernie".to_string()));
        aggregator.push(FieldAssignment::Odometer(Decimal::new(200, 0)));

        assert_eq!(aggregator.assignments(), 3);

        let parsed = aggregator.finish();
        assert_eq!(parsed.odometer, Some(Decimal::new(200, 0)));
        assert_eq!(parsed.location, "Fernie");
    }

    #[test]
    fn test_assignment_field() {
        assert_eq!(
            FieldAssignment::Location(String::new()).field(),
            FillUpField::Location
        );
        assert_eq!(
            FieldAssignment::Amount(Decimal::ONE).field(),
            FillUpField::Amount
        );
    }
}

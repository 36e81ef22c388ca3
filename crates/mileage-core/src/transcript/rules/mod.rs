//! Token rules recognizing fill-up fields.

pub mod amount;
pub mod location;
pub mod patterns;
pub mod units;

pub use amount::AmountRule;
pub use location::LocationRule;
pub use patterns::*;
pub use units::UnitRule;

use crate::models::config::Vocabulary;

use super::aggregator::FieldAssignment;
use super::normalizer::Token;

/// A rule tried at each cursor position of the token scan.
pub trait FieldRule {
    /// Short name used in trace output.
    fn name(&self) -> &'static str;

    /// Try to recognize a field starting at `tokens[cursor]`.
    ///
    /// Returns `None` when the rule does not apply at this position.
    fn apply(&self, tokens: &[Token], cursor: usize, vocabulary: &Vocabulary) -> Option<RuleMatch>;
}

/// A successful rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Recognized value.
    pub assignment: FieldAssignment,
    /// Number of tokens claimed, at least one.
    pub consumed: usize,
}

impl RuleMatch {
    pub fn new(assignment: FieldAssignment, consumed: usize) -> Self {
        Self {
            assignment,
            consumed: consumed.max(1),
        }
    }
}

/// Rules in the priority order the scan applies them.
///
/// Unit-bearing rules come first: a bare numeral is only disambiguated by the
/// unit word after it.
pub fn default_rules() -> Vec<Box<dyn FieldRule + Send + Sync>> {
    vec![
        Box::new(UnitRule::odometer()),
        Box::new(UnitRule::volume()),
        Box::new(AmountRule),
        Box::new(LocationRule),
    ]
}

/// True when `token` would start a numeric or currency field.
pub(crate) fn starts_field(token: &Token, vocabulary: &Vocabulary) -> bool {
    let marker = vocabulary.currency_marker;
    let bare = token.bare();
    token.number().is_some() || bare.starts_with(marker) || bare.ends_with(marker)
}

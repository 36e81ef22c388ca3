//! Fill-up records: what the parser recognizes and what the logbook keeps.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::config::LogbookConfig;

/// One of the four attributes a transcript can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillUpField {
    /// Fuel volume in liters.
    Volume,
    /// Amount paid in currency units.
    Amount,
    /// Odometer reading in distance units.
    Odometer,
    /// Place of the fill-up.
    Location,
}

impl FillUpField {
    /// Field name as used in output formats and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FillUpField::Volume => "volume",
            FillUpField::Amount => "amount",
            FillUpField::Odometer => "odometer",
            FillUpField::Location => "location",
        }
    }
}

impl fmt::Display for FillUpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields recognized in a single transcript.
///
/// Unrecognized numeric fields are `None` and an unrecognized location is the
/// empty string. Use [`ParsedFillUp::to_zero_default`] when a caller needs
/// zeros instead of absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedFillUp {
    /// Fuel volume (liters).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Amount paid (currency units).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// Odometer reading (distance units).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odometer: Option<Decimal>,

    /// Title-cased location phrase.
    pub location: String,
}

impl ParsedFillUp {
    /// True when no field was recognized.
    pub fn is_empty(&self) -> bool {
        self.volume.is_none()
            && self.amount.is_none()
            && self.odometer.is_none()
            && self.location.is_empty()
    }

    /// Whether a given field was recognized.
    pub fn has(&self, field: FillUpField) -> bool {
        match field {
            FillUpField::Volume => self.volume.is_some(),
            FillUpField::Amount => self.amount.is_some(),
            FillUpField::Odometer => self.odometer.is_some(),
            FillUpField::Location => !self.location.is_empty(),
        }
    }

    /// Fields required for saving that were not recognized.
    ///
    /// Odometer, volume and amount are always required; location only when
    /// `require_location` is set.
    pub fn missing_fields(&self, require_location: bool) -> Vec<FillUpField> {
        let mut required = vec![FillUpField::Odometer, FillUpField::Volume, FillUpField::Amount];
        if require_location {
            required.push(FillUpField::Location);
        }

        required.into_iter().filter(|f| !self.has(*f)).collect()
    }

    /// Zero-default view of the record.
    pub fn to_zero_default(&self) -> ZeroDefaultFillUp {
        ZeroDefaultFillUp {
            volume: self.volume.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            odometer: self.odometer.unwrap_or_default(),
            location: self.location.clone(),
        }
    }
}

/// Fill-up fields with absence mapped to zero and the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroDefaultFillUp {
    pub volume: Decimal,
    pub amount: Decimal,
    pub odometer: Decimal,
    pub location: String,
}

/// A finalized fill-up as stored in the logbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelFillUp {
    /// Fuel volume (liters).
    pub volume: Decimal,

    /// Amount paid.
    pub amount: Decimal,

    /// Place of the fill-up, possibly empty.
    pub location: String,

    /// Odometer reading.
    pub odometer: Decimal,

    /// Day of the fill-up.
    pub date: NaiveDate,
}

impl FuelFillUp {
    /// Build a record from parsed fields, failing on the first missing field.
    pub fn from_parsed(
        parsed: &ParsedFillUp,
        date: NaiveDate,
        policy: &LogbookConfig,
    ) -> Result<Self, ExtractionError> {
        if let Some(field) = parsed.missing_fields(policy.require_location).first() {
            return Err(ExtractionError::MissingField(field.name().to_string()));
        }

        Ok(Self {
            volume: parsed.volume.unwrap_or_default(),
            amount: parsed.amount.unwrap_or_default(),
            location: parsed.location.clone(),
            odometer: parsed.odometer.unwrap_or_default(),
            date,
        })
    }

    /// Goods and services tax contained in the amount, `None` on overflow.
    pub fn gst(&self, rate: Decimal) -> Option<Decimal> {
        self.amount.checked_mul(rate)
    }

    /// Price paid per liter, `None` for a zero volume.
    pub fn price_per_liter(&self) -> Option<Decimal> {
        self.amount.checked_div(self.volume)
    }

    /// Distance and fuel use since an earlier fill-up.
    ///
    /// `None` unless `previous` has a lower odometer reading.
    pub fn consumption_since(&self, previous: &FuelFillUp) -> Option<Consumption> {
        if previous.odometer >= self.odometer {
            return None;
        }

        let distance = self.odometer.checked_sub(previous.odometer)?;
        let liters_per_100 = self
            .volume
            .checked_div(distance)?
            .checked_mul(Decimal::ONE_HUNDRED)?;

        Some(Consumption {
            distance,
            liters_per_100,
        })
    }
}

/// Fuel use between two fill-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumption {
    /// Distance driven since the earlier fill-up.
    pub distance: Decimal,

    /// Liters per 100 distance units.
    pub liters_per_100: Decimal,
}

/// Text-field state of a fill-up entry form.
///
/// Voice and receipt input fill in whatever they recognized; the user edits
/// the rest before saving.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillUpForm {
    pub volume: String,
    pub amount: String,
    pub location: String,
    pub odometer: String,
}

impl FillUpForm {
    /// Overwrite the inputs for every field present in `parsed`.
    pub fn apply(&mut self, parsed: &ParsedFillUp) {
        if let Some(volume) = parsed.volume {
            self.volume = volume.to_string();
        }
        if let Some(amount) = parsed.amount {
            self.amount = amount.to_string();
        }
        if let Some(odometer) = parsed.odometer {
            self.odometer = odometer.to_string();
        }
        if !parsed.location.is_empty() {
            self.location = parsed.location.clone();
        }
    }

    /// Parse the inputs into a finalized record.
    pub fn to_fill_up(
        &self,
        date: NaiveDate,
        policy: &LogbookConfig,
    ) -> Result<FuelFillUp, ExtractionError> {
        let odometer = parse_input(FillUpField::Odometer, &self.odometer)?;
        let volume = parse_input(FillUpField::Volume, &self.volume)?;
        let amount = parse_input(FillUpField::Amount, &self.amount)?;

        let location = self.location.trim().to_string();
        if policy.require_location && location.is_empty() {
            return Err(ExtractionError::MissingField(FillUpField::Location.name().to_string()));
        }

        Ok(FuelFillUp {
            volume,
            amount,
            location,
            odometer,
            date,
        })
    }
}

fn parse_input(field: FillUpField, input: &str) -> Result<Decimal, ExtractionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ExtractionError::MissingField(field.name().to_string()));
    }

    Decimal::from_str(input).map_err(|_| ExtractionError::Parse {
        field: field.name().to_string(),
        value: input.to_string(),
    })
}

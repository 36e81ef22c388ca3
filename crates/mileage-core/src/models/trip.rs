//! Trips recorded between two odometer readings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// A trip, open until its end reading is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Day the trip started.
    pub start_date: NaiveDate,

    /// Odometer reading at the start.
    pub start_odometer: Decimal,

    /// Day the trip ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Odometer reading at the end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_odometer: Option<Decimal>,

    /// Free-form description.
    pub description: String,
}

impl Trip {
    /// Start a new trip.
    pub fn start(date: NaiveDate, odometer: Decimal, description: impl Into<String>) -> Self {
        Self {
            start_date: date,
            start_odometer: odometer,
            end_date: None,
            end_odometer: None,
            description: description.into(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.end_date.is_none()
    }

    /// Distance driven, known once the trip has an end reading.
    pub fn distance(&self) -> Option<Decimal> {
        self.end_odometer.map(|end| end - self.start_odometer)
    }

    /// Close the trip with its end reading.
    pub fn end(&mut self, date: NaiveDate, odometer: Decimal) -> Result<(), ExtractionError> {
        if odometer < self.start_odometer {
            return Err(ExtractionError::Validation {
                field: "end_odometer".to_string(),
                reason: format!(
                    "{} is below the start reading {}",
                    odometer, self.start_odometer
                ),
            });
        }
        if date < self.start_date {
            return Err(ExtractionError::Validation {
                field: "end_date".to_string(),
                reason: format!("{} is before the start date {}", date, self.start_date),
            });
        }

        self.end_date = Some(date);
        self.end_odometer = Some(odometer);
        Ok(())
    }
}

//! Data models for the mileage logbook.

pub mod config;
pub mod fillup;
pub mod trip;

pub use config::{ExtractionConfig, LogbookConfig, MileageConfig, ParseStrategy, Vocabulary};
pub use fillup::{Consumption, FillUpField, FillUpForm, FuelFillUp, ParsedFillUp, ZeroDefaultFillUp};
pub use trip::Trip;

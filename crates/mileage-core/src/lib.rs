//! Core library for the mileage logbook.
//!
//! This crate provides:
//! - Fill-up extraction from spoken or scanned transcripts (volume, amount,
//!   odometer, location)
//! - A transcript event stream for live speech input
//! - Logbook records (fill-ups, trips) and their completeness checks
//! - Configuration shared by the CLI and WASM front ends

pub mod error;
pub mod models;
pub mod stream;
pub mod transcript;

pub use error::{ExtractionError, MileageError, Result, StreamError};
pub use models::config::{MileageConfig, ParseStrategy};
pub use models::fillup::{
    Consumption, FillUpField, FillUpForm, FuelFillUp, ParsedFillUp, ZeroDefaultFillUp,
};
pub use models::trip::Trip;
pub use stream::{FillUpUpdate, TranscriptEvent, TranscriptSubscriber};
pub use transcript::{
    parse, parser_for, RegexTranscriptParser, TokenScanParser, TranscriptParser,
};

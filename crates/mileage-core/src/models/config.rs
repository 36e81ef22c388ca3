//! Configuration structures for transcript parsing and the logbook.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MileageError, Result};

/// Main configuration for mileage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MileageConfig {
    /// Transcript extraction configuration.
    pub extraction: ExtractionConfig,

    /// Logbook record configuration.
    pub logbook: LogbookConfig,
}

/// Which parser turns transcripts into fill-ups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    /// Single left-to-right token scan, last match wins.
    #[default]
    TokenScan,
    /// One regex search per field over the whole text, first match wins.
    Regex,
}

impl ParseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStrategy::TokenScan => "token_scan",
            ParseStrategy::Regex => "regex",
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseStrategy {
    type Err = MileageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "token_scan" | "scan" | "tokens" => Ok(ParseStrategy::TokenScan),
            "regex" => Ok(ParseStrategy::Regex),
            other => Err(MileageError::Config(format!(
                "unknown parse strategy: {other} (expected token_scan or regex)"
            ))),
        }
    }
}

/// Transcript extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Parser used for transcripts.
    pub strategy: ParseStrategy,

    /// Marker words recognized by the token scan.
    pub vocabulary: Vocabulary,
}

/// Marker tokens the token scan recognizes.
///
/// Words are compared against lower-cased tokens, so entries should be lower
/// case too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Unit words that turn a preceding number into an odometer reading.
    pub distance_units: Vec<String>,

    /// Unit words that turn a preceding number into a fuel volume.
    pub volume_units: Vec<String>,

    /// Words that turn a preceding number into an amount.
    pub currency_words: Vec<String>,

    /// Currency symbol attached to or next to an amount.
    pub currency_marker: char,

    /// Word introducing a location phrase.
    pub location_marker: String,

    /// Words that end a location phrase.
    pub location_stop_words: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            distance_units: words(&["km", "kilometer", "kilometers", "kilometre", "kilometres"]),
            volume_units: words(&["l", "liter", "liters", "litre", "litres"]),
            currency_words: words(&["dollar", "dollars", "bucks"]),
            currency_marker: '$',
            location_marker: "in".to_string(),
            location_stop_words: words(&["for", "and", "then"]),
        }
    }
}

impl Vocabulary {
    pub fn is_distance_unit(&self, word: &str) -> bool {
        self.distance_units.iter().any(|w| w == word)
    }

    pub fn is_volume_unit(&self, word: &str) -> bool {
        self.volume_units.iter().any(|w| w == word)
    }

    /// Distance or volume unit.
    pub fn is_unit(&self, word: &str) -> bool {
        self.is_distance_unit(word) || self.is_volume_unit(word)
    }

    pub fn is_currency_word(&self, word: &str) -> bool {
        self.currency_words.iter().any(|w| w == word)
    }

    pub fn is_location_stop_word(&self, word: &str) -> bool {
        self.location_stop_words.iter().any(|w| w == word)
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

/// Logbook record configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogbookConfig {
    /// Refuse to save fill-ups without a location.
    pub require_location: bool,

    /// Goods and services tax rate applied to fill-up amounts.
    pub gst_rate: Decimal,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            require_location: false,
            gst_rate: Decimal::new(5, 2),
        }
    }
}

impl MileageConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MileageError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| MileageError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

//! WASM bindings for fill-up transcript parsing.
//!
//! Browser front ends feed speech recognition results or receipt text in and
//! get the recognized fields back as plain JS objects. Decimal values are
//! returned as strings.

use wasm_bindgen::prelude::*;

use mileage_core::models::config::ExtractionConfig;
use mileage_core::{parser_for, ParseStrategy, ParsedFillUp, TranscriptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse a transcript with the default token scan.
///
/// Returns `{ volume?, amount?, odometer?, location }`.
#[wasm_bindgen]
pub fn parse_transcript(text: &str) -> Result<JsValue, JsValue> {
    to_js(&mileage_core::parse(text))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Transcript parser class for browser use.
#[wasm_bindgen]
pub struct FillUpParser {
    config: ExtractionConfig,
    parser: Box<dyn TranscriptParser + Send + Sync>,
    require_location: bool,
}

#[wasm_bindgen]
impl FillUpParser {
    /// Create a parser using the token scan.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            parser: parser_for(&config),
            config,
            require_location: false,
        }
    }

    /// Select the parser strategy ("token_scan" or "regex").
    #[wasm_bindgen]
    pub fn set_strategy(&mut self, strategy: &str) -> Result<(), JsValue> {
        let strategy: ParseStrategy = strategy
            .parse()
            .map_err(|e: mileage_core::MileageError| JsValue::from_str(&e.to_string()))?;

        self.config.strategy = strategy;
        self.parser = parser_for(&self.config);
        Ok(())
    }

    /// Name of the active strategy.
    #[wasm_bindgen(getter)]
    pub fn strategy(&self) -> String {
        self.config.strategy.to_string()
    }

    /// Whether a location is needed for a complete record.
    #[wasm_bindgen]
    pub fn set_require_location(&mut self, require: bool) {
        self.require_location = require;
    }

    /// Parse a transcript into recognized fields.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Parse a transcript, reporting absent numbers as "0".
    #[wasm_bindgen]
    pub fn parse_zero_default(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text).to_zero_default())
    }

    /// Names of required fields the transcript does not provide.
    #[wasm_bindgen]
    pub fn missing_fields(&self, text: &str) -> Vec<String> {
        self.missing(&self.parser.parse(text))
    }
}

impl FillUpParser {
    fn missing(&self, parsed: &ParsedFillUp) -> Vec<String> {
        parsed
            .missing_fields(self.require_location)
            .into_iter()
            .map(|field| field.name().to_string())
            .collect()
    }
}

impl Default for FillUpParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn from_js(value: JsValue) -> ParsedFillUp {
        serde_wasm_bindgen::from_value(value).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_parse_transcript() {
        let parsed = from_js(parse_transcript("54 liters for $80 at 154,000 km in Vernon").unwrap());
        assert_eq!(parsed.volume.unwrap().to_string(), "54");
        assert_eq!(parsed.amount.unwrap().to_string(), "80");
        assert_eq!(parsed.odometer.unwrap().to_string(), "154000");
        assert_eq!(parsed.location, "Vernon");
    }

    #[wasm_bindgen_test]
    fn test_strategy_switch() {
        let mut parser = FillUpParser::new();
        assert_eq!(parser.strategy(), "token_scan");

        let last = from_js(parser.parse("$10 then $20").unwrap());
        assert_eq!(last.amount.unwrap().to_string(), "20");

        parser.set_strategy("regex").unwrap();
        assert_eq!(parser.strategy(), "regex");
        let first = from_js(parser.parse("$10 then $20").unwrap());
        assert_eq!(first.amount.unwrap().to_string(), "10");

        assert!(parser.set_strategy("guess").is_err());
        assert_eq!(parser.strategy(), "regex");
    }

    #[wasm_bindgen_test]
    fn test_missing_fields() {
        let mut parser = FillUpParser::new();
        assert_eq!(parser.missing_fields("40 l $60"), vec!["odometer".to_string()]);

        parser.set_require_location(true);
        assert_eq!(
            parser.missing_fields("150000 km 40 l $60"),
            vec!["location".to_string()]
        );
    }

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

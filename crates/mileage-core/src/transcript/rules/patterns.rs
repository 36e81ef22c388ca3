//! Whole-text regex patterns for fill-up fields.
//!
//! Patterns expect normalized text: lower case, single spaces between tokens.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Odometer: "154000 km", "150,000 kilometers"
    pub static ref ODOMETER: Regex = Regex::new(
        r"(?:^|\s)(\d[\d,]*(?:\.\d+)?)[.,;:!?]*\s+(?:km|kilometers?|kilometres?)[.,;:!?]*(?:\s|$)"
    ).unwrap();

    // Volume: "54 l", "47.3 liters"
    pub static ref VOLUME: Regex = Regex::new(
        r"(?:^|\s)(\d[\d,]*(?:\.\d+)?)[.,;:!?]*\s+(?:l|liters?|litres?)[.,;:!?]*(?:\s|$)"
    ).unwrap();

    // Amount, one group per form: "$45.50", "$ 45.50", "45.50$", "45.50 $" / "45.50 dollars"
    pub static ref AMOUNT: Regex = Regex::new(
        r"(?:^|\s)(?:\$(\d[\d,]*(?:\.\d+)?)|\$\s+(\d[\d,]*(?:\.\d+)?)|(\d[\d,]*(?:\.\d+)?)\$|(\d[\d,]*(?:\.\d+)?)[.,;:!?]*\s+(?:\$|dollars?|bucks))[.,;:!?]*(?:\s|$)"
    ).unwrap();

    // Location: "in lake country" up to punctuation, a stop word or a number
    pub static ref LOCATION: Regex = Regex::new(
        r"(?:^|\s)in\s+(.+?)(?:[.,;:!?](?:\s|$)|\s+(?:for|and|then|in)(?:[.,;:!?]|\s|$)|\s+\$|\s+\d|$)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odometer_pattern() {
        let caps = ODOMETER.captures("at 150,000 kilometers today").unwrap();
        assert_eq!(&caps[1], "150,000");
        assert!(ODOMETER.captures("150000 kms").is_none());
    }

    #[test]
    fn test_volume_pattern() {
        assert_eq!(&VOLUME.captures("54 l $80").unwrap()[1], "54");
        assert_eq!(&VOLUME.captures("47.3 liters").unwrap()[1], "47.3");
        assert!(VOLUME.captures("54 gallons").is_none());
    }

    #[test]
    fn test_amount_pattern_groups() {
        let caps = AMOUNT.captures("$45.50").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("45.50"));

        let caps = AMOUNT.captures("$ 45.50").unwrap();
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("45.50"));

        let caps = AMOUNT.captures("45.50$").unwrap();
        assert_eq!(caps.get(3).map(|m| m.as_str()), Some("45.50"));

        let caps = AMOUNT.captures("45.50 dollars").unwrap();
        assert_eq!(caps.get(4).map(|m| m.as_str()), Some("45.50"));
    }

    #[test]
    fn test_location_pattern() {
        assert_eq!(
            &LOCATION.captures("in lake country for the trip").unwrap()[1],
            "lake country"
        );
        assert_eq!(
            &LOCATION.captures("in vancouver 150,000 kilometers").unwrap()[1],
            "vancouver"
        );
        assert_eq!(&LOCATION.captures("in fernie").unwrap()[1], "fernie");
        assert!(LOCATION.captures("into the city").is_none());
    }
}

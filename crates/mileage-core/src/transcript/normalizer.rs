//! Transcript normalization: case folding and whitespace tokenization.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Punctuation a speech engine or OCR pass may leave at the end of a word.
const TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// A lower-cased, whitespace-delimited fragment of a transcript.
///
/// Tokens keep their punctuation so that currency markers and sentence
/// boundaries stay visible to the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The token as it appeared after case folding.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The token without trailing punctuation.
    pub fn bare(&self) -> &str {
        self.text.trim_end_matches(TRAILING_PUNCTUATION)
    }

    /// True when the token closes a clause (`vancouver.`, `kelowna,`).
    pub fn ends_clause(&self) -> bool {
        self.text.ends_with(TRAILING_PUNCTUATION)
    }

    /// Numeric value of the token, if it is a number.
    pub fn number(&self) -> Option<Decimal> {
        parse_number(&self.text)
    }
}

/// Split a transcript into lower-cased tokens.
///
/// Splits on Unicode whitespace; runs of whitespace never produce empty
/// tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.to_lowercase().split_whitespace().map(Token::new).collect()
}

/// Parse a numeric token such as `150,000`, `47.3` or `80.`.
///
/// Trailing punctuation and comma digit-group separators are removed first.
/// Anything other than digits with an optional decimal part is rejected.
pub fn parse_number(token: &str) -> Option<Decimal> {
    let cleaned: String = token
        .trim_end_matches(TRAILING_PUNCTUATION)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if !cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Capitalize the first letter of each word and join with single spaces.
pub fn title_case<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("  154,000 KM\t54 L\n\n$80 ");
        let texts: Vec<&str> = tokens.iter().map(Token::as_str).collect();

        assert_eq!(texts, vec!["154,000", "km", "54", "l", "$80"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("154000"), Some(Decimal::new(154000, 0)));
        assert_eq!(parse_number("150,000"), Some(Decimal::new(150000, 0)));
        assert_eq!(parse_number("47.3"), Some(Decimal::new(473, 1)));
        assert_eq!(parse_number("80."), Some(Decimal::new(80, 0)));
        assert_eq!(parse_number("1,234.56,"), Some(Decimal::new(123456, 2)));
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert_eq!(parse_number("km"), None);
        assert_eq!(parse_number("$80"), None);
        assert_eq!(parse_number("4th"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("-5"), None);
        assert_eq!(parse_number(","), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_token_punctuation() {
        let token = Token::new("vancouver.");
        assert_eq!(token.bare(), "vancouver");
        assert!(token.ends_clause());
        assert!(!Token::new("vancouver").ends_clause());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case(["lake", "country"]), "Lake Country");
        assert_eq!(title_case(["saint-jean"]), "Saint-jean");
        assert_eq!(title_case(["écluse"]), "Écluse");
        assert_eq!(title_case(Vec::<&str>::new()), "");
    }
}

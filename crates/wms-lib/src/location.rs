//! Bin location codes of the form `AISLE-SHELF-LEVEL-POSITION`.
//!
//! Examples: `A-01-03-B`, `C-05-04-A`. Aisles are letter tokens, shelves are
//! digit strings, levels are integers and positions are short alphanumeric
//! tokens. `Display` prints the canonical form: upper case, shelf and level
//! zero-padded to two digits, so `b-1-3-a` renders as `B-01-03-A`.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const TOKEN_COUNT: usize = 4;

/// Parsed bin identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationCode {
    aisle: String,
    shelf_number: u32,
    level: u32,
    position: String,
}

impl LocationCode {
    /// Parse a location code, normalizing letters to upper case.
    pub fn parse(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        let tokens: Vec<&str> = trimmed.split('-').collect();
        if tokens.len() != TOKEN_COUNT {
            return Err(invalid(
                code,
                format!("expected {TOKEN_COUNT} tokens, found {}", tokens.len()),
            ));
        }
        if let Some(index) = tokens.iter().position(|token| token.is_empty()) {
            return Err(invalid(code, format!("token {} is empty", index + 1)));
        }

        let aisle = tokens[0];
        if !aisle.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(code, format!("aisle '{aisle}' must be letters")));
        }

        let shelf = tokens[1];
        if !shelf.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(code, format!("shelf '{shelf}' must be numeric")));
        }
        let shelf_number = shelf
            .parse::<u32>()
            .map_err(|e| invalid(code, format!("shelf '{shelf}': {e}")))?;

        let level = tokens[2]
            .parse::<u32>()
            .map_err(|_| invalid(code, format!("level '{}' must be an integer", tokens[2])))?;

        let position = tokens[3];
        if !position.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid(
                code,
                format!("position '{position}' must be alphanumeric"),
            ));
        }

        Ok(Self {
            aisle: aisle.to_ascii_uppercase(),
            shelf_number,
            level,
            position: position.to_ascii_uppercase(),
        })
    }

    pub fn aisle(&self) -> &str {
        &self.aisle
    }

    /// Numeric value of the shelf; `"01"` and `"1"` are the same shelf.
    pub fn shelf_number(&self) -> u32 {
        self.shelf_number
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    /// Bijective base-26 value of the aisle letters (A=1, Z=26, AA=27).
    pub fn aisle_ordinal(&self) -> u64 {
        self.aisle.bytes().fold(0u64, |acc, byte| {
            acc.saturating_mul(26)
                .saturating_add(u64::from(byte - b'A' + 1))
        })
    }

    /// Whether both codes live in the same aisle and shelf.
    pub fn same_shelf(&self, other: &Self) -> bool {
        self.aisle == other.aisle && self.shelf_number == other.shelf_number
    }
}

impl FromStr for LocationCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02}-{}",
            self.aisle, self.shelf_number, self.level, self.position
        )
    }
}

fn invalid(code: &str, reason: String) -> Error {
    Error::InvalidLocationCode {
        code: code.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_code() {
        let code = LocationCode::parse("A-01-03-B").unwrap();
        assert_eq!(code.aisle(), "A");
        assert_eq!(code.shelf_number(), 1);
        assert_eq!(code.level(), 3);
        assert_eq!(code.position(), "B");
        assert_eq!(code.to_string(), "A-01-03-B");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let code: LocationCode = " b-02-1-a ".parse().unwrap();
        assert_eq!(code.aisle(), "B");
        assert_eq!(code.position(), "A");
        assert_eq!(code.level(), 1);
    }

    #[test]
    fn display_pads_shelf_and_level_alike() {
        assert_eq!(LocationCode::parse("A-01-3-A").unwrap().to_string(), "A-01-03-A");
        assert_eq!(LocationCode::parse("A-1-03-A").unwrap().to_string(), "A-01-03-A");
        assert_eq!(LocationCode::parse("c-12-10-b").unwrap().to_string(), "C-12-10-B");
    }

    #[test]
    fn rejects_wrong_token_count() {
        for raw in ["", "A-01-01", "A-01-01-A-X", "A01-01-A"] {
            assert!(
                matches!(
                    LocationCode::parse(raw),
                    Err(Error::InvalidLocationCode { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(LocationCode::parse("1-01-01-A").is_err());
        assert!(LocationCode::parse("A-0x-01-A").is_err());
        assert!(LocationCode::parse("A-01-one-A").is_err());
        assert!(LocationCode::parse("A-01--A").is_err());
        assert!(LocationCode::parse("A-01-01-#").is_err());
    }

    #[test]
    fn aisle_ordinals() {
        let ordinal = |raw: &str| LocationCode::parse(raw).unwrap().aisle_ordinal();
        assert_eq!(ordinal("A-01-01-A"), 1);
        assert_eq!(ordinal("C-01-01-A"), 3);
        assert_eq!(ordinal("Z-01-01-A"), 26);
        assert_eq!(ordinal("AA-01-01-A"), 27);
    }
}

//! Age string parsing and bracket classification.
//!
//! Child ages travel as free text in the `"2y 3m"` / `"6m"` format.
//! `parse_age` is the strict entry point; callers that must render
//! something for an unparseable age use `AgeBracket::classify_lossy`,
//! which applies the historical under-two fallback explicitly.

use std::fmt;
use thiserror::Error;

/// A successfully parsed free-text age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAge {
    pub years: u32,
    pub months: u32,
}

impl ParsedAge {
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Bracket for this age. Decided by the whole-year count alone:
    /// `"4y 11m"` is still the up-to-four bracket.
    pub fn bracket(&self) -> AgeBracket {
        AgeBracket::from_years(self.years)
    }
}

impl fmt::Display for ParsedAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.years, self.months) {
            (0, m) => write!(f, "{}m", m),
            (y, 0) => write!(f, "{}y", y),
            (y, m) => write!(f, "{}y {}m", y, m),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgeParseError {
    #[error("age string is empty")]
    Empty,
    #[error("unrecognized age format: {0:?}")]
    Unrecognized(String),
}

/// Coarse age band driving vaccine/milestone/tip selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    /// Up to and including two years
    UpToTwo,
    /// Over two, up to and including four years
    UpToFour,
    /// Over four years
    OverFour,
}

impl AgeBracket {
    pub fn from_years(years: u32) -> Self {
        if years <= 2 {
            AgeBracket::UpToTwo
        } else if years <= 4 {
            AgeBracket::UpToFour
        } else {
            AgeBracket::OverFour
        }
    }

    /// Classify an age string, falling back to the under-two bracket on
    /// malformed input.
    ///
    /// The fallback reproduces long-standing app behavior; it is applied
    /// here, visibly, instead of inside the parser, and every hit is
    /// logged.
    pub fn classify_lossy(age: &str) -> Self {
        match parse_age(age) {
            Ok(parsed) => parsed.bracket(),
            Err(err) => {
                tracing::warn!(age, %err, "unparseable age, using the under-two bracket");
                AgeBracket::UpToTwo
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::UpToTwo => "0-2 years",
            AgeBracket::UpToFour => "2-4 years",
            AgeBracket::OverFour => "4+ years",
        }
    }
}

/// Parse a free-text age string.
///
/// Accepted shapes: `"2y 3m"`, `"2y"`, `"6m"`, and the spelled-out
/// variants users type into the add-child form (`"2 years 3 months"`).
pub fn parse_age(input: &str) -> Result<ParsedAge, AgeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AgeParseError::Empty);
    }

    let lowered = trimmed.to_lowercase();
    let mut years: Option<u32> = None;
    let mut months: Option<u32> = None;

    let mut pending_number: Option<u32> = None;
    for token in lowered.split_whitespace() {
        // A bare number waits for the next token to name its unit.
        if let Ok(n) = token.parse::<u32>() {
            if pending_number.replace(n).is_some() {
                return Err(AgeParseError::Unrecognized(input.to_string()));
            }
            continue;
        }

        let (number, unit) = match pending_number.take() {
            Some(n) => (n, token),
            None => {
                let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
                let number = digits
                    .parse::<u32>()
                    .map_err(|_| AgeParseError::Unrecognized(input.to_string()))?;
                (number, &token[digits.len()..])
            }
        };

        match unit {
            "y" | "yr" | "yrs" | "year" | "years" => {
                if years.replace(number).is_some() {
                    return Err(AgeParseError::Unrecognized(input.to_string()));
                }
            }
            "m" | "mo" | "mos" | "month" | "months" => {
                if months.replace(number).is_some() {
                    return Err(AgeParseError::Unrecognized(input.to_string()));
                }
            }
            _ => return Err(AgeParseError::Unrecognized(input.to_string())),
        }
    }

    if pending_number.is_some() || (years.is_none() && months.is_none()) {
        return Err(AgeParseError::Unrecognized(input.to_string()));
    }

    Ok(ParsedAge {
        years: years.unwrap_or(0),
        months: months.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_years_and_months() {
        assert_eq!(parse_age("2y 3m"), Ok(ParsedAge { years: 2, months: 3 }));
        assert_eq!(parse_age("6y"), Ok(ParsedAge { years: 6, months: 0 }));
        assert_eq!(parse_age("6m"), Ok(ParsedAge { years: 0, months: 6 }));
    }

    #[test]
    fn test_parse_spelled_out_units() {
        assert_eq!(
            parse_age("2 years 3 months"),
            Ok(ParsedAge { years: 2, months: 3 })
        );
        assert_eq!(parse_age("18 months"), Ok(ParsedAge { years: 0, months: 18 }));
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        assert_eq!(parse_age("  4Y 1M "), Ok(ParsedAge { years: 4, months: 1 }));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_age(""), Err(AgeParseError::Empty));
        assert_eq!(
            parse_age("toddler"),
            Err(AgeParseError::Unrecognized("toddler".to_string()))
        );
        assert!(parse_age("2y 3m 4m").is_err());
        assert!(parse_age("2 3").is_err());
        assert!(parse_age("5").is_err());
    }

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(parse_age("2y 3m").unwrap().bracket(), AgeBracket::UpToTwo);
        assert_eq!(parse_age("4y 1m").unwrap().bracket(), AgeBracket::UpToFour);
        assert_eq!(parse_age("6y").unwrap().bracket(), AgeBracket::OverFour);
        assert_eq!(parse_age("6m").unwrap().bracket(), AgeBracket::UpToTwo);
    }

    #[test]
    fn test_lossy_classification_defaults_to_under_two() {
        assert_eq!(AgeBracket::classify_lossy("toddler"), AgeBracket::UpToTwo);
        assert_eq!(AgeBracket::classify_lossy("6y"), AgeBracket::OverFour);
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["2y 3m", "6m", "6y"] {
            let parsed = parse_age(text).unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn test_total_months() {
        assert_eq!(parse_age("2y 3m").unwrap().total_months(), 27);
        assert_eq!(parse_age("6m").unwrap().total_months(), 6);
    }
}

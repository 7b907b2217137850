//! Ticker symbols and lookback periods for price-data requests.

use chrono::{Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Exchange suffix for Saudi (Tadawul) symbols, which are purely numeric.
pub const SAUDI_SUFFIX: &str = ".SR";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickerError {
    #[error("empty ticker")]
    Empty,

    #[error("invalid character {0:?} in ticker")]
    InvalidCharacter(char),

    #[error("unknown period {0:?} (expected 1y, 2y, 5y or max)")]
    UnknownPeriod(String),
}

/// Normalize user input to a data-source symbol.
///
/// `1303` -> `1303.SR`, `aapl` -> `AAPL`. Already-suffixed symbols pass
/// through upper-cased.
pub fn normalize_ticker(input: &str) -> Result<String, TickerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TickerError::Empty);
    }
    if let Some(c) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=')))
    {
        return Err(TickerError::InvalidCharacter(c));
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        Ok(format!("{}{}", trimmed, SAUDI_SUFFIX))
    } else {
        Ok(trimmed.to_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookback {
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
    Max,
}

impl Lookback {
    fn years(self) -> Option<u32> {
        match self {
            Lookback::OneYear => Some(1),
            Lookback::TwoYears => Some(2),
            Lookback::FiveYears => Some(5),
            Lookback::Max => None,
        }
    }

    /// First date (exclusive) of the window ending at `end`, or None for `Max`.
    pub fn cutoff(self, end: NaiveDate) -> Option<NaiveDate> {
        let years = self.years()?;
        end.checked_sub_months(Months::new(12 * years))
    }

    pub fn label(self) -> &'static str {
        match self {
            Lookback::OneYear => "1 Year",
            Lookback::TwoYears => "2 Years",
            Lookback::FiveYears => "5 Years",
            Lookback::Max => "All",
        }
    }
}

impl FromStr for Lookback {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1y" => Ok(Lookback::OneYear),
            "2y" => Ok(Lookback::TwoYears),
            "5y" => Ok(Lookback::FiveYears),
            "max" | "all" => Ok(Lookback::Max),
            other => Err(TickerError::UnknownPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Lookback::OneYear => "1y",
            Lookback::TwoYears => "2y",
            Lookback::FiveYears => "5y",
            Lookback::Max => "max",
        };
        write!(f, "{}", code)
    }
}

use std::fmt;

use thiserror::Error;

use crate::consts::{MAX_YEAR, MIN_YEAR};

/// Result alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by conversions and rule lookups.
///
/// Every variant is deterministic for its input; nothing here is worth
/// retrying.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind} {year} outside supported range {}", supported_range(.kind))]
    InvalidDateRange { kind: YearKind, year: i32 },

    #[error("invalid solar date {year:04}-{month:02}-{day:02}")]
    InvalidSolarDate { year: i32, month: u32, day: u32 },

    #[error("cannot parse {0:?} as a solar date, expected YYYY-MM-DD")]
    ParseSolarDate(String),

    #[error("invalid lunar date {day}/{month}{} of year {year}", leap_suffix(.leap_month))]
    InvalidLunarDate {
        year: i32,
        month: u32,
        day: u32,
        leap_month: bool,
    },

    #[error("{kind} not found for {key:?}")]
    RuleNotFound { kind: RuleKind, key: String },

    #[error("failed to load rule tables: {0}")]
    RuleSource(#[from] RuleSourceError),
}

impl Error {
    pub(crate) fn out_of_range(kind: YearKind, year: i32) -> Self {
        Self::InvalidDateRange { kind, year }
    }
}

fn leap_suffix(leap_month: &bool) -> &'static str {
    if *leap_month { " (leap)" } else { "" }
}

fn supported_range(kind: &YearKind) -> String {
    let (min, max) = kind.bounds();
    format!("{min}..={max}")
}

/// Which year numbering a range check applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearKind {
    /// Gregorian year of a solar date
    Solar,
    /// Year of a lunar date; lunar 1899 still covers the first weeks of 1900
    Lunar,
    /// Key of a [`LunarYear`](crate::vietnamese::LunarYear), the solar year
    /// its month-11 span ends in
    Span,
}

impl YearKind {
    /// Inclusive bounds of the supported years.
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Self::Solar => (MIN_YEAR, MAX_YEAR),
            Self::Lunar => (MIN_YEAR - 1, MAX_YEAR),
            Self::Span => (MIN_YEAR, MAX_YEAR + 1),
        }
    }

    pub fn contains(self, year: i32) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&year)
    }
}

impl fmt::Display for YearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Solar => "solar year",
            Self::Lunar => "lunar year",
            Self::Span => "lunar year span",
        })
    }
}

/// Which rule table a lookup missed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RuleKind {
    GoldenHourPattern,
    ZodiacHour,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GoldenHourPattern => "golden hour pattern",
            Self::ZodiacHour => "zodiac hour",
        })
    }
}

/// Failure while reading rule tables from their backing store.
#[derive(Debug, Error)]
pub enum RuleSourceError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed rule tables: {0}")]
    Json(#[from] serde_json::Error),
    #[error("zodiac hour {branch:?} has hours {start}-{end} outside 0..24")]
    HourOutOfRange { branch: String, start: u32, end: u32 },
}

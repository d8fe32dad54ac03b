//! Rule tables classifying days and hours, and the resolvers reading them.
//!
//! The tables are configuration owned by whoever seeds them; this crate only
//! reads them through [`RuleProvider`]. [`RuleTables`] is the in-memory
//! provider, loaded from JSON by a [`RuleSource`] and optionally kept in a
//! [`RuleCache`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result, RuleKind, RuleSourceError};

mod branch;
mod source;

pub use branch::{branch_of, normalize_branch};
pub use source::{BundledSource, JsonFileSource, RuleCache, RuleSource};

/// Classification of a day.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FortuneType {
    /// Hoàng đạo, a day under a benevolent star
    HoangDao,
    /// Hắc đạo
    HacDao,
    Good,
    Bad,
    #[default]
    Normal,
}

impl FortuneType {
    /// Whether calendars should highlight the day.
    pub fn is_special(self) -> bool {
        self == Self::HoangDao
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HoangDao => "Hoàng đạo",
            Self::HacDao => "Hắc đạo",
            Self::Good => "Tốt",
            Self::Bad => "Xấu",
            Self::Normal => "Bình thường",
        }
    }
}

/// Hour range of a branch. `start_hour > end_hour` for the block spanning
/// midnight.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ZodiacHour {
    pub start_hour: u32,
    pub end_hour: u32,
}

/// An auspicious two-hour block of a day.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct HourBlock {
    pub branch: String,
    pub start_hour: u32,
    pub end_hour: u32,
    /// e.g. `"23-1h"`
    pub label: String,
}

/// Read-only access to the rule tables. Keys are normalized branch codes.
pub trait RuleProvider {
    fn good_day(&self, lunar_month: u32, branch_code: &str) -> Option<FortuneType>;
    /// Ordered good branches for days of `day_branch_code`.
    fn golden_hour_pattern(&self, day_branch_code: &str) -> Option<&[String]>;
    fn zodiac_hour(&self, branch_code: &str) -> Option<ZodiacHour>;
}

impl<P: RuleProvider + ?Sized> RuleProvider for &P {
    fn good_day(&self, lunar_month: u32, branch_code: &str) -> Option<FortuneType> {
        (**self).good_day(lunar_month, branch_code)
    }
    fn golden_hour_pattern(&self, day_branch_code: &str) -> Option<&[String]> {
        (**self).golden_hour_pattern(day_branch_code)
    }
    fn zodiac_hour(&self, branch_code: &str) -> Option<ZodiacHour> {
        (**self).zodiac_hour(branch_code)
    }
}

impl<P: RuleProvider + ?Sized> RuleProvider for Arc<P> {
    fn good_day(&self, lunar_month: u32, branch_code: &str) -> Option<FortuneType> {
        (**self).good_day(lunar_month, branch_code)
    }
    fn golden_hour_pattern(&self, day_branch_code: &str) -> Option<&[String]> {
        (**self).golden_hour_pattern(day_branch_code)
    }
    fn zodiac_hour(&self, branch_code: &str) -> Option<ZodiacHour> {
        (**self).zodiac_hour(branch_code)
    }
}

#[derive(Deserialize)]
struct GoodDayRecord {
    lunar_month: u32,
    branch_code: String,
    fortune_type: FortuneType,
}

#[derive(Deserialize)]
struct PatternRecord {
    day_branch_code: String,
    /// Comma-separated
    good_branch_codes: String,
}

#[derive(Deserialize)]
struct ZodiacHourRecord {
    branch_code: String,
    start_hour: u32,
    end_hour: u32,
}

/// Serialized form of [`RuleTables`], one record per row.
#[derive(Deserialize)]
struct RuleRecords {
    #[serde(default)]
    good_days: Vec<GoodDayRecord>,
    #[serde(default)]
    golden_hour_patterns: Vec<PatternRecord>,
    #[serde(default)]
    zodiac_hours: Vec<ZodiacHourRecord>,
}

/// In-memory rule tables, keyed by normalized branch codes.
///
/// # Example
///
/// ```
/// use amlich::rules::{FortuneType, RuleProvider, RuleTables};
///
/// let tables = RuleTables::default()
///     .with_good_day(1, "Sửu", FortuneType::Good)
///     .with_zodiac_hour("ti", 23, 1);
///
/// assert_eq!(Some(FortuneType::Good), tables.good_day(1, "suu"));
/// assert!(tables.golden_hour_pattern("ti").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleTables {
    good_days: HashMap<u32, HashMap<String, FortuneType>>,
    patterns: HashMap<String, Vec<String>>,
    zodiac_hours: HashMap<String, ZodiacHour>,
}

impl RuleTables {
    /// Parses tables from JSON with the arrays `good_days`,
    /// `golden_hour_patterns` and `zodiac_hours`; missing arrays are empty.
    ///
    /// # Errors
    ///
    /// Malformed JSON, or a zodiac hour outside `0..24`.
    pub fn from_json(json: &str) -> Result<Self, RuleSourceError> {
        let records: RuleRecords = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    fn from_records(records: RuleRecords) -> Result<Self, RuleSourceError> {
        let mut tables = RuleTables::default();
        for r in records.zodiac_hours {
            if r.start_hour >= 24 || r.end_hour >= 24 {
                return Err(RuleSourceError::HourOutOfRange {
                    branch: r.branch_code,
                    start: r.start_hour,
                    end: r.end_hour,
                });
            }
            tables = tables.with_zodiac_hour(&r.branch_code, r.start_hour, r.end_hour);
        }
        for r in records.golden_hour_patterns {
            tables = tables.with_pattern(&r.day_branch_code, &r.good_branch_codes);
        }
        for r in records.good_days {
            tables = tables.with_good_day(r.lunar_month, &r.branch_code, r.fortune_type);
        }
        Ok(tables)
    }

    pub fn with_good_day(mut self, lunar_month: u32, branch: &str, fortune: FortuneType) -> Self {
        self.good_days
            .entry(lunar_month)
            .or_default()
            .insert(normalize_branch(branch), fortune);
        self
    }

    /// `good_branches` is comma-separated; blanks are skipped.
    pub fn with_pattern(mut self, day_branch: &str, good_branches: &str) -> Self {
        let branches = good_branches
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(normalize_branch)
            .collect();
        self.patterns.insert(normalize_branch(day_branch), branches);
        self
    }

    pub fn with_zodiac_hour(mut self, branch: &str, start_hour: u32, end_hour: u32) -> Self {
        self.zodiac_hours.insert(
            normalize_branch(branch),
            ZodiacHour {
                start_hour,
                end_hour,
            },
        );
        self
    }

    pub fn good_day_count(&self) -> usize {
        self.good_days.values().map(HashMap::len).sum()
    }
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
    pub fn zodiac_hour_count(&self) -> usize {
        self.zodiac_hours.len()
    }
}

impl RuleProvider for RuleTables {
    fn good_day(&self, lunar_month: u32, branch_code: &str) -> Option<FortuneType> {
        self.good_days.get(&lunar_month)?.get(branch_code).copied()
    }
    fn golden_hour_pattern(&self, day_branch_code: &str) -> Option<&[String]> {
        self.patterns.get(day_branch_code).map(Vec::as_slice)
    }
    fn zodiac_hour(&self, branch_code: &str) -> Option<ZodiacHour> {
        self.zodiac_hours.get(branch_code).copied()
    }
}

/// Fortune of a day in lunar month `lunar_month` whose branch is `branch`.
///
/// `branch` may be a code, a Vietnamese name or a full label like
/// `"Ất Tỵ"`. A day without a rule is [`FortuneType::Normal`].
///
/// # Example
///
/// ```
/// use amlich::rules::{resolve_good_day, FortuneType, RuleTables};
///
/// let rules = RuleTables::default().with_good_day(1, "suu", FortuneType::Good);
/// assert_eq!(FortuneType::Good, resolve_good_day(&rules, 1, "Quý Sửu"));
/// assert_eq!(FortuneType::Normal, resolve_good_day(&rules, 2, "suu"));
/// ```
pub fn resolve_good_day<P: RuleProvider + ?Sized>(
    rules: &P,
    lunar_month: u32,
    branch: &str,
) -> FortuneType {
    let code = normalize_branch(branch_of(branch));
    rules.good_day(lunar_month, &code).unwrap_or_else(|| {
        debug!(lunar_month, branch = %code, "no good day rule, using normal");
        FortuneType::Normal
    })
}

/// Auspicious hour blocks of a day whose branch is `branch`, in the order
/// of the matching pattern.
///
/// # Errors
///
/// [`Error::RuleNotFound`] if there is no pattern for the branch, or any
/// branch of the pattern has no zodiac hour. No partial list is returned.
///
/// # Example
///
/// ```
/// use amlich::rules::{resolve_golden_hours, RuleTables};
///
/// let rules = RuleTables::default()
///     .with_pattern("suu", "ti,suu")
///     .with_zodiac_hour("ti", 23, 1)
///     .with_zodiac_hour("suu", 1, 3);
///
/// let blocks = resolve_golden_hours(&rules, "Sửu").unwrap();
/// assert_eq!("23-1h", blocks[0].label);
/// assert_eq!("1-3h", blocks[1].label);
/// ```
pub fn resolve_golden_hours<P: RuleProvider + ?Sized>(
    rules: &P,
    branch: &str,
) -> Result<Vec<HourBlock>> {
    let code = normalize_branch(branch_of(branch));
    let pattern = rules.golden_hour_pattern(&code).ok_or_else(|| {
        debug!(branch = %code, "no golden hour pattern");
        Error::RuleNotFound {
            kind: RuleKind::GoldenHourPattern,
            key: code.clone(),
        }
    })?;

    pattern
        .iter()
        .map(|b| -> Result<HourBlock> {
            let hour = rules.zodiac_hour(b).ok_or_else(|| {
                debug!(day = %code, branch = %b, "no zodiac hour");
                Error::RuleNotFound {
                    kind: RuleKind::ZodiacHour,
                    key: b.clone(),
                }
            })?;
            Ok(HourBlock {
                branch: b.clone(),
                start_hour: hour.start_hour,
                end_hour: hour.end_hour,
                label: format!("{}-{}h", hour.start_hour, hour.end_hour),
            })
        })
        .collect()
}

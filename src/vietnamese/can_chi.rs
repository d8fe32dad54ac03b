//! Sexagenary cycle (can chi) of days, months, years and hours.

use std::fmt::{self as sfmt, Display};

use serde::{Serialize, Serializer};

use super::fmt::{BRANCHES, STEMS};
use crate::date::Date;

/// Heavenly stem (thiên can).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Stem {
    Giap,
    At,
    Binh,
    Dinh,
    Mau,
    Ky,
    Canh,
    Tan,
    Nham,
    Quy,
}

/// Earthly branch (địa chi), also naming the twelve two-hour blocks of a
/// day.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Branch {
    Ti,
    Suu,
    Dan,
    Mao,
    Thin,
    Ty,
    Ngo,
    Mui,
    Than,
    Dau,
    Tuat,
    Hoi,
}

impl Stem {
    const ALL: [Stem; 10] = {
        use Stem::*;
        [Giap, At, Binh, Dinh, Mau, Ky, Canh, Tan, Nham, Quy]
    };

    /// Stem at `i` modulo 10, Giáp being 0.
    pub fn from_index(i: i64) -> Self {
        Self::ALL[i.rem_euclid(10) as usize]
    }
    pub fn index(self) -> u32 {
        self as u32
    }
    pub fn name(self) -> &'static str {
        STEMS[self as usize]
    }
}

impl Branch {
    const ALL: [Branch; 12] = {
        use Branch::*;
        [Ti, Suu, Dan, Mao, Thin, Ty, Ngo, Mui, Than, Dau, Tuat, Hoi]
    };
    const CODES: [&'static str; 12] = [
        "ti", "suu", "dan", "mao", "thin", "ty", "ngo", "mui", "than", "dau", "tuat", "hoi",
    ];

    /// Branch at `i` modulo 12, Tý being 0.
    pub fn from_index(i: i64) -> Self {
        Self::ALL[i.rem_euclid(12) as usize]
    }
    pub fn index(self) -> u32 {
        self as u32
    }
    pub fn name(self) -> &'static str {
        BRANCHES[self as usize]
    }
    /// ASCII code used as key in rule tables, e.g. `"thin"`.
    pub fn code(self) -> &'static str {
        Self::CODES[self as usize]
    }
    /// Inverse of [`code`](Self::code). Only exact codes are accepted; see
    /// [`rules::normalize_branch`](crate::rules::normalize_branch) for
    /// Vietnamese names.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::CODES
            .iter()
            .position(|&c| c == code)
            .map(|i| Self::ALL[i])
    }

    /// The traditional two-hour block of the branch as `(start, end)`
    /// hours; Tý wraps midnight as `(23, 1)`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::vietnamese::Branch;
    ///
    /// assert_eq!((23, 1), Branch::Ti.hours());
    /// assert_eq!((11, 13), Branch::Ngo.hours());
    /// ```
    pub fn hours(self) -> (u32, u32) {
        let i = self.index();
        ((2 * i + 23) % 24, (2 * i + 1) % 24)
    }

    /// Branch of the two-hour block holding `hour` (`0..24`).
    pub fn for_hour(hour: u32) -> Self {
        Self::from_index(((hour as i64 + 1) / 2) % 12)
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        f.write_str(self.name())
    }
}
impl Display for Branch {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Branch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A stem-branch pair. Only 60 of the 120 combinations occur (stem and
/// branch indices share parity), but nothing here relies on it.
///
/// Displayed and serialized as its Vietnamese label, e.g. `"Giáp Tý"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CanChi {
    pub stem: Stem,
    pub branch: Branch,
}

impl CanChi {
    /// Can chi of a day.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::vietnamese::CanChi;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("Mậu Ngọ", CanChi::for_day(date).to_string());
    /// ```
    pub fn for_day(date: Date) -> Self {
        let jdn = date.jdn() as i64;
        Self {
            stem: Stem::from_index(jdn + 9),
            branch: Branch::from_index(jdn + 1),
        }
    }

    /// Can chi of a lunar year.
    pub fn for_year(year: i32) -> Self {
        let y = year as i64;
        Self {
            stem: Stem::from_index(y + 6),
            branch: Branch::from_index(y + 8),
        }
    }

    /// Can chi of lunar month `month` (`1..=12`) of `year`. Leap months
    /// share the label of the month they repeat.
    pub fn for_month(year: i32, month: u32) -> Self {
        let m = month as i64;
        Self {
            stem: Stem::from_index(year as i64 * 12 + m + 3),
            branch: Branch::from_index(m + 1),
        }
    }

    /// Can chi of the two-hour block holding `hour` on day `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::vietnamese::CanChi;
    ///
    /// // a Mậu day starts with the Nhâm Tý hour
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("Nhâm Tý", CanChi::for_hour(date, 0).to_string());
    /// ```
    pub fn for_hour(date: Date, hour: u32) -> Self {
        let branch = Branch::for_hour(hour);
        let day_stem = Self::for_day(date).stem.index() as i64;
        Self {
            stem: Stem::from_index(day_stem % 5 * 2 + branch.index() as i64),
            branch,
        }
    }

    /// Position in the sexagenary cycle, `1..=60` with Giáp Tý as 1.
    pub fn sexagenary(&self) -> u32 {
        let (s, b) = (self.stem.index() as i64, self.branch.index() as i64);
        (6 * s - 5 * b).rem_euclid(60) as u32 + 1
    }
}

impl Display for CanChi {
    fn fmt(&self, f: &mut sfmt::Formatter<'_>) -> sfmt::Result {
        write!(f, "{} {}", self.stem, self.branch)
    }
}

impl Serialize for CanChi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Day, month and year labels of a date.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct CanChiSet {
    pub day: CanChi,
    pub month: CanChi,
    pub year: CanChi,
}

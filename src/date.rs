//! Calendar-independant date, and the validated Gregorian date accepted by
//! the converters.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result, YearKind};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a proleptic Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. Month and day are not range-checked; use
    /// [`SolarDate::new`] for that.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        u32::try_from(jdn_from_gregorian(year, month, day))
            .map(Self::from_jdn)
            .ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, u32, u32) {
        let a = self.jdn as i64 + 32044;
        let b = (4 * a + 3) / 146097;
        let c = a - 146097 * b / 4;
        let d = (4 * c + 3) / 1461;
        let e = c - 1461 * d / 4;
        let m = (5 * e + 2) / 153;
        let day = e - (153 * m + 2) / 5 + 1;
        let month = m + 3 - 12 * (m / 10);
        let year = 100 * b + d - 4800 + m / 10;
        (year as i32, month as u32, day as u32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> u32 {
        self.jdn % 7 + 1
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(self.jdn.wrapping_add_signed(rhs))
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if YearType::from_gregorian(year).is_leap() => 29,
        2 => 28,
        _ => 0,
    }
}

/// A Gregorian date inside the supported band (years `1900..=2100`).
///
/// Serialized as an ISO 8601 string.
///
/// # Example
///
/// ```
/// use amlich::SolarDate;
///
/// let date = SolarDate::new(2024, 2, 10).unwrap();
/// assert_eq!(2460351, date.to_julian_day().jdn());
/// assert!(SolarDate::new(1899, 12, 31).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SolarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl SolarDate {
    /// Validates and creates a date.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDateRange`] if the year is outside the band,
    /// [`Error::InvalidSolarDate`] if month or day do not exist.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !YearKind::Solar.contains(year) {
            return Err(Error::out_of_range(YearKind::Solar, year));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(Error::InvalidSolarDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Converts a Julian day number back into a validated date.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDateRange`] if the day falls outside the band.
    pub fn from_julian_day(date: Date) -> Result<Self> {
        let (year, month, day) = date.gregorian();
        if !YearKind::Solar.contains(year) {
            return Err(Error::out_of_range(YearKind::Solar, year));
        }
        Ok(Self { year, month, day })
    }

    /// Julian day number of the date.
    pub fn to_julian_day(&self) -> Date {
        // `new` guarantees a positive JDN
        let jdn = jdn_from_gregorian(self.year, self.month as i32, self.day as i32);
        Date::from_jdn(jdn as u32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u32 {
        self.month
    }
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The following day, if it is still inside the band.
    pub fn succ(&self) -> Option<Self> {
        Self::from_julian_day(self.to_julian_day() + 1).ok()
    }
}

/// JDN of a proleptic Gregorian date, negative before 4713 BC.
pub(crate) fn jdn_from_gregorian(year: i32, month: i32, day: i32) -> i32 {
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;
    day + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        - 32045
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for SolarDate {
    type Err = Error;

    /// Parses `YYYY-MM-DD`.
    ///
    /// Text not of that shape gives [`Error::ParseSolarDate`]; well-formed
    /// but impossible dates get the errors of [`SolarDate::new`].
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::ParseSolarDate(s.to_owned());
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day] = parts[..] else {
            return Err(invalid());
        };
        Self::new(
            year.parse().map_err(|_| invalid())?,
            month.parse().map_err(|_| invalid())?,
            day.parse().map_err(|_| invalid())?,
        )
    }
}

impl From<SolarDate> for Date {
    fn from(date: SolarDate) -> Self {
        date.to_julian_day()
    }
}

impl Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(1900, 1, 1).unwrap();
        assert_eq!(2415021, date.jdn());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn gregorian_round_trip() {
        let first = Date::from_gregorian(1899, 1, 1).unwrap();
        let last = Date::from_gregorian(2102, 1, 1).unwrap();
        for jdn in first.jdn()..last.jdn() {
            let date = Date::from_jdn(jdn);
            let (y, m, d) = date.gregorian();
            assert!(d >= 1 && d <= days_in_month(y, m), "{}", jdn);
            assert_eq!(Some(date), Date::from_gregorian(y, m as i32, d as i32));
        }
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2024, 2, 28).unwrap();
        assert_eq!("2024-03-01", (date + 2).iso_gregorian());
        assert_eq!("2024-02-27", (date + -1).iso_gregorian());
        assert_eq!(2, (date + 2) - date);
    }

    #[test]
    fn month_lengths() {
        for ((y, m), std) in [
            ((1900, 2), 28),
            ((2000, 2), 29),
            ((2024, 2), 29),
            ((2100, 2), 28),
            ((2023, 4), 30),
            ((2023, 12), 31),
            ((2023, 13), 0),
        ] {
            assert_eq!(std, days_in_month(y, m), "{y}-{m}");
        }
    }

    #[test]
    fn solar_date_validation() {
        assert!(SolarDate::new(1900, 1, 1).is_ok());
        assert!(SolarDate::new(2100, 12, 31).is_ok());
        assert!(matches!(
            SolarDate::new(2101, 1, 1),
            Err(Error::InvalidDateRange {
                kind: YearKind::Solar,
                year: 2101
            })
        ));
        assert!(matches!(
            SolarDate::new(2023, 2, 29),
            Err(Error::InvalidSolarDate { .. })
        ));
        assert!(matches!(
            SolarDate::new(2023, 0, 1),
            Err(Error::InvalidSolarDate { .. })
        ));
    }

    #[test]
    fn solar_date_julian_day() {
        let date = SolarDate::new(2000, 1, 1).unwrap();
        assert_eq!(2451545, date.to_julian_day().jdn());
        assert_eq!(date, SolarDate::from_julian_day(Date::from_jdn(2451545)).unwrap());
        assert!(SolarDate::from_julian_day(Date::from_jdn(2415020)).is_err());
        assert_eq!(None, SolarDate::new(2100, 12, 31).unwrap().succ());
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        let date: SolarDate = "2024-09-17".parse().unwrap();
        assert_eq!("2024-09-17", date.to_string());
        for text in ["2024-9", "abcd-01-01", "2024-02-29-1", ""] {
            match text.parse::<SolarDate>() {
                Err(Error::ParseSolarDate(s)) => assert_eq!(text, s),
                other => panic!("{text:?}: {other:?}"),
            }
        }
        // well formed, but no such day
        match "2023-02-29".parse::<SolarDate>() {
            Err(e @ Error::InvalidSolarDate { .. }) => {
                assert_eq!("invalid solar date 2023-02-29", e.to_string())
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn serde() {
        let date = SolarDate::new(2025, 1, 29).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!("\"2025-01-29\"", json);
        assert_eq!(date, serde_json::from_str(&json).unwrap());
        assert!(serde_json::from_str::<SolarDate>("\"2101-01-01\"").is_err());
    }
}

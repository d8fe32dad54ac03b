//! Vietnamese lunisolar calendar (âm lịch).
//!
//! Months start on the civil day (UTC+7) of a new moon. The calendar is
//! built span by span: each [`LunarYear`] runs from the new moon of month 11
//! to the next month 11, and a span holding 13 lunations gets a leap month.
//! New moons and solar longitudes come from the closed-form series in
//! [`astro`].

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::consts::{MAX_LUNAR_DAY, MONTHS_PER_YEAR, TIME_ZONE_HOURS};
use crate::date::{Date, SolarDate};
use crate::error::{Error, Result, YearKind};

pub mod astro;
pub mod can_chi;
pub mod fmt;

pub use can_chi::{Branch, CanChi, CanChiSet, Stem};

/// Span between two consecutive month-11 new moons, the unit in which leap
/// months are decided.
///
/// Most of the span lies in solar year `annus`; its first one or two months
/// (11 and 12, possibly a leap 11 or 12) belong to lunar year `annus - 1`.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::vietnamese::{LunarYear, Month};
///
/// let year = LunarYear::new(2023)?;
/// assert_eq!(Some(Month::Leap(2)), year.leap_month());
///
/// let date = Date::from_gregorian(2023, 3, 22).unwrap();
/// assert_eq!(Month::Leap(2), year.ymd_for(date).unwrap().month_kind());
/// # Ok::<(), amlich::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct LunarYear {
    /// Solar year holding most of the span
    pub annus: i32,
    /// Every month start, plus the next span's month 11 marking the end
    pub months: Vec<NewMoon>,
}

/// Start of a lunar month.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    pub month: Month,
    pub date: Date,
}

/// Month name, `Common` or `Leap`. A leap month repeats the number of the
/// month before it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Month {
    Common(u32),
    Leap(u32),
}

impl Month {
    /// Month number, regardless of leap.
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// Vietnamese name, e.g. "Tháng Giêng" or "Tháng Hai nhuận".
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// Position of a day in the lunar calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LunarDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub leap_month: bool,
}

impl LunarDate {
    /// A day of a common month.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            day,
            month,
            year,
            leap_month: false,
        }
    }
    /// A day of a leap month.
    pub fn leap(year: i32, month: u32, day: u32) -> Self {
        Self {
            leap_month: true,
            ..Self::new(year, month, day)
        }
    }
    pub fn month_kind(&self) -> Month {
        if self.leap_month {
            Month::Leap(self.month)
        } else {
            Month::Common(self.month)
        }
    }
}

/// The given date is not inside the span, and lies before or after it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherYear {
    Before,
    After,
}

impl LunarYear {
    /// Builds the span ending with the month-11 new moon of `annus`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDateRange`] unless `annus` is in `1900..=2101`, the
    /// spans covering every supported solar date.
    pub fn new(annus: i32) -> Result<Self> {
        if !YearKind::Span.contains(annus) {
            return Err(Error::out_of_range(YearKind::Span, annus));
        }
        Ok(Self::build(annus))
    }

    /// `annus` must be within a year of the supported band.
    fn build(annus: i32) -> Self {
        Self::in_timezone(annus, TIME_ZONE_HOURS)
    }

    fn in_timezone(annus: i32, tz_hours: f64) -> Self {
        use Month::*;

        let first = astro::month11(annus - 1, tz_hours);
        let last = astro::month11(annus, tz_hours);
        let starts: Vec<Date> = (first.k..=last.k)
            .map(|k| astro::new_moon_day(k, tz_hours))
            .collect();
        let lunations = starts.len() - 1;
        debug_assert!(lunations == 12 || lunations == 13, "{annus}: {lunations}");

        let leap_idx = (lunations > 12).then(|| {
            (1..lunations)
                .find(|&i| astro::month_lacks_major_term(starts[i], starts[i + 1], tz_hours))
                .unwrap_or_else(|| {
                    warn!(annus, "no month without major term, using the last one");
                    lunations - 1
                })
        });

        let mut months = Vec::with_capacity(starts.len());
        let mut month = 10;
        for (i, &date) in starts.iter().enumerate() {
            if Some(i) == leap_idx {
                trace!(annus, month, date = %date.iso_gregorian(), "leap month");
                months.push(NewMoon {
                    month: Leap(month),
                    date,
                });
                continue;
            }
            month = month % MONTHS_PER_YEAR + 1;
            months.push(NewMoon {
                month: Common(month),
                date,
            });
        }

        LunarYear { annus, months }
    }

    /// The span holding `date`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDateRange`] if the span would be outside
    /// `1900..=2101`, i.e. for dates before month 11 of lunar 1899 or after
    /// the end of 2101.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::vietnamese::LunarYear;
    ///
    /// let date = Date::from_gregorian(1999, 12, 31).unwrap();
    /// assert_eq!(2000, LunarYear::from_date(date)?.annus);
    /// # Ok::<(), amlich::Error>(())
    /// ```
    pub fn from_date(date: Date) -> Result<Self> {
        let year = date.gregorian().0;
        // keeps the search below within built spans
        if !YearKind::Span.contains(year) && !YearKind::Span.contains(year + 1) {
            return Err(Error::out_of_range(YearKind::Span, year));
        }
        let (span, _) = locate(date);
        if !YearKind::Span.contains(span.annus) {
            return Err(Error::out_of_range(YearKind::Span, span.annus));
        }
        Ok(span)
    }

    /// First day of the span (month 11 of the previous lunar year).
    pub fn start(&self) -> Date {
        self.months[0].date
    }
    /// First day after the span.
    pub fn end(&self) -> Date {
        self.months[self.months.len() - 1].date
    }

    /// The leap month of the span, if any.
    pub fn leap_month(&self) -> Option<Month> {
        self.months.iter().map(|m| m.month).find(Month::is_leap)
    }

    /// Index in `months` of the given month, the end marker excluded.
    fn position(&self, month: Month) -> Option<usize> {
        self.months[..self.months.len() - 1]
            .iter()
            .position(|m| m.month == month)
    }

    /// Length in days (29 or 30) of the month at `idx`.
    fn len_at(&self, idx: usize) -> u32 {
        (self.months[idx + 1].date - self.months[idx].date) as u32
    }

    /// Number of days of `month`, `None` if the span has no such month.
    ///
    /// Month 11 and 12 are those opening the span.
    pub fn month_len(&self, month: Month) -> Option<u32> {
        self.position(month).map(|idx| self.len_at(idx))
    }

    /// First day of `month`, `None` if the span has no such month.
    pub fn month_start(&self, month: Month) -> Option<Date> {
        self.position(month).map(|idx| self.months[idx].date)
    }

    /// Lunar date of `date` within this span.
    ///
    /// Returns `Err` telling whether the date lies before or after the span.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::Date;
    /// use amlich::vietnamese::{LunarDate, LunarYear};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let year = LunarYear::new(2000)?;
    ///
    /// assert_eq!(Ok(LunarDate::new(1999, 11, 25)), year.ymd_for(date));
    /// # Ok::<(), amlich::Error>(())
    /// ```
    pub fn ymd_for(&self, date: Date) -> Result<LunarDate, OtherYear> {
        if date < self.start() {
            return Err(OtherYear::Before);
        } else if date >= self.end() {
            return Err(OtherYear::After);
        }

        // start() <= date, so at least the first month qualifies
        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = self.months[idx];
        let year = if m.month.num() >= 11 {
            self.annus - 1
        } else {
            self.annus
        };
        Ok(LunarDate {
            day: (date - m.date + 1) as u32,
            month: m.month.num(),
            year,
            leap_month: m.month.is_leap(),
        })
    }
}

/// `date` must lie within a year of the supported band.
fn locate(date: Date) -> (LunarYear, LunarDate) {
    let mut annus = date.gregorian().0;
    loop {
        let year = LunarYear::build(annus);
        match year.ymd_for(date) {
            Ok(lunar) => return (year, lunar),
            Err(OtherYear::Before) => annus -= 1,
            Err(OtherYear::After) => annus += 1,
        }
    }
}

/// Converts a solar date into the lunar calendar.
///
/// # Example
///
/// ```
/// use amlich::SolarDate;
/// use amlich::vietnamese::{solar_to_lunar, LunarDate};
///
/// let date = SolarDate::new(2023, 3, 22).unwrap();
/// assert_eq!(LunarDate::leap(2023, 2, 1), solar_to_lunar(date));
/// ```
pub fn solar_to_lunar(date: SolarDate) -> LunarDate {
    locate(date.to_julian_day()).1
}

/// Converts a lunar date back into the solar calendar.
///
/// # Errors
///
/// - [`Error::InvalidLunarDate`] if the month does not exist in that year
///   (notably a leap flag on a month that is not the leap month) or the day
///   exceeds the month's length.
/// - [`Error::InvalidDateRange`] if the lunar year is outside
///   `1899..=2100`, or the resulting solar date is before 1900.
///
/// # Example
///
/// ```
/// use amlich::SolarDate;
/// use amlich::vietnamese::{lunar_to_solar, LunarDate};
///
/// let tet = lunar_to_solar(LunarDate::new(2025, 1, 1)).unwrap();
/// assert_eq!(SolarDate::new(2025, 1, 29).unwrap(), tet);
/// assert!(lunar_to_solar(LunarDate::leap(2024, 2, 1)).is_err());
/// ```
pub fn lunar_to_solar(lunar: LunarDate) -> Result<SolarDate> {
    let invalid = || Error::InvalidLunarDate {
        year: lunar.year,
        month: lunar.month,
        day: lunar.day,
        leap_month: lunar.leap_month,
    };
    if !YearKind::Lunar.contains(lunar.year) {
        return Err(Error::out_of_range(YearKind::Lunar, lunar.year));
    }
    if !(1..=MONTHS_PER_YEAR).contains(&lunar.month) || !(1..=MAX_LUNAR_DAY).contains(&lunar.day)
    {
        return Err(invalid());
    }

    let annus = if lunar.month >= 11 {
        lunar.year + 1
    } else {
        lunar.year
    };
    let year = LunarYear::build(annus);
    let idx = year.position(lunar.month_kind()).ok_or_else(invalid)?;
    if lunar.day > year.len_at(idx) {
        return Err(invalid());
    }
    SolarDate::from_julian_day(year.months[idx].date + (lunar.day as i32 - 1))
}

/// Day, month and year Can-Chi of a solar date.
///
/// # Example
///
/// ```
/// use amlich::SolarDate;
/// use amlich::vietnamese::can_chi_for_solar_date;
///
/// let labels = can_chi_for_solar_date(SolarDate::new(2025, 12, 2).unwrap());
/// assert_eq!("Ất Tỵ", labels.day.to_string());
/// assert_eq!("Đinh Hợi", labels.month.to_string());
/// assert_eq!("Ất Tỵ", labels.year.to_string());
/// ```
pub fn can_chi_for_solar_date(date: SolarDate) -> CanChiSet {
    let lunar = solar_to_lunar(date);
    CanChiSet {
        day: CanChi::for_day(date.to_julian_day()),
        month: CanChi::for_month(lunar.year, lunar.month),
        year: CanChi::for_year(lunar.year),
    }
}

/// Index `0..24` of the solar term (tiết khí) in effect on `date`, see
/// [`fmt::solar_term`] for names.
pub fn solar_term_for(date: SolarDate) -> u32 {
    astro::solar_term(date.to_julian_day(), TIME_ZONE_HOURS)
}

//! Everything a calendar page shows for a day, and month grids built from
//! it.

use serde::Serialize;

use crate::date::{SolarDate, days_in_month};
use crate::error::Result;
use crate::rules::{FortuneType, HourBlock, RuleProvider, resolve_golden_hours, resolve_good_day};
use crate::vietnamese::{self, CanChi, CanChiSet, LunarDate, fmt};

/// Lunar date, Can-Chi labels, fortune and golden hours of a solar date.
#[derive(Debug, Clone, Serialize)]
pub struct DayInfo {
    pub solar: SolarDate,
    /// ISO day of week, `1` for Monday
    pub weekday: u32,
    pub weekday_name: &'static str,
    pub lunar: LunarDate,
    pub can_chi: CanChiSet,
    pub fortune: FortuneType,
    pub golden_hours: Vec<HourBlock>,
    pub solar_term: &'static str,
}

impl DayInfo {
    /// # Errors
    ///
    /// [`Error::RuleNotFound`](crate::Error::RuleNotFound) if the golden
    /// hours of the day cannot be resolved.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::{DayInfo, SolarDate};
    /// use amlich::rules::{BundledSource, RuleSource};
    ///
    /// let rules = BundledSource.load()?;
    /// let info = DayInfo::for_date(SolarDate::new(2025, 11, 28)?, &rules)?;
    /// assert_eq!(9, info.lunar.day);
    /// assert_eq!("Tân Sửu", info.can_chi.day.to_string());
    /// assert_eq!(6, info.golden_hours.len());
    /// # Ok::<(), amlich::Error>(())
    /// ```
    pub fn for_date<P: RuleProvider + ?Sized>(solar: SolarDate, rules: &P) -> Result<Self> {
        let jd = solar.to_julian_day();
        let lunar = vietnamese::solar_to_lunar(solar);
        let can_chi = CanChiSet {
            day: CanChi::for_day(jd),
            month: CanChi::for_month(lunar.year, lunar.month),
            year: CanChi::for_year(lunar.year),
        };
        let branch = can_chi.day.branch.code();
        let weekday = jd.day_of_week();
        Ok(DayInfo {
            solar,
            weekday,
            weekday_name: fmt::WEEKDAYS[weekday as usize - 1],
            lunar,
            can_chi,
            fortune: resolve_good_day(rules, lunar.month, branch),
            golden_hours: resolve_golden_hours(rules, branch)?,
            solar_term: fmt::solar_term(vietnamese::solar_term_for(solar)),
        })
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Serialize)]
pub struct MonthDay {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub day_can_chi: CanChi,
    pub fortune: FortuneType,
    /// Highlighted (hoàng đạo)
    pub special: bool,
}

/// Cells for every day of a Gregorian month.
///
/// # Errors
///
/// [`Error::InvalidDateRange`](crate::Error::InvalidDateRange) or
/// [`Error::InvalidSolarDate`](crate::Error::InvalidSolarDate) if the month
/// is not in the supported band.
pub fn month_grid<P: RuleProvider + ?Sized>(
    year: i32,
    month: u32,
    rules: &P,
) -> Result<Vec<MonthDay>> {
    let first = SolarDate::new(year, month, 1)?;
    let mut cells = Vec::with_capacity(days_in_month(year, month) as usize);
    let mut next = Some(first);
    while let Some(solar) = next.filter(|d| d.month() == month) {
        let lunar = vietnamese::solar_to_lunar(solar);
        let day_can_chi = CanChi::for_day(solar.to_julian_day());
        let fortune = resolve_good_day(rules, lunar.month, day_can_chi.branch.code());
        cells.push(MonthDay {
            solar,
            lunar,
            day_can_chi,
            fortune,
            special: fortune.is_special(),
        });
        next = solar.succ();
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::rules::{BundledSource, RuleSource, RuleTables};

    fn solar(y: i32, m: u32, d: u32) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn day_info() {
        let rules = BundledSource.load().unwrap();
        let info = DayInfo::for_date(solar(2025, 11, 28), &rules).unwrap();
        assert_eq!(LunarDate::new(2025, 10, 9), info.lunar);
        assert_eq!(5, info.weekday);
        assert_eq!("Thứ Sáu", info.weekday_name);
        assert_eq!("Tân Sửu", info.can_chi.day.to_string());
        assert_eq!("Đinh Hợi", info.can_chi.month.to_string());
        assert_eq!("Ất Tỵ", info.can_chi.year.to_string());
        // Sửu day: Dần, Mão, Tỵ, Thân, Tuất, Hợi
        let labels: Vec<_> = info.golden_hours.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(["3-5h", "5-7h", "9-11h", "15-17h", "19-21h", "21-23h"][..], labels[..]);
        // month 10 hoàng đạo days are Ngọ, Mùi, Sửu, Dậu
        assert_eq!(FortuneType::HoangDao, info.fortune);
        assert_eq!("Tiểu tuyết", info.solar_term);
    }

    #[test]
    fn day_info_needs_golden_hours() {
        let rules = RuleTables::default();
        assert!(matches!(
            DayInfo::for_date(solar(2025, 11, 28), &rules),
            Err(Error::RuleNotFound { .. })
        ));
    }

    #[test]
    fn day_info_json() {
        let rules = BundledSource.load().unwrap();
        let info = DayInfo::for_date(solar(2023, 3, 22), &rules).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!("2023-03-22", json["solar"]);
        assert_eq!(true, json["lunar"]["leap_month"]);
        assert_eq!(2, json["lunar"]["month"]);
        assert!(json["can_chi"]["day"].is_string());
    }

    #[test]
    fn grid() {
        let rules = BundledSource.load().unwrap();
        let cells = month_grid(2024, 2, &rules).unwrap();
        assert_eq!(29, cells.len());
        assert_eq!(solar(2024, 2, 1), cells[0].solar);
        assert_eq!(solar(2024, 2, 29), cells[28].solar);
        // Tết Giáp Thìn
        assert_eq!(LunarDate::new(2024, 1, 1), cells[9].lunar);
        assert_eq!("Giáp Thìn", cells[9].day_can_chi.to_string());
        for cell in &cells {
            assert_eq!(cell.fortune.is_special(), cell.special);
        }
        // a lunar month has four hoàng đạo branches in the bundled tables,
        // so some days of any month are highlighted
        assert!(cells.iter().any(|c| c.special));

        assert_eq!(31, month_grid(2100, 12, &rules).unwrap().len());
        assert!(matches!(
            month_grid(2101, 1, &rules),
            Err(Error::InvalidDateRange { year: 2101, .. })
        ));
        assert!(matches!(
            month_grid(2024, 13, &rules),
            Err(Error::InvalidSolarDate { .. })
        ));
    }
}

//! Vietnamese lunisolar calendar (âm lịch) for the years 1900 to 2100.
//!
//! Converts Gregorian dates to and from the lunar calendar at UTC+7, names
//! days, months and years in the sexagenary cycle (Can-Chi), and resolves
//! day fortunes and golden hours against externally seeded rule tables.
//!
//! # Examples
//!
//! Conversion:
//!
//! ```
//! use amlich::{LunarDate, SolarDate};
//!
//! let date = SolarDate::new(2023, 3, 22)?;
//! let lunar = amlich::solar_to_lunar(date);
//!
//! // first day of the leap second month
//! assert_eq!(LunarDate::leap(2023, 2, 1), lunar);
//! assert_eq!(date, amlich::lunar_to_solar(lunar)?);
//! # Ok::<(), amlich::Error>(())
//! ```
//!
//! Can-Chi and rules:
//!
//! ```
//! use amlich::SolarDate;
//! use amlich::rules::{BundledSource, FortuneType, RuleSource};
//!
//! let date = SolarDate::new(2025, 12, 2)?;
//! let labels = amlich::can_chi_for_solar_date(date);
//! assert_eq!("Ất Tỵ", labels.day.to_string());
//!
//! let rules = BundledSource.load()?;
//! let fortune = amlich::resolve_good_day(&rules, 10, &labels.day.to_string());
//! assert_eq!(FortuneType::Normal, fortune);
//! let hours = amlich::resolve_golden_hours(&rules, "Tỵ")?;
//! assert_eq!("1-3h", hours[0].label);
//! # Ok::<(), amlich::Error>(())
//! ```

pub mod consts;
pub mod date;
pub mod day_info;
pub mod error;
pub mod rules;
pub mod time_scales;
pub mod vietnamese;

pub use date::{Date, SolarDate, YearType};
pub use day_info::{DayInfo, MonthDay, month_grid};
pub use error::{Error, Result, YearKind};
pub use rules::{FortuneType, HourBlock, RuleProvider, resolve_golden_hours, resolve_good_day};
pub use vietnamese::{
    CanChi, CanChiSet, LunarDate, can_chi_for_solar_date, lunar_to_solar, solar_to_lunar,
};

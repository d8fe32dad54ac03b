/// First solar year accepted by the converters (inclusive)
pub const MIN_YEAR: i32 = 1900;
/// Last solar year accepted by the converters (inclusive)
pub const MAX_YEAR: i32 = 2100;

/// Vietnamese civil time, UTC+7
pub const TIME_ZONE_HOURS: f64 = 7.0;

/// Mean synodic month in days
pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Julian date of the reference new moon (1900-01-01), `k = 0`
pub const NEW_MOON_EPOCH: f64 = 2415020.75933;
/// JDN used as origin when counting lunations from a civil day
pub(crate) const LUNATION_ORIGIN_JDN: i32 = 2415021;

/// Julian date of J2000.0, minus half a day (midnight UT of 2000-01-01)
pub(crate) const J2000_MIDNIGHT: f64 = 2451545.5;
/// Days per Julian century
pub(crate) const JULIAN_CENTURY: f64 = 36525.0;

/// Longest possible lunar month
pub const MAX_LUNAR_DAY: u32 = 30;
/// Months in a common lunar year
pub const MONTHS_PER_YEAR: u32 = 12;

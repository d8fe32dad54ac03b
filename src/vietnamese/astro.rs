//! Closed-form approximations of new moons and the sun's apparent
//! longitude.
//!
//! Both series are truncated versions of those in Meeus, *Astronomical
//! Algorithms* (ch. 25 and 49), accurate to a few minutes over 1900..2100,
//! which is enough to put each new moon and each major term on the right
//! civil day in almost every case.

use std::f64::consts::PI;

use crate::consts::{
    J2000_MIDNIGHT, JULIAN_CENTURY, LUNATION_ORIGIN_JDN, NEW_MOON_EPOCH, SYNODIC_MONTH,
};
use crate::date::{Date, jdn_from_gregorian};
use crate::time_scales::{Tt, Ut};

const DR: f64 = PI / 180.0;

/// Lunations per Julian century
const LUNATIONS_PER_CENTURY: f64 = 1236.85;

/// Instant of the `k`-th new moon after 1900-01-01 13:52 UT (`k = 0`).
///
/// `k` may be negative.
pub fn new_moon(k: i32) -> Ut {
    let k = k as f64;
    let t = k / LUNATIONS_PER_CENTURY;
    let t2 = t * t;
    let t3 = t2 * t;

    let mut jd = NEW_MOON_EPOCH + 29.53058868 * k + 0.0001178 * t2 - 0.000000155 * t3;
    jd += 0.00033 * ((166.56 + 132.87 * t - 0.009173 * t2) * DR).sin();
    // sun's mean anomaly
    let m = 359.2242 + 29.10535608 * k - 0.0000333 * t2 - 0.00000347 * t3;
    // moon's mean anomaly
    let mpr = 306.0253 + 385.81691806 * k + 0.0107306 * t2 + 0.00001236 * t3;
    // moon's argument of latitude
    let f = 21.2964 + 390.67050646 * k - 0.0016528 * t2 - 0.00000239 * t3;

    let c1 = (0.1734 - 0.000393 * t) * (m * DR).sin() + 0.0021 * (2.0 * DR * m).sin()
        - 0.4068 * (mpr * DR).sin()
        + 0.0161 * (2.0 * DR * mpr).sin()
        - 0.0004 * (3.0 * DR * mpr).sin()
        + 0.0104 * (2.0 * DR * f).sin()
        - 0.0051 * ((m + mpr) * DR).sin()
        - 0.0074 * ((m - mpr) * DR).sin()
        + 0.0004 * ((2.0 * f + m) * DR).sin()
        - 0.0004 * ((2.0 * f - m) * DR).sin()
        - 0.0006 * ((2.0 * f + mpr) * DR).sin()
        + 0.0010 * ((2.0 * f - mpr) * DR).sin()
        + 0.0005 * ((2.0 * mpr + m) * DR).sin();

    Tt(jd + c1).to_ut(t)
}

/// Civil day, in the timezone `tz_hours` east of UTC, on which the `k`-th
/// new moon falls.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::astro::new_moon_day;
///
/// assert_eq!("1900-01-01", new_moon_day(0, 7.0).iso_gregorian());
/// ```
pub fn new_moon_day(k: i32, tz_hours: f64) -> Date {
    new_moon(k).date_in_timezone(tz_hours)
}

/// Apparent longitude of the sun in radians `[0, 2π)`, at the local
/// midnight that starts `date`.
fn sun_longitude_rad(date: Date, tz_hours: f64) -> f64 {
    let t = (date.jdn() as f64 - J2000_MIDNIGHT - tz_hours / 24.0) / JULIAN_CENTURY;
    let t2 = t * t;
    // mean anomaly and mean longitude, degrees
    let m = 357.52910 + 35999.05030 * t - 0.0001559 * t2 - 0.00000048 * t * t2;
    let l0 = 280.46645 + 36000.76983 * t + 0.0003032 * t2;
    // equation of centre
    let dl = (1.914600 - 0.004817 * t - 0.000014 * t2) * (DR * m).sin()
        + (0.019993 - 0.000101 * t) * (2.0 * DR * m).sin()
        + 0.000290 * (3.0 * DR * m).sin();
    let l = (l0 + dl) * DR;
    l - PI * 2.0 * (l / (PI * 2.0)).floor()
}

/// Apparent longitude of the sun in degrees `[0, 360)`, at the local
/// midnight that starts `date`.
///
/// # Example
///
/// ```
/// use amlich::Date;
/// use amlich::vietnamese::astro::sun_longitude;
///
/// // just past the March equinox
/// let lon = sun_longitude(Date::from_gregorian(2024, 3, 21).unwrap(), 7.0);
/// assert!(lon > 0.0 && lon < 1.0);
/// ```
pub fn sun_longitude(date: Date, tz_hours: f64) -> f64 {
    sun_longitude_rad(date, tz_hours).to_degrees()
}

/// Index `0..12` of the 30° sector the sun is in at the start of `date`.
///
/// Sector 0 starts at the March equinox; sector 9 at the December solstice.
pub fn major_term_segment(date: Date, tz_hours: f64) -> u32 {
    (sun_longitude_rad(date, tz_hours) / PI * 6.0).floor() as u32
}

/// Whether the month from `start` up to (not including) `next_start` has no
/// major term, i.e. the sun does not cross a multiple of 30° inside it.
pub fn month_lacks_major_term(start: Date, next_start: Date, tz_hours: f64) -> bool {
    major_term_segment(start, tz_hours) == major_term_segment(next_start, tz_hours)
}

/// Index `0..24` of the 15° solar term in effect at the end of `date`.
///
/// Index 0 is the March equinox (Xuân phân); names are in
/// [`fmt::solar_term`](super::fmt::solar_term).
pub fn solar_term(date: Date, tz_hours: f64) -> u32 {
    (sun_longitude_rad(date + 1, tz_hours) / PI * 12.0).floor() as u32
}

/// A new moon, identified by its lunation number.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Lunation {
    pub k: i32,
    pub date: Date,
}

/// The new moon starting month 11 of `year`, i.e. the last new moon on or
/// before the day the sun reaches 270° (winter solstice).
///
/// The series are only fitted around 1900..=2100; callers outside it get a
/// lunation, but not a meaningful one.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::astro::month11;
///
/// assert_eq!("2022-11-24", month11(2022, 7.0).date.iso_gregorian());
/// ```
pub fn month11(year: i32, tz_hours: f64) -> Lunation {
    let off = jdn_from_gregorian(year, 12, 31) - LUNATION_ORIGIN_JDN;
    let k = (off as f64 / SYNODIC_MONTH).floor() as i32;
    let date = new_moon_day(k, tz_hours);
    if major_term_segment(date, tz_hours) >= 9 {
        Lunation {
            k: k - 1,
            date: new_moon_day(k - 1, tz_hours),
        }
    } else {
        Lunation { k, date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn new_moons() {
        // 1236.85 lunations per century, counted from 1900-01-01
        for (std, k) in [
            ("1900-01-01", 0),
            ("1999-12-08", 1236),
            ("2000-01-07", 1237),
            ("2023-01-22", 1522),
            ("2023-03-22", 1524),
            ("2024-02-10", 1535),
            ("2025-01-29", 1547),
        ] {
            assert_eq!(std, new_moon_day(k, 7.0).iso_gregorian(), "k = {k}");
        }
    }

    #[test]
    fn new_moon_timezone() {
        // 2007-02-17T16:14Z
        assert_eq!("2007-02-17", new_moon_day(1325, 7.0).iso_gregorian());
        assert_eq!("2007-02-18", new_moon_day(1325, 8.0).iso_gregorian());
    }

    #[test]
    fn new_moon_is_reproducible() {
        for k in [-12, 0, 1236, 2473] {
            assert_eq!(new_moon(k), new_moon(k));
            assert_eq!(new_moon(k).0.to_bits(), new_moon(k).0.to_bits());
        }
    }

    #[test]
    fn lunation_spacing() {
        for k in -20..2500 {
            let len = new_moon_day(k + 1, 7.0) - new_moon_day(k, 7.0);
            assert!(len == 29 || len == 30, "k = {k}: {len}");
        }
    }

    #[test]
    fn longitudes() {
        for ((y, m, d), lo, hi) in [
            ((2024, 3, 20), 359.0, 360.0),
            ((2024, 6, 22), 90.0, 91.0),
            ((2023, 12, 23), 270.0, 271.0),
            ((2023, 12, 22), 269.0, 270.0),
        ] {
            let lon = sun_longitude(date(y, m, d), 7.0);
            assert!((lo..hi).contains(&lon), "{y}-{m}-{d}: {lon}");
        }
    }

    #[test]
    fn segments() {
        assert_eq!(8, major_term_segment(date(2023, 12, 22), 7.0));
        assert_eq!(9, major_term_segment(date(2023, 12, 23), 7.0));
        assert_eq!(11, major_term_segment(date(2024, 3, 20), 7.0));
        assert_eq!(0, major_term_segment(date(2024, 3, 21), 7.0));
    }

    #[test]
    fn terms() {
        for ((y, m, d), std) in [
            ((2024, 3, 19), 23),
            ((2024, 3, 20), 0),
            ((2023, 12, 21), 17),
            ((2023, 12, 22), 18),
        ] {
            assert_eq!(std, solar_term(date(y, m, d), 7.0), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn leap_month_2023_lacks_major_term() {
        // leap month 2 of 2023 runs 2023-03-22 ..= 2023-04-19
        assert!(month_lacks_major_term(date(2023, 3, 22), date(2023, 4, 20), 7.0));
        assert!(!month_lacks_major_term(date(2023, 2, 20), date(2023, 3, 22), 7.0));
    }

    #[test]
    fn months11() {
        for (year, std) in [
            (1999, "1999-12-08"),
            (2016, "2016-11-29"),
            (2022, "2022-11-24"),
            (2023, "2023-12-13"),
        ] {
            assert_eq!(std, month11(year, 7.0).date.iso_gregorian(), "{year}");
        }
    }
}

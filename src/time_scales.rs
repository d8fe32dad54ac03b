//! Deals with the two time scales the lunar computations move between:
//! dynamical time (the argument of the lunar and solar series) and
//! universal time (what decides the civil date).
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// The new-moon series yields instants in this time scale; they should be
/// converted to UT before deciding which day they fall on.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time),
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Tt {
    /// Converts into UT, `t` being the epoch in Julian centuries since
    /// 1900-01-00.5 used to estimate ΔT.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::{Tt, Ut};
    ///
    /// let ut = Tt(2451545.0).to_ut(1.0);
    /// assert!((Tt(2451545.0).0 - ut.0) * 86400.0 < 70.0);
    /// ```
    pub fn to_ut(self, t: f64) -> Ut {
        Ut(self.0 - delta_t(t))
    }
}

impl Ut {
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_hours` hours.
    ///
    /// For Vietnam (UTC+7), `tz_offset_hours` should be `7.0`.
    ///
    /// # Example
    ///
    /// ```
    /// use amlich::time_scales::Ut;
    ///
    /// // 2007-02-17T16:14Z, already the 18th in China but not in Vietnam
    /// let ut = Ut(2454149.176);
    /// assert_eq!((2007, 2, 17), ut.date_in_timezone(7.0).gregorian());
    /// assert_eq!((2007, 2, 18), ut.date_in_timezone(8.0).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_hours: f64) -> Date {
        let jdn = (self.0 + 0.5 + tz_offset_hours / 24.0).floor();
        Date::from_jdn(jdn as u32)
    }
}

/// ΔT = TT − UT in days, as a polynomial of Julian centuries since 1900.
///
/// One expression before about AD 800 (`t < -11`) and another after. The
/// modern branch is a coarse fit; it is only meant to keep new moons on the
/// right civil day.
pub fn delta_t(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    if t < -11.0 {
        0.001 + 0.000839 * t + 0.0002261 * t2 - 0.00000845 * t3 - 0.000000081 * t * t3
    } else {
        -0.000278 + 0.000265 * t + 0.000262 * t2
    }
}

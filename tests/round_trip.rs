use amlich::vietnamese::{LunarYear, Month};
use amlich::{Date, LunarDate, SolarDate, can_chi_for_solar_date, lunar_to_solar, solar_to_lunar};
use proptest::prelude::*;

const FIRST_JDN: u32 = 2415021; // 1900-01-01
const LAST_JDN: u32 = 2488434; // 2100-12-31

fn solar(jdn: u32) -> SolarDate {
    SolarDate::from_julian_day(Date::from_jdn(jdn)).unwrap()
}

#[test]
fn every_supported_day_round_trips() {
    let mut prev: Option<LunarDate> = None;
    for jdn in FIRST_JDN..=LAST_JDN {
        let date = solar(jdn);
        let lunar = solar_to_lunar(date);
        assert_eq!(date, lunar_to_solar(lunar).unwrap(), "{date} -> {lunar:?}");

        // consecutive days either advance the day or open a new month
        if let Some(prev) = prev {
            if lunar.day == 1 {
                assert!(prev.day == 29 || prev.day == 30, "{date}: {prev:?}");
            } else {
                assert_eq!(prev.day + 1, lunar.day, "{date}");
                assert_eq!(prev.month_kind(), lunar.month_kind(), "{date}");
            }
        }
        prev = Some(lunar);
    }
}

#[test]
fn leap_years_have_one_leap_month() {
    let mut leap_spans = 0;
    for annus in 1900..=2101 {
        let year = LunarYear::new(annus).unwrap();
        if let Some(month) = year.leap_month() {
            leap_spans += 1;
            let num = month.num();
            assert!(year.month_start(Month::Common(num)).unwrap() < year.month_start(month).unwrap());
        }
    }
    // 7 leap months every 19 years
    assert!((70..=80).contains(&leap_spans), "{leap_spans}");
}

proptest! {
    #[test]
    fn day_can_chi_repeats_every_60_days(jdn in FIRST_JDN..=LAST_JDN - 60) {
        let a = can_chi_for_solar_date(solar(jdn));
        let b = can_chi_for_solar_date(solar(jdn + 60));
        prop_assert_eq!(a.day, b.day);
        prop_assert_eq!(a.day.sexagenary(), b.day.sexagenary());
    }

    #[test]
    fn conversions_are_idempotent(jdn in FIRST_JDN..=LAST_JDN) {
        let date = solar(jdn);
        prop_assert_eq!(solar_to_lunar(date), solar_to_lunar(date));
        prop_assert_eq!(can_chi_for_solar_date(date), can_chi_for_solar_date(date));
    }

    #[test]
    fn lunar_days_fit_their_month(jdn in FIRST_JDN..=LAST_JDN) {
        let lunar = solar_to_lunar(solar(jdn));
        prop_assert!((1..=30).contains(&lunar.day));
        prop_assert!((1..=12).contains(&lunar.month));
        let day_31 = LunarDate { day: 31, ..lunar };
        prop_assert!(lunar_to_solar(day_31).is_err());
    }
}

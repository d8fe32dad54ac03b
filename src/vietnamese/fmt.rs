//! Vietnamese names for stems, branches, months, days and solar terms.

/// Heavenly stems (thiên can), `Giáp` first.
pub const STEMS: [&str; 10] = [
    "Giáp", "Ất", "Bính", "Đinh", "Mậu", "Kỷ", "Canh", "Tân", "Nhâm", "Quý",
];

/// Earthly branches (địa chi), `Tý` first.
pub const BRANCHES: [&str; 12] = [
    "Tý", "Sửu", "Dần", "Mão", "Thìn", "Tỵ", "Ngọ", "Mùi", "Thân", "Dậu", "Tuất", "Hợi",
];

/// Weekday names, indexed by ISO day of week minus one.
pub const WEEKDAYS: [&str; 7] = [
    "Thứ Hai", "Thứ Ba", "Thứ Tư", "Thứ Năm", "Thứ Sáu", "Thứ Bảy", "Chủ Nhật",
];

/// Name of the `num`-th pair of the sexagenary cycle, `1` being Giáp Tý.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::fmt;
///
/// assert_eq!("Ất Tỵ", fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    let i = (num + 59) % 60;
    format!("{} {}", STEMS[(i % 10) as usize], BRANCHES[(i % 12) as usize])
}

/// Month name with the word "Tháng". Month 1 is "Giêng", 11 "Một" and 12
/// "Chạp"; leap months get a trailing "nhuận".
///
/// # Example
///
/// ```
/// use amlich::vietnamese::{fmt, Month::*};
///
/// assert_eq!("Tháng Chạp", fmt::month(Common(12)));
/// assert_eq!("Tháng Hai nhuận", fmt::month(Leap(2)));
/// ```
///
/// # Panics
///
/// Panics if the month number is not in `1..=12`.
pub fn month(m: super::Month) -> String {
    const NAMES: [&str; 12] = [
        "Giêng", "Hai", "Ba", "Tư", "Năm", "Sáu", "Bảy", "Tám", "Chín", "Mười", "Một", "Chạp",
    ];
    let num = m.num();
    let name = match num {
        1..=12 => NAMES[num as usize - 1],
        _ => panic!("month {} not in 1..=12", num),
    };
    let mut rt = format!("Tháng {name}");
    if m.is_leap() {
        rt += " nhuận";
    }
    rt
}

/// Day name: "Mùng 1" to "Mùng 10", then the bare number.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::fmt;
///
/// assert_eq!("Mùng 10", fmt::day(10));
/// assert_eq!("15", fmt::day(15));
/// ```
///
/// # Panics
///
/// Panics if the day is not in `1..=30`.
pub fn day(d: u32) -> String {
    match d {
        1..=10 => format!("Mùng {d}"),
        11..=30 => d.to_string(),
        _ => panic!("day {} not in 1..=30", d),
    }
}

/// Solar term (tiết khí) name. `0..24` run from Xuân phân (March equinox)
/// through Kinh trập.
///
/// # Example
///
/// ```
/// use amlich::vietnamese::fmt;
///
/// assert_eq!("Lập xuân", fmt::solar_term(21));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: [&str; 24] = [
        "Xuân phân", "Thanh minh", "Cốc vũ", "Lập hạ", "Tiểu mãn", "Mang chủng", "Hạ chí",
        "Tiểu thử", "Đại thử", "Lập thu", "Xử thử", "Bạch lộ", "Thu phân", "Hàn lộ",
        "Sương giáng", "Lập đông", "Tiểu tuyết", "Đại tuyết", "Đông chí", "Tiểu hàn", "Đại hàn",
        "Lập xuân", "Vũ thủy", "Kinh trập",
    ];
    NAMES[(term % 24) as usize]
}

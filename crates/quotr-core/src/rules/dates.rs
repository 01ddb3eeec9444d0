//! Business date handling (`DD-Mon-YY`).

use chrono::NaiveDate;

use super::patterns::{BUSINESS_DATE, DATE_DMY, DATE_LONG, DATE_YMD, ISO_DATE};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse a `DD-Mon-YY` date such as `14-Feb-25`.
///
/// The month abbreviation is case-sensitive. Two-digit years map to 2000-2099,
/// four-digit years are taken as written. Impossible calendar days (e.g.
/// `31-Feb-25`) yield `None`.
pub fn parse_business_date(s: &str) -> Option<NaiveDate> {
    let caps = BUSINESS_DATE.captures(s.trim())?;

    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year = parse_year(&caps[3])?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render a date as `DD-Mon-YY`.
pub fn format_business_date(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string()
}

/// Parse a filter bound in `YYYY-MM-DD` form.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(s.trim())?;

    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Rewrite common date spellings into `DD-Mon-YY`.
///
/// Text that is already a valid business date, or that matches no known
/// layout, is returned unchanged (trimmed).
pub fn normalize_business_date(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() || parse_business_date(trimmed).is_some() {
        return trimmed.to_string();
    }

    match parse_loose_date(trimmed) {
        Some(date) => format_business_date(date),
        None => trimmed.to_string(),
    }
}

fn parse_loose_date(s: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_YMD.captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // Day first, as on the quotation documents themselves
    if let Some(caps) = DATE_DMY.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_LONG.captures(s) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number_ignore_case(&caps[2])?;
        let year = parse_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    None
}

fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u32 + 1)
}

fn month_number_ignore_case(abbrev: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(abbrev))
        .map(|i| i as u32 + 1)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

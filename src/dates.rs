// 📅 Date Normalizer
// Fixed, prioritized list of textual formats → NaiveDate (day resolution)

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Where a format keeps its year, and how many digits it must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearField {
    /// Last `sep`-separated field, exactly two digits (69-99 → 19xx, 00-68 → 20xx)
    TwoDigitLast(char),
    /// Last `sep`-separated field, exactly four digits
    FourDigitLast(char),
    /// First `sep`-separated field, exactly four digits
    FourDigitFirst(char),
}

impl YearField {
    /// The raw year text, if it has the required shape
    fn token<'a>(&self, text: &'a str) -> Option<&'a str> {
        let (token, digits) = match *self {
            YearField::TwoDigitLast(sep) => (text.rsplit(sep).next()?, 2),
            YearField::FourDigitLast(sep) => (text.rsplit(sep).next()?, 4),
            YearField::FourDigitFirst(sep) => (text.split(sep).next()?, 4),
        };
        (token.len() == digits && token.bytes().all(|b| b.is_ascii_digit())).then_some(token)
    }
}

/// Accepted formats, tried in order. First successful parse wins.
///
/// - `05-Jan-24`  (day-month abbreviation-2 digit year)
/// - `01/05/2024` (month/day/4 digit year)
/// - `2024-01-05` (ISO)
pub const DATE_FORMATS: [(&str, YearField); 3] = [
    ("%d-%b-%y", YearField::TwoDigitLast('-')),
    ("%m/%d/%Y", YearField::FourDigitLast('/')),
    ("%Y-%m-%d", YearField::FourDigitFirst('-')),
];

/// Output format for emitted dates
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Parse date text. `None` means "no date", never an error.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|&(fmt, year)| parse_with(text, fmt, year))
}

fn parse_with(text: &str, fmt: &str, year: YearField) -> Option<NaiveDate> {
    let token = year.token(text)?;
    let date = NaiveDate::parse_from_str(text, fmt).ok()?;

    match year {
        YearField::TwoDigitLast(_) => {
            let yy: i32 = token.parse().ok()?;
            let century = if yy >= 69 { 1900 } else { 2000 };
            date.with_year(century + yy)
        }
        _ => Some(date),
    }
}

/// Canonical `YYYY-MM-DD` rendering
pub fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_FORMAT).to_string()
}

/// Compare two observations where "no date" sorts before every real date.
///
/// Spelled out instead of substituting a minimum date, so an undated
/// chart never ties with a genuinely early one.
pub fn compare_observed(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.cmp(&y),
    }
}

/// Keep whichever observation is more recent
pub fn most_recent(current: Option<NaiveDate>, candidate: Option<NaiveDate>) -> Option<NaiveDate> {
    if compare_observed(candidate, current) == Ordering::Greater {
        candidate
    } else {
        current
    }
}

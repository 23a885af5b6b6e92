//! Portuguese month/year labels ("janeiro/2023", "mar/23", "Março 2024").

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zç]+)[/\-._ ]?(\d{1,4})").expect("period pattern is valid")
});

/// Month names with `ç` already folded to `c`.
const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "marco",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Parses a month/year label into the first day of that month.
///
/// Two-digit years are read as 20xx. Returns `None` when the label does not look
/// like `<month><sep><year>` or the month name is unknown; callers drop those rows
/// from date-based aggregation.
pub fn parse_period(label: &str) -> Option<NaiveDate> {
    let normalized = label.trim().to_lowercase();
    let caps = PERIOD_RE.captures(&normalized)?;

    let name = caps[1].replace('ç', "c");
    let month = month_number(&name)?;

    let mut year: i32 = caps[2].parse().ok()?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Full name or its three-letter abbreviation.
fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|&full| full == name || (name.len() == 3 && full.starts_with(name)))
        .map(|idx| idx as u32 + 1)
}

/// "mar/2023"
pub fn format_period(date: NaiveDate) -> String {
    let abbrev = &MONTHS[date.month0() as usize][..3];
    format!("{}/{}", abbrev, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn test_accented_and_plain_marco() {
        assert_eq!(parse_period("março/2023"), Some(date(2023, 3)));
        assert_eq!(parse_period("marco/2023"), Some(date(2023, 3)));
        assert_eq!(parse_period("MARÇO/2023"), Some(date(2023, 3)));
    }

    #[test]
    fn test_abbreviations_and_two_digit_years() {
        assert_eq!(parse_period("jan/24"), Some(date(2024, 1)));
        assert_eq!(parse_period("mar/23"), Some(date(2023, 3)));
        assert_eq!(parse_period("Dez/22"), Some(date(2022, 12)));
        assert_eq!(parse_period("set/99"), Some(date(2099, 9)));
    }

    #[test]
    fn test_separators_and_whitespace() {
        assert_eq!(parse_period("  fevereiro/2023  "), Some(date(2023, 2)));
        assert_eq!(parse_period("abril 2021"), Some(date(2021, 4)));
        assert_eq!(parse_period("maio-2020"), Some(date(2020, 5)));
        assert_eq!(parse_period("junho2019"), Some(date(2019, 6)));
        assert_eq!(parse_period("Outubro/2023 (parcial)"), Some(date(2023, 10)));
    }

    #[test]
    fn test_four_digit_year_is_not_truncated() {
        assert_eq!(parse_period("janeiro/2023"), Some(date(2023, 1)));
        assert_eq!(parse_period("novembro/2018"), Some(date(2018, 11)));
    }

    #[test]
    fn test_unrecognized_labels() {
        assert_eq!(parse_period("xyz/2023"), None);
        assert_eq!(parse_period("???"), None);
        assert_eq!(parse_period(""), None);
        assert_eq!(parse_period("2023/janeiro"), None);
        assert_eq!(parse_period("janeiro/"), None);
        assert_eq!(parse_period("ja/2023"), None);
        assert_eq!(parse_period("janeir/2023"), None);
    }

    #[test]
    fn test_scenario_labels() {
        let parsed: Vec<_> = ["jan/23", "fevereiro/2023", "???"]
            .iter()
            .map(|l| parse_period(l))
            .collect();
        assert_eq!(parsed, vec![Some(date(2023, 1)), Some(date(2023, 2)), None]);
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(date(2023, 3)), "mar/2023");
        assert_eq!(format_period(date(2024, 12)), "dez/2024");
    }
}

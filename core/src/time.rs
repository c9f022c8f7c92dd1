use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::error::{Error, Result};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a log date relative to the local calendar day.
pub fn parse_log_date(input: &str) -> Result<NaiveDate> {
    parse_log_date_from(input, today())
}

/// Parses a log date relative to `today`.
///
/// Accepts `today`, `yesterday`, `-Nd`, `-Nw`, a weekday name (most recent
/// occurrence, today included) or `YYYY-MM-DD`. Log dates only look back,
/// so relative forms never land in the future.
pub fn parse_log_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let lowered = input.to_lowercase();

    // 1. Reserved keywords
    match lowered.as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yest" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    // 2. Relative format (-Nd, -Nw)
    if let Some(rest) = lowered.strip_prefix('-') {
        let invalid = || Error::InvalidDate(input.to_string());
        let delta = if let Some(num_str) = rest.strip_suffix('d') {
            Duration::try_days(parse_count(num_str).ok_or_else(invalid)?)
        } else if let Some(num_str) = rest.strip_suffix('w') {
            Duration::try_weeks(parse_count(num_str).ok_or_else(invalid)?)
        } else {
            return Err(invalid());
        };
        return delta
            .and_then(|d| today.checked_sub_signed(d))
            .ok_or_else(invalid);
    }

    // 3. Weekday (mon, friday)
    if let Some(target) = parse_weekday_str(&lowered) {
        let back = (today.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7;
        return Ok(today - Duration::days(back as i64));
    }

    // 4. Fallback to ISO date
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| Error::InvalidDate(input.to_string()))
}

// Counts are unsigned so relative dates never move forward.
fn parse_count(s: &str) -> Option<i64> {
    s.parse::<u32>().ok().map(i64::from)
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-03-12 is a Wednesday.
    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_log_date_from("today", anchor()).unwrap(), anchor());
        assert_eq!(parse_log_date_from("Yesterday", anchor()).unwrap(), ymd(2025, 3, 11));
        assert_eq!(parse_log_date_from("yest", anchor()).unwrap(), ymd(2025, 3, 11));
    }

    #[test]
    fn test_relative() {
        assert_eq!(parse_log_date_from("-3d", anchor()).unwrap(), ymd(2025, 3, 9));
        assert_eq!(parse_log_date_from("-2w", anchor()).unwrap(), ymd(2025, 2, 26));
        assert!(parse_log_date_from("-xd", anchor()).is_err());
        assert!(parse_log_date_from("-3m", anchor()).is_err());
        assert!(parse_log_date_from("-", anchor()).is_err());
    }

    #[test]
    fn test_relative_rejects_multibyte_unit() {
        assert!(matches!(
            parse_log_date_from("-3é", anchor()),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            parse_log_date_from("-é", anchor()),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_relative_out_of_range() {
        assert!(matches!(
            parse_log_date_from("-99999999d", anchor()),
            Err(Error::InvalidDate(_))
        ));
        assert!(matches!(
            parse_log_date_from("-4000000000w", anchor()),
            Err(Error::InvalidDate(_))
        ));
    }

    #[test]
    fn test_relative_never_moves_forward() {
        assert!(matches!(
            parse_log_date_from("--3d", anchor()),
            Err(Error::InvalidDate(_))
        ));
        assert_eq!(parse_log_date_from("-0d", anchor()).unwrap(), anchor());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(parse_log_date_from("wed", anchor()).unwrap(), anchor());
        assert_eq!(parse_log_date_from("mon", anchor()).unwrap(), ymd(2025, 3, 10));
        assert_eq!(parse_log_date_from("thursday", anchor()).unwrap(), ymd(2025, 3, 6));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_log_date_from("2024-12-31", anchor()).unwrap(), ymd(2024, 12, 31));
        assert!(matches!(
            parse_log_date_from("31/12/2024", anchor()),
            Err(Error::InvalidDate(_))
        ));
    }
}

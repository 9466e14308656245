use chrono::{NaiveDate, NaiveDateTime};

/// Parse `"MM/DD/YYYY HH:MM"` (24-hour clock) → naive datetime.
///
/// Date and time are separated by whitespace. Month, day, hour and minute may
/// be written with or without a leading zero, the year must have four digits.
/// Seconds are not accepted.
pub fn parse_service_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    let (date, time) = s.split_once(char::is_whitespace)?;
    let time = time.trim_start();

    let mut date_parts = date.split('/');
    let month = parse_field(date_parts.next()?, 2)?;
    let day = parse_field(date_parts.next()?, 2)?;
    let year_str = date_parts.next()?;
    if date_parts.next().is_some() || year_str.len() != 4 {
        return None;
    }
    let year: i32 = year_str.parse().ok()?;

    let (hour_str, min_str) = time.split_once(':')?;
    let hour = parse_field(hour_str, 2)?;
    let min = parse_field(min_str, 2)?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, min, 0)
}

/// 1..=`max_len` ASCII digits, nothing else (no sign, no spaces).
fn parse_field(s: &str, max_len: usize) -> Option<u32> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_zero_padded() {
        assert_eq!(
            parse_service_date("02/01/2024 10:00"),
            Some(dt(2024, 2, 1, 10, 0))
        );
    }

    #[test]
    fn parses_unpadded_fields() {
        assert_eq!(
            parse_service_date("1/5/2024 9:07"),
            Some(dt(2024, 1, 5, 9, 7))
        );
        assert_eq!(
            parse_service_date("  12/31/2023 23:59 "),
            Some(dt(2023, 12, 31, 23, 59))
        );
    }

    #[test]
    fn parses_unpadded_minute() {
        assert_eq!(
            parse_service_date("1/5/2024 9:7"),
            Some(dt(2024, 1, 5, 9, 7))
        );
        assert_eq!(
            parse_service_date("02/01/2024 10:5"),
            Some(dt(2024, 2, 1, 10, 5))
        );
    }

    #[test]
    fn tolerates_repeated_whitespace_between_date_and_time() {
        assert_eq!(
            parse_service_date("02/01/2024  10:00"),
            Some(dt(2024, 2, 1, 10, 0))
        );
        assert_eq!(
            parse_service_date("02/01/2024\t10:00"),
            Some(dt(2024, 2, 1, 10, 0))
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_eq!(parse_service_date("13/40/2023 99:99"), None);
        assert_eq!(parse_service_date("02/30/2024 10:00"), None);
        assert_eq!(parse_service_date("02/01/2024 24:00"), None);
    }

    #[test]
    fn rejects_other_layouts() {
        for bad in [
            "",
            "2024-02-01 10:00",
            "02/01/24 10:00",
            "02/01/2024",
            "02/01/2024 10:00:00",
            "02/01/2024T10:00",
            "+2/01/2024 10:00",
            "02/01/2024 10:00 PM",
        ] {
            assert_eq!(parse_service_date(bad), None, "{bad:?} should not parse");
        }
    }
}

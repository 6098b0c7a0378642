use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Date format Liquid itself uses when rendering a date value
pub const LIQUID_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parse the date representations that show up in front matter and page data.
/// Values without an offset are taken as UTC.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_str(date_str, LIQUID_DATE_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// RFC 3339 rendering used for page dates handed to templates
pub fn to_template_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date_only() {
        let dt = parse_datetime("2021-03-07").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2021, 3, 7, 0));
    }

    #[test]
    fn test_parse_with_offset() {
        let dt = parse_datetime("2021-03-07T23:30:00+02:00").unwrap();
        assert_eq!((dt.day(), dt.hour()), (7, 21));

        let dt = parse_datetime("2021-03-07 10:00:00 +0000").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_datetime("last tuesday").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_template_string() {
        let dt = parse_datetime("2021-03-07 08:05:00").unwrap();
        assert_eq!(to_template_string(&dt), "2021-03-07T08:05:00Z");
    }
}

use chrono::{DateTime, NaiveDateTime, Utc};

/// Offset-less forms accepted by the generic pass; interpreted as UTC.
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Fixed UTC-designated patterns tried when the generic pass fails.
const FALLBACK_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.3fZ",
    "%Y-%m-%dT%H:%M:%S%.6fZ",
    "%Y-%m-%dT%H:%M:%S%.9fZ",
];

/// Parse an ISO-8601 date-time into a UTC instant.
///
/// Explicit offsets (`Z`, `+hh:mm`, `-hh:mm`, `+hhmm`) are applied and then
/// discarded. A value with no offset is taken to be UTC already.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    parse_generic(s).or_else(|| parse_fallback(s))
}

fn parse_generic(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_fallback(s: &str) -> Option<DateTime<Utc>> {
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_zulu_whole_seconds() {
        assert_eq!(parse_timestamp("2025-01-01T12:34:56Z"), Some(utc(2025, 1, 1, 12, 34, 56)));
    }

    #[test]
    fn test_fractional_millis() {
        let ts = parse_timestamp("2025-01-01T12:34:56.123Z").unwrap();
        assert_eq!(ts.timestamp_subsec_millis(), 123);
        assert_eq!(ts.with_nanosecond(0).unwrap(), utc(2025, 1, 1, 12, 34, 56));
    }

    #[test]
    fn test_fractional_micros_and_nanos() {
        let micros = parse_timestamp("2025-01-01T12:34:56.123456Z").unwrap();
        assert_eq!(micros.timestamp_subsec_micros(), 123_456);

        let nanos = parse_timestamp("2025-01-01T12:34:56.123456789Z").unwrap();
        assert_eq!(nanos.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn test_positive_offset_normalized() {
        assert_eq!(
            parse_timestamp("2025-01-01T12:34:56+02:00"),
            Some(utc(2025, 1, 1, 10, 34, 56))
        );
    }

    #[test]
    fn test_negative_offset_crosses_midnight() {
        assert_eq!(
            parse_timestamp("2024-12-31T22:00:00-05:00"),
            Some(utc(2025, 1, 1, 3, 0, 0))
        );
    }

    #[test]
    fn test_compact_offset() {
        assert_eq!(
            parse_timestamp("2025-01-01T12:34:56+0200"),
            Some(utc(2025, 1, 1, 10, 34, 56))
        );
    }

    #[test]
    fn test_no_offset_assumes_utc() {
        assert_eq!(parse_timestamp("2025-01-01T12:34:56"), Some(utc(2025, 1, 1, 12, 34, 56)));
        assert_eq!(parse_timestamp("2025-01-01T12:34"), Some(utc(2025, 1, 1, 12, 34, 0)));

        let frac = parse_timestamp("2025-01-01T12:34:56.5").unwrap();
        assert_eq!(frac.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(parse_timestamp("  2025-01-01T12:34:56Z "), Some(utc(2025, 1, 1, 12, 34, 56)));
    }

    #[test]
    fn test_fallback_patterns_parse_directly() {
        assert_eq!(parse_fallback("2025-01-01T12:34:56Z"), Some(utc(2025, 1, 1, 12, 34, 56)));
        assert_eq!(
            parse_fallback("2025-01-01T12:34:56.100Z").map(|t| t.timestamp_subsec_millis()),
            Some(100)
        );
        assert!(parse_fallback("2025-01-01T12:34:56+02:00").is_none());
    }

    #[test]
    fn test_invalid_timestamps() {
        let samples = [
            "",
            "   ",
            "not a time",
            "2025-13-01T00:00:00Z",
            "2025-01-32T00:00:00Z",
            "2025-01-01",
            "12:34:56",
            "1735734896",
        ];
        for s in samples {
            assert!(parse_timestamp(s).is_none(), "expected failure for {:?}", s);
        }
    }
}

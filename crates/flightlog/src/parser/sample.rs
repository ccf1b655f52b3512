use super::model::{Fields, Sample, SkipReason};
use super::row::MappedRow;
use super::time::parse_timestamp;
use super::REQUIRED_COLUMNS;

/// Validate a mapped row and build a [`Sample`] from it.
///
/// Required columns must all be present and parse; any failure rejects the
/// whole row. Optional columns are parsed independently and left unset when
/// absent or malformed.
pub fn build_sample(row: MappedRow) -> Result<Sample, SkipReason> {
    let MappedRow { raw, extra } = row;

    if let Some(missing) = REQUIRED_COLUMNS.iter().copied().find(|name| !raw.contains_key(name)) {
        return Err(SkipReason::MissingField(missing));
    }

    let time = raw
        .get("time")
        .and_then(parse_timestamp)
        .ok_or(SkipReason::InvalidTime)?;

    let latitude = required_decimal(&raw, "lat")?;
    let longitude = required_decimal(&raw, "lon")?;
    let height_msl = required_decimal(&raw, "hMSL")?;
    let velocity_north = required_decimal(&raw, "velN")?;
    let velocity_east = required_decimal(&raw, "velE")?;
    let velocity_down = required_decimal(&raw, "velD")?;

    Ok(Sample {
        time,
        latitude,
        longitude,
        height_msl,
        velocity_north,
        velocity_east,
        velocity_down,
        horizontal_accuracy: raw.get("hAcc").and_then(parse_decimal),
        vertical_accuracy: raw.get("vAcc").and_then(parse_decimal),
        speed_accuracy: raw.get("sAcc").and_then(parse_decimal),
        gps_fix: raw.get("gpsFix").and_then(parse_integer),
        satellite_count: raw.get("numSV").and_then(parse_integer),
        raw,
        extra,
    })
}

fn required_decimal(raw: &Fields, name: &'static str) -> Result<f64, SkipReason> {
    raw.get(name)
        .and_then(parse_decimal)
        .ok_or(SkipReason::InvalidNumber(name))
}

/// Parse a finite decimal using `.` as the decimal point.
///
/// Commas are accepted as grouping separators between digits (`1,234.5`),
/// independent of any locale.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let normalized = strip_grouping(s.trim())?;
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole number, with the same grouping rules as [`parse_decimal`].
pub fn parse_integer(s: &str) -> Option<i32> {
    strip_grouping(s.trim())?.parse::<i32>().ok()
}

/// Remove grouping commas. A comma not surrounded by digits makes the value invalid.
fn strip_grouping(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    if !s.contains(',') {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        if c == ',' {
            let before = i.checked_sub(1).map(|j| bytes[j].is_ascii_digit()).unwrap_or(false);
            let after = bytes.get(i + 1).map(|b| b.is_ascii_digit()).unwrap_or(false);
            if !(before && after) {
                return None;
            }
            continue;
        }
        out.push(c);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::row::map_row;
    use crate::parser::schema::Schema;
    use crate::parser::split::split_fields;
    use chrono::{TimeZone, Utc};

    fn build(header: Option<&str>, line: &str) -> Result<Sample, SkipReason> {
        let schema = match header {
            Some(h) => Schema::from_header(split_fields(h)),
            None => Schema::canonical(),
        };
        build_sample(map_row(split_fields(line), &schema))
    }

    #[test]
    fn test_full_row() {
        let sample = build(
            Some("time,lat,lon,hMSL,velN,velE,velD,hAcc,vAcc,sAcc,gpsFix,numSV"),
            "2025-01-01T12:34:56Z,45.0001,-75.0002,1234.5,10.0,0.0,-5.0,1.2,2.3,0.4,3,12",
        )
        .unwrap();

        assert_eq!(sample.time(), Utc.with_ymd_and_hms(2025, 1, 1, 12, 34, 56).unwrap());
        assert!((sample.latitude() - 45.0001).abs() < 1e-9);
        assert!((sample.longitude() + 75.0002).abs() < 1e-9);
        assert!((sample.height_msl() - 1234.5).abs() < 1e-9);
        assert!((sample.speed_3d() - 11.1803).abs() < 1e-4);
        assert_eq!(sample.horizontal_accuracy(), Some(1.2));
        assert_eq!(sample.vertical_accuracy(), Some(2.3));
        assert_eq!(sample.speed_accuracy(), Some(0.4));
        assert_eq!(sample.gps_fix(), Some(3));
        assert_eq!(sample.satellite_count(), Some(12));
        assert!(sample.extra().is_empty());
        assert_eq!(sample.raw().len(), 12);
    }

    #[test]
    fn test_optional_fields_absent() {
        let sample = build(
            Some("time,lat,lon,hMSL,velN,velE,velD"),
            "2025-01-01T00:00:00Z,1,2,3,4,5,6",
        )
        .unwrap();

        assert_eq!(sample.horizontal_accuracy(), None);
        assert_eq!(sample.vertical_accuracy(), None);
        assert_eq!(sample.speed_accuracy(), None);
        assert_eq!(sample.gps_fix(), None);
        assert_eq!(sample.satellite_count(), None);
    }

    #[test]
    fn test_optional_fields_malformed_do_not_drop_row() {
        let sample = build(None, "2025-01-01T00:00:00Z,1,2,3,4,5,6,bad,,NaN,3.5,x").unwrap();

        assert_eq!(sample.horizontal_accuracy(), None);
        assert_eq!(sample.vertical_accuracy(), None);
        assert_eq!(sample.speed_accuracy(), None);
        assert_eq!(sample.gps_fix(), None);
        assert_eq!(sample.satellite_count(), None);
        // The original strings survive in raw
        assert_eq!(sample.raw().get("hAcc"), Some("bad"));
    }

    #[test]
    fn test_missing_required_column() {
        let result = build(Some("time,lat,lon"), "2025-01-01T00:00:00Z,1");
        assert_eq!(result, Err(SkipReason::MissingField("lon")));
    }

    #[test]
    fn test_invalid_required_values() {
        assert_eq!(
            build(None, "yesterday,1,2,3,4,5,6").unwrap_err(),
            SkipReason::InvalidTime
        );
        assert_eq!(
            build(None, "2025-01-01T00:00:00Z,north,2,3,4,5,6").unwrap_err(),
            SkipReason::InvalidNumber("lat")
        );
        assert_eq!(
            build(None, "2025-01-01T00:00:00Z,1,2,3,4,5,").unwrap_err(),
            SkipReason::InvalidNumber("velD")
        );
        assert_eq!(
            build(None, "2025-01-01T00:00:00Z,1,2,inf,4,5,6").unwrap_err(),
            SkipReason::InvalidNumber("hMSL")
        );
    }

    #[test]
    fn test_quoted_grouped_number() {
        let sample = build(None, r#"2025-01-01T00:00:00Z,1,2,"1,234.5",4,5,6"#).unwrap();
        assert_eq!(sample.height_msl(), 1234.5);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1.5"), Some(1.5));
        assert_eq!(parse_decimal(" -75.0002 "), Some(-75.0002));
        assert_eq!(parse_decimal("+3"), Some(3.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("12,345,678.25"), Some(12_345_678.25));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("infinity"), None);
        assert_eq!(parse_decimal("1,5,"), None);
        assert_eq!(parse_decimal(",5"), None);
        assert_eq!(parse_decimal("12abc"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("3"), Some(3));
        assert_eq!(parse_integer(" 12 "), Some(12));
        assert_eq!(parse_integer("1,000"), Some(1000));
        assert_eq!(parse_integer("3.0"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("99999999999"), None);
    }
}

use super::model::Fields;
use super::schema::Schema;
use super::CANONICAL_COLUMN_COUNT;

/// A tokenized line keyed by column name, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRow {
    pub raw: Fields,
    pub extra: Fields,
}

/// Name every field of a line using the active schema.
///
/// Fields past the end of the schema get synthetic names `col<N>` (1-based).
/// Fields at position 12 or later are also copied into `extra`.
pub fn map_row(fields: Vec<String>, schema: &Schema) -> MappedRow {
    let mut raw = Fields::with_capacity(fields.len());
    let mut extra = Fields::with_capacity(fields.len().saturating_sub(CANONICAL_COLUMN_COUNT));

    for (i, value) in fields.into_iter().enumerate() {
        let name = match schema.get(i) {
            Some(name) => name.to_string(),
            None => format!("col{}", i + 1),
        };

        if i >= CANONICAL_COLUMN_COUNT {
            extra.insert(name.clone(), value.clone());
        }
        raw.insert(name, value);
    }

    MappedRow { raw, extra }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::split::split_fields;

    #[test]
    fn test_canonical_mapping() {
        let fields = split_fields("2025-01-01T12:34:56Z,45.1,-75.2,1000,1,2,3,4,5,0.6,2,9");
        let row = map_row(fields, &Schema::canonical());

        assert_eq!(row.raw.len(), 12);
        assert_eq!(row.raw.get("time"), Some("2025-01-01T12:34:56Z"));
        assert_eq!(row.raw.get("numSV"), Some("9"));
        assert!(row.extra.is_empty());
    }

    #[test]
    fn test_synthetic_names_beyond_schema() {
        let schema = Schema::from_header(["time", "lat", "lon"]);
        let row = map_row(split_fields("t,1,2,3,4"), &schema);

        let keys: Vec<&str> = row.raw.keys().collect();
        assert_eq!(keys, vec!["time", "lat", "lon", "col4", "col5"]);
        // Positions below 12 never land in extra
        assert!(row.extra.is_empty());
    }

    #[test]
    fn test_extra_columns_from_header() {
        let schema = Schema::from_header(
            "time,lat,lon,hMSL,velN,velE,velD,hAcc,vAcc,sAcc,gpsFix,numSV,extra1,extra2".split(','),
        );
        let row = map_row(split_fields("t,1,2,3,4,5,6,7,8,9,3,12,foo,bar"), &schema);

        let extra: Vec<(&str, &str)> = row.extra.iter().collect();
        assert_eq!(extra, vec![("extra1", "foo"), ("extra2", "bar")]);
        assert_eq!(row.raw.get("extra1"), Some("foo"));
        assert_eq!(row.raw.len(), 14);
    }

    #[test]
    fn test_extra_columns_without_header_are_synthetic() {
        let row = map_row(split_fields("t,1,2,3,4,5,6,7,8,9,3,12,x"), &Schema::canonical());
        assert_eq!(row.extra.get("col13"), Some("x"));
        assert_eq!(row.raw.get("col13"), Some("x"));
    }

    #[test]
    fn test_fewer_fields_than_schema() {
        let row = map_row(split_fields("t,1"), &Schema::canonical());
        let keys: Vec<&str> = row.raw.keys().collect();
        assert_eq!(keys, vec!["time", "lat"]);
    }
}

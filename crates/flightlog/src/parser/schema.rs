use std::sync::Arc;

use super::{CANONICAL_COLUMNS, CANONICAL_COLUMN_COUNT};

/// Ordered column names in effect for one parse.
///
/// Either copied from a header line or the canonical default. Shared
/// read-only once established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Arc<[String]>,
    from_header: bool,
}

impl Schema {
    /// The canonical 12-column schema used when a log has no header.
    pub fn canonical() -> Self {
        Self {
            columns: CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            from_header: false,
        }
    }

    pub fn from_header<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: names.into_iter().map(|n| n.as_ref().trim().to_string()).collect(),
            from_header: true,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(|c| c.as_str())
    }

    pub fn is_from_header(&self) -> bool {
        self.from_header
    }
}

/// Count positions where a trimmed field equals the canonical column name at
/// the same position, ignoring ASCII case. Only the first 12 positions count.
pub fn header_score<S: AsRef<str>>(fields: &[S]) -> usize {
    fields
        .iter()
        .zip(CANONICAL_COLUMNS.iter())
        .take(CANONICAL_COLUMN_COUNT)
        .filter(|(field, canonical)| field.as_ref().trim().eq_ignore_ascii_case(canonical))
        .count()
}

/// Result of looking at the first content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The line named the columns; it produces no sample
    Header(Schema),
    /// The line is data; the canonical schema applies and the line must still be mapped
    Data(Schema),
}

impl Resolution {
    pub fn schema(&self) -> &Schema {
        match self {
            Resolution::Header(schema) | Resolution::Data(schema) => schema,
        }
    }
}

/// Decide header-vs-data for the first content line of a parse.
pub fn resolve<S: AsRef<str>>(fields: &[S], threshold: usize) -> Resolution {
    if header_score(fields) >= threshold {
        Resolution::Header(Schema::from_header(fields))
    } else {
        Resolution::Data(Schema::canonical())
    }
}

/// Two-state resolver: the schema is established exactly once per parse.
#[derive(Debug, Clone, Default)]
pub enum SchemaState {
    #[default]
    AwaitingFirstContentLine,
    Established(Schema),
}

impl SchemaState {
    pub fn schema(&self) -> Option<&Schema> {
        match self {
            SchemaState::AwaitingFirstContentLine => None,
            SchemaState::Established(schema) => Some(schema),
        }
    }

    pub fn is_established(&self) -> bool {
        self.schema().is_some()
    }
}

/// Flight-recorder log parsing
///
/// Turns raw comma-delimited GPS/telemetry lines into validated, immutable
/// [`Sample`] values, one line at a time.
///
/// # Architecture
///
/// - `classify.rs`: blank/comment detection and BOM handling
/// - `split.rs`: quote-aware field tokenizer
/// - `schema.rs`: header detection and the active column schema
/// - `row.rs`: fields + schema -> ordered raw/extra maps
/// - `time.rs`: ISO-8601 timestamp normalization to UTC
/// - `sample.rs`: required/optional field validation and sample construction
/// - `engine.rs`: the per-line state machine shared by every iteration mode
/// - `metrics.rs`: out-of-band counters for skipped and dropped lines
///
/// # Fault Tolerance
///
/// Malformed rows never raise errors. Each line resolves to a
/// [`RowOutcome`]; only `Emit` reaches the caller.

pub mod classify;
pub mod engine;
pub mod metrics;
pub mod model;
pub mod row;
pub mod sample;
pub mod schema;
pub mod split;
pub mod time;
mod serde_utils;

// Re-export commonly used types
pub use engine::SampleEngine;
pub use metrics::{ParseStats, ParseStatsSnapshot};
pub use model::{Fields, RowOutcome, Sample, SkipReason};
pub use schema::Schema;

/// The 12 canonical columns, in default order.
pub const CANONICAL_COLUMNS: [&str; 12] = [
    "time", "lat", "lon", "hMSL", "velN", "velE", "velD", "hAcc", "vAcc", "sAcc", "gpsFix", "numSV",
];

pub const CANONICAL_COLUMN_COUNT: usize = CANONICAL_COLUMNS.len();

/// Columns that must be present and parseable for a row to become a sample.
pub const REQUIRED_COLUMNS: [&str; 7] = ["time", "lat", "lon", "hMSL", "velN", "velE", "velD"];

// Constants
pub const DEFAULT_HEADER_MATCH_THRESHOLD: usize = 3;

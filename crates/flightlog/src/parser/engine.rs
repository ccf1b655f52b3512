use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::classify::{classify, strip_bom, LineKind};
use super::metrics::ParseStats;
use super::model::{RowOutcome, SkipReason};
use super::row::map_row;
use super::sample::build_sample;
use super::schema::{resolve, Resolution, Schema, SchemaState};
use super::split::split_fields;
use crate::conf::ParserConfig;

/// Per-invocation parsing state.
///
/// Owns the schema for exactly one parse. Feed it lines in order with
/// [`process_line`](Self::process_line); each line yields zero or one sample
/// and all work for that line completes before the call returns.
///
/// Both the blocking iterator and the async stream drive this same engine;
/// they only differ in how they obtain the next line.
#[derive(Debug)]
pub struct SampleEngine {
    config: Arc<ParserConfig>,
    stats: Option<Arc<ParseStats>>,
    state: SchemaState,
    line_number: u64,
}

impl SampleEngine {
    pub fn new(config: Arc<ParserConfig>) -> Self {
        Self {
            config,
            stats: None,
            state: SchemaState::AwaitingFirstContentLine,
            line_number: 0,
        }
    }

    pub fn with_stats(mut self, stats: Arc<ParseStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// The schema, once the first content line has been seen.
    pub fn schema(&self) -> Option<&Schema> {
        self.state.schema()
    }

    /// Number of lines consumed so far (including skipped ones).
    pub fn lines_consumed(&self) -> u64 {
        self.line_number
    }

    /// Process one line (without its line terminator).
    pub fn process_line(&mut self, line: &str) -> RowOutcome {
        self.line_number += 1;
        if let Some(stats) = &self.stats {
            stats.record_line();
        }

        let outcome = self.evaluate(line);

        match &outcome {
            RowOutcome::Emit(_) => {
                if let Some(stats) = &self.stats {
                    stats.record_sample();
                }
            }
            RowOutcome::Skip(reason) => {
                if reason.is_dropped_row() {
                    trace!(line = self.line_number, %reason, "Dropping row");
                }
                if let Some(stats) = &self.stats {
                    stats.record_skip(reason);
                }
            }
        }

        outcome
    }

    /// Called by the adapters once the line source is exhausted.
    pub fn finish(&self) {
        match &self.stats {
            Some(stats) => debug!(lines = self.line_number, stats = ?stats.snapshot(), "End of input"),
            None => debug!(lines = self.line_number, "End of input"),
        }
    }

    fn evaluate(&mut self, line: &str) -> RowOutcome {
        match classify(line) {
            LineKind::Blank => return RowOutcome::Skip(SkipReason::Blank),
            LineKind::Comment => return RowOutcome::Skip(SkipReason::Comment),
            LineKind::Content => {}
        }

        let line = strip_bom(line);
        if let Some(max) = self.config.max_line_bytes {
            // Checked before tokenizing; an oversized line never settles the schema
            if line.len() > max {
                warn!(line = self.line_number, size = line.len(), max, "Line exceeds size limit");
                return RowOutcome::Skip(SkipReason::LineTooLarge(line.len(), max));
            }
        }

        let fields = split_fields(line);

        let schema = match &self.state {
            SchemaState::Established(schema) => schema.clone(),
            SchemaState::AwaitingFirstContentLine => {
                // One-time cost: the first content line decides the schema
                let resolution = resolve(&fields, self.config.header_match_threshold);
                let schema = resolution.schema().clone();
                self.state = SchemaState::Established(schema.clone());

                if let Resolution::Header(_) = resolution {
                    debug!(columns = schema.len(), "Schema established from header line");
                    return RowOutcome::Skip(SkipReason::Header);
                }
                debug!("No header found, using canonical schema");
                schema
            }
        };

        match build_sample(map_row(fields, &schema)) {
            Ok(sample) => RowOutcome::Emit(sample),
            Err(reason) => RowOutcome::Skip(reason),
        }
    }
}

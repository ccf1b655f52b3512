use std::io;
use std::iter::FusedIterator;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{IngestError, IngestResult};
use crate::parser::{RowOutcome, Sample, SampleEngine};

/// Blocking pull adapter: an iterator of samples over an iterator of lines.
///
/// The caller's thread drives line retrieval. Rows that fail validation are
/// skipped internally; an `Err` item means the line source failed or the
/// parse was cancelled, and is always the last item.
pub struct Samples<I> {
    lines: I,
    engine: SampleEngine,
    cancel: Option<CancellationToken>,
    done: bool,
}

impl<I> Samples<I> {
    pub fn new(lines: I, engine: SampleEngine) -> Self {
        Self {
            lines,
            engine,
            cancel: None,
            done: false,
        }
    }

    /// Stop at the next line boundary once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn engine(&self) -> &SampleEngine {
        &self.engine
    }
}

impl<I, L> Iterator for Samples<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<str>,
{
    type Item = IngestResult<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                debug!(lines = self.engine.lines_consumed(), "Parse cancelled");
                self.done = true;
                return Some(Err(IngestError::Cancelled));
            }

            match self.lines.next() {
                Some(Ok(line)) => {
                    if let RowOutcome::Emit(sample) = self.engine.process_line(line.as_ref()) {
                        return Some(Ok(sample));
                    }
                    // Stack-safe: loop iteration, not recursion
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    self.engine.finish();
                    return None;
                }
            }
        }
    }
}

impl<I, L> FusedIterator for Samples<I>
where
    I: Iterator<Item = io::Result<L>>,
    L: AsRef<str>,
{
}

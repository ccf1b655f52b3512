use std::io;
use std::pin::Pin;

use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{IngestError, IngestResult};
use crate::parser::{RowOutcome, Sample, SampleEngine};

/// Suspending stream of samples.
///
/// Boxed so callers can poll it without pinning it themselves.
pub type SampleStream<'a> = Pin<Box<dyn Stream<Item = IngestResult<Sample>> + Send + 'a>>;

/// Suspending pull adapter over an async line source.
///
/// The only await point is waiting for the next line; tokenizing and
/// validation run synchronously inside the engine. Cancellation is observed
/// at line boundaries, including while waiting on a slow source, and ends the
/// stream with a single `Err(IngestError::Cancelled)`.
pub fn sample_stream<'a, S, L>(
    lines: S,
    mut engine: SampleEngine,
    cancel: CancellationToken,
) -> SampleStream<'a>
where
    S: Stream<Item = io::Result<L>> + Send + 'a,
    L: AsRef<str> + Send + 'a,
{
    let stream = async_stream::stream! {
        tokio::pin!(lines);

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                item = lines.next() => Some(item),
            };

            let line = match next {
                None => {
                    debug!(lines = engine.lines_consumed(), "Parse cancelled");
                    yield Err(IngestError::Cancelled);
                    break;
                }
                Some(None) => {
                    engine.finish();
                    break;
                }
                Some(Some(Err(e))) => {
                    yield Err(IngestError::Io(e));
                    break;
                }
                Some(Some(Ok(line))) => line,
            };

            if let RowOutcome::Emit(sample) = engine.process_line(line.as_ref()) {
                yield Ok(sample);
            }
        }
    };

    Box::pin(stream)
}

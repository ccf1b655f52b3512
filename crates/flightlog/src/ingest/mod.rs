//! Ingest: drives the parser engine over a line source.
//!
//! - `blocking.rs`: `Samples`, an `Iterator` pulled by the caller's thread
//! - `stream.rs`: `SampleStream`, a `Stream` that suspends only while waiting for lines
//! - `file.rs`: opening named files as line sources
//!
//! Every call creates a fresh [`SampleEngine`], so concurrent parses never
//! share schema state.

pub mod blocking;
pub mod file;
pub mod stream;

use std::io;
use std::path::Path;
use std::sync::Arc;

use tokio_stream::Stream;
use tokio_util::sync::CancellationToken;

use crate::conf::ParserConfig;
use crate::error::IngestResult;
use crate::parser::{ParseStats, SampleEngine};

pub use blocking::Samples;
pub use file::{AsyncFileLines, FileLines};
pub use stream::SampleStream;

/// Entry point for parsing flight-recorder logs.
///
/// Cheap to clone and safe to share between threads and tasks.
#[derive(Debug, Clone, Default)]
pub struct FlightLogParser {
    config: Arc<ParserConfig>,
    stats: Option<Arc<ParseStats>>,
}

impl FlightLogParser {
    /// Build a parser from a validated configuration.
    pub fn new(config: ParserConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            stats: None,
        })
    }

    /// Count skipped and dropped lines into `stats` for every parse started from this parser.
    pub fn with_stats(mut self, stats: Arc<ParseStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn engine(&self) -> SampleEngine {
        let engine = SampleEngine::new(Arc::clone(&self.config));
        match &self.stats {
            Some(stats) => engine.with_stats(Arc::clone(stats)),
            None => engine,
        }
    }

    /// Parse any blocking line source.
    pub fn parse_lines<I, L>(&self, lines: I) -> Samples<I::IntoIter>
    where
        I: IntoIterator<Item = io::Result<L>>,
        L: AsRef<str>,
    {
        Samples::new(lines.into_iter(), self.engine())
    }

    /// Parse an in-memory document.
    pub fn parse_str<'a>(&self, text: &'a str) -> Samples<impl Iterator<Item = io::Result<&'a str>>> {
        self.parse_lines(text.lines().map(Ok))
    }

    /// Parse any async line source, stopping when `cancel` fires.
    pub fn parse_stream<'a, S, L>(&self, lines: S, cancel: CancellationToken) -> SampleStream<'a>
    where
        S: Stream<Item = io::Result<L>> + Send + 'a,
        L: AsRef<str> + Send + 'a,
    {
        stream::sample_stream(lines, self.engine(), cancel)
    }

    /// Open a file and parse it with blocking reads.
    pub fn open(&self, path: impl AsRef<Path>) -> IngestResult<Samples<FileLines>> {
        Ok(self.parse_lines(file::open_lines(path)?))
    }

    /// Open a file and parse it as a stream.
    pub async fn open_async(
        &self,
        path: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> IngestResult<SampleStream<'static>> {
        let lines = file::open_lines_async(path).await?;
        Ok(self.parse_stream(lines, cancel))
    }
}

/// Parse a blocking line source with the default configuration.
pub fn parse_lines<I, L>(lines: I) -> Samples<I::IntoIter>
where
    I: IntoIterator<Item = io::Result<L>>,
    L: AsRef<str>,
{
    FlightLogParser::default().parse_lines(lines)
}

/// Parse an in-memory document with the default configuration.
pub fn parse_str(text: &str) -> Samples<impl Iterator<Item = io::Result<&str>>> {
    FlightLogParser::default().parse_str(text)
}

/// Parse an async line source with the default configuration.
pub fn parse_stream<'a, S, L>(lines: S, cancel: CancellationToken) -> SampleStream<'a>
where
    S: Stream<Item = io::Result<L>> + Send + 'a,
    L: AsRef<str> + Send + 'a,
{
    FlightLogParser::default().parse_stream(lines, cancel)
}

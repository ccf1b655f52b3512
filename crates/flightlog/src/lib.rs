// Module structure for the flight-recorder log parser.

// Core parsing
pub mod parser;
pub mod query;

// Line sources and entry points
pub mod ingest;

// Infrastructure
pub mod conf;
pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use conf::ParserConfig;
pub use error::{IngestError, IngestResult};
pub use ingest::{parse_lines, parse_str, parse_stream, FlightLogParser, SampleStream, Samples};
pub use parser::{Fields, ParseStats, ParseStatsSnapshot, Sample};
pub use query::{SampleFilter, SampleQuery, SampleStreamQuery, Summary};
pub use tokio_util::sync::CancellationToken;

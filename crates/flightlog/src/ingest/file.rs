//! File: the only place the parser touches the filesystem.
//!
//! Opens a named file as UTF-8 text and presents it as a line source. A file
//! that cannot be opened, or a line that is not valid UTF-8, surfaces as
//! `IngestError::Io`.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tokio_stream::wrappers::LinesStream;
use tracing::info;

use crate::error::IngestResult;

pub type FileLines = Lines<BufReader<File>>;
pub type AsyncFileLines = LinesStream<tokio::io::BufReader<tokio::fs::File>>;

/// Open `path` for blocking line-by-line reading.
pub fn open_lines(path: impl AsRef<Path>) -> IngestResult<FileLines> {
    let path = path.as_ref();
    let file = File::open(path)?;
    info!("Opened log file: {}", path.display());
    Ok(BufReader::new(file).lines())
}

/// Open `path` for async line-by-line reading.
pub async fn open_lines_async(path: impl AsRef<Path>) -> IngestResult<AsyncFileLines> {
    use tokio::io::AsyncBufReadExt;

    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    info!("Opened log file: {}", path.display());
    Ok(LinesStream::new(tokio::io::BufReader::new(file).lines()))
}

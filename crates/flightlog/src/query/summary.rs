use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_stream::{Stream, StreamExt};

use crate::parser::Sample;

/// Time span and size of a sample sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    /// The sequence had no samples
    Empty,
    Populated {
        min_time: DateTime<Utc>,
        max_time: DateTime<Utc>,
        count: usize,
    },
}

impl Summary {
    pub fn count(&self) -> usize {
        match self {
            Summary::Empty => 0,
            Summary::Populated { count, .. } => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Summary::Empty)
    }

    pub fn min_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Summary::Empty => None,
            Summary::Populated { min_time, .. } => Some(*min_time),
        }
    }

    pub fn max_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Summary::Empty => None,
            Summary::Populated { max_time, .. } => Some(*max_time),
        }
    }

    /// Fold one more sample into the summary. Input order does not matter.
    pub fn push(self, sample: &Sample) -> Self {
        let t = sample.time();
        match self {
            Summary::Empty => Summary::Populated {
                min_time: t,
                max_time: t,
                count: 1,
            },
            Summary::Populated {
                min_time,
                max_time,
                count,
            } => Summary::Populated {
                min_time: min_time.min(t),
                max_time: max_time.max(t),
                count: count + 1,
            },
        }
    }
}

/// Reduce a sequence of samples in a single pass.
pub fn summarize<I>(samples: I) -> Summary
where
    I: IntoIterator,
    I::Item: Borrow<Sample>,
{
    samples
        .into_iter()
        .fold(Summary::Empty, |acc, s| acc.push(<I::Item as Borrow<Sample>>::borrow(&s)))
}

/// Reduce a fallible sample stream, stopping at the first error.
pub async fn try_summary<S, E>(stream: S) -> Result<Summary, E>
where
    S: Stream<Item = Result<Sample, E>>,
{
    tokio::pin!(stream);

    let mut summary = Summary::Empty;
    while let Some(item) = stream.next().await {
        summary = summary.push(&item?);
    }
    Ok(summary)
}

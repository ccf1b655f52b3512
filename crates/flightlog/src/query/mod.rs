//! Query: lazy filters and the summary reducer over sample sequences.
//!
//! Operators compose and never buffer: each filter wraps the previous
//! sequence and only pulls as many samples as the consumer asks for.
//! `summary()` is the one full pass.

pub mod filter;
pub mod summary;

use std::borrow::Borrow;

use chrono::{DateTime, Utc};
use tokio_stream::Stream;

use crate::parser::Sample;

pub use filter::{Filtered, SampleFilter};
pub use summary::{summarize, try_summary, Summary};

/// Query operators for any iterator of samples (owned, borrowed or shared).
pub trait SampleQuery: Iterator + Sized
where
    Self::Item: Borrow<Sample>,
{
    /// Keep samples with `start <= time < end`; `None` leaves that side open.
    fn between(self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::between(start, end))
    }

    /// Keep samples whose fix is at least `min_fix` (no fix counts as 0).
    fn where_fix_at_least(self, min_fix: i32) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::fix_at_least(min_fix))
    }

    fn where_fix_3d(self) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::fix_3d())
    }

    /// Keep samples whose accuracies are present and within each supplied bound.
    fn with_accuracy(self, max_horizontal: Option<f64>, max_vertical: Option<f64>) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::accuracy(max_horizontal, max_vertical))
    }

    /// Keep samples inside the inclusive lat/lon rectangle.
    fn within_bounds(self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::bounds(min_lat, max_lat, min_lon, max_lon))
    }

    fn summary(self) -> Summary {
        summarize(self)
    }
}

impl<I> SampleQuery for I
where
    I: Iterator,
    I::Item: Borrow<Sample>,
{
}

/// The same filters for fallible sample streams. Errors pass through untouched.
pub trait SampleStreamQuery<E>: Stream<Item = Result<Sample, E>> + Sized + Unpin {
    fn between(self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::between(start, end))
    }

    fn where_fix_at_least(self, min_fix: i32) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::fix_at_least(min_fix))
    }

    fn where_fix_3d(self) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::fix_3d())
    }

    fn with_accuracy(self, max_horizontal: Option<f64>, max_vertical: Option<f64>) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::accuracy(max_horizontal, max_vertical))
    }

    fn within_bounds(self, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Filtered<Self> {
        Filtered::new(self, SampleFilter::bounds(min_lat, max_lat, min_lon, max_lon))
    }
}

impl<S, E> SampleStreamQuery<E> for S where S: Stream<Item = Result<Sample, E>> + Unpin {}

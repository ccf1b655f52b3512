use std::borrow::Borrow;
use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use tokio_stream::Stream;

use crate::parser::Sample;

// Cooperative yielding budget for stream filtering; predicates are cheap
// comparisons, so a long run of rejected samples would otherwise hog the task.
const POLL_BUDGET: usize = 1024;

/// A predicate over samples. Each query operator is one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleFilter {
    /// `start <= time < end`; a missing bound is unbounded
    Between {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
    /// `gps_fix >= min`, where a missing fix counts as 0
    FixAtLeast(i32),
    /// Each supplied bound requires the accuracy to be present and `<=` the bound
    Accuracy {
        max_horizontal: Option<f64>,
        max_vertical: Option<f64>,
    },
    /// Inclusive latitude/longitude rectangle
    Bounds {
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    },
}

impl SampleFilter {
    pub fn between(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        SampleFilter::Between { start, end }
    }

    pub fn fix_at_least(min_fix: i32) -> Self {
        SampleFilter::FixAtLeast(min_fix)
    }

    /// A 3-dimensional fix or better.
    pub fn fix_3d() -> Self {
        SampleFilter::FixAtLeast(3)
    }

    pub fn accuracy(max_horizontal: Option<f64>, max_vertical: Option<f64>) -> Self {
        SampleFilter::Accuracy {
            max_horizontal,
            max_vertical,
        }
    }

    pub fn bounds(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        SampleFilter::Bounds {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        match *self {
            SampleFilter::Between { start, end } => {
                let t = sample.time();
                start.map_or(true, |s| t >= s) && end.map_or(true, |e| t < e)
            }
            SampleFilter::FixAtLeast(min) => sample.gps_fix().unwrap_or(0) >= min,
            SampleFilter::Accuracy {
                max_horizontal,
                max_vertical,
            } => {
                within(sample.horizontal_accuracy(), max_horizontal)
                    && within(sample.vertical_accuracy(), max_vertical)
            }
            SampleFilter::Bounds {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
            } => {
                let (lat, lon) = (sample.latitude(), sample.longitude());
                lat >= min_lat && lat <= max_lat && lon >= min_lon && lon <= max_lon
            }
        }
    }
}

fn within(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        None => true,
        Some(max) => value.is_some_and(|v| v <= max),
    }
}

/// Lazy filtering adapter shared by the iterator and stream query traits.
#[derive(Debug, Clone)]
pub struct Filtered<S> {
    inner: S,
    filter: SampleFilter,
}

impl<S> Filtered<S> {
    pub fn new(inner: S, filter: SampleFilter) -> Self {
        Self { inner, filter }
    }

    pub fn filter(&self) -> &SampleFilter {
        &self.filter
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Iterator for Filtered<S>
where
    S: Iterator,
    S::Item: Borrow<Sample>,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = &self.filter;
        self.inner
            .find(|item| filter.matches(<S::Item as Borrow<Sample>>::borrow(item)))
    }
}

impl<S, E> Stream for Filtered<S>
where
    S: Stream<Item = Result<Sample, E>> + Unpin,
{
    type Item = Result<Sample, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut budget = POLL_BUDGET;

        loop {
            // Yield to executor if budget exhausted to prevent starvation
            if budget == 0 {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }
            budget -= 1;

            // Safe unpinning: Filtered is Unpin when S is
            let this = self.as_mut().get_mut();

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(sample))) => {
                    if this.filter.matches(&sample) {
                        return Poll::Ready(Some(Ok(sample)));
                    }
                }
                // Errors are not samples; they always pass through
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

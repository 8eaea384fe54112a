//! Occupancy census over a uniform minute grid
//!
//! A record covers grid point `t` when `join_time <= t <= leave_time`, so an
//! attendee counts in both their join minute and their leave minute.
//!
//! Counting uses an event sweep: every record becomes a `+1` event at the
//! first grid index it covers and a `-1` event one past the last, bucketed by
//! index. A running sum over the buckets gives every sample in
//! O(records + grid) instead of rescanning all records per grid point.

use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::types::{AttendanceRecord, OccupancySample};

/// Occupancy time series plus the grid it was sampled on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub resolution_minutes: u32,
    pub samples: Vec<OccupancySample>,
}

impl Census {
    pub fn max_count(&self) -> usize {
        self.samples.iter().map(|s| s.count).max().unwrap_or(0)
    }

    /// First sample that reaches the maximum
    pub fn peak(&self) -> Option<OccupancySample> {
        let max = self.max_count();
        self.samples.iter().find(|s| s.count == max).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Truncate seconds and sub-seconds
pub fn floor_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t - Duration::seconds(i64::from(t.second()))
        - Duration::nanoseconds(i64::from(t.nanosecond()))
}

/// Grid bounds and step shared by the sweep and the naive oracle
#[derive(Debug, Clone, Copy)]
struct Grid {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
    len: usize,
}

impl Grid {
    fn span<'a>(
        records: impl IntoIterator<Item = &'a AttendanceRecord>,
        resolution_minutes: u32,
    ) -> Result<(Self, Vec<(NaiveDateTime, NaiveDateTime)>), AnalysisError> {
        if resolution_minutes == 0 {
            return Err(AnalysisError::DegenerateRange(
                "grid resolution must be at least one minute".to_string(),
            ));
        }

        let intervals: Vec<_> = records
            .into_iter()
            .map(|r| (r.join_time, r.leave_time))
            .collect();

        let first_join = intervals.iter().map(|&(join, _)| join).min();
        let last_leave = intervals.iter().map(|&(_, leave)| leave).max();
        let (first_join, last_leave) = match (first_join, last_leave) {
            (Some(j), Some(l)) => (j, l),
            _ => {
                return Err(AnalysisError::DegenerateRange(
                    "no intervals to sample".to_string(),
                ))
            }
        };

        let start = floor_to_minute(first_join);
        let end = floor_to_minute(last_leave) + Duration::minutes(1);
        if end <= start {
            return Err(AnalysisError::DegenerateRange(format!(
                "grid end {end} is not after start {start}"
            )));
        }

        let step = Duration::minutes(i64::from(resolution_minutes));
        let span_minutes = (end - start).num_minutes();
        let len = (span_minutes / i64::from(resolution_minutes)) as usize + 1;

        Ok((
            Self {
                start,
                end,
                step,
                len,
            },
            intervals,
        ))
    }

    fn at(&self, index: usize) -> NaiveDateTime {
        self.start + Duration::minutes(self.step.num_minutes() * index as i64)
    }

    /// Index of the first grid point at or after `t`. `t` must be >= start.
    fn ceil_index(&self, t: NaiveDateTime) -> usize {
        let offset = t - self.start;
        let step_minutes = self.step.num_minutes();
        let whole = offset.num_minutes() / step_minutes;
        let exact = offset == Duration::minutes(whole * step_minutes);
        if exact {
            whole as usize
        } else {
            whole as usize + 1
        }
    }

    /// Index of the last grid point at or before `t`. `t` must be >= start.
    fn floor_index(&self, t: NaiveDateTime) -> usize {
        ((t - self.start).num_minutes() / self.step.num_minutes()) as usize
    }

    fn into_census(
        self,
        counts: impl IntoIterator<Item = usize>,
        resolution_minutes: u32,
    ) -> Census {
        let samples = counts
            .into_iter()
            .enumerate()
            .map(|(index, count)| OccupancySample {
                timestamp: self.at(index),
                count,
            })
            .collect();
        Census {
            start: self.start,
            end: self.end,
            resolution_minutes,
            samples,
        }
    }
}

/// Sweep-based occupancy census.
///
/// Fails with `DegenerateRange` when `records` is empty.
pub fn census<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
    resolution_minutes: u32,
) -> Result<Census, AnalysisError> {
    let (grid, intervals) = Grid::span(records, resolution_minutes)?;

    // deltas[i] is the change in occupancy entering grid point i
    let mut deltas = vec![0i64; grid.len + 1];
    for &(join, leave) in &intervals {
        if leave < join {
            continue;
        }
        let first = grid.ceil_index(join);
        let last = grid.floor_index(leave);
        // Interval falls strictly between two grid points
        if first > last {
            continue;
        }
        deltas[first] += 1;
        deltas[last + 1] -= 1;
    }

    let mut running = 0i64;
    let counts = deltas[..grid.len].iter().map(|delta| {
        running += delta;
        running as usize
    });
    let census = grid.into_census(counts.collect::<Vec<_>>(), resolution_minutes);

    debug!(
        records = intervals.len(),
        samples = census.len(),
        start = %census.start,
        end = %census.end,
        "computed occupancy census"
    );
    Ok(census)
}

/// Direct membership count at every grid point. O(records x grid).
///
/// Reference for `census`; not used on the analysis path.
pub fn naive_census<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
    resolution_minutes: u32,
) -> Result<Census, AnalysisError> {
    let (grid, intervals) = Grid::span(records, resolution_minutes)?;
    let counts: Vec<usize> = (0..grid.len)
        .map(|index| {
            let t = grid.at(index);
            intervals
                .iter()
                .filter(|&&(join, leave)| join <= t && t <= leave)
                .count()
        })
        .collect();
    Ok(grid.into_census(counts, resolution_minutes))
}

//! Per-attendee duration totals and their statistics
//!
//! Attendees are keyed by their name exactly as exported. "Alice" and
//! "alice " are two attendees, and two different people both called "Alice"
//! are one.

use crate::types::{AttendanceRecord, AttendeeDurationSummary, DurationStats, HistogramBin};

/// Sum `duration_minutes` per attendee name, saturating at `u64::MAX`
pub fn summarize<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> AttendeeDurationSummary {
    let mut summary = AttendeeDurationSummary::new();
    for record in records {
        let total = summary.entry(record.attendee_name.clone()).or_default();
        *total = total.saturating_add(record.duration_minutes);
    }
    summary
}

/// `summarize` restricted to guest records
pub fn guest_summary<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> AttendeeDurationSummary {
    summarize(records.into_iter().filter(|r| r.is_guest))
}

pub fn unique_attendees(summary: &AttendeeDurationSummary) -> usize {
    summary.len()
}

/// Mean, median and sum over per-attendee totals, `None` when empty
pub fn duration_stats(summary: &AttendeeDurationSummary) -> Option<DurationStats> {
    if summary.is_empty() {
        return None;
    }

    let mut totals: Vec<u64> = summary.values().copied().collect();
    totals.sort_unstable();

    let total = totals.iter().fold(0u64, |acc, &t| acc.saturating_add(t));
    let mean = total as f64 / totals.len() as f64;
    let mid = totals.len() / 2;
    let median = if totals.len() % 2 == 0 {
        (totals[mid - 1] as f64 + totals[mid] as f64) / 2.0
    } else {
        totals[mid] as f64
    };

    Some(DurationStats {
        mean,
        median,
        total,
    })
}

/// Human-readable duration.
///
/// Up to and including 60 the value is shown in minutes, above that as whole
/// hours plus the floored remainder in minutes.
pub fn format_duration(minutes: f64) -> String {
    if minutes > 60.0 {
        let hours = (minutes / 60.0).floor() as u64;
        let rest = (minutes % 60.0).floor() as u64;
        format!("{hours} hours {rest} minutes")
    } else {
        let rounded = (minutes * 100.0).round() / 100.0;
        format!("{rounded} minutes")
    }
}

/// Minutes as hours, two decimals
pub fn total_hours(total_minutes: u64) -> f64 {
    (total_minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// Longest attendance first, ties by name
pub fn ranked(summary: &AttendeeDurationSummary) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = summary
        .iter()
        .map(|(name, &total)| (name.as_str(), total))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}

/// Upper bound on the number of histogram bins
pub const MAX_HISTOGRAM_BINS: u64 = 100;

/// Fixed-width bins from zero up to the largest total.
///
/// Bins widen beyond `bin_minutes` when the largest total would otherwise
/// need more than `MAX_HISTOGRAM_BINS` of them.
pub fn histogram(summary: &AttendeeDurationSummary, bin_minutes: u64) -> Vec<HistogramBin> {
    let Some(&max) = summary.values().max() else {
        return Vec::new();
    };
    let width = bin_minutes
        .max(1)
        .max(max.saturating_add(1).div_ceil(MAX_HISTOGRAM_BINS));

    let mut bins: Vec<HistogramBin> = (0..=max / width)
        .map(|i| HistogramBin {
            lower: i * width,
            upper: (i + 1).saturating_mul(width),
            count: 0,
        })
        .collect();
    for &total in summary.values() {
        bins[(total / width) as usize].count += 1;
    }
    bins
}

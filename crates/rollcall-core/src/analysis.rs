//! One full analysis run: normalize, census, aggregate, overlay

use chrono::NaiveDateTime;
use rollcall_io::RawTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregator::{
    duration_stats, format_duration, guest_summary, histogram, summarize, total_hours,
    unique_attendees,
};
use crate::census::{census, Census};
use crate::config::Config;
use crate::error::AnalysisError;
use crate::normalizer::normalize;
use crate::overlay::resolve_overlays;
use crate::types::{
    AttendanceLog, AttendeeDurationSummary, HistogramBin, OverlayWarning, SessionOverlay,
    SessionOverlayInput,
};

/// What the caller wants on top of the standard metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Also compute the occupancy series of this attendee
    pub attendee: Option<String>,
    pub overlays: Vec<SessionOverlayInput>,
}

/// Headline numbers of a meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub max_concurrent: usize,
    pub peak_time: Option<NaiveDateTime>,
    pub unique_attendees: usize,
    pub unique_guests: usize,
    pub record_count: usize,
    pub mean_minutes: f64,
    pub median_minutes: f64,
    pub total_minutes: u64,
    pub total_hours: f64,
    pub mean_duration: String,
    pub median_duration: String,
    pub total_duration: String,
}

/// Occupancy of a single attendee, or nothing when the name has no records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttendeeView {
    Found { name: String, census: Census },
    NoData { name: String },
}

/// Everything the presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    pub metrics: SummaryMetrics,
    pub census: Census,
    pub durations: AttendeeDurationSummary,
    pub guests: Vec<String>,
    pub histogram: Vec<HistogramBin>,
    pub attendee: Option<AttendeeView>,
    pub overlays: Vec<SessionOverlay>,
    pub overlay_warnings: Vec<OverlayWarning>,
}

/// Analyze a raw table
pub fn analyze(
    table: &RawTable,
    request: &AnalysisRequest,
    config: &Config,
) -> Result<AttendanceReport, AnalysisError> {
    config.validate()?;
    let log = normalize(table, config)?;
    analyze_log(&log, request, config)
}

/// Analyze an already normalized log
pub fn analyze_log(
    log: &AttendanceLog,
    request: &AnalysisRequest,
    config: &Config,
) -> Result<AttendanceReport, AnalysisError> {
    let census = census(log, config.resolution_minutes)?;

    let durations = summarize(log);
    let guests_summary = guest_summary(log);
    // AttendanceLog is never empty, so neither is the summary
    let stats = duration_stats(&durations).ok_or(AnalysisError::EmptyDataset)?;

    let metrics = SummaryMetrics {
        max_concurrent: census.max_count(),
        peak_time: census.peak().map(|s| s.timestamp),
        unique_attendees: unique_attendees(&durations),
        unique_guests: unique_attendees(&guests_summary),
        record_count: log.len(),
        mean_minutes: stats.mean,
        median_minutes: stats.median,
        total_minutes: stats.total,
        total_hours: total_hours(stats.total),
        mean_duration: format_duration(stats.mean),
        median_duration: format_duration(stats.median),
        total_duration: format_duration(stats.total as f64),
    };

    let attendee = request
        .attendee
        .as_deref()
        .map(|name| attendee_view(log, name, config))
        .transpose()?;

    let resolution = resolve_overlays(
        &request.overlays,
        census.start.date(),
        config.max_overlays,
    );

    info!(
        records = metrics.record_count,
        attendees = metrics.unique_attendees,
        max_concurrent = metrics.max_concurrent,
        "analysis complete"
    );

    Ok(AttendanceReport {
        metrics,
        histogram: histogram(&durations, config.histogram_bin_minutes),
        guests: guests_summary.into_keys().collect(),
        durations,
        census,
        attendee,
        overlays: resolution.overlays,
        overlay_warnings: resolution.warnings,
    })
}

/// Per-attendee census. An unknown name degrades to `NoData`.
pub fn attendee_view(
    log: &AttendanceLog,
    name: &str,
    config: &Config,
) -> Result<AttendeeView, AnalysisError> {
    match census(log.for_attendee(name), config.resolution_minutes) {
        Ok(census) => Ok(AttendeeView::Found {
            name: name.to_string(),
            census,
        }),
        Err(AnalysisError::DegenerateRange(reason)) => {
            debug!(attendee = name, %reason, "no data for attendee");
            Ok(AttendeeView::NoData {
                name: name.to_string(),
            })
        }
        Err(other) => Err(other),
    }
}

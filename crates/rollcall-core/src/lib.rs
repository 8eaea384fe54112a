//! Attendance analytics: occupancy census, duration totals and session overlays

mod aggregator;
mod analysis;
mod census;
mod config;
mod error;
mod normalizer;
mod overlay;
mod types;

pub use aggregator::{
    duration_stats, format_duration, guest_summary, histogram, ranked, summarize, total_hours,
    unique_attendees, MAX_HISTOGRAM_BINS,
};
pub use analysis::{
    analyze, analyze_log, attendee_view, AnalysisRequest, AttendanceReport, AttendeeView,
    SummaryMetrics,
};
pub use census::{census, floor_to_minute, naive_census, Census};
pub use config::{Config, DEFAULT_TIMESTAMP_FORMATS};
pub use error::AnalysisError;
pub use normalizer::{normalize, parse_timestamp, MAX_DURATION_MINUTES};
pub use overlay::{parse_overlay_arg, resolve_overlays, OverlayResolution};
pub use types::{
    AttendanceLog, AttendanceRecord, AttendeeDurationSummary, DurationStats, HistogramBin,
    OccupancySample, OverlayWarning, SessionOverlay, SessionOverlayInput,
};

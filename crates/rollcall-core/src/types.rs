//! Core types for attendance analysis

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AnalysisError;

/// One join/leave session of an attendee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub attendee_name: String,
    pub is_guest: bool,
    pub in_waiting_room: bool,
    pub join_time: NaiveDateTime,
    pub leave_time: NaiveDateTime,
    /// As reported by the export; used for duration totals
    pub duration_minutes: u64,
}

impl AttendanceRecord {
    pub fn new(
        attendee_name: impl Into<String>,
        join_time: NaiveDateTime,
        leave_time: NaiveDateTime,
        duration_minutes: u64,
    ) -> Self {
        Self {
            attendee_name: attendee_name.into(),
            is_guest: false,
            in_waiting_room: false,
            join_time,
            leave_time,
            duration_minutes,
        }
    }

    pub fn guest(mut self, is_guest: bool) -> Self {
        self.is_guest = is_guest;
        self
    }
}

/// Admitted attendance records in input order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceLog {
    records: Vec<AttendanceRecord>,
}

impl AttendanceLog {
    /// Drops waiting-room records; fails if nothing is left
    pub fn new(records: Vec<AttendanceRecord>) -> Result<Self, AnalysisError> {
        let records: Vec<_> = records
            .into_iter()
            .filter(|r| !r.in_waiting_room)
            .collect();
        if records.is_empty() {
            return Err(AnalysisError::EmptyDataset);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttendanceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one attendee, matched by exact name
    pub fn for_attendee<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.records.iter().filter(move |r| r.attendee_name == name)
    }
}

impl<'a> IntoIterator for &'a AttendanceLog {
    type Item = &'a AttendanceRecord;
    type IntoIter = std::slice::Iter<'a, AttendanceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Number of attendees present at one grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySample {
    pub timestamp: NaiveDateTime,
    pub count: usize,
}

/// Attendee name -> summed minutes. Ordered by name.
pub type AttendeeDurationSummary = BTreeMap<String, u64>;

/// Distribution of per-attendee totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub mean: f64,
    pub median: f64,
    pub total: u64,
}

/// Half-open bucket `[lower, upper)` of per-attendee totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: u64,
    pub upper: u64,
    pub count: usize,
}

/// Session overlay row as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOverlayInput {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub label: String,
}

impl SessionOverlayInput {
    pub fn new(start: &str, end: &str, label: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            label: label.to_string(),
        }
    }
}

/// Labelled interval anchored to the meeting date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOverlay {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

/// Overlay row that was skipped, 1-based
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayWarning {
    pub row: usize,
    pub reason: String,
}

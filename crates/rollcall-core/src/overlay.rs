//! Session overlays: user-entered time-of-day ranges anchored to the meeting date

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{OverlayWarning, SessionOverlay, SessionOverlayInput};

const TIME_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S"];

/// Resolved overlays plus the rows that had to be skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayResolution {
    pub overlays: Vec<SessionOverlay>,
    pub warnings: Vec<OverlayWarning>,
}

/// Best-effort resolution of overlay rows.
///
/// Blank rows are skipped silently; malformed rows are skipped with a
/// warning. Only the first `max_rows` rows are considered.
pub fn resolve_overlays(
    rows: &[SessionOverlayInput],
    anchor: NaiveDate,
    max_rows: usize,
) -> OverlayResolution {
    let mut resolution = OverlayResolution::default();

    for (index, row) in rows.iter().enumerate().take(max_rows) {
        let row_number = index + 1;
        match resolve_row(row, anchor) {
            Ok(Some(overlay)) => resolution.overlays.push(overlay),
            Ok(None) => {}
            Err(reason) => {
                warn!(row = row_number, %reason, "skipping session overlay");
                resolution.warnings.push(OverlayWarning {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    if rows.len() > max_rows {
        let reason = format!(
            "only the first {max_rows} overlays are used, {} ignored",
            rows.len() - max_rows
        );
        warn!(%reason, "too many session overlays");
        resolution.warnings.push(OverlayWarning {
            row: max_rows + 1,
            reason,
        });
    }

    resolution
}

fn resolve_row(
    row: &SessionOverlayInput,
    anchor: NaiveDate,
) -> Result<Option<SessionOverlay>, String> {
    if row.start.trim().is_empty() || row.end.trim().is_empty() {
        return Ok(None);
    }

    let start = parse_time_of_day(&row.start)?;
    let end = parse_time_of_day(&row.end)?;
    if end < start {
        return Err(format!("end {} is before start {}", row.end, row.start));
    }

    Ok(Some(SessionOverlay {
        start: anchor.and_time(start),
        end: anchor.and_time(end),
        label: row.label.trim().to_string(),
    }))
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    let trimmed = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("invalid time {value:?}, expected HH:MM"))
}

/// Parse a `START,END[,LABEL]` command-line argument
pub fn parse_overlay_arg(arg: &str) -> Result<SessionOverlayInput, String> {
    let mut parts = arg.splitn(3, ',');
    let start = parts.next().unwrap_or_default().trim();
    let end = parts.next().unwrap_or_default().trim();
    let label = parts.next().unwrap_or_default().trim();
    if start.is_empty() || end.is_empty() {
        return Err(format!("expected START,END[,LABEL], got {arg:?}"));
    }
    Ok(SessionOverlayInput::new(start, end, label))
}

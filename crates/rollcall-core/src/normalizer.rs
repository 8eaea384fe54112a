//! Raw table -> validated attendance log

use chrono::NaiveDateTime;
use rollcall_io::RawTable;
use tracing::debug;

use crate::config::Config;
use crate::error::AnalysisError;
use crate::types::{AttendanceLog, AttendanceRecord};

pub const NAME_COLUMN: &str = "Name (Original Name)";
pub const JOIN_COLUMN: &str = "Join Time";
pub const LEAVE_COLUMN: &str = "Leave Time";
pub const DURATION_COLUMN: &str = "Duration (Minutes)";
pub const GUEST_COLUMN: &str = "Guest";
pub const WAITING_ROOM_COLUMN: &str = "In Waiting Room";

/// Older exports label the name column without the suffix
const NAME_ALIASES: &[&str] = &[NAME_COLUMN, "Name"];

/// Waiting-room cell value of an admitted attendee. Compared as a string.
const ADMITTED: &str = "No";
const YES: &str = "Yes";

/// Largest accepted per-row duration. Keeps per-attendee sums far from `u64::MAX`.
pub const MAX_DURATION_MINUTES: u64 = u32::MAX as u64;

struct Columns {
    name: usize,
    join: usize,
    leave: usize,
    duration: usize,
    guest: usize,
    waiting_room: usize,
}

impl Columns {
    fn locate(table: &RawTable) -> Result<Self, AnalysisError> {
        let name = NAME_ALIASES
            .iter()
            .find_map(|alias| table.column_index(alias))
            .ok_or_else(|| missing_column(NAME_COLUMN))?;

        let find = |column: &str| {
            table
                .column_index(column)
                .ok_or_else(|| missing_column(column))
        };

        Ok(Self {
            name,
            join: find(JOIN_COLUMN)?,
            leave: find(LEAVE_COLUMN)?,
            duration: find(DURATION_COLUMN)?,
            guest: find(GUEST_COLUMN)?,
            waiting_room: find(WAITING_ROOM_COLUMN)?,
        })
    }
}

fn missing_column(column: &str) -> AnalysisError {
    AnalysisError::malformed(None, column, "column not found")
}

/// Parse every row, then keep the ones admitted from the waiting room.
///
/// A single bad cell anywhere fails the whole table, including rows that
/// would have been filtered out.
pub fn normalize(table: &RawTable, config: &Config) -> Result<AttendanceLog, AnalysisError> {
    let columns = Columns::locate(table)?;

    let mut records = Vec::with_capacity(table.len());
    for index in 0..table.len() {
        records.push(parse_row(table, &columns, index, config)?);
    }

    let parsed = records.len();
    let log = AttendanceLog::new(records)?;
    debug!(
        parsed,
        kept = log.len(),
        dropped = parsed - log.len(),
        "normalized attendance table"
    );
    Ok(log)
}

fn parse_row(
    table: &RawTable,
    columns: &Columns,
    index: usize,
    config: &Config,
) -> Result<AttendanceRecord, AnalysisError> {
    let row = Some(index + 1);

    let duration_minutes = parse_duration(table.cell(index, columns.duration))
        .map_err(|reason| AnalysisError::malformed(row, DURATION_COLUMN, reason))?;

    let join_time = parse_timestamp(table.cell(index, columns.join), &config.timestamp_formats)
        .map_err(|reason| AnalysisError::malformed(row, JOIN_COLUMN, reason))?;
    let leave_time = parse_timestamp(table.cell(index, columns.leave), &config.timestamp_formats)
        .map_err(|reason| AnalysisError::malformed(row, LEAVE_COLUMN, reason))?;

    if leave_time < join_time {
        return Err(AnalysisError::malformed(
            row,
            LEAVE_COLUMN,
            format!("leave time {leave_time} is before join time {join_time}"),
        ));
    }

    Ok(AttendanceRecord {
        attendee_name: table.cell(index, columns.name).to_string(),
        is_guest: table.cell(index, columns.guest) == YES,
        in_waiting_room: table.cell(index, columns.waiting_room) != ADMITTED,
        join_time,
        leave_time,
        duration_minutes,
    })
}

fn parse_duration(cell: &str) -> Result<u64, String> {
    let trimmed = cell.trim();
    let minutes = match trimmed.parse::<u64>() {
        Ok(minutes) => minutes,
        // Some exports write whole numbers as "12.0"
        Err(_) => match trimmed.parse::<f64>() {
            Ok(value) if value < 0.0 => return Err(format!("negative duration: {value}")),
            Ok(value) if value.fract() == 0.0 && value <= MAX_DURATION_MINUTES as f64 => {
                value as u64
            }
            Ok(value) if value.is_finite() && value.fract() == 0.0 => {
                return Err(format!("duration {value} exceeds {MAX_DURATION_MINUTES} minutes"))
            }
            _ => return Err(format!("not a whole number: {cell:?}")),
        },
    };
    if minutes > MAX_DURATION_MINUTES {
        return Err(format!(
            "duration {minutes} exceeds {MAX_DURATION_MINUTES} minutes"
        ));
    }
    Ok(minutes)
}

/// Try each configured layout in order
pub fn parse_timestamp(cell: &str, formats: &[String]) -> Result<NaiveDateTime, String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return Err("empty timestamp".to_string());
    }
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("unrecognised timestamp: {cell:?}"))
}

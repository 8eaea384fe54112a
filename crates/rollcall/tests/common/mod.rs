#![allow(dead_code)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use rollcall_core::AttendanceRecord;

pub const HEADER: &str =
    "Name (Original Name),Join Time,Leave Time,Duration (Minutes),Guest,In Waiting Room";

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 3, 15)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

pub fn record(
    name: &str,
    join: NaiveDateTime,
    leave: NaiveDateTime,
    minutes: u64,
) -> AttendanceRecord {
    AttendanceRecord::new(name, join, leave, minutes)
}

/// Zoom-style export with the given data rows
pub fn csv_text(rows: &[&str]) -> String {
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

/// Write rows to `log.csv` in a fresh temp dir. Keep the dir alive.
pub fn write_log(rows: &[&str]) -> (tempfile::TempDir, PathBuf) {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("log.csv");
    std::fs::write(&path, csv_text(rows)).unwrap();
    (temp, path)
}

use std::path::Path;

use rollcall_core::{AttendanceLog, Config};

use super::load_log;

pub fn run(file: &Path, config: &Config) -> anyhow::Result<()> {
    let log = load_log(file, config)?;
    println!("{}", build_listing(&log));
    Ok(())
}

fn build_listing(log: &AttendanceLog) -> String {
    let mut lines = vec![format!("Attendance Log ({} records)", log.len())];
    lines.push("=".repeat(lines[0].len()));
    for record in log {
        lines.push(format!(
            "  {} | {} - {} | {} min{}",
            record.attendee_name,
            record.join_time.format("%Y-%m-%d %H:%M:%S"),
            record.leave_time.format("%H:%M:%S"),
            record.duration_minutes,
            if record.is_guest { " | guest" } else { "" },
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::AttendanceRecord;

    #[test]
    fn test_build_listing() {
        let at = |h, m| {
            chrono::NaiveDate::from_ymd_opt(2023, 3, 15)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap()
        };
        let log = AttendanceLog::new(vec![
            AttendanceRecord::new("Alice", at(10, 0), at(10, 5), 5).guest(true),
            AttendanceRecord::new("Bob", at(10, 2), at(10, 10), 8),
        ])
        .unwrap();

        let listing = build_listing(&log);
        assert!(listing.starts_with("Attendance Log (2 records)"));
        assert!(listing.contains("Alice | 2023-03-15 10:00:00 - 10:05:00 | 5 min | guest"));
        assert!(listing.contains("Bob | 2023-03-15 10:02:00 - 10:10:00 | 8 min"));
        assert!(!listing.contains("Bob | 2023-03-15 10:02:00 - 10:10:00 | 8 min | guest"));
    }
}

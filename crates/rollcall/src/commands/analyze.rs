use std::path::{Path, PathBuf};

use anyhow::Context;
use rollcall_core::{
    analyze_log, ranked, AnalysisRequest, AttendanceReport, AttendeeView, Config,
    SessionOverlayInput,
};
use rollcall_io::{atomic_write, read_json};

use super::load_log;

#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub attendee: Option<String>,
    pub sessions: Vec<SessionOverlayInput>,
    pub sessions_file: Option<PathBuf>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn run(file: &Path, options: AnalyzeOptions, config: &Config) -> anyhow::Result<()> {
    let mut overlays = options.sessions;
    if let Some(path) = &options.sessions_file {
        let from_file: Vec<SessionOverlayInput> = read_json(path)
            .with_context(|| format!("failed to read sessions {}", path.display()))?;
        overlays.extend(from_file);
    }

    let log = load_log(file, config)?;
    let request = AnalysisRequest {
        attendee: options.attendee,
        overlays,
    };
    let report = analyze_log(&log, &request, config)?;

    if let Some(output) = &options.output {
        let json = serde_json::to_vec_pretty(&report)?;
        atomic_write(output, &json)
            .with_context(|| format!("failed to write {}", output.display()))?;
        tracing::info!(path = %output.display(), "wrote report");
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", build_report(&report));
    }
    Ok(())
}

fn build_report(report: &AttendanceReport) -> String {
    let m = &report.metrics;
    let mut sections = Vec::new();

    // Section 1: Summary
    sections.push(format!(
        "Attendance Report\n=================\n\
         Maximum simultaneous attendees: {}{}\n\
         Total unique attendees: {} ({} guests)\n\
         Records: {}",
        m.max_concurrent,
        m.peak_time
            .map(|t| format!(" (first at {})", t.format("%H:%M")))
            .unwrap_or_default(),
        m.unique_attendees,
        m.unique_guests,
        m.record_count,
    ));

    // Section 2: Durations
    sections.push(format!(
        "\nDuration of Attendance\n----------------------\n\
         Mean: {}\nMedian: {}\nTotal: {} ({} hours)",
        m.mean_duration, m.median_duration, m.total_duration, m.total_hours
    ));

    // Section 3: Per-attendee view
    match &report.attendee {
        Some(AttendeeView::Found { name, census }) => sections.push(format!(
            "\nAttendee: {}\n----------\nPresent {} of {} sampled minutes, {} to {}",
            name,
            census.samples.iter().filter(|s| s.count > 0).count(),
            census.len(),
            census.start.format("%H:%M"),
            census.end.format("%H:%M"),
        )),
        Some(AttendeeView::NoData { name }) => sections.push(format!(
            "\nAttendee: {}\n----------\nNo data for this selection",
            name
        )),
        None => {}
    }

    // Section 4: Sessions
    if !report.overlays.is_empty() || !report.overlay_warnings.is_empty() {
        let mut lines: Vec<String> = report
            .overlays
            .iter()
            .map(|o| {
                let peak = report
                    .census
                    .samples
                    .iter()
                    .filter(|s| o.start <= s.timestamp && s.timestamp <= o.end)
                    .map(|s| s.count)
                    .max()
                    .unwrap_or(0);
                format!(
                    "  {}-{} {} (peak {})",
                    o.start.format("%H:%M"),
                    o.end.format("%H:%M"),
                    o.label,
                    peak
                )
            })
            .collect();
        lines.extend(
            report
                .overlay_warnings
                .iter()
                .map(|w| format!("  skipped row {}: {}", w.row, w.reason)),
        );
        sections.push(format!("\nSessions\n--------\n{}", lines.join("\n")));
    }

    // Section 5: Histogram
    if !report.histogram.is_empty() {
        let widest = report.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        let bars = report
            .histogram
            .iter()
            .map(|b| {
                let width = if widest > 0 { b.count * 30 / widest } else { 0 };
                format!(
                    "  {:>4}-{:<4} {:>3} {}",
                    b.lower,
                    b.upper,
                    b.count,
                    "#".repeat(width)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!(
            "\nTotal Minutes per Attendee\n--------------------------\n{}",
            bars
        ));
    }

    // Section 6: Leaderboard
    let leaderboard = ranked(&report.durations)
        .iter()
        .take(10)
        .map(|(name, total)| format!("  {}: {} minutes", name, total))
        .collect::<Vec<_>>()
        .join("\n");
    sections.push(format!(
        "\nLongest Attendance\n------------------\n{}",
        leaderboard
    ));

    sections.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::{AttendanceLog, AttendanceRecord};

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sample_report(request: &AnalysisRequest) -> AttendanceReport {
        let log = AttendanceLog::new(vec![
            AttendanceRecord::new("A", at(10, 0), at(10, 5), 5).guest(true),
            AttendanceRecord::new("B", at(10, 2), at(10, 10), 8).guest(true),
        ])
        .unwrap();
        analyze_log(&log, request, &Config::default()).unwrap()
    }

    #[test]
    fn test_build_report_has_sections() {
        let report = build_report(&sample_report(&AnalysisRequest::default()));
        assert!(report.contains("Attendance Report"));
        assert!(report.contains("Maximum simultaneous attendees: 2 (first at 10:02)"));
        assert!(report.contains("Total: 13 minutes"));
        assert!(report.contains("Longest Attendance"));
        assert!(!report.contains("Sessions"));
    }

    #[test]
    fn test_build_report_sessions_and_attendee() {
        let request = AnalysisRequest {
            attendee: Some("Z".to_string()),
            overlays: vec![
                SessionOverlayInput::new("10:00", "10:01", "Welcome"),
                SessionOverlayInput::new("oops", "10:01", "Broken"),
            ],
        };
        let report = build_report(&sample_report(&request));
        assert!(report.contains("10:00-10:01 Welcome (peak 1)"));
        assert!(report.contains("skipped row 2"));
        assert!(report.contains("No data for this selection"));
    }

    #[test]
    fn test_run_writes_output() {
        let temp = tempfile::TempDir::new().unwrap();
        let log_path = temp.path().join("log.csv");
        std::fs::write(
            &log_path,
            "Name (Original Name),Join Time,Leave Time,Duration (Minutes),Guest,In Waiting Room\n\
             A,2023-03-15 10:00:00,2023-03-15 10:05:00,5,Yes,No\n",
        )
        .unwrap();
        let out = temp.path().join("out").join("report.json");

        run(
            &log_path,
            AnalyzeOptions {
                output: Some(out.clone()),
                ..Default::default()
            },
            &Config::default(),
        )
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["metrics"]["unique_attendees"], 1);
    }
}

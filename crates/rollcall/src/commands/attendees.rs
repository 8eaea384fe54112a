use std::path::Path;

use rollcall_core::{format_duration, guest_summary, ranked, summarize, Config};

use super::load_log;

pub fn run(file: &Path, guests_only: bool, config: &Config) -> anyhow::Result<()> {
    let log = load_log(file, config)?;
    let summary = if guests_only {
        guest_summary(&log)
    } else {
        summarize(&log)
    };

    if summary.is_empty() {
        println!("No attendees");
        return Ok(());
    }

    println!("{}", build_table(&ranked(&summary)));
    Ok(())
}

fn build_table(entries: &[(&str, u64)]) -> String {
    let name_width = entries
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Attendee".len());

    let mut lines = vec![format!(
        "{:<width$}  {:>7}  Duration",
        "Attendee",
        "Minutes",
        width = name_width
    )];
    for (name, total) in entries {
        lines.push(format!(
            "{:<width$}  {:>7}  {}",
            name,
            total,
            format_duration(*total as f64),
            width = name_width
        ));
    }
    lines.join("\n")
}

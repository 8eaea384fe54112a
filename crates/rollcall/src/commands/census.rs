use std::path::Path;

use rollcall_core::{attendee_view, census, AttendeeView, Census, Config};

use super::load_log;

pub fn run(
    file: &Path,
    attendee: Option<&str>,
    csv: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let log = load_log(file, config)?;

    let series = match attendee {
        Some(name) => match attendee_view(&log, name, config)? {
            AttendeeView::Found { census, .. } => census,
            AttendeeView::NoData { name } => {
                println!("No data for {name}");
                return Ok(());
            }
        },
        None => census(&log, config.resolution_minutes)?,
    };

    print!("{}", render(&series, csv));
    Ok(())
}

fn render(census: &Census, csv: bool) -> String {
    let mut out = String::new();
    if csv {
        out.push_str("time,attendee_count\n");
        for sample in &census.samples {
            out.push_str(&format!(
                "{},{}\n",
                sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
                sample.count
            ));
        }
    } else {
        for sample in &census.samples {
            out.push_str(&format!(
                "{}  {:>4}\n",
                sample.timestamp.format("%Y-%m-%d %H:%M"),
                sample.count
            ));
        }
    }
    out
}

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use rollcall_core::{parse_overlay_arg, SessionOverlayInput};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(version)]
#[command(about = "Attendance analytics for meeting participant logs")]
pub struct Cli {
    /// Config file (JSON); defaults to the user config dir if present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary metrics, durations and occupancy for a log
    Analyze {
        /// Participant log (CSV)
        file: PathBuf,

        /// Also report occupancy for this attendee (exact name)
        #[arg(short, long)]
        attendee: Option<String>,

        /// Session overlay as START,END[,LABEL] (repeatable)
        #[arg(short, long = "session", value_parser = parse_session)]
        sessions: Vec<SessionOverlayInput>,

        /// JSON array of {start, end, label} overlays
        #[arg(long)]
        sessions_file: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the per-minute occupancy series
    Census {
        /// Participant log (CSV)
        file: PathBuf,

        /// Restrict to one attendee (exact name)
        #[arg(short, long)]
        attendee: Option<String>,

        /// Emit CSV instead of aligned text
        #[arg(long)]
        csv: bool,
    },

    /// List attendees by total time attended
    Attendees {
        /// Participant log (CSV)
        file: PathBuf,

        /// Only guests
        #[arg(long)]
        guests: bool,
    },

    /// Print the admitted attendance records
    Log {
        /// Participant log (CSV)
        file: PathBuf,
    },

    /// Print version information
    Version,
}

fn parse_session(arg: &str) -> Result<SessionOverlayInput, String> {
    parse_overlay_arg(arg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["rollcall", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_analyze() {
        let cli = Cli::try_parse_from([
            "rollcall",
            "analyze",
            "log.csv",
            "--attendee",
            "Alice",
            "-s",
            "10:00,10:30,Intro",
            "--session",
            "11:00,11:15",
            "--json",
        ])
        .unwrap();

        if let Commands::Analyze {
            file,
            attendee,
            sessions,
            json,
            output,
            ..
        } = cli.command
        {
            assert_eq!(file, PathBuf::from("log.csv"));
            assert_eq!(attendee, Some("Alice".to_string()));
            assert_eq!(sessions.len(), 2);
            assert_eq!(sessions[0].label, "Intro");
            assert!(json);
            assert!(output.is_none());
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_cli_rejects_bad_session() {
        let cli = Cli::try_parse_from(["rollcall", "analyze", "log.csv", "-s", "10:00"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "rollcall", "census", "log.csv", "--csv", "-vv", "--config", "c.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.command, Commands::Census { csv: true, .. }));
    }

    #[test]
    fn test_cli_parse_attendees_guests() {
        let cli = Cli::try_parse_from(["rollcall", "attendees", "log.csv", "--guests"]).unwrap();
        assert!(matches!(cli.command, Commands::Attendees { guests: true, .. }));
    }
}

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
            cli.verbose,
        ))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            file,
            attendee,
            sessions,
            sessions_file,
            json,
            output,
        } => commands::analyze::run(
            &file,
            commands::analyze::AnalyzeOptions {
                attendee,
                sessions,
                sessions_file,
                json,
                output,
            },
            &config,
        ),
        Commands::Census {
            file,
            attendee,
            csv,
        } => commands::census::run(&file, attendee.as_deref(), csv, &config),
        Commands::Attendees { file, guests } => commands::attendees::run(&file, guests, &config),
        Commands::Log { file } => commands::log::run(&file, &config),
        Commands::Version => commands::version::run(),
    }
}

/// `RUST_LOG` when set and valid, otherwise the `-v` level
fn log_filter(rust_log: Option<&str>, verbose: u8) -> EnvFilter {
    let from_env = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    if let Some(filter) = from_env {
        return filter;
    }
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    EnvFilter::new(level.as_str())
}

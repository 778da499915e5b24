//! EV charging booking console

mod commands;
mod context;
mod logging;
mod state_dir;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use commands::Commands;
use context::AppContext;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "evcharge")]
#[command(about = "Manage EV charging stations and bookings from the terminal")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Directory for credentials, configuration and logs
    #[arg(short = 'd', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Backend origin, overrides the configuration file
    #[arg(long, global = true, env = "EVCHARGE_BASE_URL")]
    base_url: Option<String>,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Timeout for commands in seconds (0 = no timeout)
    #[arg(short = 't', long, global = true, default_value = "30")]
    timeout: u64,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let state_dir = state_dir::resolve(cli.data_dir.clone());
    logging::init_logging(cli.log_level.into(), &state_dir, cli.no_file_log)?;
    debug!(state_dir = %state_dir.display(), "Starting evcharge");

    let ctx = AppContext::new(&state_dir, cli.config, cli.base_url)?;

    let result = if cli.timeout == 0 || cli.command.is_long_running() {
        cli.command.execute(ctx).await
    } else {
        let timeout = Duration::from_secs(cli.timeout);
        match tokio::time::timeout(timeout, cli.command.execute(ctx)).await {
            Ok(result) => result,
            Err(_) => {
                error!("Command timed out after {} seconds", cli.timeout);
                std::process::exit(1);
            }
        }
    };

    if let Err(e) = result {
        error!("Command failed: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use commands::{BookingCommands, SessionCommands, StationCommands};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "evcharge", "login", "--username", "nimal", "--password", "secret",
        ])
        .unwrap();
        match cli.command {
            Commands::Login { username, password } => {
                assert_eq!(username, "nimal");
                assert_eq!(password, "secret");
            }
            _ => panic!("expected login"),
        }
        assert_eq!(cli.timeout, 30);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "evcharge",
            "stations",
            "list",
            "--active",
            "--base-url",
            "https://charge.example.com",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("https://charge.example.com"));
        assert!(matches!(cli.log_level, LogLevel::Debug));
        assert!(matches!(
            cli.command,
            Commands::Stations {
                command: StationCommands::List { active: true }
            }
        ));
    }

    #[test]
    fn test_parse_booking_create() {
        let cli = Cli::try_parse_from([
            "evcharge",
            "bookings",
            "create",
            "--station",
            "st-1",
            "--start",
            "2030-02-01T08:00:00Z",
        ])
        .unwrap();
        match cli.command {
            Commands::Bookings {
                command:
                    BookingCommands::Create {
                        station,
                        start,
                        duration,
                        owner,
                    },
            } => {
                assert_eq!(station, "st-1");
                assert_eq!(start.to_rfc3339(), "2030-02-01T08:00:00+00:00");
                assert_eq!(duration, 60);
                assert!(owner.is_none());
            }
            _ => panic!("expected bookings create"),
        }
    }

    #[test]
    fn test_reject_unknown_status() {
        assert!(
            Cli::try_parse_from(["evcharge", "bookings", "list", "--status", "lost"]).is_err()
        );
    }

    #[test]
    fn test_keepalive_ignores_timeout() {
        let cli = Cli::try_parse_from(["evcharge", "session", "keepalive"]).unwrap();
        assert!(cli.command.is_long_running());
        assert!(matches!(
            cli.command,
            Commands::Session {
                command: SessionCommands::Keepalive
            }
        ));

        let cli = Cli::try_parse_from(["evcharge", "dashboard"]).unwrap();
        assert!(!cli.command.is_long_running());
    }
}

// ffm entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Run the command; errors end as one line on stderr and exit code 1

mod commands;
mod terminal;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use ffm_core::config;
use tracing::{error, info};

const LOG_FILE: &str = "ffm.log";

#[derive(Parser)]
#[command(name = "ffm")]
#[command(version)]
#[command(about = "Fantasy football league scraper: rosters, teams and free agents")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level for the log file (overrides RUST_LOG)
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    /// Directory holding config/ and defaults/ (default: current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List the teams in the league
    ListTeams {
        /// Saved league members page to read instead of the configured one
        #[arg(long)]
        input: Option<PathBuf>,

        /// Data source (default: league.source from config)
        #[arg(long)]
        source: Option<String>,
    },

    /// Show or export team rosters
    #[command(group(ArgGroup::new("selection").required(true).args(["teams", "all"])))]
    DumpTeams {
        /// Team ids to dump
        #[arg(short = 't', long = "team", num_args = 1..)]
        teams: Vec<String>,

        /// Dump every team in the league
        #[arg(short, long)]
        all: bool,

        /// Data source (default: league.source from config)
        #[arg(short, long)]
        source: Option<String>,

        /// CSV output path (rooted under the output directory unless absolute or ./ ../)
        #[arg(short, long)]
        output: Option<String>,

        /// Also write each roster to CSV
        #[arg(long)]
        csv: bool,

        /// Write all rosters to one CSV file (`.csv` is added to --output if missing)
        #[arg(long, requires = "all")]
        unified_csv: bool,
    },

    /// List free agents with optional filtering
    ListFreeAgents {
        /// Positions (QB, RB, WR, TE, K, D/ST), comma-separated
        #[arg(short, long)]
        position: Option<String>,

        /// Status substring (FA, WA, ...)
        #[arg(short, long)]
        status: Option<String>,

        /// Team abbreviations, comma-separated
        #[arg(short, long)]
        team: Option<String>,

        /// Show at most this many players
        #[arg(short, long)]
        limit: Option<usize>,

        /// Add ownership and trend columns
        #[arg(short, long)]
        verbose: bool,
    },

    /// Store a browser-exported session (storage state JSON) for live fetching
    ImportSession {
        /// Storage state file exported from the browser
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Relative config paths are taken from the config base directory.
pub(crate) fn rooted(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if base == Path::new(".") || path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let base = cli.config_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let loaded = config::load_config_in(&base);
    let log_dir = match &loaded {
        Ok(config) => rooted(&base, &config.paths.log_dir),
        Err(_) => rooted(&base, "logs"),
    };
    if let Err(e) = init_tracing(&log_dir, cli.log_level) {
        terminal::warn(&format!("logging disabled: {e:#}"));
    }
    info!("ffm starting up");

    let result = match loaded {
        Ok(config) => {
            info!(
                "config loaded: league={}, season={}, source={}, fetch={:?}",
                config.league.league_id,
                config.league.season(),
                config.league.source,
                config.fetch.mode
            );
            let app = commands::App::new(base, config);
            app.run(cli.command).await
        }
        Err(e) => Err(anyhow::Error::new(e).context("failed to load configuration")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            terminal::error(&format!("Error: {e:#}"));
            terminal::error(&format!("See {} for details", log_dir.join(LOG_FILE).display()));
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing to log to a file, keeping the terminal for results.
fn init_tracing(log_dir: &Path, level: Option<LogLevel>) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join(LOG_FILE))?;

    let filter = match level {
        Some(level) => {
            let l = level.as_str();
            EnvFilter::new(format!("ffm_core={l},ffm={l},warn"))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ffm_core=info,ffm=info,warn")),
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

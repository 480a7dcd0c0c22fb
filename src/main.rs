// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug};

use srtdigest::app_config::{Config, LogLevel};
use srtdigest::{Controller, RunOptions};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for srtdigest
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// srtdigest - SRT subtitle digests
///
/// Parses SRT subtitle files and prints duration, word count, a text preview
/// and optionally a JSON record with summary and key moments.
#[derive(Parser, Debug)]
#[command(name = "srtdigest")]
#[command(version)]
#[command(about = "Parse SRT subtitle files and summarize their content")]
#[command(long_about = "srtdigest parses SRT subtitle files and derives full text, word count, duration, summary and key moments.

EXAMPLES:
    srtdigest talk.srt                          # Print an overview
    srtdigest --json talk.srt                   # Also print the JSON record
    srtdigest --find-video talk.srt             # Report the matching video file
    srtdigest --max-words 50 --moments 3 --json talk.srt
    srtdigest --log-level debug subtitles/      # Process a whole directory
    srtdigest completions bash > srtdigest.bash # Generate bash completions

CONFIGURATION:
    Settings are read from srtdigest.json by default. You can specify a different
    file with --config-path. Missing files fall back to built-in defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Print the JSON record after the overview
    #[arg(long)]
    json: bool,

    /// Look for a video file with the same base name
    #[arg(long)]
    find_video: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "srtdigest.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Word budget for the JSON summary
    #[arg(long)]
    max_words: Option<usize>,

    /// Number of key moments in the JSON record
    #[arg(long)]
    moments: Option<usize>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌"),
            Level::Warn => ("1;33", "🚧"),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍"),
            Level::Trace => ("1;35", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger filters at Trace; log::set_max_level narrows it once the
    // config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtdigest", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli
        .input_path
        .clone()
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());
    debug!("Using configuration: {:?}", config);

    let controller = Controller::with_config(config).context("Configuration validation failed")?;
    let options = RunOptions {
        json: cli.json,
        find_video: cli.find_video,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    controller.run(&input_path, options, &mut out)?;
    out.flush()?;

    Ok(())
}

// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load(&cli.config_path)?;

    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    if let Some(max_words) = cli.max_words {
        config.summary_max_words = max_words;
    }
    if let Some(moments) = cli.moments {
        config.key_moments = moments;
    }

    Ok(config)
}

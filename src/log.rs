//! Program logging, built on `fern`.
//!
//! Messages up to `info` go to stdout and warnings and errors go to stderr, coloured when writing
//! to a terminal. When a run has an output folder, plain-text copies are also written to
//! `mgcost_info.log` and `mgcost_error.log` inside it.
use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::Arguments;
use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// A flag indicating whether the logger has been initialised
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the MGCOST_LOG_LEVEL
/// environment variable or the settings.toml file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable which overrides the log level from the settings file
const LOG_LEVEL_ENV_VAR: &str = "MGCOST_LOG_LEVEL";

/// The file name for the log file containing messages about the ordinary operation of the program
const LOG_INFO_FILE_NAME: &str = "mgcost_info.log";

/// The file name for the log file containing warnings and error messages
const LOG_ERROR_FILE_NAME: &str = "mgcost_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Convert a log level name to a [`LevelFilter`]
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Choose the log level, giving the environment variable precedence over the settings file
fn resolve_log_level(from_env: Option<&str>, from_settings: &str) -> Result<LevelFilter> {
    match from_env {
        Some(level) => parse_log_level(level)
            .with_context(|| format!("Invalid value for {LOG_LEVEL_ENV_VAR}")),
        None => parse_log_level(from_settings).context("Invalid log level in settings file"),
    }
}

/// Initialise the program logger.
///
/// Possible log levels are `off`, `error`, `warn`, `info`, `debug` (also shows the cost breakdown
/// of each component) and `trace`. The `MGCOST_LOG_LEVEL` environment variable takes precedence
/// over `log_level_from_settings`.
///
/// # Arguments
///
/// * `log_level_from_settings`: The log level specified in `settings.toml`
/// * `log_dir`: Folder in which to save log files, if any
pub fn init(log_level_from_settings: &str, log_dir: Option<&Path>) -> Result<()> {
    let from_env = env::var(LOG_LEVEL_ENV_VAR).ok();
    let log_level = resolve_log_level(from_env.as_deref(), log_level_from_settings)?;

    let mut dispatch = Dispatch::new().chain(console_dispatch(log_level));
    if let Some(log_dir) = log_dir {
        dispatch = dispatch.chain(file_dispatch(log_dir, log_level)?);
    }
    dispatch.apply()?;

    LOGGER_INIT.get_or_init(|| ());

    Ok(())
}

/// Logging to the terminal: ordinary messages to stdout, warnings and errors to stderr
fn console_dispatch(log_level: LevelFilter) -> Dispatch {
    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let stdout_colours = std::io::stdout().is_terminal().then_some(colours);
    let stderr_colours = std::io::stderr().is_terminal().then_some(colours);

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    format_record(out, message, record, stdout_colours.as_ref());
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    format_record(out, message, record, stderr_colours.as_ref());
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
}

/// Logging to files in `log_dir`.
///
/// The info file records at least `info` messages whatever the console level, so that a run can
/// always be inspected afterwards. The error file always records warnings and errors.
fn file_dispatch(log_dir: &Path, log_level: LevelFilter) -> Result<Dispatch> {
    let info_file = create_log_file(&log_dir.join(LOG_INFO_FILE_NAME))?;
    let error_file = create_log_file(&log_dir.join(LOG_ERROR_FILE_NAME))?;

    Ok(Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(|out, message, record| format_record(out, message, record, None))
                .level(log_level.max(LevelFilter::Info))
                .chain(info_file),
        )
        .chain(
            Dispatch::new()
                .format(|out, message, record| format_record(out, message, record, None))
                .level(LevelFilter::Warn)
                .chain(error_file),
        ))
}

/// Create an empty log file, replacing any previous one
fn create_log_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .with_context(|| format!("Could not create log file {}", file_path.display()))
}

/// Format a log message as `[time level target] message`, colouring the level if requested
fn format_record(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colours: Option<&ColoredLevelConfig>,
) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = record.target();
    match colours {
        Some(colours) => {
            let level = colours.color(record.level());
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
        None => {
            let level = record.level();
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
    }
}

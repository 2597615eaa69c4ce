//! Logging setup for tally binaries and tests.
//!
//! Logs always go to a file, at `warn` unless a filter is set in the environment. Stderr
//! logging is added when `TALLY_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`TALLY_LOG`** (highest priority) - a bare level such as `debug` applies to every
//!    tally crate; anything with directive syntax is used as-is
//! 2. **`RUST_LOG`** - standard tracing filter
//! 3. **Default** - `warn` globally, `info` for tally crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/tally/logs/tally-<pid>.log`
//! - macOS: `~/Library/Application Support/tally/logs/tally-12345.log`
//! - Linux: `~/.local/share/tally/logs/tally-12345.log`
//!
//! Override with `--log-file <path>` or `TALLY_LOG_FILE`.

use std::{
    env,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const TALLY_CRATES: &[&str] = &["tally_lines", "tally_bin"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default, Clone)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Dropping the returned [`LogGuard`] flushes and stops the background file writer.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(file_filter());

    let stderr_layer = stderr_enabled().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter())
    });

    Registry::default()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize console logging for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn test() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}

fn stderr_enabled() -> bool {
    env::var_os("TALLY_LOG").is_some()
        || env::var_os("RUST_LOG").is_some()
        || cfg!(debug_assertions)
}

/// Split an override into `(directory, file name)`.
///
/// A path with an extension names the file itself; anything else is a directory that
/// receives the default per-process file name.
fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("tally-{}.log", std::process::id());

    match override_path {
        Some(path) if path.extension().is_some() => {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            (dir, name)
        },
        Some(dir) => (dir, filename),
        None => {
            let dir = dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tally")
                .join("logs");
            (dir, filename)
        },
    }
}

/// File filter: the environment's filter if one is set, otherwise `warn`.
fn file_filter() -> EnvFilter {
    if env::var_os("TALLY_LOG").is_some() || env::var_os("RUST_LOG").is_some() {
        return env_filter();
    }
    EnvFilter::new("warn")
}

fn env_filter() -> EnvFilter {
    let tally_log = env::var("TALLY_LOG").ok();
    let rust_log = env::var("RUST_LOG").ok();
    EnvFilter::new(filter_directives(tally_log.as_deref(), rust_log.as_deref()))
}

/// Resolve the filter string from `TALLY_LOG` and `RUST_LOG` values.
fn filter_directives(tally_log: Option<&str>, rust_log: Option<&str>) -> String {
    match (tally_log, rust_log) {
        (Some(tally_log), _) => expand_tally_log(tally_log),
        (None, Some(rust_log)) => rust_log.to_owned(),
        (None, None) => crate_directives("info"),
    }
}

/// `TALLY_LOG=debug` becomes `warn,tally_lines=debug,tally_bin=debug`, while
/// `TALLY_LOG=tally_lines=trace` passes through untouched.
fn expand_tally_log(tally_log: &str) -> String {
    if tally_log.contains(['=', ':', ',']) {
        return tally_log.to_owned();
    }
    crate_directives(tally_log)
}

fn crate_directives(level: &str) -> String {
    TALLY_CRATES
        .iter()
        .fold(String::from("warn"), |mut directives, krate| {
            directives.push(',');
            directives.push_str(krate);
            directives.push('=');
            directives.push_str(level);
            directives
        })
}

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Environment variable consulted when no `--log-level` is given
pub const LOG_ENV: &str = "BOARDVIEW_LOG";

/// Filter used when neither the flag nor the environment sets one
pub const DEFAULT_FILTER: &str = "info";

/// Error type for logging setup
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?} from {origin}: {source}")]
    Filter {
        filter: String,
        origin: &'static str,
        source: ParseError,
    },
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not install logger: {0}")]
    Install(String),
}

/// Build the filter with precedence: CLI flag > BOARDVIEW_LOG > "info".
/// A filter that does not parse is an error, wherever it came from.
pub fn build_env_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let env = std::env::var(LOG_ENV).ok();
    select_filter(level, env.as_deref())
}

fn select_filter(flag: Option<&str>, env: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let (filter, origin) = match (flag, env) {
        (Some(flag), _) => (flag, "--log-level"),
        (None, Some(env)) if !env.trim().is_empty() => (env, LOG_ENV),
        _ => (DEFAULT_FILTER, "default"),
    };
    EnvFilter::try_new(filter).map_err(|source| LoggingError::Filter {
        filter: filter.to_string(),
        origin,
        source,
    })
}

/// Send tracing output to `path` (appending). The terminal belongs to the
/// UI, so nothing is logged unless a file is given.
pub fn init_file_logging(path: &Path, level: Option<&str>) -> Result<(), LoggingError> {
    let filter = build_env_filter(level)?;
    let open_err = |source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(open_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}

use anyhow::{anyhow, Context};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding `tracing` filter directives; takes precedence
/// over the configured level
const LOG_FILTER_ENV: &str = "ORDERCAL_LOG";

/// Install a `tracing` subscriber that appends to the file at `path`.  The
/// terminal belongs to the calendar, so nothing is logged to stderr.
pub(crate) fn init(path: &Path, default_level: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = filter(env::var(LOG_FILTER_ENV).ok().as_deref(), default_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("install log subscriber: {e}"))
}

fn filter(directives: Option<&str>, default_level: &str) -> anyhow::Result<EnvFilter> {
    match directives {
        Some(d) => {
            EnvFilter::try_new(d).with_context(|| format!("invalid {LOG_FILTER_ENV} value {d:?}"))
        }
        None => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level {default_level:?}")),
    }
}

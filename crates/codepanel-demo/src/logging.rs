#![forbid(unsafe_code)]

//! File logging for the demo.
//!
//! The terminal belongs to the renderer, so tracing output only goes to the
//! file named by `CODEPANEL_LOG_FILE`. Without it no subscriber is installed.

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FILE: &str = "CODEPANEL_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "CODEPANEL_LOG";

const DEFAULT_FILTER: &str = "debug";

/// Install a file subscriber if `CODEPANEL_LOG_FILE` is set.
///
/// Returns the log path when logging was enabled.
pub fn init() -> io::Result<Option<PathBuf>> {
    let Some(path) = env::var_os(ENV_LOG_FILE).map(PathBuf::from) else {
        return Ok(None);
    };
    let file = File::create(&path)?;
    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(Some(path))
}

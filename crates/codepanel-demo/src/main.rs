#![forbid(unsafe_code)]

//! codepanel demo binary entry point.

mod app;
mod cli;
mod logging;
mod session;
mod view;

use std::fs;
use std::io;
use std::path::Path;
use std::process;

use codepanel_runtime::{CodePanel, TypingConfig};
use web_time::Instant;

const BUNDLED_SOURCE: &str = include_str!("../assets/about_me.py");
const BUNDLED_OUTPUT: &str = include_str!("../assets/about_me.txt");

fn load(path: Option<&Path>, bundled: &str) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => Ok(bundled.to_owned()),
    }
}

fn run(opts: cli::Opts) -> io::Result<()> {
    let source = load(opts.source.as_deref(), BUNDLED_SOURCE)?;
    let output = load(opts.output.as_deref(), BUNDLED_OUTPUT)?;

    let parsed = TypingConfig::from_env_with_diagnostics();
    for error in &parsed.errors {
        eprintln!("warning: ignoring {error}");
    }
    let config = parsed.config;
    if let Err(errors) = config.validate() {
        let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid configuration: {}", joined.join(", ")),
        ));
    }
    tracing::info!(config = %config.summary_short(), "starting demo");

    let panel = CodePanel::new(&source, output.trim_end_matches('\n'), &config)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let text = panel.highlighter().source();
    tracing::info!(
        lines = text.line_count(),
        chars = text.len(),
        bytes = text.byte_len(),
        "source loaded"
    );

    let session = session::TerminalSession::new()?;
    let app = app::App::new(panel, config.theme, opts.exit_after_ms, Instant::now())
        .with_accent(opts.accent);
    app::run(app, &session)
}

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init() {
        eprintln!("warning: file logging disabled: {e}");
    }

    if let Err(e) = run(opts) {
        eprintln!("codepanel-demo: {e}");
        process::exit(1);
    }
}

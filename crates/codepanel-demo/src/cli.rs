#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args by hand. Panel timing comes from `CODEPANEL_*` variables (see
//! `codepanel_runtime::config`); this module only covers what the binary
//! itself needs.

use std::env;
use std::path::PathBuf;
use std::process;

use codepanel_text::Rgb;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
codepanel-demo: types out a highlighted code panel, then runs it

USAGE:
    codepanel-demo [OPTIONS]

OPTIONS:
    --source=PATH        Source file to type out (default: bundled about_me.py)
    --output=PATH        Text shown after Run (default: bundled output)
    --exit-after-ms=N    Quit automatically after N milliseconds
    --accent=#RRGGBB     Background color of the Skip/Run button
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Space / Enter   Skip while typing, Run once revealed
    s               Skip
    r               Run
    x / +           Cycle speed (1x, 2x, 3x, 4x)
    Tab             Toggle code/output tab (output unlocks after Run)
    1 / 2           Code tab / output tab
    t               Toggle dark/light theme
    q / Esc / Ctrl+C  Quit

ENVIRONMENT VARIABLES:
    CODEPANEL_TYPING_MS       Delay per character at 1x (default: 30)
    CODEPANEL_LEAD_IN_MS      Pause before the first character (default: 500)
    CODEPANEL_LANGUAGE        Status bar language label (default: python)
    CODEPANEL_THEME           dark | light (default: dark)
    CODEPANEL_SPEED           Initial speed 1-4 (default: 1)
    CODEPANEL_LOG_FILE        Write tracing output to this file
    CODEPANEL_LOG             tracing filter directives (default: debug)
    CODEPANEL_EXIT_AFTER_MS   Same as --exit-after-ms";

/// Parsed command-line options.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Opts {
    /// Source file; the bundled program when absent.
    pub source: Option<PathBuf>,
    /// Output file; the bundled output when absent.
    pub output: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Button color overriding the theme's.
    pub accent: Option<Rgb>,
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Explicit flags override the environment.
    pub fn parse() -> Self {
        let mut opts = Self::default();
        if let Ok(val) = env::var("CODEPANEL_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        match opts.apply_args(env::args().skip(1)) {
            Ok(Some(message)) => {
                println!("{message}");
                process::exit(0);
            }
            Ok(None) => opts,
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Apply arguments. `Ok(Some(text))` means print `text` and stop.
    fn apply_args<I>(&mut self, args: I) -> Result<Option<String>, String>
    where
        I: IntoIterator<Item = String>,
    {
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Some(HELP_TEXT.to_owned())),
                "--version" | "-V" => return Ok(Some(format!("codepanel-demo {VERSION}"))),
                other => {
                    if let Some(path) = other.strip_prefix("--source=") {
                        self.source = Some(PathBuf::from(path));
                    } else if let Some(path) = other.strip_prefix("--output=") {
                        self.output = Some(PathBuf::from(path));
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        self.exit_after_ms = val
                            .parse()
                            .map_err(|_| format!("Invalid --exit-after-ms value: {val}"))?;
                    } else if let Some(val) = other.strip_prefix("--accent=") {
                        let color = Rgb::from_hex(val)
                            .ok_or_else(|| format!("Invalid --accent color: {val}"))?;
                        self.accent = Some(color);
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }
        Ok(None)
    }
}

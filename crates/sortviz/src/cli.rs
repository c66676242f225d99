#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `SORTVIZ_*` prefix.

use std::env;
use std::fmt;
use std::process;
use std::time::Duration;

use sortviz_core::config::{DEFAULT_LEN, DEFAULT_STEP_DELAY};
use sortviz_core::{Algorithm, ParseAlgorithmError, VisualizerConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
sortviz: watch sorting algorithms rearrange an array, one step at a time

USAGE:
    sortviz [OPTIONS]

OPTIONS:
    --algorithm=NAME     Preselect an algorithm (name or short name)
    --len=N              Number of bars (default: 70, max: 4096)
    --delay-ms=N         Pause after each step in ms (default: 10)
    --seed=N             Seed the shuffle generator for repeatable arrays
    --autostart          Start the preselected algorithm immediately
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

ALGORITHMS:
    1  Bubble Sort        bubble
    2  Insertion Sort     insertion
    3  Merge Sort         merge
    4  Quick Sort         quick
    5  Heap Sort          heap

KEYBINDINGS:
    Left / Right, Tab    Change the selected algorithm
    1-5                  Select an algorithm directly
    Enter / s            Start sorting (restarts a running sort)
    r                    Shuffle the array (stops a running sort)
    c                    Cancel the running sort
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    SORTVIZ_ALGORITHM        Override --algorithm
    SORTVIZ_LEN              Override --len
    SORTVIZ_DELAY_MS         Override --delay-ms
    SORTVIZ_SEED             Override --seed
    SORTVIZ_EXIT_AFTER_MS    Override --exit-after-ms
    SORTVIZ_LOG              Log filter, e.g. 'debug' (logging is off when unset)
    SORTVIZ_LOG_FILE         Log destination (default: sortviz.log)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Algorithm selected at launch.
    pub algorithm: Option<Algorithm>,
    /// Number of bars.
    pub len: usize,
    /// Pause after each step, in milliseconds.
    pub delay_ms: u64,
    /// Shuffle seed.
    pub seed: Option<u64>,
    /// Start the selected algorithm immediately.
    pub autostart: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            algorithm: None,
            len: DEFAULT_LEN,
            delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
            seed: None,
            autostart: false,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A rejected command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A flag value did not parse.
    InvalidValue { flag: &'static str, value: String },
    /// `--algorithm` named nothing known.
    Algorithm(ParseAlgorithmError),
    /// An argument that is not a known flag.
    Unknown(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidValue { flag, value } => write!(f, "invalid {flag} value: {value}"),
            CliError::Algorithm(err) => write!(f, "{err}"),
            CliError::Unknown(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("sortviz {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags. Unparseable environment
    /// values are ignored.
    pub fn parse_from<F>(args: &[String], var: F) -> Result<Command, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("SORTVIZ_ALGORITHM")
            && let Ok(algorithm) = val.parse()
        {
            opts.algorithm = Some(algorithm);
        }
        if let Some(val) = var("SORTVIZ_LEN")
            && let Ok(n) = val.parse()
        {
            opts.len = n;
        }
        if let Some(val) = var("SORTVIZ_DELAY_MS")
            && let Ok(n) = val.parse()
        {
            opts.delay_ms = n;
        }
        if let Some(val) = var("SORTVIZ_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = Some(n);
        }
        if let Some(val) = var("SORTVIZ_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--autostart" => opts.autostart = true,
                other => {
                    if let Some(val) = other.strip_prefix("--algorithm=") {
                        opts.algorithm = Some(val.parse().map_err(CliError::Algorithm)?);
                    } else if let Some(val) = other.strip_prefix("--len=") {
                        opts.len = parse_value("--len", val)?;
                    } else if let Some(val) = other.strip_prefix("--delay-ms=") {
                        opts.delay_ms = parse_value("--delay-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_value("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_value("--exit-after-ms", val)?;
                    } else {
                        return Err(CliError::Unknown(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// The visualizer configuration these options describe.
    pub fn config(&self) -> VisualizerConfig {
        VisualizerConfig {
            len: self.len,
            step_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
            ..VisualizerConfig::default()
        }
    }

    /// Auto-exit deadline, if any.
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}

fn parse_value<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

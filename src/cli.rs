//! Command-line argument parsing

use std::path::PathBuf;
use thiserror::Error;

/// Argument errors reported before any log is read
#[derive(Debug, PartialEq, Error)]
pub enum CliError {
    #[error("missing command")]
    MissingCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid lag: {0}")]
    InvalidLag(String),

    #[error("no log files given")]
    NoFiles,

    #[error("autocorrelation takes exactly one log file, got {0}")]
    TooManyFiles(usize),
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// One summary row per log file
    Stats { files: Vec<PathBuf> },
    /// Autocorrelation table for a single log file
    Autocorrelation { file: PathBuf },
    Help,
    Version,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
    /// Emit JSON instead of text tables
    pub json: bool,
    /// Config file to load
    pub config: Option<PathBuf>,
    /// Overrides the configured lag span
    pub max_lag: Option<u32>,
}

impl Args {
    /// Parse arguments, excluding the program name
    ///
    /// # Example
    /// ```
    /// use pinganalyzer::cli::{Args, Command};
    ///
    /// let args = Args::parse(["stats", "--json", "a.txt"]).unwrap();
    /// assert!(args.json);
    /// assert_eq!(args.command, Command::Stats { files: vec!["a.txt".into()] });
    /// ```
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let command = match args.next() {
            None => return Err(CliError::MissingCommand),
            Some(cmd) => cmd,
        };

        let mut parsed = Args {
            command: Command::Help,
            json: false,
            config: None,
            max_lag: None,
        };

        match command.as_str() {
            "--help" | "-h" | "help" => return Ok(parsed),
            "--version" | "-v" => {
                parsed.command = Command::Version;
                return Ok(parsed);
            }
            "stats" | "autocorrelation" => {}
            other => return Err(CliError::UnknownCommand(other.to_string())),
        }

        let mut files = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" | "-j" => parsed.json = true,
                "--config" | "-c" => {
                    let value = args.next().ok_or(CliError::MissingValue("--config"))?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--max-lag" | "-k" => {
                    let value = args.next().ok_or(CliError::MissingValue("--max-lag"))?;
                    let lag = value.parse().map_err(|_| CliError::InvalidLag(value))?;
                    parsed.max_lag = Some(lag);
                }
                "--help" | "-h" => return Ok(parsed),
                a if a.starts_with('-') => return Err(CliError::UnknownArgument(a.to_string())),
                _ => files.push(PathBuf::from(arg)),
            }
        }

        parsed.command = match command.as_str() {
            "stats" => {
                if files.is_empty() {
                    return Err(CliError::NoFiles);
                }
                Command::Stats { files }
            }
            _ => match files.len() {
                0 => return Err(CliError::NoFiles),
                1 => Command::Autocorrelation {
                    file: files.remove(0),
                },
                n => return Err(CliError::TooManyFiles(n)),
            },
        };

        Ok(parsed)
    }
}

//! Command-line configuration, parsed by hand from `std::env::args()`.

use std::path::PathBuf;

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(ReplConfig),
    Help,
}

/// Options for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplConfig {
    /// Recursion limit; `None` uses the interpreter default.
    pub max_depth: Option<usize>,
    /// Print the call backtrace under runtime errors.
    pub backtrace: bool,
    /// Show parse errors as annotated source reports instead of one line.
    pub pretty: bool,
    /// Evaluate this file line by line instead of reading stdin.
    pub file: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("`--max-depth` expects a positive integer, got `{0}`")]
    InvalidDepth(String),
    #[error("unexpected argument `{0}`: only one file can be given")]
    ExtraArgument(String),
}

pub const USAGE: &str = "\
Usage: lispy [FILE] [options]

Without FILE, starts an interactive session. Type `quit` or `exit` to leave.

Options:
  --max-depth=<n>   Maximum nested function calls (default 10000)
  --backtrace       Show the call backtrace with runtime errors
  --pretty          Show parse errors as annotated source reports
  -h, --help        Print this message";

/// Parse arguments, not including the program name.
pub fn parse_args<I>(args: I) -> Result<Command, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = ReplConfig::default();

    for arg in args {
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        } else if arg == "--backtrace" {
            config.backtrace = true;
        } else if arg == "--pretty" {
            config.pretty = true;
        } else if let Some(value) = arg.strip_prefix("--max-depth=") {
            match value.parse::<usize>() {
                Ok(depth) if depth > 0 => config.max_depth = Some(depth),
                _ => return Err(ConfigError::InvalidDepth(value.to_string())),
            }
        } else if arg.starts_with('-') {
            return Err(ConfigError::UnknownOption(arg));
        } else if config.file.is_none() {
            config.file = Some(PathBuf::from(arg));
        } else {
            return Err(ConfigError::ExtraArgument(arg));
        }
    }

    Ok(Command::Run(config))
}

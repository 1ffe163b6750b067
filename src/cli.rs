//! Command-line argument parsing.

use std::path::PathBuf;

pub const DEFAULT_ASSETS_DIR: &str = "assets";

pub const USAGE: &str = "\
Hurdle - jump over the pipes

Usage: hurdle [options]

Options:
  --assets <dir>   Asset directory (default: ./assets)
  --config <file>  JSON file overriding the game constants
  --log <file>     Write logs to <file> (filter with RUST_LOG)
  --seed <n>       Seed obstacle spawning for a reproducible run
  --version, -v    Show version information
  --help, -h       Show this help message";

/// Options for a normal run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub assets_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            config_path: None,
            log_path: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliOptions),
    Version,
    Help,
}

/// Parse the arguments after the program name. `--version` and `--help`
/// win as soon as they are seen.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--assets" => options.assets_dir = PathBuf::from(value_for(&arg, args.next())?),
            "--config" => options.config_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--log" => options.log_path = Some(PathBuf::from(value_for(&arg, args.next())?)),
            "--seed" => {
                let value = value_for(&arg, args.next())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Run(options))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{} needs a value", flag))
}

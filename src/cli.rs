//! Command-line surface.

use crate::logging::DEFAULT_LEVEL;
use argh::{EarlyExit, FromArgs};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(FromArgs, Debug, PartialEq)]
/// Run a source file with the compiler or interpreter that matches its extension.
pub struct Cli {
    #[argh(switch, short = 'v')]
    /// print version information and exit.
    pub version: bool,

    #[argh(option)]
    /// directory for compiled C/C++ binaries; defaults to $POLYRUN_TEMP_DIR, then the platform temp directory.
    pub temp_dir: Option<PathBuf>,

    #[argh(option, default = "DEFAULT_LEVEL.to_string()")]
    /// log level used when POLYRUN_LOG is unset (error, warn, info, debug, trace).
    pub log_level: String,

    #[argh(positional, greedy)]
    /// source file to run, followed by arguments passed to the program.
    pub command: Vec<String>,
}

/// What the binary should do after parsing.
#[derive(Debug, PartialEq)]
pub enum Action {
    /// Print the text and exit successfully.
    Help(String),
    Version,
    Run {
        args: Vec<OsString>,
        temp_dir: Option<PathBuf>,
        log_level: String,
    },
}

/// Options that consume the following argument.
const VALUE_OPTIONS: &[&str] = &["--temp-dir", "--log-level"];

/// Parse the arguments that follow the program name.
///
/// `-h` before the source file is treated as `--help`. Once the source file is seen,
/// everything after it belongs to the program being run and is returned byte for byte,
/// even when it isn't valid Unicode.
pub fn parse(program: &str, args: &[OsString]) -> Result<Action, EarlyExit> {
    let lossy: Vec<String> = args
        .iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let normalized = normalize_help(&lossy);
    let refs: Vec<&str> = normalized.iter().map(String::as_str).collect();
    let cli = Cli::from_args(&[program], &refs)?;

    if cli.version {
        return Ok(Action::Version);
    }
    if cli.command.is_empty() {
        return Ok(Action::Help(usage(program)));
    }

    // The greedy positional always takes the tail of the argument list.
    let (options, command) = args.split_at(args.len() - cli.command.len());
    let temp_dir = raw_option_value(options, "--temp-dir")
        .map(PathBuf::from)
        .or(cli.temp_dir);
    Ok(Action::Run {
        args: command.to_vec(),
        temp_dir,
        log_level: cli.log_level,
    })
}

fn raw_option_value(options: &[OsString], name: &str) -> Option<OsString> {
    options
        .windows(2)
        .rev()
        .find(|pair| pair[0] == name)
        .map(|pair| pair[1].clone())
}

fn normalize_help(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" => out.push("--help".to_string()),
            "--" => {
                out.push(arg.clone());
                break;
            }
            option if VALUE_OPTIONS.contains(&option) => {
                out.push(arg.clone());
                out.extend(iter.next().cloned());
            }
            flag if flag.starts_with('-') => out.push(arg.clone()),
            _ => {
                out.push(arg.clone());
                break;
            }
        }
    }
    out.extend(iter.cloned());
    out
}

/// Usage text, as printed for `--help`.
pub fn usage(program: &str) -> String {
    match Cli::from_args(&[program], &["--help"]) {
        Err(EarlyExit { output, .. }) => output,
        Ok(_) => String::new(),
    }
}

/// `<name> <semver> (<commit> <build date>)`.
pub fn version() -> String {
    format!(
        "{} {} ({} {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        option_env!("POLYRUN_BUILD_COMMIT").unwrap_or("unknown"),
        option_env!("POLYRUN_BUILD_DATE").unwrap_or("unknown"),
    )
}

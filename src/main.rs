use anyhow::Result;
use polyrun::cli::{self, Action};
use polyrun::command::ExitCode;
use polyrun::env::Environment;
use polyrun::{Config, Dispatcher, SystemLauncher, logging};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

fn main() {
    let argv: Vec<OsString> = std::env::args_os().collect();
    let program = argv
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    let rest = argv.get(1..).unwrap_or_default();

    let code = match cli::parse(&program, rest) {
        Ok(Action::Help(usage)) => {
            print!("{usage}");
            0
        }
        Ok(Action::Version) => {
            println!("{}", cli::version());
            0
        }
        Ok(Action::Run {
            args,
            temp_dir,
            log_level,
        }) => run(&args, temp_dir, &log_level).unwrap_or_else(|e| {
            eprintln!("{program}: {e:#}");
            1
        }),
        Err(early) => {
            if early.status.is_ok() {
                print!("{}", early.output);
                0
            } else {
                eprint!("{}", early.output);
                1
            }
        }
    };
    std::process::exit(code);
}

fn run(args: &[OsString], temp_dir: Option<PathBuf>, log_level: &str) -> Result<ExitCode> {
    logging::init(log_level)?;

    let env = Environment::new();
    let config = Config::resolve(&env, temp_dir);
    debug!(temp_dir = %config.temp_dir.display(), "resolved configuration");

    let mut launcher = SystemLauncher::new(env);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let code = Dispatcher::new(&mut launcher, &config, &mut stdout, &mut stderr).dispatch(args);
    Ok(code)
}

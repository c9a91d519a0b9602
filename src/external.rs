use crate::command::{ExitCode, Invocation, Launcher, OutputMode, ProcessOutput};
use crate::env::Environment;
use crate::error::RunError;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

/// Launches real processes, resolving programs against the snapshot's `PATH`.
pub struct SystemLauncher {
    env: Environment,
}

impl SystemLauncher {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// Locate `program` the way the launcher will before spawning it.
    pub fn resolve(&self, program: &OsStr) -> Option<PathBuf> {
        let search_paths = self.env.get_var("PATH").unwrap_or_default();
        find_command_path(search_paths, Path::new(program)).map(Cow::into_owned)
    }

    fn command(&self, executable: &Path, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(executable);
        cmd.args(&invocation.args)
            .env_clear()
            .envs(self.env.vars.iter())
            .current_dir(&self.env.current_dir);
        cmd
    }
}

impl Launcher for SystemLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<ProcessOutput, RunError> {
        let program = invocation.program_name();
        let executable = self
            .resolve(&invocation.program)
            .ok_or_else(|| RunError::CommandNotFound(program.clone()))?;
        debug!(
            program = %program,
            executable = %executable.display(),
            mode = ?invocation.mode,
            "launching"
        );

        let mut cmd = self.command(&executable, invocation);
        let spawn_err = |source: std::io::Error| RunError::Spawn {
            program: program.clone(),
            source,
        };
        let output = match invocation.mode {
            OutputMode::Streamed => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_err)?;
                ProcessOutput {
                    status: exit_code(status),
                    ..ProcessOutput::default()
                }
            }
            OutputMode::Captured => {
                let out = cmd.stdin(Stdio::null()).output().map_err(spawn_err)?;
                ProcessOutput {
                    status: exit_code(out.status),
                    stdout: out.stdout,
                    stderr: out.stderr,
                }
            }
        };
        debug!(program = %program, status = output.status, "finished");
        Ok(output)
    }
}

fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(x) => x,
        None => terminated_by_signal(status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// - Absolute path: returned if it exists.
/// - Relative with multiple components (e.g. `bin/sh`): returned if it exists.
/// - `./foo` on Unix, or any existing relative path elsewhere: returned as is.
/// - Single component: each directory in `search_paths` is tried in order.
/// - Empty path: `None`.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && path.exists() {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    match (components.next(), components.next()) {
        (None, None) => None,
        (Some(x), None) => find_in_path(search_paths, x.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(cmd))
        .find_map(|path| find_by_path(&path).map(Path::to_path_buf))
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if path.is_file() { Some(path) } else { None }
}

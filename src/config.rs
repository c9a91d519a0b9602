//! Run-time settings derived from the command line and the environment.

use crate::env::Environment;
use crate::language::strip_os_extension;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Environment variable that overrides where native binaries are written.
pub const TEMP_DIR_VAR: &str = "POLYRUN_TEMP_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory that receives compiled C/C++ binaries.
    pub temp_dir: PathBuf,
}

impl Config {
    /// Pick settings in order: explicit flag, `POLYRUN_TEMP_DIR`, platform default.
    pub fn resolve(env: &Environment, temp_dir: Option<PathBuf>) -> Self {
        let temp_dir = temp_dir
            .or_else(|| env.get_var(TEMP_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(|| default_temp_dir(env));
        Self { temp_dir }
    }

    /// Where the compiled binary for `source` goes.
    pub fn binary_path(&self, source: impl AsRef<OsStr>) -> PathBuf {
        let stem = strip_os_extension(source.as_ref());
        let mut name = Path::new(&stem)
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from("a.out"));
        if cfg!(windows) {
            name.push(".exe");
        }
        self.temp_dir.join(name)
    }
}

#[cfg(windows)]
fn default_temp_dir(env: &Environment) -> PathBuf {
    env.get_var("TEMP")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(not(windows))]
fn default_temp_dir(_env: &Environment) -> PathBuf {
    PathBuf::from("/tmp")
}

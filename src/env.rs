use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Snapshot of the process environment that launched programs inherit.
///
/// - `vars`: environment variables passed to every child, and consulted for `PATH`
///   lookups and configuration. Values are kept as raw OS strings so nothing is lost
///   or rejected on the way to the child.
/// - `current_dir`: working directory for every child.
#[derive(Debug, Clone)]
pub struct Environment {
    pub vars: HashMap<OsString, OsString>,
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn new() -> Self {
        let vars = stdenv::vars_os().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// Get the value of an environment variable from the snapshot.
    pub fn get_var(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

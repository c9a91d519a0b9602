//! End-to-end runs of the binary against shell-script stand-ins for real toolchains.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch project directory plus a `bin/` directory that becomes the whole `PATH`.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        fs::create_dir(root.path().join("bin")).expect("bin dir");
        fs::create_dir(root.path().join("work")).expect("work dir");
        fs::create_dir(root.path().join("tmp")).expect("tmp dir");
        Self { root }
    }

    fn work(&self) -> PathBuf {
        self.root.path().join("work")
    }

    fn tmp(&self) -> PathBuf {
        self.root.path().join("tmp")
    }

    fn tool(&self, name: &str, body: &str) -> &Self {
        let path = self.root.path().join("bin").join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        self
    }

    fn source(&self, name: &str) -> &Self {
        fs::write(self.work().join(name), "").expect("write source");
        self
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("polyrun").expect("binary");
        cmd.current_dir(self.work())
            .env("PATH", self.root.path().join("bin"))
            .env_remove("POLYRUN_LOG")
            .env_remove("POLYRUN_TEMP_DIR");
        cmd
    }
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).expect("read_dir").next().is_none()
}

#[test]
fn python_output_is_relayed() {
    let sb = Sandbox::new();
    sb.tool("python3", "echo hi").source("hello.py");

    sb.cmd()
        .arg("hello.py")
        .assert()
        .success()
        .stdout(predicate::str::contains("hi"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn program_arguments_reach_the_interpreter() {
    let sb = Sandbox::new();
    sb.tool("python3", "echo \"$@\"").source("hello.py");

    sb.cmd()
        .args(["hello.py", "a", "-v", "--help"])
        .assert()
        .success()
        .stdout("hello.py a -v --help\n");
}

#[test]
fn stdin_is_forwarded_to_the_program() {
    let sb = Sandbox::new();
    sb.tool("ruby", "read line; echo \"got $line\"").source("ask.rb");

    sb.cmd()
        .arg("ask.rb")
        .write_stdin("abc\n")
        .assert()
        .success()
        .stdout("got abc\n");
}

#[test]
fn program_exit_status_is_propagated() {
    let sb = Sandbox::new();
    sb.tool("python3", "exit 7").source("fail.py");

    sb.cmd()
        .arg("fail.py")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("python3 exited with status 7"));
}

#[test]
fn java_class_file_is_removed_after_run() {
    let sb = Sandbox::new();
    sb.tool("javac", ": > \"${1%.java}.class\"")
        .tool("java", "[ -f \"$1.class\" ] && echo ok")
        .source("Main.java");

    sb.cmd()
        .arg("Main.java")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));

    assert!(!sb.work().join("Main.class").exists());
    assert!(sb.work().join("Main.java").exists());
}

#[test]
fn packaged_java_class_is_run_by_qualified_name() {
    let sb = Sandbox::new();
    fs::create_dir_all(sb.work().join("com/example")).expect("package dir");
    sb.tool("javac", ": > \"${1%.java}.class\"")
        .tool("java", "echo \"$1\"")
        .source("com/example/App.java");

    sb.cmd()
        .arg("com/example/App.java")
        .assert()
        .success()
        .stdout("com.example.App\n");

    assert!(!sb.work().join("com/example/App.class").exists());
}

#[test]
fn non_unicode_environment_is_passed_through() {
    let sb = Sandbox::new();
    sb.tool("python3", "printf '%s\\n' \"$POLYRUN_BYTES\"")
        .source("hello.py");

    sb.cmd()
        .env("POLYRUN_BYTES", OsStr::from_bytes(b"caf\xe9"))
        .arg("hello.py")
        .assert()
        .success()
        .stdout(&b"caf\xe9\n"[..]);

    sb.cmd()
        .env("POLYRUN_BYTES", OsStr::from_bytes(b"caf\xe9"))
        .arg("notes.txt")
        .assert()
        .code(1)
        .stderr("Unknown language\n");
}

#[test]
fn non_unicode_arguments_are_forwarded_verbatim() {
    let sb = Sandbox::new();
    sb.tool("python3", "printf '%s\\n' \"$2\"").source("hello.py");

    sb.cmd()
        .arg("hello.py")
        .arg(OsStr::from_bytes(b"caf\xe9"))
        .assert()
        .success()
        .stdout(&b"caf\xe9\n"[..]);
}

#[test]
fn c_compile_failure_skips_run() {
    let sb = Sandbox::new();
    sb.tool("gcc", "echo 'syntax error' >&2; exit 1")
        .source("prog.c");

    sb.cmd()
        .arg("--temp-dir")
        .arg(sb.tmp())
        .args(["prog.c", "extra"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("syntax error"));

    assert!(is_empty_dir(&sb.tmp()));
}

#[test]
fn c_binary_runs_and_is_removed() {
    let sb = Sandbox::new();
    sb.tool(
        "gcc",
        "printf '#!/bin/sh\\necho \"built $*\"\\n' > \"$2\"; chmod 755 \"$2\"",
    )
    .source("prog.c");

    let path = format!("{}:/bin:/usr/bin", sb.root.path().join("bin").display());
    sb.cmd()
        .env("PATH", path)
        .env("POLYRUN_TEMP_DIR", sb.tmp())
        .args(["prog.c", "x"])
        .assert()
        .success()
        .stdout("built x\n");

    assert!(is_empty_dir(&sb.tmp()));
}

#[test]
fn missing_tool_is_reported() {
    let sb = Sandbox::new();
    sb.source("main.rb");

    sb.cmd()
        .arg("main.rb")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("command not found: ruby"));
}

#[test]
fn unsupported_and_unknown_languages() {
    let sb = Sandbox::new();

    sb.cmd()
        .arg("main.rs")
        .assert()
        .code(1)
        .stderr("this language is not yet supported or invalid file format\n");

    sb.cmd()
        .arg("notes.txt")
        .assert()
        .code(1)
        .stderr("Unknown language\n");
}

#[test]
fn version_and_help_do_not_dispatch() {
    let sb = Sandbox::new();

    sb.cmd()
        .args(["--version", "hello.py"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("polyrun "));

    for flag in ["-h", "--help"] {
        sb.cmd()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    sb.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

use crate::artifact::Artifact;
use crate::command::{ExitCode, Invocation, Launcher, ProcessOutput};
use crate::config::Config;
use crate::error::RunError;
use crate::language::{Language, classify, strip_extension, strip_os_extension};
use std::ffi::OsString;
use std::io::Write;
use tracing::{info, warn};

/// How a language gets from source file to running program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    /// Hand the source to an interpreter: `<program> <leading..> <source> <args..>`.
    Interpret {
        program: &'static str,
        leading: &'static [&'static str],
    },
    /// The source itself is the program.
    Execute,
    /// `<compiler> -o <tmp>/<stem> <source>`, then run the binary.
    Native { compiler: &'static str },
    /// `javac <source>`, then `java <Class>`.
    Java,
    /// `tsc <source>`, then `node <stem>.js`.
    TypeScript,
}

impl Recipe {
    pub fn for_language(language: Language) -> Option<Recipe> {
        let recipe = match language {
            Language::Go => Recipe::Interpret {
                program: "go",
                leading: &["run"],
            },
            Language::Ruby => Recipe::Interpret {
                program: "ruby",
                leading: &[],
            },
            Language::Lua => Recipe::Interpret {
                program: "lua",
                leading: &[],
            },
            Language::Python => Recipe::Interpret {
                program: "python3",
                leading: &[],
            },
            Language::Perl => Recipe::Interpret {
                program: "perl",
                leading: &[],
            },
            Language::JavaScript => Recipe::Interpret {
                program: "node",
                leading: &[],
            },
            Language::Shell => Recipe::Execute,
            Language::C => Recipe::Native { compiler: "gcc" },
            Language::Cpp => Recipe::Native { compiler: "g++" },
            Language::Java => Recipe::Java,
            Language::TypeScript => Recipe::TypeScript,
            Language::CSharp
            | Language::Php
            | Language::Rust
            | Language::Dart
            | Language::Unknown => return None,
        };
        Some(recipe)
    }
}

/// Picks a [`Recipe`] for a source file and drives it through a [`Launcher`].
///
/// Compiler output is captured and copied to `stdout`/`stderr`; the program itself
/// always runs with inherited stdio so interactive programs work.
pub struct Dispatcher<'a> {
    launcher: &'a mut dyn Launcher,
    config: &'a Config,
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        launcher: &'a mut dyn Launcher,
        config: &'a Config,
        stdout: &'a mut dyn Write,
        stderr: &'a mut dyn Write,
    ) -> Self {
        Self {
            launcher,
            config,
            stdout,
            stderr,
        }
    }

    /// Classify `args[0]`, run it, and report any failure on stderr.
    ///
    /// Returns the exit status the process should finish with.
    pub fn dispatch(&mut self, args: &[OsString]) -> ExitCode {
        let language = args
            .first()
            .map_or(Language::Unknown, |source| classify(&source.to_string_lossy()));
        let command: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        info!(command = %command.join(" "), language = %language, "running command");

        match self.run(language, args) {
            Ok(()) => 0,
            Err(err) => {
                if let Err(e) = writeln!(self.stderr, "{err}") {
                    warn!(error = %e, "failed to report error");
                }
                err.exit_code()
            }
        }
    }

    /// Run `args[0]` as `language`, forwarding `args[1..]` to the program.
    pub fn run(&mut self, language: Language, args: &[OsString]) -> Result<(), RunError> {
        let (source, rest) = args.split_first().ok_or(RunError::MissingSource)?;
        let recipe = match Recipe::for_language(language) {
            Some(recipe) => recipe,
            None if language == Language::Unknown => return Err(RunError::UnknownLanguage),
            None => return Err(RunError::Unsupported(language)),
        };

        match recipe {
            Recipe::Interpret { program, leading } => {
                let argv = leading
                    .iter()
                    .map(|arg| OsString::from(*arg))
                    .chain(std::iter::once(source.clone()))
                    .chain(rest.iter().cloned());
                self.execute(Invocation::streamed(program, argv))
            }
            Recipe::Execute => self.execute(Invocation::streamed(source, rest)),
            Recipe::Native { compiler } => {
                let binary = self.config.binary_path(source);
                let argv = [OsString::from("-o"), binary.clone().into(), source.clone()];
                self.compile(Invocation::captured(compiler, argv))?;

                let binary = Artifact::new(binary);
                self.execute(Invocation::streamed(binary.path(), rest))
            }
            Recipe::Java => {
                self.compile(Invocation::captured("javac", [source]))?;

                let mut class_file = strip_os_extension(source);
                class_file.push(".class");
                let _class_file = Artifact::new(class_file);
                let class_name = OsString::from(java_class_name(&source.to_string_lossy()));
                let argv = std::iter::once(class_name).chain(rest.iter().cloned());
                self.execute(Invocation::streamed("java", argv))
            }
            Recipe::TypeScript => {
                self.compile(Invocation::captured("tsc", [source]))?;

                let mut script = strip_os_extension(source);
                script.push(".js");
                let script = Artifact::new(script);
                let argv = std::iter::once(OsString::from(script.path()))
                    .chain(rest.iter().cloned());
                self.execute(Invocation::streamed("node", argv))
            }
        }
    }

    fn compile(&mut self, invocation: Invocation) -> Result<(), RunError> {
        let output = self.launcher.launch(&invocation)?;
        if !output.stderr.is_empty() {
            self.stderr.write_all(&output.stderr)?;
        }
        if !output.stdout.is_empty() {
            self.stdout.write_all(&output.stdout)?;
        }
        self.stderr.flush()?;
        self.stdout.flush()?;
        check_status(&invocation, &output)
    }

    fn execute(&mut self, invocation: Invocation) -> Result<(), RunError> {
        let output = self.launcher.launch(&invocation)?;
        check_status(&invocation, &output)
    }
}

fn check_status(invocation: &Invocation, output: &ProcessOutput) -> Result<(), RunError> {
    if output.success() {
        Ok(())
    } else {
        Err(RunError::Exited {
            program: invocation.program_name(),
            code: output.status,
        })
    }
}

/// Package-qualified class name: `src/pkg/Main.java` becomes `src.pkg.Main`.
fn java_class_name(source: &str) -> String {
    let stem = strip_extension(source);
    let stem = stem.strip_prefix("./").unwrap_or(stem);
    stem.replace(['/', '\\'], ".")
}

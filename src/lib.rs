//! Run a source file with the toolchain that matches its extension.
//!
//! The crate is split into a small classifier that maps a filename to a [`Language`],
//! and a [`Dispatcher`] that looks the language up in a fixed recipe table and drives
//! the external compiler and/or interpreter through a [`Launcher`]. The launcher is the
//! only place that touches real processes, so everything above it can be exercised
//! with a fake.
//!
//! ```
//! use polyrun::{Language, classify};
//! assert_eq!(classify("hello.PY"), Language::Python);
//! assert_eq!(classify("README"), Language::Unknown);
//! ```

mod artifact;
pub mod cli;
pub mod command;
pub mod config;
pub mod env;
mod error;
mod external;
pub mod language;
pub mod logging;
mod runner;

pub use artifact::Artifact;
pub use config::Config;
pub use error::RunError;
pub use external::{SystemLauncher, find_command_path};
pub use language::{Language, classify, strip_extension, strip_os_extension};
pub use runner::{Dispatcher, Recipe};

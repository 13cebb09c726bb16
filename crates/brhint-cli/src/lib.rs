//! brhint CLI Library
//!
//! Command-line interface for collecting branch hints from instrumented
//! WASM modules.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
pub mod output;

pub use commands::{
    Cli, ColorArg, Commands, FormatArg, LogFormatArg, OutputArgs, ReplayArgs, RunArgs,
};
pub use config::{CliConfig, ColorChoice, LogFormat, Verbosity};
pub use error::{CliError, CliResult};

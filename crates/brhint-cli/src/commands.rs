//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// brhint: branch hint profiling for instrumented WASM modules
#[derive(Parser, Debug)]
#[command(name = "brhint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress everything but the hints and errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an instrumented WASM module and emit its branch hints
    Run(RunArgs),

    /// Replay a recorded signal trace and emit its branch hints
    Replay(ReplayArgs),
}

/// Where and how to write the hints
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write hints to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Emit the hint string as a log event instead of printing it
    #[arg(long, conflicts_with_all = ["output", "format"])]
    pub log_hints: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Instrumented module (.wasm or .wat)
    pub module: PathBuf,

    /// YAML host configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export to call (default: _main)
    #[arg(short, long)]
    pub entry: Option<String>,

    /// Module name of the profiling import (default: detected)
    #[arg(long)]
    pub import_module: Option<String>,

    /// Field name of the profiling import (default: __magic_pgo_function__)
    #[arg(long)]
    pub import_name: Option<String>,

    /// Emit hints collected before a trap instead of failing
    #[arg(long)]
    pub report_on_trap: bool,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Signal trace file, or `-` for stdin
    pub trace: PathBuf,

    /// Output options
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// The hint string only
    #[default]
    Text,
    /// Hint string, summary and per-site counters as JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Auto-detect
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Log format argument
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for crate::config::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, LogFormat};

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "brhint",
            "run",
            "app.wasm",
            "--entry",
            "start",
            "--import-module",
            "i",
            "-o",
            "hints.txt",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.module, PathBuf::from("app.wasm"));
                assert_eq!(args.entry.as_deref(), Some("start"));
                assert_eq!(args.import_module.as_deref(), Some("i"));
                assert!(args.import_name.is_none());
                assert!(!args.report_on_trap);
                assert_eq!(args.output.output, Some(PathBuf::from("hints.txt")));
                assert_eq!(args.output.format, FormatArg::Text);
            }
            Commands::Replay(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_replay_json() {
        let cli = Cli::parse_from(["brhint", "-vv", "replay", "-", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.trace, PathBuf::from("-"));
                assert_eq!(args.output.format, FormatArg::Json);
            }
            Commands::Run(_) => panic!("expected replay"),
        }
    }

    #[test]
    fn test_parse_log_options() {
        let cli = Cli::parse_from([
            "brhint",
            "replay",
            "t.txt",
            "--log-hints",
            "--log-format",
            "json",
        ]);
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert_eq!(LogFormat::from(cli.log_format), LogFormat::Json);
        match cli.command {
            Commands::Replay(args) => assert!(args.output.log_hints),
            Commands::Run(_) => panic!("expected replay"),
        }
    }

    #[test]
    fn test_log_hints_conflicts_with_file_output() {
        let result =
            Cli::try_parse_from(["brhint", "replay", "t.txt", "--log-hints", "-o", "hints.txt"]);
        assert!(result.is_err());
        let result =
            Cli::try_parse_from(["brhint", "replay", "t.txt", "--log-hints", "-f", "json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(Cli::try_parse_from(["brhint"]).is_err());
    }

    #[test]
    fn test_color_conversion() {
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! brhint CLI: collect branch hints from instrumented WASM modules
//!
//! ## Usage
//!
//! ```bash
//! brhint run app.wasm                    # Run _main, print hints
//! brhint run app.wasm -o hints.txt       # Write hints to a file
//! brhint replay trace.txt --format json  # Replay a recorded signal trace
//! ```

use brhint_cli::{
    handlers::{execute_replay, execute_run},
    logging::init_logging,
    Cli, CliConfig, CliResult, ColorChoice, Commands, LogFormat, Verbosity,
};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    console::set_colors_enabled_stderr(config.color.should_color());
    init_logging(&config);

    match cli.command {
        Commands::Run(args) => execute_run(&config, &args),
        Commands::Replay(args) => execute_replay(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.into();
    let log_format: LogFormat = cli.log_format.into();
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_log_format(log_format)
}

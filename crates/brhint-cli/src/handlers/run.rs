//! Run command handler

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{emit_report, print_summary, print_warning};
use brhint::{HostConfig, ProfilingHost};
use tracing::debug;

/// Host configuration from the optional YAML file, overridden by flags
pub fn build_host_config(args: &RunArgs) -> CliResult<HostConfig> {
    let mut host = match &args.config {
        Some(path) => HostConfig::load(path)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?,
        None => HostConfig::default(),
    };
    if let Some(entry) = &args.entry {
        host = host.with_entry(entry);
    }
    if let Some(module) = &args.import_module {
        host = host.with_import_module(module);
    }
    if let Some(name) = &args.import_name {
        host = host.with_import_name(name);
    }
    if args.report_on_trap {
        host = host.with_report_on_trap(true);
    }
    host.validate()?;
    Ok(host)
}

/// Execute the run command
pub fn execute_run(config: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let host_config = build_host_config(args)?;
    debug!(?host_config, module = %args.module.display(), "host configuration");

    let bytes = std::fs::read(&args.module)
        .map_err(|e| CliError::input(args.module.display().to_string(), e.to_string()))?;
    let host = ProfilingHost::new(host_config)?;
    let mut run = host.run(&bytes)?;

    let report = emit_report(&mut run.session, &args.output, run.trap.as_deref())?;
    if let Some(trap) = &run.trap {
        print_warning(
            config,
            &format!("module trapped, hints cover the run up to the trap: {trap}"),
        );
    }
    print_summary(config, &report, args.output.output.as_deref());
    Ok(())
}

//! WASM Host for Instrumented Modules
//!
//! Instantiates an instrumented module with the ingestion import bound to a
//! [`ProfilingSession`], runs the entry export to completion, and hands the
//! session back for reporting.
//!
//! Imports other than the ingestion function are stubbed to trap when
//! called, so modules with unrelated imports still instantiate.

use crate::config::{HostConfig, FALLBACK_IMPORT_MODULE};
use crate::profile::{HintReport, HintSink, ProfilingSession};
use crate::result::{BrhintError, BrhintResult};
use std::path::Path;
use tracing::{info, warn};
use wasmtime::{Caller, Engine, Linker, Module, Store};

/// Outcome of running an instrumented module
#[derive(Debug)]
pub struct ProfiledRun {
    /// Session holding everything ingested during the run
    pub session: ProfilingSession,
    /// Trap message, when the run ended in a trap and the config allows reporting
    pub trap: Option<String>,
}

/// Runs instrumented modules under `wasmtime`
#[derive(Clone)]
pub struct ProfilingHost {
    engine: Engine,
    config: HostConfig,
}

impl std::fmt::Debug for ProfilingHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingHost")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProfilingHost {
    /// Create a host with a default engine
    pub fn new(config: HostConfig) -> BrhintResult<Self> {
        config.validate()?;
        Ok(Self {
            engine: Engine::default(),
            config,
        })
    }

    /// Host configuration
    #[must_use]
    pub const fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Compile a module from binary or text format
    pub fn compile(&self, bytes: &[u8]) -> BrhintResult<Module> {
        Module::new(&self.engine, bytes).map_err(|e| BrhintError::wasm(format!("{e:#}")))
    }

    /// Module name the ingestion import is bound under.
    ///
    /// An explicit setting wins; otherwise the module's own declaration of
    /// the import is used, then the module of its first import.
    #[must_use]
    pub fn import_module_for(&self, module: &Module) -> String {
        if let Some(name) = &self.config.import_module {
            return name.clone();
        }
        module
            .imports()
            .find(|import| import.name() == self.config.import_name)
            .or_else(|| module.imports().next())
            .map_or_else(
                || FALLBACK_IMPORT_MODULE.to_string(),
                |import| import.module().to_string(),
            )
    }

    /// Instantiate and run a compiled module
    pub fn run_module(&self, module: &Module) -> BrhintResult<ProfiledRun> {
        let import_module = self.import_module_for(module);
        let mut linker: Linker<ProfilingSession> = Linker::new(&self.engine);
        linker
            .func_wrap(
                &import_module,
                &self.config.import_name,
                |mut caller: Caller<'_, ProfilingSession>, signal: i32| {
                    caller.data_mut().ingest(signal);
                },
            )
            .map_err(|e| BrhintError::wasm(format!("{e:#}")))?;
        linker
            .define_unknown_imports_as_traps(module)
            .map_err(|e| BrhintError::wasm(format!("{e:#}")))?;

        let mut store = Store::new(&self.engine, ProfilingSession::new());
        let instance = linker
            .instantiate(&mut store, module)
            .map_err(|e| BrhintError::wasm(format!("{e:#}")))?;
        let entry = instance
            .get_typed_func::<(), ()>(&mut store, &self.config.entry)
            .map_err(|e| BrhintError::EntryNotFound {
                name: self.config.entry.clone(),
                message: format!("{e:#}"),
            })?;

        let import = format!("{import_module}::{}", self.config.import_name);
        info!(entry = %self.config.entry, %import, "running instrumented module");
        let outcome = entry.call(&mut store, ());
        let session = store.into_data();
        info!(
            signals = session.ingestor().signal_count(),
            events = session.aggregator().total_events(),
            "instrumented module finished"
        );

        match outcome {
            Ok(()) => Ok(ProfiledRun {
                session,
                trap: None,
            }),
            Err(e) => {
                let message = format!("{e:#}");
                if self.config.report_on_trap {
                    warn!(%message, "module trapped; keeping partial profile");
                    Ok(ProfiledRun {
                        session,
                        trap: Some(message),
                    })
                } else {
                    Err(BrhintError::trap(message))
                }
            }
        }
    }

    /// Compile and run module bytes
    pub fn run(&self, bytes: &[u8]) -> BrhintResult<ProfiledRun> {
        let module = self.compile(bytes)?;
        self.run_module(&module)
    }

    /// Read, compile and run a module file
    pub fn run_file(&self, path: impl AsRef<Path>) -> BrhintResult<ProfiledRun> {
        let bytes = std::fs::read(path)?;
        self.run(&bytes)
    }

    /// Run a module, then trigger the report into `sink`
    pub fn run_and_report<S: HintSink + ?Sized>(
        &self,
        bytes: &[u8],
        sink: &mut S,
    ) -> BrhintResult<HintReport> {
        let mut run = self.run(bytes)?;
        run.session.report(sink)
    }
}

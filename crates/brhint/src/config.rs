//! Host configuration
//!
//! How an instrumented module is wired up and run. Loadable from YAML, every
//! field optional:
//!
//! ```yaml
//! entry: _main
//! import_module: i
//! import_name: __magic_pgo_function__
//! report_on_trap: true
//! ```

use crate::result::{BrhintError, BrhintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Import name the instrumentation pass adds to the module
pub const DEFAULT_IMPORT_NAME: &str = "__magic_pgo_function__";

/// Export run by default
pub const DEFAULT_ENTRY: &str = "_main";

/// Import module used when the module does not declare the import itself
pub const FALLBACK_IMPORT_MODULE: &str = "env";

/// Configuration for running an instrumented module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Export called to run the program (`() -> ()`)
    pub entry: String,
    /// Module name of the ingestion import; detected from the module when unset
    pub import_module: Option<String>,
    /// Field name of the ingestion import
    pub import_name: String,
    /// Still emit hints when the module traps
    pub report_on_trap: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.to_string(),
            import_module: None,
            import_name: DEFAULT_IMPORT_NAME.to_string(),
            report_on_trap: false,
        }
    }
}

impl HostConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from YAML text
    pub fn from_yaml(text: &str) -> BrhintResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn load(path: impl AsRef<Path>) -> BrhintResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Set the entry export
    #[must_use]
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Set the import module name
    #[must_use]
    pub fn with_import_module(mut self, module: impl Into<String>) -> Self {
        self.import_module = Some(module.into());
        self
    }

    /// Set the import field name
    #[must_use]
    pub fn with_import_name(mut self, name: impl Into<String>) -> Self {
        self.import_name = name.into();
        self
    }

    /// Report collected hints even if the module traps
    #[must_use]
    pub const fn with_report_on_trap(mut self, enabled: bool) -> Self {
        self.report_on_trap = enabled;
        self
    }

    /// Reject empty names
    pub fn validate(&self) -> BrhintResult<()> {
        if self.entry.is_empty() {
            return Err(BrhintError::config("entry must not be empty"));
        }
        if self.import_name.is_empty() {
            return Err(BrhintError::config("import_name must not be empty"));
        }
        if self.import_module.as_deref() == Some("") {
            return Err(BrhintError::config("import_module must not be empty"));
        }
        Ok(())
    }
}

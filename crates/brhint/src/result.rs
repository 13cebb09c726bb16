//! Result and error types for brhint.
//!
//! Ingestion, aggregation and classification never fail; these errors come
//! from the edges (sinks, configuration, traces, the wasm host).

use thiserror::Error;

/// Result type for brhint operations
pub type BrhintResult<T> = Result<T, BrhintError>;

/// Errors that can occur at brhint's edges
#[derive(Debug, Error)]
pub enum BrhintError {
    /// Configuration is invalid
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Signal trace could not be parsed
    #[error("Invalid signal trace at line {line}: {message}")]
    Trace {
        /// 1-based line number
        line: usize,
        /// Error message
        message: String,
    },

    /// Module failed to compile or instantiate
    #[error("WASM module error: {message}")]
    WasmError {
        /// Error message
        message: String,
    },

    /// Entry export missing or of the wrong type
    #[error("Entry point {name:?} not found: {message}")]
    EntryNotFound {
        /// Export name
        name: String,
        /// Error message
        message: String,
    },

    /// Instrumented module trapped while running
    #[error("WASM execution trapped: {message}")]
    Trap {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BrhintError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a WASM module error
    #[must_use]
    pub fn wasm(message: impl Into<String>) -> Self {
        Self::WasmError {
            message: message.into(),
        }
    }

    /// Create a trap error
    #[must_use]
    pub fn trap(message: impl Into<String>) -> Self {
        Self::Trap {
            message: message.into(),
        }
    }

    /// Whether this error is a trap inside the instrumented module
    #[must_use]
    pub const fn is_trap(&self) -> bool {
        matches!(self, Self::Trap { .. })
    }
}

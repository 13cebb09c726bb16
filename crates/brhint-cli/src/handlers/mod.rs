//! Command handlers - kept out of main.rs for testability

pub mod replay;
pub mod run;

pub use replay::{execute_replay, read_trace, replay_signals};
pub use run::{build_host_config, execute_run};
